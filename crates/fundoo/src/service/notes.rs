use fundoo_core::cache::Cache;
use fundoo_core::files::ImageUpload;
use fundoo_core::notes::{CreateNoteRequest, Note, UpdateNoteRequest};
use fundoo_core::response::Response;
use fundoo_core::storage::{CollaboratorRepository, NoteRepository, UserRepository};

use super::respond;
use crate::access::NoteAccess;

/// Note operations as response envelopes.
pub struct NotesService<R, C>
where
    R: NoteRepository + UserRepository + CollaboratorRepository,
    C: Cache,
{
    access: NoteAccess<R, C>,
}

impl<R, C> NotesService<R, C>
where
    R: NoteRepository + UserRepository + CollaboratorRepository,
    C: Cache,
{
    pub fn new(access: NoteAccess<R, C>) -> Self {
        Self { access }
    }

    pub async fn create(&self, user_id: i64, request: CreateNoteRequest) -> Response<Note> {
        respond("create_note", self.access.create(user_id, request).await)
    }

    pub async fn get_all(&self, user_id: i64) -> Response<Vec<Note>> {
        respond("get_notes", self.access.get_all(user_id).await)
    }

    pub async fn get_pinned(&self, user_id: i64) -> Response<Vec<Note>> {
        respond("get_pinned_notes", self.access.get_pinned(user_id).await)
    }

    pub async fn get_archived(&self, user_id: i64) -> Response<Vec<Note>> {
        respond("get_archived_notes", self.access.get_archived(user_id).await)
    }

    pub async fn get(&self, note_id: i64) -> Response<Note> {
        respond("get_note", self.access.get(note_id).await)
    }

    pub async fn update(
        &self,
        user_id: i64,
        note_id: i64,
        request: UpdateNoteRequest,
    ) -> Response<Note> {
        respond(
            "update_note",
            self.access.update(user_id, note_id, request).await,
        )
    }

    pub async fn toggle_pin(&self, user_id: i64, note_id: i64) -> Response<Note> {
        respond("toggle_pin", self.access.toggle_pin(user_id, note_id).await)
    }

    pub async fn archive(&self, user_id: i64, note_id: i64) -> Response<Note> {
        respond("archive_note", self.access.archive(user_id, note_id).await)
    }

    pub async fn unarchive(&self, user_id: i64, note_id: i64) -> Response<Note> {
        respond("unarchive_note", self.access.unarchive(user_id, note_id).await)
    }

    pub async fn trash(&self, user_id: i64, note_id: i64) -> Response<Note> {
        respond("trash_note", self.access.trash(user_id, note_id).await)
    }

    pub async fn restore(&self, user_id: i64, note_id: i64) -> Response<Note> {
        respond("restore_note", self.access.restore(user_id, note_id).await)
    }

    pub async fn set_color(&self, user_id: i64, note_id: i64, color: &str) -> Response<Note> {
        respond(
            "set_color",
            self.access.set_color(user_id, note_id, color).await,
        )
    }

    pub async fn upload_image(
        &self,
        user_id: i64,
        note_id: i64,
        upload: ImageUpload,
    ) -> Response<Note> {
        respond(
            "upload_image",
            self.access.upload_image(user_id, note_id, upload).await,
        )
    }

    pub async fn delete(&self, user_id: i64, note_id: i64) -> Response<()> {
        respond("delete_note", self.access.delete(user_id, note_id).await)
    }
}
