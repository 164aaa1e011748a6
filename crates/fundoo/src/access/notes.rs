//! Note data access: creation, listings and field transitions.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use fundoo_core::cache::{
    note_deleted, note_key, note_written, user_archived_notes_key, user_notes_key,
    user_pinned_notes_key, AffectedKeys, Cache,
};
use fundoo_core::files::{image_relative_path, validate_image, FileStore, ImageUpload};
use fundoo_core::notes::{
    apply_action, archived_notes, merge_notes, pinned_notes, validate_background_color,
    validate_new_note, validate_note_update, CreateNoteRequest, NewNote, Note, NoteAction,
    UpdateNoteRequest,
};
use fundoo_core::storage::{CollaboratorRepository, NoteRepository, UserRepository};

use super::cached;
use super::error::{missing_as, AccessError, AccessResult, Outcome};
use super::sharing::sharer_ids;

const FROM_CACHE: &str = "Notes retrieved from cache";
const FROM_STORE: &str = "Notes retrieved from database!";
const NOT_OWNED: &str = "Note not found or doesn't belong to user";

/// Which of a user's cached note lists to read.
#[derive(Debug, Clone, Copy)]
enum NoteList {
    All,
    Pinned,
    Archived,
}

impl NoteList {
    fn key(self, user_id: i64) -> String {
        match self {
            NoteList::All => user_notes_key(user_id),
            NoteList::Pinned => user_pinned_notes_key(user_id),
            NoteList::Archived => user_archived_notes_key(user_id),
        }
    }
}

/// Cached note operations.
///
/// Mutations always start from the stored row, never from a cached
/// snapshot, and refresh the note's own keys afterwards.
pub struct NoteAccess<R, C>
where
    R: NoteRepository + UserRepository + CollaboratorRepository,
    C: Cache,
{
    repository: Arc<R>,
    cache: Arc<C>,
    files: Arc<dyn FileStore>,
    ttl: Duration,
}

impl<R, C> NoteAccess<R, C>
where
    R: NoteRepository + UserRepository + CollaboratorRepository,
    C: Cache,
{
    pub fn new(
        repository: Arc<R>,
        cache: Arc<C>,
        files: Arc<dyn FileStore>,
        ttl: Duration,
    ) -> Self {
        Self {
            repository,
            cache,
            files,
            ttl,
        }
    }

    /// Creates a note for an existing user.
    pub async fn create(&self, user_id: i64, request: CreateNoteRequest) -> AccessResult<Note> {
        if self.repository.get_user(user_id).await?.is_none() {
            return Err(AccessError::not_found("User not found"));
        }
        validate_new_note(&request)?;

        let note = self
            .repository
            .create_note(&NewNote {
                user_id,
                title: request.title,
                description: request.description,
                reminder: request.reminder,
                background_color: request.background_color,
                pinned: request.pinned,
                archived: request.archived,
                trashed: request.trashed,
                created_at: Utc::now(),
            })
            .await?;

        self.apply(&note_written(None, &note, &[]), &note).await;

        debug!(user_id, note_id = note.id, "Note created");
        Ok(Outcome::ok(
            "Awesome! Your note has been successfully created!",
            note,
        ))
    }

    /// Every note the user owns or has been shared, newest first.
    pub async fn get_all(&self, user_id: i64) -> AccessResult<Vec<Note>> {
        self.list(user_id, NoteList::All).await
    }

    /// The user's pinned notes, newest first.
    pub async fn get_pinned(&self, user_id: i64) -> AccessResult<Vec<Note>> {
        self.list(user_id, NoteList::Pinned).await
    }

    /// The user's archived notes, newest first.
    pub async fn get_archived(&self, user_id: i64) -> AccessResult<Vec<Note>> {
        self.list(user_id, NoteList::Archived).await
    }

    /// A single note by id.
    pub async fn get(&self, note_id: i64) -> AccessResult<Note> {
        let key = note_key(note_id);
        if let Some(note) = cached::read::<Note, _>(&*self.cache, &key).await {
            return Ok(Outcome::ok("Note retrieved from cache", note));
        }

        let note = self
            .repository
            .get_note(note_id)
            .await?
            .ok_or_else(|| AccessError::not_found("Note not found"))?;
        cached::write(&*self.cache, &[key], &note, self.ttl).await;
        Ok(Outcome::ok("Note retrieved from database", note))
    }

    /// Replaces a note's editable fields.
    pub async fn update(
        &self,
        user_id: i64,
        note_id: i64,
        request: UpdateNoteRequest,
    ) -> AccessResult<Note> {
        validate_note_update(&request)?;
        let before = self.owned_note(user_id, note_id).await?;
        let (note, _) = self.commit(before, NoteAction::Update(request)).await?;
        Ok(Outcome::ok("Note updated successfully", note))
    }

    pub async fn toggle_pin(&self, user_id: i64, note_id: i64) -> AccessResult<Note> {
        let before = self.owned_note(user_id, note_id).await?;
        let (note, _) = self.commit(before, NoteAction::TogglePin).await?;
        let message = if note.pinned {
            "Note pinned successfully"
        } else {
            "Note unpinned successfully"
        };
        Ok(Outcome::ok(message, note))
    }

    /// Archives and unpins a note. Archiving twice is a successful no-op.
    pub async fn archive(&self, user_id: i64, note_id: i64) -> AccessResult<Note> {
        let before = self.owned_note(user_id, note_id).await?;
        let (note, changed) = self.commit(before, NoteAction::Archive).await?;
        let message = if changed {
            "Note archived successfully"
        } else {
            "Note is already archived"
        };
        Ok(Outcome::ok(message, note))
    }

    pub async fn unarchive(&self, user_id: i64, note_id: i64) -> AccessResult<Note> {
        let before = self.owned_note(user_id, note_id).await?;
        let (note, changed) = self.commit(before, NoteAction::Unarchive).await?;
        let message = if changed {
            "Note unarchived successfully"
        } else {
            "Note is not archived"
        };
        Ok(Outcome::ok(message, note))
    }

    pub async fn trash(&self, user_id: i64, note_id: i64) -> AccessResult<Note> {
        let before = self.owned_note(user_id, note_id).await?;
        let (note, _) = self.commit(before, NoteAction::Trash).await?;
        Ok(Outcome::ok("Note moved to trash successfully", note))
    }

    pub async fn restore(&self, user_id: i64, note_id: i64) -> AccessResult<Note> {
        let before = self.owned_note(user_id, note_id).await?;
        let (note, _) = self.commit(before, NoteAction::Restore).await?;
        Ok(Outcome::ok("Note restored successfully", note))
    }

    pub async fn set_color(&self, user_id: i64, note_id: i64, color: &str) -> AccessResult<Note> {
        validate_background_color(color)?;
        let before = self.owned_note(user_id, note_id).await?;
        let (note, _) = self
            .commit(before, NoteAction::SetColor(color.to_string()))
            .await?;
        Ok(Outcome::ok("Background color updated successfully", note))
    }

    /// Stores an image and attaches it to the note.
    ///
    /// The file is written before the row, so a failed write leaves the
    /// note untouched.
    pub async fn upload_image(
        &self,
        user_id: i64,
        note_id: i64,
        upload: ImageUpload,
    ) -> AccessResult<Note> {
        let extension = validate_image(&upload)?;
        let before = self.owned_note(user_id, note_id).await?;

        let path = image_relative_path(&Uuid::new_v4().to_string(), &extension);
        self.files.save(&path, &upload.content).await?;

        let (note, _) = self.commit(before, NoteAction::AttachImage(path)).await?;
        Ok(Outcome::ok("Image uploaded successfully", note))
    }

    /// Deletes a note with its collaborators and label links.
    pub async fn delete(&self, user_id: i64, note_id: i64) -> AccessResult<()> {
        let note = self.owned_note(user_id, note_id).await?;
        // Collaborator rows go with the note, so resolve sharers first.
        let sharers = sharer_ids(&*self.repository, &note).await;

        self.repository
            .delete_note(note.id)
            .await
            .map_err(missing_as(NOT_OWNED))?;

        cached::evict(&*self.cache, &note_deleted(&note, &sharers).evict).await;

        debug!(user_id, note_id, "Note deleted");
        Ok(Outcome::done("Note deleted successfully"))
    }

    async fn list(&self, user_id: i64, list: NoteList) -> AccessResult<Vec<Note>> {
        let key = list.key(user_id);
        if let Some(notes) = cached::read::<Vec<Note>, _>(&*self.cache, &key).await {
            return Ok(Outcome::ok(FROM_CACHE, notes));
        }

        let notes = match list {
            NoteList::All => {
                let user = self
                    .repository
                    .get_user(user_id)
                    .await?
                    .ok_or_else(|| AccessError::not_found("User not found"))?;
                let owned = self.repository.get_notes_for_user(user_id).await?;
                let shared = self.repository.get_shared_notes(&user.email).await?;
                merge_notes(owned, shared)
            }
            NoteList::Pinned => pinned_notes(&self.repository.get_notes_for_user(user_id).await?),
            NoteList::Archived => {
                archived_notes(&self.repository.get_notes_for_user(user_id).await?)
            }
        };

        cached::write(&*self.cache, &[key], &notes, self.ttl).await;
        Ok(Outcome::ok(FROM_STORE, notes))
    }

    /// Loads a note from the store and checks that `user_id` owns it.
    async fn owned_note(&self, user_id: i64, note_id: i64) -> Result<Note, AccessError> {
        self.repository
            .get_note(note_id)
            .await?
            .filter(|note| note.user_id == user_id)
            .ok_or_else(|| AccessError::not_found(NOT_OWNED))
    }

    /// Applies an action to `before` and persists it.
    ///
    /// Returns the resulting note and whether anything changed.
    async fn commit(&self, before: Note, action: NoteAction) -> Result<(Note, bool), AccessError> {
        let Some(after) = apply_action(&before, &action, Utc::now()) else {
            return Ok((before, false));
        };

        self.repository
            .update_note(&after)
            .await
            .map_err(missing_as(NOT_OWNED))?;

        let sharers = sharer_ids(&*self.repository, &after).await;
        self.apply(&note_written(Some(&before), &after, &sharers), &after)
            .await;

        debug!(note_id = after.id, action = action.name(), "Note updated");
        Ok((after, true))
    }

    /// Ids of the users a note is shared with.
    ///
    /// Only used to pick cache keys, so a failed lookup is logged and
    /// skipped.
    async fn apply(&self, affected: &AffectedKeys, note: &Note) {
        cached::write(&*self.cache, &affected.refresh, note, self.ttl).await;
        cached::evict(&*self.cache, &affected.evict).await;
    }
}
