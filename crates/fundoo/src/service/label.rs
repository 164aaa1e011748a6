use fundoo_core::cache::Cache;
use fundoo_core::notes::{Label, LabelNote, UpdateLabelRequest};
use fundoo_core::response::Response;
use fundoo_core::storage::{LabelRepository, NoteRepository};

use super::respond;
use crate::access::LabelAccess;

/// Label operations as response envelopes.
pub struct LabelService<R, C>
where
    R: LabelRepository + NoteRepository,
    C: Cache,
{
    access: LabelAccess<R, C>,
}

impl<R, C> LabelService<R, C>
where
    R: LabelRepository + NoteRepository,
    C: Cache,
{
    pub fn new(access: LabelAccess<R, C>) -> Self {
        Self { access }
    }

    pub async fn create(&self, user_id: i64, name: &str) -> Response<Label> {
        respond("create_label", self.access.create(user_id, name).await)
    }

    pub async fn delete(&self, user_id: i64, name: &str) -> Response<()> {
        respond("delete_label", self.access.delete(user_id, name).await)
    }

    pub async fn add_to_note(&self, user_id: i64, name: &str, note_id: i64) -> Response<LabelNote> {
        respond(
            "add_label_to_note",
            self.access.add_to_note(user_id, name, note_id).await,
        )
    }

    pub async fn view_all(&self, user_id: i64) -> Response<Vec<Label>> {
        respond("view_labels", self.access.view_all(user_id).await)
    }

    pub async fn rename(&self, user_id: i64, request: UpdateLabelRequest) -> Response<Label> {
        respond("rename_label", self.access.rename(user_id, request).await)
    }

    pub async fn get_by_id(&self, user_id: i64, label_id: i64) -> Response<Label> {
        respond("get_label", self.access.get_by_id(user_id, label_id).await)
    }

    pub async fn notes_for_label(&self, user_id: i64, label_id: i64) -> Response<Vec<i64>> {
        respond(
            "notes_for_label",
            self.access.notes_for_label(user_id, label_id).await,
        )
    }
}
