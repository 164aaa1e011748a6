//! Label data access.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, warn};

use fundoo_core::cache::{
    label_attached, label_deleted, label_key, label_written, user_labels_key, AffectedKeys, Cache,
};
use fundoo_core::notes::{validate_label_name, Label, LabelNote, NewLabel, UpdateLabelRequest};
use fundoo_core::storage::{LabelRepository, NoteRepository, RepositoryError};

use super::cached;
use super::error::{conflict_as, missing_as, AccessError, AccessResult, Outcome};

const LABEL_TAKEN: &str = "Label already exists!";
const LABEL_MISSING: &str = "Label not found!";

/// Cached label operations.
///
/// The per-user label list is rewritten from the store after every label
/// mutation rather than evicted.
pub struct LabelAccess<R, C>
where
    R: LabelRepository + NoteRepository,
    C: Cache,
{
    repository: Arc<R>,
    cache: Arc<C>,
    ttl: Duration,
}

impl<R, C> LabelAccess<R, C>
where
    R: LabelRepository + NoteRepository,
    C: Cache,
{
    pub fn new(repository: Arc<R>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            ttl,
        }
    }

    /// Creates a label. Names are unique per user.
    pub async fn create(&self, user_id: i64, name: &str) -> AccessResult<Label> {
        validate_label_name(name)?;
        if self
            .repository
            .get_label_by_name(user_id, name)
            .await?
            .is_some()
        {
            return Err(AccessError::already_exists(LABEL_TAKEN));
        }

        let label = self
            .repository
            .create_label(&NewLabel {
                user_id,
                name: name.to_string(),
                created_at: Utc::now(),
            })
            .await
            .map_err(conflict_as(LABEL_TAKEN))?;

        self.apply(&label_written(&label), Some(&label), user_id)
            .await;

        debug!(user_id, label_id = label.id, "Label created");
        Ok(Outcome::ok("Label created successfully", label))
    }

    /// Deletes a label by name, detaching it from every note.
    pub async fn delete(&self, user_id: i64, name: &str) -> AccessResult<()> {
        let label = self.owned_label_by_name(user_id, name).await?;

        self.repository
            .delete_label(label.id)
            .await
            .map_err(missing_as(LABEL_MISSING))?;

        self.apply(&label_deleted(&label), None, user_id).await;

        debug!(user_id, label_id = label.id, "Label deleted");
        Ok(Outcome::done("Label deleted successfully"))
    }

    /// Attaches a label to one of the user's notes.
    pub async fn add_to_note(
        &self,
        user_id: i64,
        name: &str,
        note_id: i64,
    ) -> AccessResult<LabelNote> {
        const ALREADY_LINKED: &str = "Label already exists for this note!";

        let label = self.owned_label_by_name(user_id, name).await?;
        self.repository
            .get_note(note_id)
            .await?
            .filter(|note| note.user_id == user_id)
            .ok_or_else(|| AccessError::not_found("Note not found!"))?;

        let link = LabelNote {
            label_id: label.id,
            note_id,
        };
        if self.repository.has_label_note(link).await? {
            return Err(AccessError::already_exists(ALREADY_LINKED));
        }
        self.repository
            .add_label_note(link)
            .await
            .map_err(conflict_as(ALREADY_LINKED))?;

        self.apply(&label_attached(&label), Some(&label), user_id)
            .await;

        debug!(user_id, label_id = label.id, note_id, "Label attached");
        Ok(Outcome::ok("Label added to note successfully", link))
    }

    /// Every label the user owns, ordered by name.
    pub async fn view_all(&self, user_id: i64) -> AccessResult<Vec<Label>> {
        let key = user_labels_key(user_id);
        if let Some(labels) = cached::read::<Vec<Label>, _>(&*self.cache, &key).await {
            return Ok(Outcome::ok("Labels retrieved from cache", labels));
        }

        let labels = self.repository.get_labels_for_user(user_id).await?;
        cached::write(&*self.cache, &[key], &labels, self.ttl).await;
        Ok(Outcome::ok("Labels retrieved successfully", labels))
    }

    /// Renames a label, keeping names unique per user.
    pub async fn rename(&self, user_id: i64, request: UpdateLabelRequest) -> AccessResult<Label> {
        validate_label_name(&request.new_name)?;
        let label = self.owned_label_by_name(user_id, &request.old_name).await?;

        if request.new_name != request.old_name
            && self
                .repository
                .get_label_by_name(user_id, &request.new_name)
                .await?
                .is_some()
        {
            return Err(AccessError::already_exists(LABEL_TAKEN));
        }

        let renamed = Label {
            name: request.new_name,
            updated_at: Utc::now(),
            ..label
        };
        self.repository
            .update_label(&renamed)
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound { .. } => AccessError::not_found(LABEL_MISSING),
                other => conflict_as(LABEL_TAKEN)(other),
            })?;

        self.apply(&label_written(&renamed), Some(&renamed), user_id)
            .await;

        debug!(user_id, label_id = renamed.id, "Label renamed");
        Ok(Outcome::ok("Label updated successfully", renamed))
    }

    /// A single label by id.
    pub async fn get_by_id(&self, user_id: i64, label_id: i64) -> AccessResult<Label> {
        let key = label_key(user_id, label_id);
        if let Some(label) = cached::read::<Label, _>(&*self.cache, &key).await {
            return Ok(Outcome::ok("Label retrieved from cache", label));
        }

        let label = self.owned_label(user_id, label_id).await?;
        cached::write(&*self.cache, &[key], &label, self.ttl).await;
        Ok(Outcome::ok("Label retrieved from database", label))
    }

    /// Ids of the notes carrying a label.
    pub async fn notes_for_label(&self, user_id: i64, label_id: i64) -> AccessResult<Vec<i64>> {
        let label = self.owned_label(user_id, label_id).await?;
        let note_ids = self.repository.get_note_ids_for_label(label.id).await?;
        Ok(Outcome::ok("Notes retrieved successfully", note_ids))
    }

    async fn owned_label(&self, user_id: i64, label_id: i64) -> Result<Label, AccessError> {
        self.repository
            .get_label(label_id)
            .await?
            .filter(|label| label.user_id == user_id)
            .ok_or_else(|| AccessError::not_found(LABEL_MISSING))
    }

    async fn owned_label_by_name(&self, user_id: i64, name: &str) -> Result<Label, AccessError> {
        self.repository
            .get_label_by_name(user_id, name)
            .await?
            .ok_or_else(|| AccessError::not_found(LABEL_MISSING))
    }

    /// Applies a label invalidation set. `rebuild` keys are reloaded from the
    /// store; when that fails the key is evicted instead.
    async fn apply(&self, affected: &AffectedKeys, label: Option<&Label>, user_id: i64) {
        if let Some(label) = label {
            cached::write(&*self.cache, &affected.refresh, label, self.ttl).await;
        }
        cached::evict(&*self.cache, &affected.evict).await;

        if affected.rebuild.is_empty() {
            return;
        }
        match self.repository.get_labels_for_user(user_id).await {
            Ok(labels) => cached::write(&*self.cache, &affected.rebuild, &labels, self.ttl).await,
            Err(err) => {
                warn!(user_id, error = %err, "Failed to rebuild label list");
                cached::evict(&*self.cache, &affected.rebuild).await;
            }
        }
    }
}
