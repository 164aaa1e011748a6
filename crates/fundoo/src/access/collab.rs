//! Collaborator data access.
//!
//! A note's collaborators are cached as a list, one JSON element per row,
//! so an add appends in place instead of rewriting the list.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::debug;

use fundoo_core::cache::{collaborator_added, collaborator_removed, note_collaborators_key, Cache};
use fundoo_core::notes::{Collaborator, CollaboratorRequest, NewCollaborator, Note};
use fundoo_core::storage::{CollaboratorRepository, NoteRepository, UserRepository};

use super::cached;
use super::error::{conflict_as, missing_as, AccessError, AccessResult, Outcome};

const NOT_OWNED: &str = "Note not found or does not belong to the user.";
const MISSING: &str = "Collaborator does not exist.";

/// Cached collaborator operations.
pub struct CollabAccess<R, C>
where
    R: CollaboratorRepository + NoteRepository + UserRepository,
    C: Cache,
{
    repository: Arc<R>,
    cache: Arc<C>,
    ttl: Duration,
}

impl<R, C> CollabAccess<R, C>
where
    R: CollaboratorRepository + NoteRepository + UserRepository,
    C: Cache,
{
    pub fn new(repository: Arc<R>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            ttl,
        }
    }

    /// Shares a note with a registered user.
    pub async fn add(
        &self,
        user_id: i64,
        request: CollaboratorRequest,
    ) -> AccessResult<Collaborator> {
        const DUPLICATE: &str = "Collaborator already exists.";

        let note = self.owned_note(user_id, request.note_id).await?;
        let collaborator_user = self
            .repository
            .get_user_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                AccessError::not_found("Collaborator email does not exist in the system.")
            })?;

        if self
            .repository
            .get_collaborator(user_id, note.id, &request.email)
            .await?
            .is_some()
        {
            return Err(AccessError::already_exists(DUPLICATE));
        }

        let collaborator = self
            .repository
            .create_collaborator(&NewCollaborator {
                owner_id: user_id,
                note_id: note.id,
                email: request.email,
                created_at: Utc::now(),
            })
            .await
            .map_err(conflict_as(DUPLICATE))?;

        let affected = collaborator_added(&collaborator, Some(collaborator_user.id));
        for key in &affected.refresh {
            cached::append_list(&*self.cache, key, &collaborator, self.ttl).await;
        }
        cached::evict(&*self.cache, &affected.evict).await;

        debug!(
            user_id,
            note_id = note.id,
            collaborator_id = collaborator.id,
            "Collaborator added"
        );
        Ok(Outcome::ok("Collaborator added successfully.", collaborator))
    }

    /// Stops sharing a note with an email.
    pub async fn remove(&self, user_id: i64, request: CollaboratorRequest) -> AccessResult<()> {
        let note = self.owned_note(user_id, request.note_id).await?;
        let collaborator = self
            .repository
            .get_collaborator(user_id, note.id, &request.email)
            .await?
            .ok_or_else(|| AccessError::not_found(MISSING))?;

        self.repository
            .delete_collaborator(collaborator.id)
            .await
            .map_err(missing_as(MISSING))?;

        let collaborator_user_id = self
            .repository
            .get_user_by_email(&collaborator.email)
            .await
            .ok()
            .flatten()
            .map(|user| user.id);
        let affected = collaborator_removed(&collaborator, collaborator_user_id);
        for key in &affected.rebuild {
            self.rebuild_without(key, collaborator.id).await;
        }
        cached::evict(&*self.cache, &affected.evict).await;

        debug!(
            user_id,
            note_id = note.id,
            collaborator_id = collaborator.id,
            "Collaborator removed"
        );
        Ok(Outcome::done("Collaborator removed successfully."))
    }

    /// Every collaborator of a note, oldest first.
    pub async fn get_all(&self, note_id: i64) -> AccessResult<Vec<Collaborator>> {
        let key = note_collaborators_key(note_id);
        if let Some(collaborators) = cached::read_list(&*self.cache, &key).await {
            return Ok(Outcome::ok("Retrieved from cache", collaborators));
        }

        let collaborators = self.repository.get_collaborators_for_note(note_id).await?;
        cached::write_list(&*self.cache, &key, &collaborators, self.ttl).await;
        Ok(Outcome::ok("Retrieved from database", collaborators))
    }

    async fn owned_note(&self, user_id: i64, note_id: i64) -> Result<Note, AccessError> {
        self.repository
            .get_note(note_id)
            .await?
            .filter(|note| note.user_id == user_id)
            .ok_or_else(|| AccessError::not_found(NOT_OWNED))
    }

    /// Rewrites a cached list without one collaborator. An unreadable or
    /// absent list is left absent.
    async fn rebuild_without(&self, key: &str, collaborator_id: i64) {
        let Some(current) = cached::read_list::<Collaborator, _>(&*self.cache, key).await else {
            return;
        };
        let remaining: Vec<Collaborator> = current
            .into_iter()
            .filter(|c| c.id != collaborator_id)
            .collect();
        cached::write_list(&*self.cache, key, &remaining, self.ttl).await;
    }
}
