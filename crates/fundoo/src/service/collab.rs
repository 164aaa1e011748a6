use fundoo_core::cache::Cache;
use fundoo_core::notes::{Collaborator, CollaboratorRequest};
use fundoo_core::response::Response;
use fundoo_core::storage::{CollaboratorRepository, NoteRepository, UserRepository};

use super::respond;
use crate::access::CollabAccess;

/// Collaborator operations as response envelopes.
pub struct CollabService<R, C>
where
    R: CollaboratorRepository + NoteRepository + UserRepository,
    C: Cache,
{
    access: CollabAccess<R, C>,
}

impl<R, C> CollabService<R, C>
where
    R: CollaboratorRepository + NoteRepository + UserRepository,
    C: Cache,
{
    pub fn new(access: CollabAccess<R, C>) -> Self {
        Self { access }
    }

    pub async fn add(&self, user_id: i64, request: CollaboratorRequest) -> Response<Collaborator> {
        respond("add_collaborator", self.access.add(user_id, request).await)
    }

    pub async fn remove(&self, user_id: i64, request: CollaboratorRequest) -> Response<()> {
        respond(
            "remove_collaborator",
            self.access.remove(user_id, request).await,
        )
    }

    pub async fn get_all(&self, note_id: i64) -> Response<Vec<Collaborator>> {
        respond("get_collaborators", self.access.get_all(note_id).await)
    }
}
