//! Who a note is shared with.

use futures_util::future::join_all;
use tracing::warn;

use fundoo_core::notes::Note;
use fundoo_core::storage::{CollaboratorRepository, UserRepository};

/// Ids of the registered users a note is shared with.
///
/// Best effort: a failed lookup is logged and the user skipped, since the
/// ids only pick cache keys to evict.
pub(crate) async fn sharer_ids<R>(repository: &R, note: &Note) -> Vec<i64>
where
    R: CollaboratorRepository + UserRepository + ?Sized,
{
    let collaborators = match repository.get_collaborators_for_note(note.id).await {
        Ok(collaborators) => collaborators,
        Err(err) => {
            warn!(note_id = note.id, error = %err, "Failed to load collaborators");
            return Vec::new();
        }
    };

    let lookups = collaborators
        .iter()
        .map(|c| repository.get_user_by_email(&c.email));
    join_all(lookups)
        .await
        .into_iter()
        .filter_map(|result| result.ok().flatten())
        .map(|user| user.id)
        .collect()
}

/// Sharer ids across several notes, each id once.
pub(crate) async fn sharer_ids_for_notes<R>(repository: &R, notes: &[Note]) -> Vec<i64>
where
    R: CollaboratorRepository + UserRepository + ?Sized,
{
    let mut ids: Vec<i64> = join_all(notes.iter().map(|note| sharer_ids(repository, note)))
        .await
        .into_iter()
        .flatten()
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
