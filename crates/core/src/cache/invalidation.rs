//! Declared cache invalidation sets.
//!
//! Every mutation describes the keys it touches here, next to the key
//! scheme, and the access services apply the returned [`AffectedKeys`]
//! instead of listing keys at each call site.

use crate::notes::{Collaborator, Label, Note, User};

use super::keys::{
    label_key, note_collaborators_key, note_key, note_title_key, user_archived_notes_key,
    user_email_key, user_labels_key, user_name_key, user_note_list_keys, user_notes_key,
    user_pinned_notes_key,
};

/// Cache keys affected by one mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffectedKeys {
    /// Keys overwritten with the mutated entity's snapshot.
    pub refresh: Vec<String>,
    /// List keys recomputed right away. How a list is recomputed belongs to
    /// the entity's access service.
    pub rebuild: Vec<String>,
    /// Keys deleted so the next read goes to the store.
    pub evict: Vec<String>,
}

impl AffectedKeys {
    fn evict_unique(&mut self, key: String) {
        if !self.evict.contains(&key) && !self.refresh.contains(&key) {
            self.evict.push(key);
        }
    }

    /// Every key this mutation touches, in no particular order.
    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.refresh
            .iter()
            .chain(self.rebuild.iter())
            .chain(self.evict.iter())
    }
}

/// Keys a user snapshot is cached under.
pub fn user_keys(user: &User) -> Vec<String> {
    vec![user_email_key(&user.email), user_name_key(&user.first_name)]
}

/// A user row was inserted or updated.
///
/// When `before` has a different first name its by-name key is stale.
pub fn user_written(before: Option<&User>, after: &User) -> AffectedKeys {
    let mut affected = AffectedKeys {
        refresh: user_keys(after),
        ..AffectedKeys::default()
    };
    if let Some(before) = before {
        for key in user_keys(before) {
            affected.evict_unique(key);
        }
    }
    affected
}

/// A user row was deleted, cascading to the notes and labels they owned.
///
/// `sharer_ids` are the users the owned notes were shared with. `memberships`
/// are the collaborator rows that named the user on other owners' notes.
pub fn user_deleted(
    user: &User,
    notes: &[Note],
    labels: &[Label],
    sharer_ids: &[i64],
    memberships: &[Collaborator],
) -> AffectedKeys {
    let mut affected = AffectedKeys {
        evict: user_keys(user),
        ..AffectedKeys::default()
    };
    for key in user_note_list_keys(user.id) {
        affected.evict_unique(key);
    }
    affected.evict_unique(user_labels_key(user.id));
    for note in notes {
        affected.evict_unique(note_key(note.id));
        affected.evict_unique(note_title_key(note.user_id, &note.title));
        affected.evict_unique(note_collaborators_key(note.id));
    }
    for label in labels {
        affected.evict_unique(label_key(label.user_id, label.id));
    }
    for &sharer in sharer_ids {
        affected.evict_unique(user_notes_key(sharer));
    }
    for membership in memberships {
        affected.evict_unique(note_collaborators_key(membership.note_id));
    }
    affected
}

/// A note was created, changed, or had its image attached.
///
/// `sharer_ids` are the users the note is shared with; their note lists
/// include it. Pinned and archived lists are evicted only when the note is
/// or was in them.
pub fn note_written(before: Option<&Note>, after: &Note, sharer_ids: &[i64]) -> AffectedKeys {
    let mut affected = AffectedKeys {
        refresh: vec![
            note_key(after.id),
            note_title_key(after.user_id, &after.title),
        ],
        ..AffectedKeys::default()
    };
    if let Some(before) = before {
        affected.evict_unique(note_title_key(before.user_id, &before.title));
    }

    let was_pinned = before.is_some_and(|n| n.pinned);
    let was_archived = before.is_some_and(|n| n.archived);
    affected.evict_unique(user_notes_key(after.user_id));
    if was_pinned || after.pinned || before.is_some_and(|n| n.trashed != after.trashed) {
        affected.evict_unique(user_pinned_notes_key(after.user_id));
    }
    if was_archived || after.archived || before.is_some_and(|n| n.trashed != after.trashed) {
        affected.evict_unique(user_archived_notes_key(after.user_id));
    }
    for &sharer in sharer_ids {
        affected.evict_unique(user_notes_key(sharer));
    }
    affected
}

/// A note was deleted, taking its collaborators and label links with it.
pub fn note_deleted(note: &Note, sharer_ids: &[i64]) -> AffectedKeys {
    let mut affected = AffectedKeys {
        evict: vec![
            note_key(note.id),
            note_title_key(note.user_id, &note.title),
            note_collaborators_key(note.id),
        ],
        ..AffectedKeys::default()
    };
    for key in user_note_list_keys(note.user_id) {
        affected.evict_unique(key);
    }
    for &sharer in sharer_ids {
        affected.evict_unique(user_notes_key(sharer));
    }
    affected
}

/// A label was created or renamed.
pub fn label_written(label: &Label) -> AffectedKeys {
    AffectedKeys {
        refresh: vec![label_key(label.user_id, label.id)],
        rebuild: vec![user_labels_key(label.user_id)],
        evict: Vec::new(),
    }
}

/// A label was deleted.
pub fn label_deleted(label: &Label) -> AffectedKeys {
    AffectedKeys {
        refresh: Vec::new(),
        rebuild: vec![user_labels_key(label.user_id)],
        evict: vec![label_key(label.user_id, label.id)],
    }
}

/// A label was attached to a note.
pub fn label_attached(label: &Label) -> AffectedKeys {
    label_written(label)
}

/// A collaborator was added. The list is appended to rather than rebuilt,
/// so the collaborator key lands in `refresh`.
///
/// `collaborator_user_id` is the shared-with user, whose note list now
/// includes the note.
pub fn collaborator_added(
    collaborator: &Collaborator,
    collaborator_user_id: Option<i64>,
) -> AffectedKeys {
    let mut affected = AffectedKeys {
        refresh: vec![note_collaborators_key(collaborator.note_id)],
        ..AffectedKeys::default()
    };
    if let Some(user_id) = collaborator_user_id {
        affected.evict_unique(user_notes_key(user_id));
    }
    affected
}

/// A collaborator was removed.
pub fn collaborator_removed(
    collaborator: &Collaborator,
    collaborator_user_id: Option<i64>,
) -> AffectedKeys {
    let mut affected = AffectedKeys {
        rebuild: vec![note_collaborators_key(collaborator.note_id)],
        ..AffectedKeys::default()
    };
    if let Some(user_id) = collaborator_user_id {
        affected.evict_unique(user_notes_key(user_id));
    }
    affected
}
