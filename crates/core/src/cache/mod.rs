mod error;
mod invalidation;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use invalidation::{
    collaborator_added, collaborator_removed, label_attached, label_deleted, label_written,
    note_deleted, note_written, user_deleted, user_keys, user_written, AffectedKeys,
};
pub use keys::{
    label_key, note_collaborators_key, note_key, note_title_key, user_archived_notes_key,
    user_email_key, user_labels_key, user_name_key, user_note_list_keys, user_notes_key,
    user_pinned_notes_key,
};
pub use serialization::{deserialize, deserialize_list, serialize, SerializationError};
pub use traits::Cache;
