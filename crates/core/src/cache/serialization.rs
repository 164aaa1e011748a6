//! Pure functions for serializing/deserializing domain types to/from cache bytes.
//!
//! Values are stored as JSON so cached snapshots stay readable with
//! `redis-cli`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a value to JSON bytes.
pub fn serialize<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a value.
pub fn deserialize<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Deserializes every element of a cached list.
///
/// Fails on the first undecodable element; callers treat that as a miss.
pub fn deserialize_list<T: DeserializeOwned>(items: &[Vec<u8>]) -> Result<Vec<T>> {
    items.iter().map(|item| deserialize(item)).collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::notes::{Collaborator, Label, Note};

    fn fixed_timestamp() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap()
    }

    fn groceries() -> Note {
        Note {
            id: 7,
            user_id: 1,
            title: "Groceries".to_string(),
            description: "milk".to_string(),
            reminder: Some(fixed_timestamp()),
            background_color: "white".to_string(),
            image: None,
            pinned: false,
            archived: false,
            trashed: false,
            created_at: fixed_timestamp(),
            edited_at: fixed_timestamp(),
        }
    }

    #[test]
    fn test_note_snapshot_keeps_reminder() {
        let bytes = serialize(&groceries()).expect("serialize should succeed");
        let note: Note = deserialize(&bytes).expect("deserialize should succeed");

        assert_eq!(note, groceries());
        assert_eq!(note.reminder, Some(fixed_timestamp()));
    }

    #[test]
    fn test_serialize_empty_list() {
        let labels: Vec<Label> = vec![];

        let bytes = serialize(&labels).expect("serialize should succeed");

        assert_eq!(bytes, b"[]");
    }

    #[test]
    fn test_deserialize_malformed_bytes() {
        let result: Result<Note> = deserialize(b"not valid json");

        assert!(matches!(result, Err(SerializationError::DeserializeFailed(_))));
    }

    #[test]
    fn test_deserialize_wrong_shape() {
        let label = Label {
            id: 1,
            user_id: 1,
            name: "Work".to_string(),
            created_at: fixed_timestamp(),
            updated_at: fixed_timestamp(),
        };
        let bytes = serialize(&label).expect("serialize should succeed");

        let result: Result<Note> = deserialize(&bytes);

        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_list_fails_on_bad_element() {
        let bob = Collaborator {
            id: 1,
            owner_id: 1,
            note_id: 7,
            email: "bob@example.com".to_string(),
            created_at: fixed_timestamp(),
        };
        let good = serialize(&bob).expect("serialize should succeed");

        let items = vec![good.clone(), b"{".to_vec()];
        let result: Result<Vec<Collaborator>> = deserialize_list(&items);
        assert!(result.is_err());

        let decoded: Vec<Collaborator> =
            deserialize_list(&[good]).expect("deserialize should succeed");
        assert_eq!(decoded, vec![bob]);
    }
}
