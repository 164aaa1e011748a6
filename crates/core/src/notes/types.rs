use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default background color for a note when none is given.
pub const DEFAULT_BACKGROUND_COLOR: &str = "white";

/// A registered user.
///
/// Carries the password hash so a cached snapshot can verify a login without
/// a store round-trip. Use [`UserProfile`] for anything handed to a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

impl User {
    /// Returns the public view of this user.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// A user without credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, Email: {}",
            self.first_name, self.last_name, self.email
        )
    }
}

/// Fields needed to insert a user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

/// A note owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    /// The owning user.
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub reminder: Option<DateTime<Utc>>,
    /// CSS color value.
    pub background_color: String,
    /// Path of the attached image, relative to the uploads root.
    pub image: Option<String>,
    pub pinned: bool,
    pub archived: bool,
    pub trashed: bool,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

/// Fields needed to insert a note row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub reminder: Option<DateTime<Utc>>,
    pub background_color: String,
    pub pinned: bool,
    pub archived: bool,
    pub trashed: bool,
    pub created_at: DateTime<Utc>,
}

/// A user-defined label. Names are unique per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to insert a label row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLabel {
    pub user_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A label attached to a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LabelNote {
    pub label_id: i64,
    pub note_id: i64,
}

/// Read access to a note granted by its owner to another user's email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    pub id: i64,
    /// The note owner who shared the note.
    pub owner_id: i64,
    pub note_id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to insert a collaborator row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCollaborator {
    pub owner_id: i64,
    pub note_id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User {
            id: 1,
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
        }
    }

    #[test]
    fn test_profile_drops_password_hash() {
        let profile = alice().profile();

        assert_eq!(profile.id, 1);
        assert_eq!(profile.email, "alice@example.com");
        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn test_profile_display() {
        assert_eq!(
            alice().profile().to_string(),
            "Alice Smith, Email: alice@example.com"
        );
    }

    #[test]
    fn test_user_snapshot_keeps_password_hash() {
        let json = serde_json::to_string(&alice()).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();

        assert_eq!(back.password_hash, "$argon2id$secret");
    }
}
