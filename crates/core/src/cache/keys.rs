//! Cache key scheme.
//!
//! One function per access pattern. Every key starts with its entity prefix
//! (`user:` or `note:`) so keys of different kinds never collide.

/// Key for a user looked up by email.
pub fn user_email_key(email: &str) -> String {
    format!("user:email:{}", email)
}

/// Key for a user looked up by first name.
pub fn user_name_key(first_name: &str) -> String {
    format!("user:name:{}", first_name)
}

/// Key for a single note.
pub fn note_key(note_id: i64) -> String {
    format!("note:{}", note_id)
}

/// Key for a note looked up by title. Titles are scoped to their owner.
pub fn note_title_key(user_id: i64, title: &str) -> String {
    format!("user:{}:note:title:{}", user_id, title)
}

/// Key for every note visible to a user, owned or shared.
pub fn user_notes_key(user_id: i64) -> String {
    format!("user:{}:notes", user_id)
}

/// Key for a user's pinned notes.
pub fn user_pinned_notes_key(user_id: i64) -> String {
    format!("user:{}:notes:pinned", user_id)
}

/// Key for a user's archived notes.
pub fn user_archived_notes_key(user_id: i64) -> String {
    format!("user:{}:notes:archived", user_id)
}

/// All list keys derived from a user's notes.
pub fn user_note_list_keys(user_id: i64) -> [String; 3] {
    [
        user_notes_key(user_id),
        user_pinned_notes_key(user_id),
        user_archived_notes_key(user_id),
    ]
}

/// Key for a user's labels.
pub fn user_labels_key(user_id: i64) -> String {
    format!("user:{}:labels", user_id)
}

/// Key for a single label.
pub fn label_key(user_id: i64, label_id: i64) -> String {
    format!("user:{}:label:{}", user_id, label_id)
}

/// Key for the collaborator list of a note.
pub fn note_collaborators_key(note_id: i64) -> String {
    format!("note:{}:collaborators", note_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_keys() {
        assert_eq!(user_email_key("alice@example.com"), "user:email:alice@example.com");
        assert_eq!(user_name_key("Alice"), "user:name:Alice");
    }

    #[test]
    fn test_note_keys() {
        assert_eq!(note_key(7), "note:7");
        assert_eq!(note_title_key(1, "Groceries"), "user:1:note:title:Groceries");
        assert_eq!(note_collaborators_key(7), "note:7:collaborators");
    }

    #[test]
    fn test_note_list_keys() {
        assert_eq!(
            user_note_list_keys(3),
            [
                "user:3:notes".to_string(),
                "user:3:notes:pinned".to_string(),
                "user:3:notes:archived".to_string(),
            ]
        );
    }

    #[test]
    fn test_label_keys() {
        assert_eq!(user_labels_key(1), "user:1:labels");
        assert_eq!(label_key(1, 4), "user:1:label:4");
    }

    #[test]
    fn test_keys_do_not_collide_across_entities() {
        // A note id and a user id with the same number map to distinct keys.
        assert_ne!(note_key(1), user_notes_key(1));
        assert_ne!(note_collaborators_key(1), user_labels_key(1));
        assert_ne!(user_name_key("Alice"), user_email_key("Alice"));
    }
}
