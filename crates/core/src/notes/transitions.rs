//! Field transitions applied by note mutations.
//!
//! Each action owns a fixed set of fields. Every applied transition stamps
//! `edited_at`; an action that would not change the note returns `None`.

use chrono::{DateTime, Utc};

use super::requests::UpdateNoteRequest;
use super::types::Note;

/// A mutation of an existing note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteAction {
    /// Replaces every editable field except the image.
    Update(UpdateNoteRequest),
    TogglePin,
    /// Archives the note and unpins it.
    Archive,
    Unarchive,
    /// Moves the note to the trash, clearing pin and archive.
    Trash,
    Restore,
    SetColor(String),
    /// Attaches an image stored at the given relative path.
    AttachImage(String),
}

impl NoteAction {
    /// Short name used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            NoteAction::Update(_) => "update",
            NoteAction::TogglePin => "toggle_pin",
            NoteAction::Archive => "archive",
            NoteAction::Unarchive => "unarchive",
            NoteAction::Trash => "trash",
            NoteAction::Restore => "restore",
            NoteAction::SetColor(_) => "set_color",
            NoteAction::AttachImage(_) => "attach_image",
        }
    }
}

/// Applies an action to a note.
///
/// Returns `None` when the action is a no-op (archiving an archived note,
/// unarchiving a note that is not archived).
pub fn apply_action(note: &Note, action: &NoteAction, now: DateTime<Utc>) -> Option<Note> {
    let mut next = note.clone();
    match action {
        NoteAction::Update(request) => {
            next.title = request.title.clone();
            next.description = request.description.clone();
            next.reminder = request.reminder;
            next.background_color = request.background_color.clone();
            next.pinned = request.pinned;
            next.archived = request.archived;
            next.trashed = request.trashed;
        }
        NoteAction::TogglePin => next.pinned = !note.pinned,
        NoteAction::Archive => {
            if note.archived {
                return None;
            }
            next.archived = true;
            next.pinned = false;
        }
        NoteAction::Unarchive => {
            if !note.archived {
                return None;
            }
            next.archived = false;
        }
        NoteAction::Trash => {
            next.trashed = true;
            next.pinned = false;
            next.archived = false;
        }
        NoteAction::Restore => next.trashed = false,
        NoteAction::SetColor(color) => next.background_color = color.clone(),
        NoteAction::AttachImage(path) => next.image = Some(path.clone()),
    }
    next.edited_at = now;
    Some(next)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn groceries() -> Note {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        Note {
            id: 7,
            user_id: 1,
            title: "Groceries".to_string(),
            description: "milk, eggs".to_string(),
            reminder: None,
            background_color: "white".to_string(),
            image: None,
            pinned: true,
            archived: false,
            trashed: false,
            created_at: created,
            edited_at: created,
        }
    }

    fn later() -> DateTime<Utc> {
        groceries().created_at + Duration::hours(1)
    }

    #[test]
    fn test_archive_forces_unpin() {
        let note = apply_action(&groceries(), &NoteAction::Archive, later()).unwrap();

        assert!(note.archived);
        assert!(!note.pinned);
        assert_eq!(note.edited_at, later());
    }

    #[test]
    fn test_archive_already_archived_is_noop() {
        let mut note = groceries();
        note.archived = true;

        assert_eq!(apply_action(&note, &NoteAction::Archive, later()), None);
    }

    #[test]
    fn test_unarchive_not_archived_is_noop() {
        assert_eq!(
            apply_action(&groceries(), &NoteAction::Unarchive, later()),
            None
        );
    }

    #[test]
    fn test_trash_clears_pin_and_archive() {
        let mut note = groceries();
        note.archived = true;

        let note = apply_action(&note, &NoteAction::Trash, later()).unwrap();

        assert!(note.trashed);
        assert!(!note.pinned);
        assert!(!note.archived);
    }

    #[test]
    fn test_restore_only_touches_trash() {
        let mut note = groceries();
        note.trashed = true;
        note.pinned = false;

        let note = apply_action(&note, &NoteAction::Restore, later()).unwrap();

        assert!(!note.trashed);
        assert!(!note.pinned);
    }

    #[test]
    fn test_toggle_pin_flips() {
        let once = apply_action(&groceries(), &NoteAction::TogglePin, later()).unwrap();
        let twice = apply_action(&once, &NoteAction::TogglePin, later()).unwrap();

        assert!(!once.pinned);
        assert!(twice.pinned);
    }

    #[test]
    fn test_update_keeps_image_and_identity() {
        let mut note = groceries();
        note.image = Some("NoteImages/a.png".to_string());
        let request = UpdateNoteRequest {
            title: "Shopping".to_string(),
            description: String::new(),
            reminder: Some(later()),
            background_color: "yellow".to_string(),
            pinned: false,
            archived: true,
            trashed: false,
        };

        let updated = apply_action(&note, &NoteAction::Update(request), later()).unwrap();

        assert_eq!(updated.id, 7);
        assert_eq!(updated.title, "Shopping");
        assert_eq!(updated.image.as_deref(), Some("NoteImages/a.png"));
        assert_eq!(updated.created_at, note.created_at);
        assert!(updated.archived);
    }

    #[test]
    fn test_attach_image_sets_path() {
        let note = apply_action(
            &groceries(),
            &NoteAction::AttachImage("NoteImages/x.gif".to_string()),
            later(),
        )
        .unwrap();

        assert_eq!(note.image.as_deref(), Some("NoteImages/x.gif"));
    }
}
