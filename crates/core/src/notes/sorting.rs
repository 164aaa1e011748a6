use std::collections::HashSet;

use super::types::Note;

/// Sorts notes newest first by creation time. Ties fall back to id descending.
pub fn sort_notes_newest_first(notes: &mut [Note]) {
    notes.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Unions owned and shared notes, dropping duplicate ids, newest first.
pub fn merge_notes(owned: Vec<Note>, shared: Vec<Note>) -> Vec<Note> {
    let mut seen = HashSet::new();
    let mut merged: Vec<Note> = owned
        .into_iter()
        .chain(shared)
        .filter(|note| seen.insert(note.id))
        .collect();
    sort_notes_newest_first(&mut merged);
    merged
}

/// Notes that are pinned and still on the board.
pub fn pinned_notes(notes: &[Note]) -> Vec<Note> {
    notes
        .iter()
        .filter(|note| note.pinned && !note.trashed)
        .cloned()
        .collect()
}

/// Notes that are archived and not trashed.
pub fn archived_notes(notes: &[Note]) -> Vec<Note> {
    notes
        .iter()
        .filter(|note| note.archived && !note.trashed)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn note(id: i64, user_id: i64, minutes: i64) -> Note {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes);
        Note {
            id,
            user_id,
            title: format!("Note {id}"),
            description: String::new(),
            reminder: None,
            background_color: "white".to_string(),
            image: None,
            pinned: false,
            archived: false,
            trashed: false,
            created_at: created,
            edited_at: created,
        }
    }

    #[test]
    fn test_merge_notes_dedupes_and_sorts() {
        let owned = vec![note(1, 1, 0), note(3, 1, 20)];
        let shared = vec![note(2, 2, 10), note(3, 1, 20)];

        let merged = merge_notes(owned, shared);

        let ids: Vec<i64> = merged.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_merge_notes_empty() {
        assert!(merge_notes(Vec::new(), Vec::new()).is_empty());
    }

    #[test]
    fn test_pinned_and_archived_filters_skip_trash() {
        let mut pinned = note(1, 1, 0);
        pinned.pinned = true;
        let mut trashed = note(2, 1, 5);
        trashed.pinned = true;
        trashed.trashed = true;
        let mut archived = note(3, 1, 10);
        archived.archived = true;
        let notes = vec![pinned, trashed, archived];

        let pinned_ids: Vec<i64> = pinned_notes(&notes).iter().map(|n| n.id).collect();
        let archived_ids: Vec<i64> = archived_notes(&notes).iter().map(|n| n.id).collect();

        assert_eq!(pinned_ids, vec![1]);
        assert_eq!(archived_ids, vec![3]);
    }
}
