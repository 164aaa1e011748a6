//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use chrono::{DateTime, Utc};
use rusqlite::Row;

use fundoo_core::notes::{Collaborator, Label, Note, User};

/// Convert a SQLite row to a User.
///
/// Expected columns: id, first_name, last_name, email, password_hash
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        password_hash: row.get(4)?,
    })
}

/// Convert a SQLite row to a Note.
///
/// Expected columns: id, user_id, title, description, reminder,
/// background_color, image, pinned, archived, trashed, created_at, edited_at
pub fn row_to_note(row: &Row) -> rusqlite::Result<Note> {
    let reminder: Option<String> = row.get(4)?;
    let created_at: String = row.get(10)?;
    let edited_at: String = row.get(11)?;

    Ok(Note {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        reminder: reminder.as_deref().map(|s| parse_datetime(4, s)).transpose()?,
        background_color: row.get(5)?,
        image: row.get(6)?,
        pinned: row.get(7)?,
        archived: row.get(8)?,
        trashed: row.get(9)?,
        created_at: parse_datetime(10, &created_at)?,
        edited_at: parse_datetime(11, &edited_at)?,
    })
}

/// Convert a SQLite row to a Label.
///
/// Expected columns: id, user_id, name, created_at, updated_at
pub fn row_to_label(row: &Row) -> rusqlite::Result<Label> {
    let created_at: String = row.get(3)?;
    let updated_at: String = row.get(4)?;

    Ok(Label {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        created_at: parse_datetime(3, &created_at)?,
        updated_at: parse_datetime(4, &updated_at)?,
    })
}

/// Convert a SQLite row to a Collaborator.
///
/// Expected columns: id, owner_id, note_id, email, created_at
pub fn row_to_collaborator(row: &Row) -> rusqlite::Result<Collaborator> {
    let created_at: String = row.get(4)?;

    Ok(Collaborator {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        note_id: row.get(2)?,
        email: row.get(3)?,
        created_at: parse_datetime(4, &created_at)?,
    })
}

/// Parse a datetime from an RFC 3339 column.
fn parse_datetime(column: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Format a DateTime<Utc> for SQLite storage (RFC 3339).
///
/// Fixed-width UTC so lexical order matches chronological order.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_format_datetime_roundtrips() {
        let dt = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();

        let text = format_datetime(&dt);

        assert_eq!(text, "2024-06-15T10:30:00.000000Z");
        assert_eq!(parse_datetime(0, &text).unwrap(), dt);
    }

    #[test]
    fn test_format_datetime_sorts_lexically() {
        let earlier = Utc.with_ymd_and_hms(2024, 6, 15, 9, 59, 59).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap();

        assert!(format_datetime(&earlier) < format_datetime(&later));
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        let err = parse_datetime(10, "yesterday").unwrap_err();

        assert!(matches!(
            err,
            rusqlite::Error::FromSqlConversionFailure(10, _, _)
        ));
    }
}
