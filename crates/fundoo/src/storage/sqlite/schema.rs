//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O.

/// Enables cascading deletes. Must run on every new connection.
pub const ENABLE_FOREIGN_KEYS: &str = "PRAGMA foreign_keys = ON;";

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    reminder TEXT,
    background_color TEXT NOT NULL,
    image TEXT,
    pinned INTEGER NOT NULL DEFAULT 0,
    archived INTEGER NOT NULL DEFAULT 0,
    trashed INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    edited_at TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS labels (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (user_id, name),
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS label_notes (
    label_id INTEGER NOT NULL,
    note_id INTEGER NOT NULL,
    PRIMARY KEY (label_id, note_id),
    FOREIGN KEY (label_id) REFERENCES labels(id) ON DELETE CASCADE,
    FOREIGN KEY (note_id) REFERENCES notes(id) ON DELETE CASCADE
);

-- The collaborator email is checked against users at insert time only.
CREATE TABLE IF NOT EXISTS collaborators (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id INTEGER NOT NULL,
    note_id INTEGER NOT NULL,
    email TEXT NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE (owner_id, note_id, email),
    FOREIGN KEY (owner_id) REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (note_id) REFERENCES notes(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_users_first_name ON users(first_name);
CREATE INDEX IF NOT EXISTS idx_notes_user_id ON notes(user_id);
CREATE INDEX IF NOT EXISTS idx_notes_user_title ON notes(user_id, title);
CREATE INDEX IF NOT EXISTS idx_collaborators_email ON collaborators(email);
CREATE INDEX IF NOT EXISTS idx_collaborators_note_id ON collaborators(note_id);
"#;

// User queries
const USER_COLUMNS: &str = "id, first_name, last_name, email, password_hash";

pub const INSERT_USER: &str = r#"
INSERT INTO users (first_name, last_name, email, password_hash)
VALUES (?1, ?2, ?3, ?4)
"#;

pub fn select_user_where(predicate: &str) -> String {
    format!(
        "SELECT {} FROM users WHERE {} ORDER BY id ASC LIMIT 1",
        USER_COLUMNS, predicate
    )
}

pub const UPDATE_USER: &str = r#"
UPDATE users
SET first_name = ?2, last_name = ?3, email = ?4, password_hash = ?5
WHERE id = ?1
"#;

pub const DELETE_USER: &str = "DELETE FROM users WHERE id = ?1";

// Note queries
pub const INSERT_NOTE: &str = r#"
INSERT INTO notes (user_id, title, description, reminder, background_color, image,
                   pinned, archived, trashed, created_at, edited_at)
VALUES (?1, ?2, ?3, ?4, ?5, NULL, ?6, ?7, ?8, ?9, ?9)
"#;

pub const SELECT_NOTE_BY_ID: &str = r#"
SELECT id, user_id, title, description, reminder, background_color, image,
       pinned, archived, trashed, created_at, edited_at
FROM notes
WHERE id = ?1
"#;

pub const SELECT_NOTE_BY_TITLE: &str = r#"
SELECT id, user_id, title, description, reminder, background_color, image,
       pinned, archived, trashed, created_at, edited_at
FROM notes
WHERE user_id = ?1 AND title = ?2
ORDER BY id ASC
LIMIT 1
"#;

pub const SELECT_NOTES_FOR_USER: &str = r#"
SELECT id, user_id, title, description, reminder, background_color, image,
       pinned, archived, trashed, created_at, edited_at
FROM notes
WHERE user_id = ?1
ORDER BY created_at DESC, id DESC
"#;

pub const SELECT_SHARED_NOTES: &str = r#"
SELECT DISTINCT n.id, n.user_id, n.title, n.description, n.reminder, n.background_color,
       n.image, n.pinned, n.archived, n.trashed, n.created_at, n.edited_at
FROM notes n
INNER JOIN collaborators c ON c.note_id = n.id
WHERE c.email = ?1
ORDER BY n.created_at DESC, n.id DESC
"#;

pub const UPDATE_NOTE: &str = r#"
UPDATE notes
SET title = ?2, description = ?3, reminder = ?4, background_color = ?5, image = ?6,
    pinned = ?7, archived = ?8, trashed = ?9, edited_at = ?10
WHERE id = ?1
"#;

pub const DELETE_NOTE: &str = "DELETE FROM notes WHERE id = ?1";

// Label queries
pub const INSERT_LABEL: &str = r#"
INSERT INTO labels (user_id, name, created_at, updated_at)
VALUES (?1, ?2, ?3, ?3)
"#;

pub const SELECT_LABEL_BY_ID: &str = r#"
SELECT id, user_id, name, created_at, updated_at
FROM labels
WHERE id = ?1
"#;

pub const SELECT_LABEL_BY_NAME: &str = r#"
SELECT id, user_id, name, created_at, updated_at
FROM labels
WHERE user_id = ?1 AND name = ?2
"#;

pub const SELECT_LABELS_FOR_USER: &str = r#"
SELECT id, user_id, name, created_at, updated_at
FROM labels
WHERE user_id = ?1
ORDER BY name ASC
"#;

pub const UPDATE_LABEL: &str = r#"
UPDATE labels
SET name = ?2, updated_at = ?3
WHERE id = ?1
"#;

pub const DELETE_LABEL: &str = "DELETE FROM labels WHERE id = ?1";

pub const INSERT_LABEL_NOTE: &str = "INSERT INTO label_notes (label_id, note_id) VALUES (?1, ?2)";

pub const COUNT_LABEL_NOTE: &str =
    "SELECT COUNT(*) FROM label_notes WHERE label_id = ?1 AND note_id = ?2";

pub const SELECT_NOTE_IDS_FOR_LABEL: &str =
    "SELECT note_id FROM label_notes WHERE label_id = ?1 ORDER BY note_id ASC";

// Collaborator queries
pub const INSERT_COLLABORATOR: &str = r#"
INSERT INTO collaborators (owner_id, note_id, email, created_at)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const SELECT_COLLABORATOR: &str = r#"
SELECT id, owner_id, note_id, email, created_at
FROM collaborators
WHERE owner_id = ?1 AND note_id = ?2 AND email = ?3
"#;

pub const SELECT_COLLABORATORS_FOR_NOTE: &str = r#"
SELECT id, owner_id, note_id, email, created_at
FROM collaborators
WHERE note_id = ?1
ORDER BY id ASC
"#;

pub const DELETE_COLLABORATOR: &str = "DELETE FROM collaborators WHERE id = ?1";

pub const SELECT_COLLABORATORS_FOR_EMAIL: &str = r#"
SELECT id, owner_id, note_id, email, created_at
FROM collaborators
WHERE email = ?1
ORDER BY id ASC
"#;

pub const DELETE_COLLABORATORS_FOR_EMAIL: &str = "DELETE FROM collaborators WHERE email = ?1";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_covers_every_table() {
        for table in ["users", "notes", "labels", "label_notes", "collaborators"] {
            assert!(
                CREATE_TABLES.contains(&format!("CREATE TABLE IF NOT EXISTS {table}")),
                "missing table {table}"
            );
        }
    }

    #[test]
    fn test_child_tables_cascade() {
        assert_eq!(CREATE_TABLES.matches("ON DELETE CASCADE").count(), 6);
    }

    #[test]
    fn test_select_user_where() {
        assert_eq!(
            select_user_where("email = ?1"),
            "SELECT id, first_name, last_name, email, password_hash FROM users \
             WHERE email = ?1 ORDER BY id ASC LIMIT 1"
        );
    }

    #[test]
    fn test_shared_notes_joins_collaborators() {
        assert!(SELECT_SHARED_NOTES.contains("INNER JOIN collaborators"));
        assert!(SELECT_SHARED_NOTES.contains("c.email = ?1"));
    }
}
