//! SQLite repository implementation.
//!
//! Implements the repository traits from `fundoo_core::storage` using SQLite.

use async_trait::async_trait;
use rusqlite::params;
use tokio_rusqlite::Connection;

use fundoo_core::notes::{
    Collaborator, Label, LabelNote, NewCollaborator, NewLabel, NewNote, NewUser, Note, User,
};
use fundoo_core::storage::{
    CollaboratorRepository, LabelRepository, NoteRepository, RepositoryError, Result,
    UserRepository,
};

use super::conversions::{
    format_datetime, row_to_collaborator, row_to_label, row_to_note, row_to_user,
};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Runs a single-row query, mapping "no rows" to `None`.
fn query_optional<T, P>(
    conn: &rusqlite::Connection,
    sql: &str,
    params: P,
    map: fn(&rusqlite::Row) -> rusqlite::Result<T>,
) -> std::result::Result<Option<T>, tokio_rusqlite::Error>
where
    P: rusqlite::Params,
{
    let mut stmt = conn.prepare(sql).map_err(wrap_err)?;
    match stmt.query_row(params, map) {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(wrap_err(e)),
    }
}

/// Runs a multi-row query.
fn query_all<T, P>(
    conn: &rusqlite::Connection,
    sql: &str,
    params: P,
    map: fn(&rusqlite::Row) -> rusqlite::Result<T>,
) -> std::result::Result<Vec<T>, tokio_rusqlite::Error>
where
    P: rusqlite::Params,
{
    let mut stmt = conn.prepare(sql).map_err(wrap_err)?;
    let rows = stmt.query_map(params, map).map_err(wrap_err)?;

    let mut items = Vec::new();
    for row_result in rows {
        items.push(row_result.map_err(wrap_err)?);
    }
    Ok(items)
}

/// Runs a statement that must touch exactly one row.
fn execute_one<P>(
    conn: &rusqlite::Connection,
    sql: &str,
    params: P,
) -> std::result::Result<(), tokio_rusqlite::Error>
where
    P: rusqlite::Params,
{
    let rows = conn.execute(sql, params).map_err(wrap_err)?;
    if rows == 0 {
        Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
    } else {
        Ok(())
    }
}

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage for all entity types.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::ENABLE_FOREIGN_KEYS)
                .map_err(wrap_err)?;
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        self.conn
            .call(move |conn| {
                query_optional(conn, &schema::select_user_where("id = ?1"), [id], row_to_user)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", id))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.to_string();
        let error_id = email.clone();

        self.conn
            .call(move |conn| {
                query_optional(
                    conn,
                    &schema::select_user_where("email = ?1"),
                    [&email],
                    row_to_user,
                )
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", error_id))
    }

    async fn get_user_by_first_name(&self, first_name: &str) -> Result<Option<User>> {
        let first_name = first_name.to_string();
        let error_id = first_name.clone();

        self.conn
            .call(move |conn| {
                query_optional(
                    conn,
                    &schema::select_user_where("first_name = ?1"),
                    [&first_name],
                    row_to_user,
                )
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", error_id))
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let user = user.clone();
        let error_id = user.email.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_USER,
                    params![
                        user.first_name,
                        user.last_name,
                        user.email,
                        user.password_hash
                    ],
                )
                .map_err(wrap_err)?;
                Ok(User {
                    id: conn.last_insert_rowid(),
                    first_name: user.first_name,
                    last_name: user.last_name,
                    email: user.email,
                    password_hash: user.password_hash,
                })
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", error_id))
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let user = user.clone();
        let id = user.id;

        self.conn
            .call(move |conn| {
                execute_one(
                    conn,
                    schema::UPDATE_USER,
                    params![
                        user.id,
                        user.first_name,
                        user.last_name,
                        user.email,
                        user.password_hash
                    ],
                )
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", id))
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| execute_one(conn, schema::DELETE_USER, [id]))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", id))
    }
}

// ============================================================================
// NoteRepository implementation
// ============================================================================

#[async_trait]
impl NoteRepository for SqliteRepository {
    async fn get_note(&self, id: i64) -> Result<Option<Note>> {
        self.conn
            .call(move |conn| query_optional(conn, schema::SELECT_NOTE_BY_ID, [id], row_to_note))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Note", id))
    }

    async fn get_note_by_title(&self, user_id: i64, title: &str) -> Result<Option<Note>> {
        let title = title.to_string();
        let error_id = title.clone();

        self.conn
            .call(move |conn| {
                query_optional(
                    conn,
                    schema::SELECT_NOTE_BY_TITLE,
                    params![user_id, title],
                    row_to_note,
                )
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Note", error_id))
    }

    async fn get_notes_for_user(&self, user_id: i64) -> Result<Vec<Note>> {
        self.conn
            .call(move |conn| query_all(conn, schema::SELECT_NOTES_FOR_USER, [user_id], row_to_note))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Note", user_id))
    }

    async fn get_shared_notes(&self, email: &str) -> Result<Vec<Note>> {
        let email = email.to_string();
        let error_id = email.clone();

        self.conn
            .call(move |conn| query_all(conn, schema::SELECT_SHARED_NOTES, [&email], row_to_note))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Note", error_id))
    }

    async fn create_note(&self, note: &NewNote) -> Result<Note> {
        let note = note.clone();
        let error_id = note.title.clone();

        self.conn
            .call(move |conn| {
                let created_at = format_datetime(&note.created_at);
                conn.execute(
                    schema::INSERT_NOTE,
                    params![
                        note.user_id,
                        note.title,
                        note.description,
                        note.reminder.as_ref().map(format_datetime),
                        note.background_color,
                        note.pinned,
                        note.archived,
                        note.trashed,
                        created_at
                    ],
                )
                .map_err(wrap_err)?;
                Ok(Note {
                    id: conn.last_insert_rowid(),
                    user_id: note.user_id,
                    title: note.title,
                    description: note.description,
                    reminder: note.reminder,
                    background_color: note.background_color,
                    image: None,
                    pinned: note.pinned,
                    archived: note.archived,
                    trashed: note.trashed,
                    created_at: note.created_at,
                    edited_at: note.created_at,
                })
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Note", error_id))
    }

    async fn update_note(&self, note: &Note) -> Result<()> {
        let note = note.clone();
        let id = note.id;

        self.conn
            .call(move |conn| {
                execute_one(
                    conn,
                    schema::UPDATE_NOTE,
                    params![
                        note.id,
                        note.title,
                        note.description,
                        note.reminder.as_ref().map(format_datetime),
                        note.background_color,
                        note.image,
                        note.pinned,
                        note.archived,
                        note.trashed,
                        format_datetime(&note.edited_at)
                    ],
                )
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Note", id))
    }

    async fn delete_note(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| execute_one(conn, schema::DELETE_NOTE, [id]))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Note", id))
    }
}

// ============================================================================
// LabelRepository implementation
// ============================================================================

#[async_trait]
impl LabelRepository for SqliteRepository {
    async fn get_label(&self, id: i64) -> Result<Option<Label>> {
        self.conn
            .call(move |conn| query_optional(conn, schema::SELECT_LABEL_BY_ID, [id], row_to_label))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Label", id))
    }

    async fn get_label_by_name(&self, user_id: i64, name: &str) -> Result<Option<Label>> {
        let name = name.to_string();
        let error_id = name.clone();

        self.conn
            .call(move |conn| {
                query_optional(
                    conn,
                    schema::SELECT_LABEL_BY_NAME,
                    params![user_id, name],
                    row_to_label,
                )
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Label", error_id))
    }

    async fn get_labels_for_user(&self, user_id: i64) -> Result<Vec<Label>> {
        self.conn
            .call(move |conn| {
                query_all(conn, schema::SELECT_LABELS_FOR_USER, [user_id], row_to_label)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Label", user_id))
    }

    async fn create_label(&self, label: &NewLabel) -> Result<Label> {
        let label = label.clone();
        let error_id = label.name.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_LABEL,
                    params![label.user_id, label.name, format_datetime(&label.created_at)],
                )
                .map_err(wrap_err)?;
                Ok(Label {
                    id: conn.last_insert_rowid(),
                    user_id: label.user_id,
                    name: label.name,
                    created_at: label.created_at,
                    updated_at: label.created_at,
                })
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Label", error_id))
    }

    async fn update_label(&self, label: &Label) -> Result<()> {
        let label = label.clone();
        let error_id = label.name.clone();

        self.conn
            .call(move |conn| {
                execute_one(
                    conn,
                    schema::UPDATE_LABEL,
                    params![label.id, label.name, format_datetime(&label.updated_at)],
                )
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Label", error_id))
    }

    async fn delete_label(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| execute_one(conn, schema::DELETE_LABEL, [id]))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Label", id))
    }

    async fn has_label_note(&self, link: LabelNote) -> Result<bool> {
        self.conn
            .call(move |conn| {
                let count: i64 = conn
                    .query_row(
                        schema::COUNT_LABEL_NOTE,
                        [link.label_id, link.note_id],
                        |row| row.get(0),
                    )
                    .map_err(wrap_err)?;
                Ok(count > 0)
            })
            .await
            .map_err(|e| {
                map_tokio_rusqlite_error(e, "LabelNote", format!("{}:{}", link.label_id, link.note_id))
            })
    }

    async fn add_label_note(&self, link: LabelNote) -> Result<()> {
        self.conn
            .call(move |conn| {
                conn.execute(schema::INSERT_LABEL_NOTE, [link.label_id, link.note_id])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| {
                map_tokio_rusqlite_error(e, "LabelNote", format!("{}:{}", link.label_id, link.note_id))
            })
    }

    async fn get_note_ids_for_label(&self, label_id: i64) -> Result<Vec<i64>> {
        self.conn
            .call(move |conn| {
                query_all(conn, schema::SELECT_NOTE_IDS_FOR_LABEL, [label_id], |row| {
                    row.get(0)
                })
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "LabelNote", label_id))
    }
}

// ============================================================================
// CollaboratorRepository implementation
// ============================================================================

#[async_trait]
impl CollaboratorRepository for SqliteRepository {
    async fn get_collaborator(
        &self,
        owner_id: i64,
        note_id: i64,
        email: &str,
    ) -> Result<Option<Collaborator>> {
        let email = email.to_string();
        let error_id = email.clone();

        self.conn
            .call(move |conn| {
                query_optional(
                    conn,
                    schema::SELECT_COLLABORATOR,
                    params![owner_id, note_id, email],
                    row_to_collaborator,
                )
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Collaborator", error_id))
    }

    async fn get_collaborators_for_note(&self, note_id: i64) -> Result<Vec<Collaborator>> {
        self.conn
            .call(move |conn| {
                query_all(
                    conn,
                    schema::SELECT_COLLABORATORS_FOR_NOTE,
                    [note_id],
                    row_to_collaborator,
                )
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Collaborator", note_id))
    }

    async fn create_collaborator(&self, collaborator: &NewCollaborator) -> Result<Collaborator> {
        let collaborator = collaborator.clone();
        let error_id = collaborator.email.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_COLLABORATOR,
                    params![
                        collaborator.owner_id,
                        collaborator.note_id,
                        collaborator.email,
                        format_datetime(&collaborator.created_at)
                    ],
                )
                .map_err(wrap_err)?;
                Ok(Collaborator {
                    id: conn.last_insert_rowid(),
                    owner_id: collaborator.owner_id,
                    note_id: collaborator.note_id,
                    email: collaborator.email,
                    created_at: collaborator.created_at,
                })
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Collaborator", error_id))
    }

    async fn delete_collaborator(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| execute_one(conn, schema::DELETE_COLLABORATOR, [id]))
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Collaborator", id))
    }

    async fn delete_collaborators_for_email(&self, email: &str) -> Result<Vec<Collaborator>> {
        let email = email.to_string();
        let error_id = email.clone();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                let removed = query_all(
                    &tx,
                    schema::SELECT_COLLABORATORS_FOR_EMAIL,
                    [&email],
                    row_to_collaborator,
                )?;
                tx.execute(schema::DELETE_COLLABORATORS_FOR_EMAIL, [&email])
                    .map_err(wrap_err)?;
                tx.commit().map_err(wrap_err)?;
                Ok(removed)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Collaborator", error_id))
    }
}
