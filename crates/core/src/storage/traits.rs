use async_trait::async_trait;

use crate::notes::{
    Collaborator, Label, LabelNote, NewCollaborator, NewLabel, NewNote, NewUser, Note, User,
};

use super::Result;

/// Repository for user operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Gets a user by their ID.
    async fn get_user(&self, id: i64) -> Result<Option<User>>;

    /// Gets a user by their email address.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Gets the first user registered with the given first name.
    async fn get_user_by_first_name(&self, first_name: &str) -> Result<Option<User>>;

    /// Creates a new user. Fails with `AlreadyExists` when the email is taken.
    async fn create_user(&self, user: &NewUser) -> Result<User>;

    /// Updates an existing user.
    async fn update_user(&self, user: &User) -> Result<()>;

    /// Deletes a user and everything they own.
    async fn delete_user(&self, id: i64) -> Result<()>;
}

/// Repository for note operations.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Gets a note by its ID.
    async fn get_note(&self, id: i64) -> Result<Option<Note>>;

    /// Gets a user's note by title.
    async fn get_note_by_title(&self, user_id: i64, title: &str) -> Result<Option<Note>>;

    /// Gets every note owned by a user.
    async fn get_notes_for_user(&self, user_id: i64) -> Result<Vec<Note>>;

    /// Gets every note shared with the given email through a collaborator row.
    async fn get_shared_notes(&self, email: &str) -> Result<Vec<Note>>;

    /// Creates a new note.
    async fn create_note(&self, note: &NewNote) -> Result<Note>;

    /// Updates an existing note.
    async fn update_note(&self, note: &Note) -> Result<()>;

    /// Deletes a note with its label links and collaborators.
    async fn delete_note(&self, id: i64) -> Result<()>;
}

/// Repository for labels and label-note links.
#[async_trait]
pub trait LabelRepository: Send + Sync {
    /// Gets a label by its ID.
    async fn get_label(&self, id: i64) -> Result<Option<Label>>;

    /// Gets a user's label by name.
    async fn get_label_by_name(&self, user_id: i64, name: &str) -> Result<Option<Label>>;

    /// Gets every label owned by a user, ordered by name.
    async fn get_labels_for_user(&self, user_id: i64) -> Result<Vec<Label>>;

    /// Creates a new label. Fails with `AlreadyExists` when the user already
    /// owns the name.
    async fn create_label(&self, label: &NewLabel) -> Result<Label>;

    /// Updates an existing label.
    async fn update_label(&self, label: &Label) -> Result<()>;

    /// Deletes a label and its note links.
    async fn delete_label(&self, id: i64) -> Result<()>;

    /// Checks whether a label is attached to a note.
    async fn has_label_note(&self, link: LabelNote) -> Result<bool>;

    /// Attaches a label to a note. Fails with `AlreadyExists` on a repeat.
    async fn add_label_note(&self, link: LabelNote) -> Result<()>;

    /// Gets the IDs of every note carrying a label.
    async fn get_note_ids_for_label(&self, label_id: i64) -> Result<Vec<i64>>;
}

/// Repository for note collaborators.
#[async_trait]
pub trait CollaboratorRepository: Send + Sync {
    /// Gets the collaborator row for an owner, note and email.
    async fn get_collaborator(
        &self,
        owner_id: i64,
        note_id: i64,
        email: &str,
    ) -> Result<Option<Collaborator>>;

    /// Gets every collaborator of a note, oldest first.
    async fn get_collaborators_for_note(&self, note_id: i64) -> Result<Vec<Collaborator>>;

    /// Creates a collaborator. Fails with `AlreadyExists` on a duplicate.
    async fn create_collaborator(&self, collaborator: &NewCollaborator) -> Result<Collaborator>;

    /// Deletes a collaborator by its ID.
    async fn delete_collaborator(&self, id: i64) -> Result<()>;

    /// Deletes every collaborator row naming `email`, returning the removed rows.
    async fn delete_collaborators_for_email(&self, email: &str) -> Result<Vec<Collaborator>>;
}

/// A store backing every repository.
pub trait Store: UserRepository + NoteRepository + LabelRepository + CollaboratorRepository {}

impl<T: UserRepository + NoteRepository + LabelRepository + CollaboratorRepository> Store for T {}
