//! In-memory repository implementation.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use fundoo_core::notes::{
    sort_notes_newest_first, Collaborator, Label, LabelNote, NewCollaborator, NewLabel, NewNote,
    NewUser, Note, User,
};
use fundoo_core::storage::{
    CollaboratorRepository, LabelRepository, NoteRepository, RepositoryError, Result,
    UserRepository,
};

/// Every table, behind one lock so cascades are atomic.
#[derive(Debug, Default)]
struct Tables {
    next_id: i64,
    users: BTreeMap<i64, User>,
    notes: BTreeMap<i64, Note>,
    labels: BTreeMap<i64, Label>,
    label_notes: BTreeSet<LabelNote>,
    collaborators: BTreeMap<i64, Collaborator>,
}

impl Tables {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn remove_note(&mut self, note_id: i64) {
        self.notes.remove(&note_id);
        self.label_notes.retain(|link| link.note_id != note_id);
        self.collaborators.retain(|_, c| c.note_id != note_id);
    }

    fn remove_label(&mut self, label_id: i64) {
        self.labels.remove(&label_id);
        self.label_notes.retain(|link| link.label_id != label_id);
    }
}

/// In-memory storage backend for testing.
///
/// Mirrors the SQLite schema's uniqueness constraints and cascades, so the
/// access services behave the same over either backend. Data is not
/// persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn get_user_by_first_name(&self, first_name: &str) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.first_name == first_name)
            .cloned())
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::already_exists("User", &user.email));
        }

        let created = User {
            id: tables.allocate_id(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
        };
        tables.users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user.id) {
            return Err(RepositoryError::not_found("User", user.id));
        }
        if tables
            .users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(RepositoryError::already_exists("User", &user.email));
        }
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Err(RepositoryError::not_found("User", id));
        }

        let note_ids: Vec<i64> = tables
            .notes
            .values()
            .filter(|n| n.user_id == id)
            .map(|n| n.id)
            .collect();
        for note_id in note_ids {
            tables.remove_note(note_id);
        }

        let label_ids: Vec<i64> = tables
            .labels
            .values()
            .filter(|l| l.user_id == id)
            .map(|l| l.id)
            .collect();
        for label_id in label_ids {
            tables.remove_label(label_id);
        }

        tables.collaborators.retain(|_, c| c.owner_id != id);
        Ok(())
    }
}

#[async_trait]
impl NoteRepository for InMemoryRepository {
    async fn get_note(&self, id: i64) -> Result<Option<Note>> {
        let tables = self.tables.read().await;
        Ok(tables.notes.get(&id).cloned())
    }

    async fn get_note_by_title(&self, user_id: i64, title: &str) -> Result<Option<Note>> {
        let tables = self.tables.read().await;
        Ok(tables
            .notes
            .values()
            .find(|n| n.user_id == user_id && n.title == title)
            .cloned())
    }

    async fn get_notes_for_user(&self, user_id: i64) -> Result<Vec<Note>> {
        let tables = self.tables.read().await;
        let mut notes: Vec<Note> = tables
            .notes
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        sort_notes_newest_first(&mut notes);
        Ok(notes)
    }

    async fn get_shared_notes(&self, email: &str) -> Result<Vec<Note>> {
        let tables = self.tables.read().await;
        let note_ids: BTreeSet<i64> = tables
            .collaborators
            .values()
            .filter(|c| c.email == email)
            .map(|c| c.note_id)
            .collect();
        let mut notes: Vec<Note> = note_ids
            .iter()
            .filter_map(|id| tables.notes.get(id).cloned())
            .collect();
        sort_notes_newest_first(&mut notes);
        Ok(notes)
    }

    async fn create_note(&self, note: &NewNote) -> Result<Note> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&note.user_id) {
            return Err(RepositoryError::InvalidData(format!(
                "note owner {} does not exist",
                note.user_id
            )));
        }

        let created = Note {
            id: tables.allocate_id(),
            user_id: note.user_id,
            title: note.title.clone(),
            description: note.description.clone(),
            reminder: note.reminder,
            background_color: note.background_color.clone(),
            image: None,
            pinned: note.pinned,
            archived: note.archived,
            trashed: note.trashed,
            created_at: note.created_at,
            edited_at: note.created_at,
        };
        tables.notes.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_note(&self, note: &Note) -> Result<()> {
        let mut tables = self.tables.write().await;
        match tables.notes.get_mut(&note.id) {
            Some(stored) => {
                *stored = note.clone();
                Ok(())
            }
            None => Err(RepositoryError::not_found("Note", note.id)),
        }
    }

    async fn delete_note(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.notes.contains_key(&id) {
            return Err(RepositoryError::not_found("Note", id));
        }
        tables.remove_note(id);
        Ok(())
    }
}

#[async_trait]
impl LabelRepository for InMemoryRepository {
    async fn get_label(&self, id: i64) -> Result<Option<Label>> {
        let tables = self.tables.read().await;
        Ok(tables.labels.get(&id).cloned())
    }

    async fn get_label_by_name(&self, user_id: i64, name: &str) -> Result<Option<Label>> {
        let tables = self.tables.read().await;
        Ok(tables
            .labels
            .values()
            .find(|l| l.user_id == user_id && l.name == name)
            .cloned())
    }

    async fn get_labels_for_user(&self, user_id: i64) -> Result<Vec<Label>> {
        let tables = self.tables.read().await;
        let mut labels: Vec<Label> = tables
            .labels
            .values()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        labels.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(labels)
    }

    async fn create_label(&self, label: &NewLabel) -> Result<Label> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&label.user_id) {
            return Err(RepositoryError::InvalidData(format!(
                "label owner {} does not exist",
                label.user_id
            )));
        }
        if tables
            .labels
            .values()
            .any(|l| l.user_id == label.user_id && l.name == label.name)
        {
            return Err(RepositoryError::already_exists("Label", &label.name));
        }

        let created = Label {
            id: tables.allocate_id(),
            user_id: label.user_id,
            name: label.name.clone(),
            created_at: label.created_at,
            updated_at: label.created_at,
        };
        tables.labels.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_label(&self, label: &Label) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.labels.contains_key(&label.id) {
            return Err(RepositoryError::not_found("Label", &label.name));
        }
        if tables
            .labels
            .values()
            .any(|l| l.id != label.id && l.user_id == label.user_id && l.name == label.name)
        {
            return Err(RepositoryError::already_exists("Label", &label.name));
        }
        tables.labels.insert(label.id, label.clone());
        Ok(())
    }

    async fn delete_label(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.labels.contains_key(&id) {
            return Err(RepositoryError::not_found("Label", id));
        }
        tables.remove_label(id);
        Ok(())
    }

    async fn has_label_note(&self, link: LabelNote) -> Result<bool> {
        let tables = self.tables.read().await;
        Ok(tables.label_notes.contains(&link))
    }

    async fn add_label_note(&self, link: LabelNote) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.labels.contains_key(&link.label_id) || !tables.notes.contains_key(&link.note_id)
        {
            return Err(RepositoryError::InvalidData(format!(
                "label {} or note {} does not exist",
                link.label_id, link.note_id
            )));
        }
        if !tables.label_notes.insert(link) {
            return Err(RepositoryError::already_exists(
                "LabelNote",
                format!("{}:{}", link.label_id, link.note_id),
            ));
        }
        Ok(())
    }

    async fn get_note_ids_for_label(&self, label_id: i64) -> Result<Vec<i64>> {
        let tables = self.tables.read().await;
        Ok(tables
            .label_notes
            .iter()
            .filter(|link| link.label_id == label_id)
            .map(|link| link.note_id)
            .collect())
    }
}

#[async_trait]
impl CollaboratorRepository for InMemoryRepository {
    async fn get_collaborator(
        &self,
        owner_id: i64,
        note_id: i64,
        email: &str,
    ) -> Result<Option<Collaborator>> {
        let tables = self.tables.read().await;
        Ok(tables
            .collaborators
            .values()
            .find(|c| c.owner_id == owner_id && c.note_id == note_id && c.email == email)
            .cloned())
    }

    async fn get_collaborators_for_note(&self, note_id: i64) -> Result<Vec<Collaborator>> {
        let tables = self.tables.read().await;
        Ok(tables
            .collaborators
            .values()
            .filter(|c| c.note_id == note_id)
            .cloned()
            .collect())
    }

    async fn create_collaborator(&self, collaborator: &NewCollaborator) -> Result<Collaborator> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&collaborator.owner_id)
            || !tables.notes.contains_key(&collaborator.note_id)
        {
            return Err(RepositoryError::InvalidData(format!(
                "owner {} or note {} does not exist",
                collaborator.owner_id, collaborator.note_id
            )));
        }
        if tables.collaborators.values().any(|c| {
            c.owner_id == collaborator.owner_id
                && c.note_id == collaborator.note_id
                && c.email == collaborator.email
        }) {
            return Err(RepositoryError::already_exists(
                "Collaborator",
                &collaborator.email,
            ));
        }

        let created = Collaborator {
            id: tables.allocate_id(),
            owner_id: collaborator.owner_id,
            note_id: collaborator.note_id,
            email: collaborator.email.clone(),
            created_at: collaborator.created_at,
        };
        tables.collaborators.insert(created.id, created.clone());
        Ok(created)
    }

    async fn delete_collaborator(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.collaborators.remove(&id).is_none() {
            return Err(RepositoryError::not_found("Collaborator", id));
        }
        Ok(())
    }

    async fn delete_collaborators_for_email(&self, email: &str) -> Result<Vec<Collaborator>> {
        let mut tables = self.tables.write().await;
        let mut removed = Vec::new();
        tables.collaborators.retain(|_, c| {
            if c.email == email {
                removed.push(c.clone());
                return false;
            }
            true
        });
        Ok(removed)
    }
}
