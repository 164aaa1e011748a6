//! Dispatches parsed commands to the services.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use fundoo_core::files::ImageUpload;
use fundoo_core::notes::{CollaboratorRequest, LoginRequest, RegisterUserRequest, UpdateLabelRequest};
use fundoo_core::response::Response;

use super::collabs::CollabsAction;
use super::labels::LabelsAction;
use super::notes::NotesAction;
use super::users::UsersAction;
use super::Commands;
use crate::state::AppState;

fn envelope<T: Serialize>(response: Response<T>) -> Result<Value> {
    Ok(serde_json::to_value(response)?)
}

fn acting_user(user_id: Option<i64>) -> Result<i64> {
    user_id.context("--user-id is required for this command")
}

/// Runs one command and returns its response envelope as JSON.
///
/// Errors are reserved for problems outside the services, such as a
/// missing `--user-id` or an unreadable upload file.
pub async fn execute(state: &AppState, command: Commands, user_id: Option<i64>) -> Result<Value> {
    match command {
        Commands::Users(cmd) => users(state, cmd.action).await,
        Commands::Notes(cmd) => notes(state, cmd.action, acting_user(user_id)?).await,
        Commands::Labels(cmd) => labels(state, cmd.action, acting_user(user_id)?).await,
        Commands::Collabs(cmd) => collabs(state, cmd.action, user_id).await,
    }
}

async fn users(state: &AppState, action: UsersAction) -> Result<Value> {
    let users = &state.users;
    match action {
        UsersAction::Register {
            first_name,
            last_name,
            email,
            password,
        } => envelope(
            users
                .register(RegisterUserRequest {
                    first_name,
                    last_name,
                    email,
                    password,
                })
                .await,
        ),
        UsersAction::Login { email, password } => {
            envelope(users.login(LoginRequest { email, password }).await)
        }
        UsersAction::Find { first_name } => envelope(users.find_by_first_name(&first_name).await),
        UsersAction::Rename {
            email,
            first_name,
            last_name,
        } => envelope(users.update_name(&email, &first_name, &last_name).await),
        UsersAction::ChangePassword {
            email,
            old_password,
            new_password,
        } => envelope(
            users
                .change_password(&email, &old_password, &new_password)
                .await,
        ),
        UsersAction::Delete { email } => envelope(users.delete(&email).await),
        UsersAction::ForgetPassword { email } => envelope(users.forget_password(&email).await),
        UsersAction::SendEmail { email } => envelope(users.send_email(&email).await),
    }
}

async fn notes(state: &AppState, action: NotesAction, user_id: i64) -> Result<Value> {
    let notes = &state.notes;
    match action {
        NotesAction::Create { fields } => envelope(notes.create(user_id, fields.into()).await),
        NotesAction::List { pinned: true, .. } => envelope(notes.get_pinned(user_id).await),
        NotesAction::List { archived: true, .. } => envelope(notes.get_archived(user_id).await),
        NotesAction::List { .. } => envelope(notes.get_all(user_id).await),
        NotesAction::Get { id } => envelope(notes.get(id).await),
        NotesAction::Update { id, fields } => {
            envelope(notes.update(user_id, id, fields.into()).await)
        }
        NotesAction::Pin { id } => envelope(notes.toggle_pin(user_id, id).await),
        NotesAction::Archive { id } => envelope(notes.archive(user_id, id).await),
        NotesAction::Unarchive { id } => envelope(notes.unarchive(user_id, id).await),
        NotesAction::Trash { id } => envelope(notes.trash(user_id, id).await),
        NotesAction::Restore { id } => envelope(notes.restore(user_id, id).await),
        NotesAction::Color { id, color } => envelope(notes.set_color(user_id, id, &color).await),
        NotesAction::UploadImage { id, path } => {
            let content = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            envelope(
                notes
                    .upload_image(user_id, id, ImageUpload { file_name, content })
                    .await,
            )
        }
        NotesAction::Delete { id } => envelope(notes.delete(user_id, id).await),
    }
}

async fn labels(state: &AppState, action: LabelsAction, user_id: i64) -> Result<Value> {
    let labels = &state.labels;
    match action {
        LabelsAction::Create { name } => envelope(labels.create(user_id, &name).await),
        LabelsAction::Delete { name } => envelope(labels.delete(user_id, &name).await),
        LabelsAction::Attach { name, note_id } => {
            envelope(labels.add_to_note(user_id, &name, note_id).await)
        }
        LabelsAction::List => envelope(labels.view_all(user_id).await),
        LabelsAction::Rename { old_name, new_name } => envelope(
            labels
                .rename(user_id, UpdateLabelRequest { old_name, new_name })
                .await,
        ),
        LabelsAction::Get { id } => envelope(labels.get_by_id(user_id, id).await),
        LabelsAction::Notes { id } => envelope(labels.notes_for_label(user_id, id).await),
    }
}

async fn collabs(state: &AppState, action: CollabsAction, user_id: Option<i64>) -> Result<Value> {
    let collabs = &state.collabs;
    match action {
        CollabsAction::Add { note_id, email } => envelope(
            collabs
                .add(acting_user(user_id)?, CollaboratorRequest { note_id, email })
                .await,
        ),
        CollabsAction::Remove { note_id, email } => envelope(
            collabs
                .remove(acting_user(user_id)?, CollaboratorRequest { note_id, email })
                .await,
        ),
        CollabsAction::List { note_id } => envelope(collabs.get_all(note_id).await),
    }
}

#[cfg(all(test, feature = "memory"))]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;
    use crate::config::Config;

    async fn state(dir: &tempfile::TempDir) -> AppState {
        let config = Config {
            cache_ttl_seconds: 1800,
            cache_max_entries: 100,
            sqlite_path: dir.path().join("fundoo.db").to_string_lossy().into_owned(),
            redis_url: "redis://localhost:6379".to_string(),
            uploads_dir: dir.path().join("Uploads").to_string_lossy().into_owned(),
            reset_password_url: "http://localhost:5000/resetpassword".to_string(),
        };
        AppState::new(&config).await.unwrap()
    }

    async fn run(state: &AppState, args: &[&str]) -> Result<Value> {
        let cli = Cli::try_parse_from(std::iter::once("fundoo").chain(args.iter().copied()))?;
        execute(state, cli.command, cli.user_id).await
    }

    #[tokio::test]
    async fn test_note_commands_require_user_id() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir).await;

        let err = run(&state, &["notes", "list"]).await.unwrap_err();

        assert!(err.to_string().contains("--user-id"));
    }

    #[tokio::test]
    async fn test_commands_return_envelopes() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(&dir).await;

        let registered = run(
            &state,
            &[
                "users",
                "register",
                "--first-name",
                "Alice",
                "--last-name",
                "Smith",
                "--email",
                "alice@example.com",
                "--password",
                "Abcdef1",
            ],
        )
        .await
        .unwrap();
        let user_id = registered["data"]["id"].as_i64().unwrap();
        let user_arg = user_id.to_string();

        let created = run(
            &state,
            &["notes", "create", "--title", "Groceries", "--user-id", &user_arg],
        )
        .await
        .unwrap();
        let listed = run(&state, &["notes", "list", "--user-id", &user_arg])
            .await
            .unwrap();
        let missing = run(&state, &["labels", "get", "99", "--user-id", &user_arg])
            .await
            .unwrap();

        assert_eq!(registered["success"], true);
        assert_eq!(created["data"]["title"], "Groceries");
        assert_eq!(listed["data"].as_array().map(|n| n.len()), Some(1));
        assert_eq!(missing["success"], false);
        assert!(missing.get("data").is_none());
    }
}
