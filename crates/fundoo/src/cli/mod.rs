//! CLI command definitions and dispatch.

pub mod collabs;
pub mod labels;
pub mod notes;
pub mod users;

mod run;

pub use run::execute;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

/// Fundoo - Notes with labels and collaborators behind a cache
#[derive(Debug, Parser)]
#[command(name = "fundoo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Acting user for note, label and collaborator commands.
    #[arg(long, short, global = true, env = "FUNDOO_USER_ID")]
    pub user_id: Option<i64>,

    /// Output format.
    #[arg(long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Single-line JSON.
    Json,
    /// Indented JSON.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Registration, login and account changes.
    Users(users::UsersCommand),
    /// Note management.
    Notes(notes::NotesCommand),
    /// Label management.
    Labels(labels::LabelsCommand),
    /// Note sharing.
    Collabs(collabs::CollabsCommand),
}

/// Format a value for output.
pub fn format_output<T: Serialize>(value: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(value).unwrap_or_default(),
        OutputFormat::Pretty => serde_json::to_string_pretty(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_global_user_id_after_subcommand() {
        let cli = Cli::try_parse_from(["fundoo", "notes", "list", "--user-id", "7"]).unwrap();

        assert_eq!(cli.user_id, Some(7));
        assert!(matches!(
            cli.command,
            Commands::Notes(notes::NotesCommand {
                action: notes::NotesAction::List {
                    pinned: false,
                    archived: false
                }
            })
        ));
    }

    #[test]
    fn test_format_output() {
        let value = serde_json::json!({ "success": true });

        assert_eq!(format_output(&value, OutputFormat::Json), r#"{"success":true}"#);
        assert_eq!(
            format_output(&value, OutputFormat::Pretty),
            "{\n  \"success\": true\n}"
        );
    }
}
