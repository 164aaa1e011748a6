//! Collaborator CLI commands.

use clap::{Parser, Subcommand};

/// Collaborator management commands.
#[derive(Debug, Parser)]
pub struct CollabsCommand {
    #[command(subcommand)]
    pub action: CollabsAction,
}

/// Available collaborator actions.
#[derive(Debug, Subcommand)]
pub enum CollabsAction {
    /// Share a note with a registered user.
    Add {
        #[arg(long)]
        note_id: i64,
        #[arg(long)]
        email: String,
    },
    /// Stop sharing a note.
    Remove {
        #[arg(long)]
        note_id: i64,
        #[arg(long)]
        email: String,
    },
    /// List a note's collaborators.
    List { note_id: i64 },
}
