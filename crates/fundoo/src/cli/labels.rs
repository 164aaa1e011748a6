//! Label CLI commands.

use clap::{Parser, Subcommand};

/// Label management commands.
#[derive(Debug, Parser)]
pub struct LabelsCommand {
    #[command(subcommand)]
    pub action: LabelsAction,
}

/// Available label actions.
#[derive(Debug, Subcommand)]
pub enum LabelsAction {
    /// Create a label.
    Create { name: String },
    /// Delete a label by name.
    Delete { name: String },
    /// Attach a label to a note.
    Attach { name: String, note_id: i64 },
    /// List labels.
    List,
    /// Rename a label.
    Rename {
        #[arg(long)]
        old_name: String,
        #[arg(long)]
        new_name: String,
    },
    /// Get a label by ID.
    Get { id: i64 },
    /// IDs of the notes carrying a label.
    Notes { id: i64 },
}
