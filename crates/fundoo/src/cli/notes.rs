//! Note CLI commands.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

use fundoo_core::notes::{CreateNoteRequest, UpdateNoteRequest, DEFAULT_BACKGROUND_COLOR};

/// Note management commands.
#[derive(Debug, Parser)]
pub struct NotesCommand {
    #[command(subcommand)]
    pub action: NotesAction,
}

/// Editable note fields.
#[derive(Debug, Args)]
pub struct NoteFields {
    /// Note title.
    #[arg(long)]
    pub title: String,
    /// Note body.
    #[arg(long, default_value = "")]
    pub description: String,
    /// Reminder time (RFC 3339).
    #[arg(long)]
    pub reminder: Option<DateTime<Utc>>,
    /// Background color.
    #[arg(long, default_value = DEFAULT_BACKGROUND_COLOR)]
    pub color: String,
    #[arg(long)]
    pub pinned: bool,
    #[arg(long)]
    pub archived: bool,
    #[arg(long)]
    pub trashed: bool,
}

impl From<NoteFields> for CreateNoteRequest {
    fn from(fields: NoteFields) -> Self {
        Self {
            title: fields.title,
            description: fields.description,
            reminder: fields.reminder,
            background_color: fields.color,
            pinned: fields.pinned,
            archived: fields.archived,
            trashed: fields.trashed,
        }
    }
}

impl From<NoteFields> for UpdateNoteRequest {
    fn from(fields: NoteFields) -> Self {
        Self {
            title: fields.title,
            description: fields.description,
            reminder: fields.reminder,
            background_color: fields.color,
            pinned: fields.pinned,
            archived: fields.archived,
            trashed: fields.trashed,
        }
    }
}

/// Available note actions.
#[derive(Debug, Subcommand)]
pub enum NotesAction {
    /// Create a note.
    Create {
        #[command(flatten)]
        fields: NoteFields,
    },
    /// List owned and shared notes, newest first.
    List {
        /// Only pinned notes.
        #[arg(long, conflicts_with = "archived")]
        pinned: bool,
        /// Only archived notes.
        #[arg(long)]
        archived: bool,
    },
    /// Get a note by ID.
    Get { id: i64 },
    /// Replace a note's editable fields.
    Update {
        id: i64,
        #[command(flatten)]
        fields: NoteFields,
    },
    /// Flip the pinned flag.
    Pin { id: i64 },
    Archive { id: i64 },
    Unarchive { id: i64 },
    /// Move to trash.
    Trash { id: i64 },
    /// Restore from trash.
    Restore { id: i64 },
    /// Change the background color.
    Color { id: i64, color: String },
    /// Attach an image file.
    UploadImage { id: i64, path: PathBuf },
    /// Delete a note permanently.
    Delete { id: i64 },
}
