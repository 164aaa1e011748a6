//! User CLI commands.

use clap::{Parser, Subcommand};

/// User management commands.
#[derive(Debug, Parser)]
pub struct UsersCommand {
    #[command(subcommand)]
    pub action: UsersAction,
}

/// Available user actions.
#[derive(Debug, Subcommand)]
pub enum UsersAction {
    /// Register a new account.
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Check credentials.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Look a user up by first name.
    Find {
        first_name: String,
    },
    /// Change first and last name.
    Rename {
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    /// Change password.
    ChangePassword {
        #[arg(long)]
        email: String,
        #[arg(long)]
        old_password: String,
        #[arg(long)]
        new_password: String,
    },
    /// Delete an account and everything it owns.
    Delete {
        #[arg(long)]
        email: String,
    },
    /// Email a reset-password link.
    ForgetPassword {
        #[arg(long)]
        email: String,
    },
    /// Send a greeting email.
    SendEmail {
        #[arg(long)]
        email: String,
    },
}
