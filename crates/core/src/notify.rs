//! Outbound notifications.
//!
//! Messages are built here as plain values; delivery belongs to a
//! [`Notifier`] implementation in the shell.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::notes::UserProfile;

/// A single email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    /// HTML body.
    pub body: String,
}

/// Errors returned by a notifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("Notification delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Fire-and-forget message delivery.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one message.
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError>;
}

/// The welcome message sent after registration.
pub fn welcome_email(user: &UserProfile) -> EmailMessage {
    EmailMessage {
        to: user.email.clone(),
        subject: "🎉 Welcome to Our Platform!".to_string(),
        body: format!(
            "Hey {} {}! 👋<br/><br/>\
             We're super excited to have you on board! 🚀<br/>\
             Get ready to explore awesome features and make your journey with us amazing. 💫<br/><br/>\
             Cheers,<br/>The Fundoo Team ❤️",
            user.first_name, user.last_name
        ),
    }
}

/// The reset-password link. `reset_url` is the page that takes an `email`
/// query parameter.
pub fn reset_password_email(email: &str, reset_url: &str) -> EmailMessage {
    EmailMessage {
        to: email.to_string(),
        subject: "Reset Password".to_string(),
        body: format!(
            "Click here to reset your password: <a href='{}?email={}'>Reset Password</a>",
            reset_url, email
        ),
    }
}

/// A short greeting sent on request.
pub fn greeting_email(user: &UserProfile) -> EmailMessage {
    EmailMessage {
        to: user.email.clone(),
        subject: "Welcome to our service".to_string(),
        body: format!("Hello {}, welcome to our service!", user.first_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> UserProfile {
        UserProfile {
            id: 1,
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    #[test]
    fn test_welcome_email() {
        let message = welcome_email(&alice());

        assert_eq!(message.to, "alice@example.com");
        assert_eq!(message.subject, "🎉 Welcome to Our Platform!");
        assert!(message.body.starts_with("Hey Alice Smith! 👋"));
        assert!(message.body.ends_with("The Fundoo Team ❤️"));
    }

    #[test]
    fn test_reset_password_email_links_email() {
        let message =
            reset_password_email("alice@example.com", "http://localhost:5000/resetpassword");

        assert_eq!(message.subject, "Reset Password");
        assert!(message
            .body
            .contains("http://localhost:5000/resetpassword?email=alice@example.com"));
    }

    #[test]
    fn test_greeting_email() {
        let message = greeting_email(&alice());

        assert_eq!(message.body, "Hello Alice, welcome to our service!");
    }
}
