//! Notification delivery.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use fundoo_core::notify::{EmailMessage, Notifier, NotifyError};

/// Notifier that writes each message to the log instead of an SMTP relay.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        info!(to = %message.to, subject = %message.subject, "Email sent");
        Ok(())
    }
}

/// Sends a message on a background task.
///
/// The caller never waits for delivery; a failure is only logged.
pub fn notify_in_background(notifier: Arc<dyn Notifier>, message: EmailMessage) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = notifier.send(&message).await {
            warn!(to = %message.to, error = %e, "Failed to send email");
        }
    })
}
