//! Transient user notifications ("toasts")
//!
//! Notifications are broadcast to whoever is listening. Nobody listening is
//! not an error: a toast nobody sees is simply dropped.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;
use vivopass_core::ErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    /// Failure category, for error notifications
    pub kind: Option<ErrorKind>,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.publish(Notification {
            level: NotificationLevel::Success,
            kind: None,
            message: message.into(),
        });
    }

    pub fn info(&self, message: impl Into<String>) {
        self.publish(Notification {
            level: NotificationLevel::Info,
            kind: None,
            message: message.into(),
        });
    }

    /// Error toast with the fixed message for `kind`
    pub fn error(&self, kind: ErrorKind) {
        self.publish(Notification {
            level: NotificationLevel::Error,
            kind: Some(kind),
            message: kind.message().to_string(),
        });
    }

    fn publish(&self, notification: Notification) {
        debug!(level = ?notification.level, "{}", notification.message);
        let _ = self.tx.send(notification);
    }
}
