//! Notification sinks.
//!
//! A `Notifier` is fire-and-forget: the core hands it a rendered message and
//! a severity and never looks at the result. Two sinks ship with the crate:
//!
//! - [`LogNotifier`] writes notifications to the `log` facade.
//! - [`ChannelNotifier`] forwards timestamped [`Notification`]s to whatever
//!   task owns the receiving end (usually the UI's toast queue).

use chrono::{DateTime, Utc};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// A notification as delivered to a UI consumer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub emitted_at: DateTime<Utc>,
}

pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Success => info!("{message}"),
            Severity::Error => error!("{message}"),
        }
    }
}

pub struct ChannelNotifier {
    sender: UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new(sender: UnboundedSender<Notification>) -> Self {
        Self { sender }
    }

    /// Creates a notifier together with the receiver its notifications land on.
    pub fn channel() -> (Self, UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        let notification = Notification {
            message: message.to_string(),
            severity,
            emitted_at: Utc::now(),
        };
        // Receiver gone means nobody is showing toasts anymore.
        if self.sender.send(notification).is_err() {
            debug!("Dropping notification, receiver closed: {message}");
        }
    }
}
