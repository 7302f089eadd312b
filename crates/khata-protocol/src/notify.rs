use tracing::{error, info};

/// User-facing severity of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Fire-and-forget sink for user-facing notifications.
///
/// Notifications carry no machine-readable detail; they exist only so a
/// surface (CLI, UI) can tell the user an operation succeeded or failed.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Sink that forwards notifications to the tracing subscriber.
#[derive(Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Success => info!(target: "khata::notify", "{message}"),
            Severity::Error => error!(target: "khata::notify", "{message}"),
        }
    }
}

/// Sink that drops everything, for embedding and tests.
#[derive(Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _message: &str, _severity: Severity) {}
}
