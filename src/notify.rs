//! User-facing notices
//!
//! Validation failures, login results and other messages the user must see.
//! The browser shows them as toasts; the terminal monitor logs them.

/// Surfaces short messages to the user
pub trait Notifier {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that writes through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}
