use crate::core::Notifier;

/// Prints user-facing errors to stderr and records them as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn error(&self, message: &str) {
        tracing::error!(notification = message, "Cart operation failed");
        eprintln!("❌ {}", message);
    }
}
