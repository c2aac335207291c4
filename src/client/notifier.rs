/// Where submission feedback goes. Every call carries the form's stable id,
/// so an implementation replaces the previous notification instead of stacking.
pub trait Notifier: Send + Sync {
    fn loading(&self, id: &str, message: &str);
    fn success(&self, id: &str, message: &str);
    fn error(&self, id: &str, message: &str);
}

/// Writes notifications to the log.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn loading(&self, id: &str, message: &str) {
        tracing::debug!(toast = id, "{message}");
    }

    fn success(&self, id: &str, message: &str) {
        tracing::info!(toast = id, "{message}");
    }

    fn error(&self, id: &str, message: &str) {
        tracing::warn!(toast = id, "{message}");
    }
}
