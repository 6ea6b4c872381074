//! User-facing feedback messages.

/// Sink for transient success/error feedback after an operation settles.
pub trait ToastSink: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Default sink: structured log events at `info` / `warn`.
pub struct TracingToast;

impl ToastSink for TracingToast {
    fn success(&self, message: &str) {
        tracing::info!(target: "toast", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::warn!(target: "toast", "{message}");
    }
}
