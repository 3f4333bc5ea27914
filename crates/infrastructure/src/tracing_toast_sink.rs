//! Toast sink for headless deployments. Logs toasts to tracing output.

use lantern_application::{Toast, ToastSink};
use tracing::info;

/// Toast sink that writes each toast as a structured log event.
#[derive(Debug, Clone, Default)]
pub struct TracingToastSink;

impl TracingToastSink {
    /// Creates a new tracing toast sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ToastSink for TracingToastSink {
    fn show(&self, toast: &Toast) {
        info!(
            kind = toast.kind.as_str(),
            title = toast.title.as_str(),
            duration_ms = u64::try_from(toast.duration.as_millis()).unwrap_or(u64::MAX),
            "{}",
            toast.description
        );
    }
}
