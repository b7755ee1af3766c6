//! Human-readable progress lines for a run.

/// Sink for progress lines.
pub trait ProgressLog {
    fn line(&self, message: &str);
}

/// Emits each line as an `info` event on the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressLog for TracingProgress {
    fn line(&self, message: &str) {
        tracing::info!("{}", message);
    }
}

