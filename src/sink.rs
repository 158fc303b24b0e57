use std::io::Write;
use std::sync::{Arc, Mutex};

/// Side channel that receives the diagnostics a [`HecEmitter`] produces
/// instead of returning errors to its callers.
///
/// The emitter reports a line here when the collector rejects an event
/// (non-2xx status); the line is the response body as received.
///
/// [`HecEmitter`]: crate::emitter::HecEmitter
pub trait DiagnosticSink: Send + Sync {
    /// Report a single diagnostic message.
    ///
    /// **Parameters**
    /// - `message`: text to report, usually the collector's response body.
    ///
    /// Called on the task performing the log call. Implementations must not
    /// panic and should return quickly.
    fn report(&self, message: &str);
}

/// Writes every diagnostic as one line on standard error.
#[derive(Clone, Debug, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn report(&self, message: &str) {
        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        let _ = writeln!(handle, "{}", message);
    }
}

/// Keeps diagnostics in memory so they can be inspected later.
///
/// Clones share the same buffer.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far, oldest first.
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Whether any reported line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, message: &str) {
        let mut lines = match self.lines.lock() {
            Ok(lines) => lines,
            Err(poisoned) => poisoned.into_inner(),
        };
        lines.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_clones_share_a_buffer() {
        let sink = MemorySink::new();
        let other = sink.clone();
        other.report("server error");
        sink.report("second");

        assert_eq!(sink.lines(), vec!["server error".to_string(), "second".to_string()]);
        assert!(sink.contains("server"));
        assert!(!sink.contains("missing"));
    }

    #[test]
    fn sinks_are_usable_as_trait_objects() {
        let stderr: Arc<dyn DiagnosticSink> = Arc::new(StderrSink);
        let memory: Arc<dyn DiagnosticSink> = Arc::new(MemorySink::new());
        for sink in [stderr, memory] {
            sink.report("diagnostic from test");
        }
    }
}
