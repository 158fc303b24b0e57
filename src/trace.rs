use backtrace::Backtrace;
use std::error::Error;

/// Capability required from values passed to
/// [`HecEmitter::log_error`](crate::emitter::HecEmitter::log_error) and
/// [`HecEmitter::log_fatal`](crate::emitter::HecEmitter::log_fatal).
///
/// Every [`std::error::Error`] gets an implementation that captures the
/// call stack at the point it is logged. Types that are not `Error`s, or
/// that carry their own recorded stack, can implement it directly.
pub trait TraceableError {
    /// Human-readable description, sent as the event `message`.
    fn describe(&self) -> String;

    /// Multi-line rendering of the call chain, one frame per line.
    fn stack_trace(&self) -> String;
}

impl<E: Error + ?Sized> TraceableError for E {
    fn describe(&self) -> String {
        self.to_string()
    }

    fn stack_trace(&self) -> String {
        let mut lines = capture_frames();
        let mut source = self.source();
        while let Some(cause) = source {
            lines.push(format!("caused by: {}", cause));
            source = cause.source();
        }
        lines.join("\n")
    }
}

/// Capture the current call stack and render one `-> file:line function`
/// line per resolved symbol, innermost first.
pub fn capture_frames() -> Vec<String> {
    let backtrace = Backtrace::new();
    let mut lines = Vec::new();

    for frame in backtrace.frames() {
        for symbol in frame.symbols() {
            let name = match symbol.name() {
                Some(name) => format!("{:#}", name),
                None => continue,
            };
            if is_capture_frame(&name) {
                continue;
            }
            let line = match (symbol.filename(), symbol.lineno()) {
                (Some(file), Some(lineno)) => format!("-> {}:{} {}", file.display(), lineno, name),
                _ => format!("-> {}", name),
            };
            lines.push(line);
        }
    }

    lines
}

// Frames of the unwinder and of this crate's record building sit on top of
// every capture; the rendered trace starts at the logging caller.
fn is_capture_frame(name: &str) -> bool {
    const CAPTURE_PREFIXES: &[&str] = &["backtrace::", "<backtrace::"];
    const CRATE_FRAMES: &[&str] = &[
        "splunk_log_sink::trace::",
        "splunk_log_sink::record::",
        "splunk_log_sink::emitter::HecEmitter::log_",
    ];

    CAPTURE_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
        || CRATE_FRAMES.iter().any(|frame| name.contains(frame))
}
