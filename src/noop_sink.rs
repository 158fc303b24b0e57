use crate::sink::DiagnosticSink;

/// A diagnostic sink that drops everything.
///
/// Useful when collector rejections should not show up on stderr, e.g. in
/// benchmarks or in processes whose stderr is itself shipped somewhere.
#[derive(Clone, Debug, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn report(&self, _message: &str) {}
}
