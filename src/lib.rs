//! Fire-and-forget client for the Splunk HTTP Event Collector.
//!
//! A [`HecEmitter`] turns each log call into one JSON event and one POST to
//! `<endpoint>:<port>/services/collector/event`. Logging never fails from
//! the caller's point of view: rejected events are reported through a
//! [`DiagnosticSink`](sink::DiagnosticSink), everything else is dropped.

pub mod record;
pub mod trace;
pub mod sink;
pub mod noop_sink;
pub mod emitter;
pub mod config;
pub mod env;

#[macro_use]
mod macros;

pub use config::{ConfigError, HecConfig};
pub use emitter::HecEmitter;
pub use record::{Level, LogRecord, SourceLocation};
pub use trace::TraceableError;
