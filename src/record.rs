use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::panic::Location;

use crate::trace::TraceableError;

/// Severity of a [`LogRecord`].
///
/// The discriminants are the integers the collector receives in
/// `log_level`. They are only kept for wire compatibility; nothing in this
/// crate filters on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Debug = 1,
    Information = 2,
    Warning = 3,
    Error = 4,
    Fatal = 5,
}

impl Level {
    /// All severities, lowest first.
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Information,
        Level::Warning,
        Level::Error,
        Level::Fatal,
    ];

    /// Integer sent as `log_level`.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Lowercase label sent as `log_level_description`.
    pub fn label(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Information => "information",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }

    /// Capitalized name used in stack trace headers.
    pub fn title(self) -> &'static str {
        match self {
            Level::Debug => "Debug",
            Level::Information => "Information",
            Level::Warning => "Warning",
            Level::Error => "Error",
            Level::Fatal => "Fatal",
        }
    }

    fn stack_header(self) -> String {
        format!("{} Stacktrace:", self.title())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A file/line pair identifying where a log call was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self { file: file.into(), line }
    }

    /// Location of the code calling this function.
    #[track_caller]
    pub fn caller() -> Self {
        Location::caller().into()
    }
}

impl From<&Location<'_>> for SourceLocation {
    fn from(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line())
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// One log event, built at call time and serialized exactly once.
///
/// Records can only be produced through [`LogRecord::at_location`] or
/// [`LogRecord::from_error`], so `level` and its label never disagree and
/// a record is never changed after it is built.
#[derive(Debug, Clone)]
pub struct LogRecord {
    message: String,
    stack_trace: String,
    level: Level,
    timestamp: DateTime<Utc>,
}

impl LogRecord {
    /// Build a record whose stack trace is synthesized from a caller
    /// supplied location.
    ///
    /// **Returns**
    /// - A record with `stack_trace` equal to
    ///   `"<Title> Stacktrace:\n-> <file>:<line>"`.
    pub fn at_location(level: Level, message: impl Into<String>, location: &SourceLocation) -> Self {
        Self {
            message: message.into(),
            stack_trace: format!("{}\n-> {}", level.stack_header(), location),
            level,
            timestamp: Utc::now(),
        }
    }

    /// Build a record from an error value, capturing the current call stack.
    ///
    /// **Returns**
    /// - A record whose `message` is the error's description and whose
    ///   `stack_trace` is the rendered stack under a `"<Title> Stacktrace:"`
    ///   header. The trace always spans at least two lines.
    pub fn from_error<E: TraceableError + ?Sized>(level: Level, err: &E) -> Self {
        let timestamp = Utc::now();
        let mut trace = err.stack_trace();
        if trace.trim().is_empty() {
            trace = "-> <unknown>".to_string();
        }
        Self {
            message: err.describe(),
            stack_trace: format!("{}\n{}", level.stack_header(), trace.trim_end()),
            level,
            timestamp,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack_trace(&self) -> &str {
        &self.stack_trace
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn level_label(&self) -> &'static str {
        self.level.label()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn map_event(&self) -> HecEvent<'_> {
        HecEvent {
            message: &self.message,
            stack_trace: &self.stack_trace,
            log_level: self.level.ordinal(),
            log_level_description: self.level.label(),
            event_time: self.timestamp.to_rfc3339(),
        }
    }

    /// Serialize the record inside the collector's `{"event": ...}` body.
    pub fn to_envelope_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&HecEnvelope {
            event: self.map_event(),
        })
    }
}

#[derive(Serialize)]
struct HecEnvelope<'a> {
    event: HecEvent<'a>,
}

#[derive(Serialize)]
struct HecEvent<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "is_blank")]
    stack_trace: &'a str,
    #[serde(skip_serializing_if = "is_unset")]
    log_level: u8,
    #[serde(skip_serializing_if = "is_blank")]
    log_level_description: &'a str,
    event_time: String,
}

fn is_blank(text: &&str) -> bool {
    text.is_empty()
}

fn is_unset(ordinal: &u8) -> bool {
    *ordinal == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn labels_and_ordinals_follow_the_wire_table() {
        let expected = [
            (Level::Debug, 1, "debug"),
            (Level::Information, 2, "information"),
            (Level::Warning, 3, "warning"),
            (Level::Error, 4, "error"),
            (Level::Fatal, 5, "fatal"),
        ];
        for (level, ordinal, label) in expected {
            assert_eq!(level.ordinal(), ordinal);
            assert_eq!(level.label(), label);
            assert_eq!(level.to_string(), label);
        }
    }

    #[test]
    fn located_records_synthesize_a_single_frame() {
        let location = SourceLocation::new("f.go", 42);
        let record = LogRecord::at_location(Level::Warning, "m", &location);
        assert_eq!(record.message(), "m");
        assert_eq!(record.stack_trace(), "Warning Stacktrace:\n-> f.go:42");
        assert_eq!(record.level_label(), "warning");
    }

    #[test]
    fn caller_location_points_at_this_file() {
        let location = SourceLocation::caller();
        assert!(location.file.ends_with("record.rs"));
        assert!(location.line > 0);
    }

    #[test]
    fn envelope_wraps_the_event() {
        let record = LogRecord::at_location(Level::Debug, "hello", &SourceLocation::new("a.rs", 7));
        let json: Value = serde_json::from_str(&record.to_envelope_json().unwrap()).unwrap();
        let event = &json["event"];
        assert_eq!(json.as_object().unwrap().len(), 1);
        assert_eq!(event["message"], "hello");
        assert_eq!(event["stack_trace"], "Debug Stacktrace:\n-> a.rs:7");
        assert_eq!(event["log_level"], 1);
        assert_eq!(event["log_level_description"], "debug");

        let time = event["event_time"].as_str().unwrap();
        let parsed = DateTime::parse_from_rfc3339(time).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), record.timestamp());
    }

    #[test]
    fn empty_fields_are_omitted_from_the_event() {
        let event = HecEvent {
            message: "",
            stack_trace: "",
            log_level: 0,
            log_level_description: "",
            event_time: Utc::now().to_rfc3339(),
        };
        let json = serde_json::to_value(&event).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["event_time".to_string(), "message".to_string()]);
    }
}
