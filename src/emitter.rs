use crate::config::HecConfig;
use crate::record::{Level, LogRecord, SourceLocation};
use crate::sink::{DiagnosticSink, StderrSink};
use crate::trace::TraceableError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Path of the collector's event endpoint, appended to `endpoint:port`.
pub const COLLECTOR_PATH: &str = "/services/collector/event";

/// Upper bound for one complete HTTP exchange with the collector.
pub const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Reasons a record did not make it to the collector.
///
/// Never returned from the public logging methods; the emitter turns these
/// into internal `tracing` events and diagnostic sink output.
#[derive(thiserror::Error, Debug)]
pub(crate) enum SendError {
    #[error("failed to serialize log event: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to build collector request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("collector request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("collector rejected log event with status {status}")]
    Rejected { status: u16, body: String },
}

/// Client for a Splunk HTTP Event Collector.
///
/// Holds only the token, endpoint and port it was created with, plus the
/// sink that receives diagnostics. Nothing in it changes after
/// construction, so one instance can be shared (or cloned) across any
/// number of tasks.
///
/// Every logging method builds one record immediately, then performs one
/// POST when the returned future is awaited. Failures never reach the
/// caller: rejected events print the collector's response body to the
/// diagnostic sink, anything else is dropped.
///
/// The returned futures are ordinary Rust futures: dropping one before it
/// completes (for example from `tokio::select!` or `tokio::time::timeout`)
/// abandons the in-flight POST, and the event may or may not have reached
/// the collector. Await them to completion to get the one-request-per-call
/// behaviour bounded only by [`SEND_TIMEOUT`].
#[derive(Clone)]
pub struct HecEmitter {
    token: String,
    endpoint: String,
    port: u16,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl HecEmitter {
    /// Create an emitter for `<endpoint>:<port>`.
    ///
    /// **Parameters**
    /// - `token`: HEC token, sent as `Authorization: Splunk <token>`.
    /// - `endpoint`: scheme and host of the collector, e.g.
    ///   `"https://splunk.example.com"`.
    /// - `port`: collector port, usually `8088`.
    ///
    /// No validation or I/O happens here; a bad token or unreachable
    /// endpoint only shows up when events are sent.
    pub fn new(token: impl Into<String>, endpoint: impl Into<String>, port: u16) -> Self {
        Self {
            token: token.into(),
            endpoint: endpoint.into(),
            port,
            diagnostics: Arc::new(StderrSink),
        }
    }

    pub fn from_config(config: HecConfig) -> Self {
        Self::new(config.token, config.endpoint, config.port)
    }

    /// Replace the default stderr diagnostics with `sink`.
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Full URL events are posted to.
    pub fn url(&self) -> String {
        format!("{}:{}{}", self.endpoint, self.port, COLLECTOR_PATH)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn log_debug(
        &self,
        message: impl Into<String>,
        location: SourceLocation,
    ) -> impl Future<Output = ()> + Send + '_ {
        self.emit(LogRecord::at_location(Level::Debug, message, &location))
    }

    pub fn log_information(
        &self,
        message: impl Into<String>,
        location: SourceLocation,
    ) -> impl Future<Output = ()> + Send + '_ {
        self.emit(LogRecord::at_location(Level::Information, message, &location))
    }

    pub fn log_warning(
        &self,
        message: impl Into<String>,
        location: SourceLocation,
    ) -> impl Future<Output = ()> + Send + '_ {
        self.emit(LogRecord::at_location(Level::Warning, message, &location))
    }

    /// Log `err` at error level.
    ///
    /// The message is the error's description and the stack trace is
    /// captured here, when the method is called, not when the future is
    /// first polled.
    pub fn log_error<E: TraceableError + ?Sized>(&self, err: &E) -> impl Future<Output = ()> + Send + '_ {
        self.emit(LogRecord::from_error(Level::Error, err))
    }

    /// Log `err` at fatal level. Behaves like [`HecEmitter::log_error`];
    /// the process is not terminated.
    pub fn log_fatal<E: TraceableError + ?Sized>(&self, err: &E) -> impl Future<Output = ()> + Send + '_ {
        self.emit(LogRecord::from_error(Level::Fatal, err))
    }

    async fn emit(&self, record: LogRecord) {
        match self.deliver(&record).await {
            Ok(()) => {}
            Err(SendError::Rejected { status, body }) => {
                tracing::warn!(status, level = %record.level(), "collector rejected log event");
                self.diagnostics.report(&body);
            }
            Err(e) => {
                tracing::debug!(error = %e, level = %record.level(), "dropping log event");
            }
        }
    }

    async fn deliver(&self, record: &LogRecord) -> Result<(), SendError> {
        let body = record.to_envelope_json()?;

        // Built per call and dropped on return along with any pooled
        // connection, so the emitter itself never owns a socket.
        let client = Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(SendError::Client)?;

        let request = client
            .post(self.url())
            .header(AUTHORIZATION, format!("Splunk {}", self.token))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .build()
            .map_err(SendError::Request)?;

        let response = client.execute(request).await.map_err(SendError::Transport)?;
        let status = response.status().as_u16();

        // Drain the body on every path so the connection is released.
        let body = response.bytes().await.unwrap_or_default();

        if is_accepted(status) {
            Ok(())
        } else {
            Err(SendError::Rejected {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            })
        }
    }
}

impl fmt::Debug for HecEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HecEmitter")
            .field("token", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

/// Accepted statuses are 200 through 298; 299 is reported as a rejection.
fn is_accepted(status: u16) -> bool {
    (200..299).contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_endpoint_port_and_path() {
        let emitter = HecEmitter::new("tok", "https://splunk.local", 8088);
        assert_eq!(emitter.url(), "https://splunk.local:8088/services/collector/event");
    }

    #[test]
    fn accepted_range_excludes_299() {
        assert!(is_accepted(200));
        assert!(is_accepted(204));
        assert!(is_accepted(298));
        assert!(!is_accepted(299));
        assert!(!is_accepted(199));
        assert!(!is_accepted(400));
        assert!(!is_accepted(500));
    }

    #[test]
    fn debug_output_hides_the_token() {
        let emitter = HecEmitter::new("super-secret", "http://localhost", 8088);
        let rendered = format!("{:?}", emitter);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("http://localhost"));
    }

    #[test]
    fn from_config_matches_new() {
        let config = HecConfig {
            token: "abc".to_string(),
            endpoint: "http://collector".to_string(),
            port: 9000,
        };
        let emitter = HecEmitter::from_config(config);
        assert_eq!(emitter.endpoint(), "http://collector");
        assert_eq!(emitter.port(), 9000);
        assert_eq!(emitter.url(), "http://collector:9000/services/collector/event");
    }

    #[test]
    fn emitter_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<HecEmitter>();
    }
}
