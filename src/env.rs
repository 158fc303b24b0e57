//! Environment variable names used by this crate for convenient
//! configuration of the emitter from services.
//!
//! These are purely helpers; [`HecEmitter`](crate::emitter::HecEmitter)
//! itself never reads the environment.

/// HEC token, sent as `Authorization: Splunk <token>`.
pub const SPLUNK_HEC_TOKEN_ENV: &str = "SPLUNK_HEC_TOKEN";

/// Collector scheme and host, e.g. `https://splunk.example.com`.
pub const SPLUNK_HEC_ENDPOINT_ENV: &str = "SPLUNK_HEC_ENDPOINT";

/// Optional collector port.
pub const SPLUNK_HEC_PORT_ENV: &str = "SPLUNK_HEC_PORT";

/// Port used when [`SPLUNK_HEC_PORT_ENV`] is unset.
pub const DEFAULT_HEC_PORT: u16 = 8088;

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
