use crate::env::{
    env_or, DEFAULT_HEC_PORT, SPLUNK_HEC_ENDPOINT_ENV, SPLUNK_HEC_PORT_ENV, SPLUNK_HEC_TOKEN_ENV,
};

/// Connection settings for a [`HecEmitter`](crate::emitter::HecEmitter).
///
/// A plain value: nothing here is validated or resolved until an event is
/// actually sent.
#[derive(Clone, PartialEq, Eq)]
pub struct HecConfig {
    pub token: String,
    pub endpoint: String,
    pub port: u16,
}

impl std::fmt::Debug for HecConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HecConfig")
            .field("token", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("port", &self.port)
            .finish()
    }
}

/// Error type returned when loading a [`HecConfig`].
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("invalid collector port: {value:?}")]
    InvalidPort { value: String },
}

impl HecConfig {
    pub fn new(token: impl Into<String>, endpoint: impl Into<String>, port: u16) -> Self {
        HecConfig {
            token: token.into(),
            endpoint: endpoint.into(),
            port,
        }
    }

    /// Load settings from `SPLUNK_HEC_TOKEN`, `SPLUNK_HEC_ENDPOINT` and
    /// `SPLUNK_HEC_PORT`.
    ///
    /// **Returns**
    /// - `Ok(config)` when token and endpoint are present; the port
    ///   defaults to [`DEFAULT_HEC_PORT`].
    /// - `Err(ConfigError::Missing(..))` naming the first absent variable.
    /// - `Err(ConfigError::InvalidPort { .. })` if the port is not a `u16`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let token = lookup(SPLUNK_HEC_TOKEN_ENV).ok_or(ConfigError::Missing(SPLUNK_HEC_TOKEN_ENV))?;
        let endpoint = lookup(SPLUNK_HEC_ENDPOINT_ENV).ok_or(ConfigError::Missing(SPLUNK_HEC_ENDPOINT_ENV))?;
        let port = match lookup(SPLUNK_HEC_PORT_ENV) {
            Some(raw) => parse_port(&raw)?,
            None => DEFAULT_HEC_PORT,
        };

        Ok(HecConfig::new(token, endpoint, port))
    }

    /// Like [`HecConfig::from_env`] but never fails: missing values become
    /// empty strings and a bad or absent port becomes [`DEFAULT_HEC_PORT`].
    pub fn from_env_lenient() -> Self {
        let port = parse_port(&env_or(SPLUNK_HEC_PORT_ENV, "")).unwrap_or(DEFAULT_HEC_PORT);
        HecConfig::new(
            env_or(SPLUNK_HEC_TOKEN_ENV, ""),
            env_or(SPLUNK_HEC_ENDPOINT_ENV, ""),
            port,
        )
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidPort {
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let vars: HashMap<&'static str, String> = pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn port_defaults_when_unset() {
        let config = HecConfig::from_lookup(lookup_from(&[
            (SPLUNK_HEC_TOKEN_ENV, "tok"),
            (SPLUNK_HEC_ENDPOINT_ENV, "https://splunk.local"),
        ]))
        .unwrap();
        assert_eq!(config, HecConfig::new("tok", "https://splunk.local", 8088));
    }

    #[test]
    fn explicit_port_is_parsed() {
        let config = HecConfig::from_lookup(lookup_from(&[
            (SPLUNK_HEC_TOKEN_ENV, "tok"),
            (SPLUNK_HEC_ENDPOINT_ENV, "http://127.0.0.1"),
            (SPLUNK_HEC_PORT_ENV, " 9088 "),
        ]))
        .unwrap();
        assert_eq!(config.port, 9088);
    }

    #[test]
    fn missing_token_is_reported_first() {
        let err = HecConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(SPLUNK_HEC_TOKEN_ENV));
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = HecConfig::from_lookup(lookup_from(&[
            (SPLUNK_HEC_TOKEN_ENV, "tok"),
            (SPLUNK_HEC_ENDPOINT_ENV, "http://127.0.0.1"),
            (SPLUNK_HEC_PORT_ENV, "http"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort { value: "http".to_string() });
    }

    #[test]
    fn debug_output_hides_the_token() {
        let rendered = format!("{:?}", HecConfig::new("secret-token", "http://h", 1));
        assert!(!rendered.contains("secret-token"));
    }
}
