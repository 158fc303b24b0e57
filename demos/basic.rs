use std::sync::Arc;

use splunk_log_sink::noop_sink::NoopSink;
use splunk_log_sink::{hec_debug, hec_information, hec_warning, HecConfig, HecEmitter};

#[derive(Debug, thiserror::Error)]
#[error("payment provider timed out after {0} attempts")]
struct ProviderTimeout(u32);

#[tokio::main]
async fn main() {
    // Show the crate's own debug events (dropped records, rejections).
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = match HecConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}; falling back to a local collector");
            HecConfig::new("00000000-0000-0000-0000-000000000000", "http://127.0.0.1", 8088)
        }
    };
    let emitter = HecEmitter::from_config(config);

    hec_debug!(emitter, "loaded {} routes", 14).await;
    hec_information!(emitter, "service started").await;
    hec_warning!(emitter, "cache miss ratio at {}%", 41).await;

    let err = ProviderTimeout(3);
    emitter.log_error(&err).await;

    // Same call, but without printing collector rejections.
    let quiet = emitter.clone().with_diagnostics(Arc::new(NoopSink));
    quiet.log_fatal(&err).await;
}
