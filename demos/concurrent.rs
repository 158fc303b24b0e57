use std::io;
use std::sync::Arc;
use std::time::Instant;

use splunk_log_sink::{HecConfig, HecEmitter, SourceLocation};

#[tokio::main]
async fn main() {
    let emitter = Arc::new(HecEmitter::from_config(HecConfig::from_env_lenient()));

    let n: u32 = 200;
    let start = Instant::now();

    let mut handles = Vec::with_capacity(n as usize);
    for i in 0..n {
        let emitter = Arc::clone(&emitter);
        handles.push(tokio::spawn(async move {
            if i % 10 == 0 {
                let err = io::Error::new(io::ErrorKind::Other, format!("iteration {i} failed"));
                emitter.log_error(&err).await;
            } else {
                emitter
                    .log_information(format!("iteration {i}"), SourceLocation::caller())
                    .await;
            }
        }));
    }

    for handle in handles {
        let _ = handle.await;
    }

    let elapsed = start.elapsed();
    println!("sent {} events in {:?} (~{:.0} ev/s)",
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );
}
