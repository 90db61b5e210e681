//! Frame interpolation worker binary.
//!
//! Reads a job event (`{ "id": ..., "input": { ... } }`) from the file
//! given as the first argument, or from stdin, and writes the response
//! JSON to stdout. Errors are data: the process exits 0 with a
//! structured error response rather than crashing.

use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use upframe_models::{JobEvent, JobResponse};
use upframe_worker::{handle_event, WorkerConfig};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("upframe=info".parse().expect("static directive"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting upframe-worker");

    let config = WorkerConfig::from_env();
    info!("Worker config: {:?}", config);

    let response = match read_event().await {
        Ok(event) => handle_event(&config, event).await,
        Err(message) => JobResponse::rejected(message),
    };

    match serde_json::to_string(&response) {
        Ok(json) => println!("{json}"),
        Err(e) => println!(r#"{{"error": "failed to serialize response: {e}"}}"#),
    }
}

/// Read the job event from the argument file or stdin.
async fn read_event() -> Result<JobEvent, String> {
    let raw = match std::env::args().nth(1) {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| format!("Failed to read request file {path}: {e}"))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .map_err(|e| format!("Failed to read request from stdin: {e}"))?;
            buf
        }
    };

    serde_json::from_str(&raw).map_err(|e| format!("Invalid job request: {e}"))
}
