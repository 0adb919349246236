//! Visual selection binary.
//!
//! Reads a `VisualRequest` as JSON from the file named by the first argument
//! (or stdin) and prints the selected scene images as JSON. Exits with 2 when
//! the request itself is invalid.

use std::io::Read;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reel_models::VisualRequest;
use reel_visuals::{VisualPipeline, VisualsError};

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for TLS/HTTPS)
    if rustls::crypto::ring::default_provider().install_default().is_err() {
        eprintln!("rustls crypto provider already installed");
    }

    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays valid JSON
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reel_visuals=info,reel_sources=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    if let Err(e) = run().await {
        error!("reel-visuals failed: {:#}", e);
        let client_error = e
            .downcast_ref::<VisualsError>()
            .is_some_and(VisualsError::is_client_error);
        std::process::exit(if client_error { 2 } else { 1 });
    }
}

async fn run() -> anyhow::Result<()> {
    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading request from stdin")?;
            buf
        }
    };

    let request: VisualRequest = serde_json::from_str(&input).context("parsing visual request")?;

    info!("Starting reel-visuals");
    let pipeline = VisualPipeline::from_env().context("building pipeline")?;
    let plan = pipeline.run(&request).await?;

    println!("{}", serde_json::to_string_pretty(&plan.images)?);
    Ok(())
}
