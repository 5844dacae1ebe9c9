//! HTTP server entry point

use std::collections::HashMap;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};

use engine::{InMemoryStore, PipelineConfig};
use shared::{ProviderId, logging};
use webserver::{AppState, build_router};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "HTTP server for the content generation pipeline")]
struct Args {
    /// Port for HTTP server
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// How many items of a batch generate in parallel
    #[arg(long, default_value = "3")]
    chunk_size: usize,

    /// Seconds between progress polls on the SSE stream
    #[arg(long, default_value = "2")]
    poll_interval: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // A .env file is optional; deployments set the environment directly.
    dotenvy::dotenv().ok();
    logging::init_tracing(Some(&args.log_level));

    let api_keys = load_api_keys();
    if api_keys.is_empty() {
        warn!("⚠️ No provider API keys found; generation requests will be rejected");
    } else {
        info!("Found {} provider API key(s)", api_keys.len());
    }

    let store = Arc::new(InMemoryStore::new());
    let state = AppState::new(
        store,
        PipelineConfig { chunk_size: args.chunk_size },
        Duration::from_secs(args.poll_interval),
        api_keys,
    );
    let router = build_router(state);

    let addr = format!("127.0.0.1:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🌐 Web server listening on http://{addr}");

    tokio::select! {
        result = axum::serve(listener, router) => {
            if let Err(e) = result {
                error!("❌ Server error: {e}");
            }
        }
        _ = signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    info!("✅ Web server stopped");
    Ok(())
}

/// Collect provider API keys from the environment
fn load_api_keys() -> HashMap<ProviderId, String> {
    let mut api_keys = HashMap::new();
    for (provider, var) in [
        (ProviderId::OpenAI, "OPENAI_API_KEY"),
        (ProviderId::Anthropic, "ANTHROPIC_API_KEY"),
        (ProviderId::Gemini, "GEMINI_API_KEY"),
    ] {
        if let Ok(key) = env::var(var) {
            if !key.trim().is_empty() {
                info!("Found {var}");
                api_keys.insert(provider, key);
            }
        }
    }
    api_keys
}
