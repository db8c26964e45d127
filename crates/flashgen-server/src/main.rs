//! Flashgen HTTP Server
//!
//! Generates study flashcards from text and stores the resulting decks.

use anyhow::Result;
use flashgen_server::{api, app, config::ServerConfig};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Initialize tracing
    init_tracing(&config)?;
    info!("Loaded configuration: {:?}", config);

    let state = app::build_state(&config)?;
    let app = api::create_router(state);

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    info!("  Health check: http://{}/health", addr);
    info!("  Generate API: POST http://{}/api/generate", addr);
    info!("  Decks API: http://{}/api/decks", addr);
    info!("  Backup: http://{}/api/backup", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing subscriber
///
/// `RUST_LOG` wins over the configured level. Set `FLASHGEN_LOG_FORMAT=json`
/// for structured output.
fn init_tracing(config: &ServerConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.default_log_directives().into());

    let json = std::env::var("FLASHGEN_LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
