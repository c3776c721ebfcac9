//! Kotoba Gateway - translation and vocabulary API
//!
//! This is the main entry point for the gateway service.
//!
//! # Provider
//!
//! Set `GEMINI_API_KEY` to enable the Gemini provider. Without it the
//! gateway still starts, and every generation request answers 503.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kotoba_gateway::{create_router, GatewayConfig, GatewayState};
use kotoba_provider::{GeminiClient, NoopGenerator, TextGenerator};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,kotoba=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Kotoba Gateway");

    // Load configuration from environment
    let config = GatewayConfig::from_env()?;

    tracing::info!(
        listen_addr = %config.listen_addr,
        cors_origins = ?config.cors_origins,
        max_body_bytes = config.max_body_bytes,
        provider_timeout_seconds = config.provider_timeout_seconds,
        max_vocabulary_count = ?config.max_vocabulary_count,
        "Gateway configuration loaded"
    );

    let generator: Arc<dyn TextGenerator> = match config.gemini() {
        Some(gemini) => {
            tracing::info!(model = %gemini.model, "Gemini provider enabled");
            Arc::new(GeminiClient::new(gemini))
        }
        None => {
            tracing::warn!("No GEMINI_API_KEY set - generation requests will fail with 503");
            Arc::new(NoopGenerator::new())
        }
    };

    let listen_addr = config.listen_addr.clone();
    let state = GatewayState::new(generator, config);

    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
