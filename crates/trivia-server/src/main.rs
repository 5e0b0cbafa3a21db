//! Trivia Server Binary
//!
//! Standalone server for the trivia API.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use trivia_core::TriviaConfig;
use trivia_server::{serve, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = TriviaConfig::from_env()?;
    let state = Arc::new(AppState::from_config(&config)?);

    serve(&config.server.addr, state).await
}
