//! Accrual API Server
//!
//! Main entry point for the Accrual simulation service.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use accrual_api::{AppState, create_router};
use accrual_core::simulation::SimulationKind;
use accrual_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "accrual=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    let state = AppState::from_config(&config.simulation);
    info!(
        max_months = config.simulation.max_months,
        untaxed_year_tokens = ?state.engine.year_tokens(SimulationKind::Untaxed).tokens(),
        taxed_year_tokens = ?state.engine.year_tokens(SimulationKind::Taxed).tokens(),
        "Simulation engine configured"
    );

    // Create router
    let app = create_router(state, &config.cors);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
