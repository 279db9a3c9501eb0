//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for the two simulations
//! - Request parsing and validation
//! - Error responses
//! - CORS and request tracing layers

pub mod error;
pub mod request;
pub mod routes;

use axum::Router;
use axum::http::{HeaderValue, Method};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use accrual_core::simulation::{SimulationEngine, YearTokens};
use accrual_shared::{CorsConfig, SimulationConfig};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Simulation engine.
    pub engine: Arc<SimulationEngine>,
    /// Longest horizon, in months, a request may ask for.
    pub max_months: u32,
}

impl AppState {
    /// Creates state around an engine and a horizon cap.
    #[must_use]
    pub fn new(engine: SimulationEngine, max_months: u32) -> Self {
        Self {
            engine: Arc::new(engine),
            max_months,
        }
    }

    /// Builds the engine and limits from configuration.
    #[must_use]
    pub fn from_config(config: &SimulationConfig) -> Self {
        let engine = SimulationEngine::with_year_tokens(
            YearTokens::new(&config.untaxed_year_tokens),
            YearTokens::new(&config.taxed_year_tokens),
        );
        Self::new(engine, config.max_months)
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors))
        .with_state(state)
}

/// Builds the cross-origin layer. `"*"` in the list allows any origin.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if config.allowed_origins.iter().any(|o| o.trim() == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin.trim())
                .inspect_err(|e| warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin"))
                .ok()
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
