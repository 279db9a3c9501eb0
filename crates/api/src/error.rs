//! Error responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use accrual_core::simulation::SimulationError;
use accrual_shared::AppError;

/// Maps a simulation failure onto the application error taxonomy.
#[must_use]
pub fn from_simulation_error(error: SimulationError) -> AppError {
    match error {
        SimulationError::InvalidArgument(msg) => AppError::InvalidArgument(msg),
        overflow @ SimulationError::Overflow { .. } => AppError::InvalidArgument(format!(
            "{overflow}; reduce the interest rate or the investment time"
        )),
    }
}

/// Maps a body the JSON extractor refused (malformed, wrong content type,
/// wrong shape) onto a validation error.
#[must_use]
pub fn from_json_rejection(rejection: &JsonRejection) -> AppError {
    AppError::Validation(rejection.body_text())
}

/// Renders an application error as `{"error": ..., "message": ...}`.
pub fn error_response(error: &AppError) -> Response {
    let status = StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::BAD_REQUEST);
    (
        status,
        Json(json!({
            "error": error.error_code(),
            "message": error.message(),
        })),
    )
        .into_response()
}
