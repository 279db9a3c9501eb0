//! Simulation routes.
//!
//! `POST /simulation` runs the untaxed projection with strict validation.
//! `POST /simulation/tax` runs the taxed projection with lenient validation.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{debug, warn};

use accrual_core::simulation::SimulationKind;

use crate::AppState;
use crate::error::{error_response, from_json_rejection, from_simulation_error};
use crate::request::{FieldErrors, SimulationRequest};

/// Creates the simulation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/simulation", post(simulate))
        .route("/simulation/tax", post(simulate_with_tax))
}

type RequestBody = Result<Json<SimulationRequest>, JsonRejection>;

/// POST /simulation
async fn simulate(State(state): State<AppState>, body: RequestBody) -> Response {
    run_simulation(&state, SimulationKind::Untaxed, body)
}

/// POST /simulation/tax
async fn simulate_with_tax(State(state): State<AppState>, body: RequestBody) -> Response {
    run_simulation(&state, SimulationKind::Taxed, body)
}

fn run_simulation(state: &AppState, kind: SimulationKind, body: RequestBody) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(%kind, error = %rejection.body_text(), "Simulation request body rejected");
            return error_response(&from_json_rejection(&rejection));
        }
    };

    let params = match request.into_params(kind) {
        Ok(params) => params,
        Err(errors) => return field_errors(kind, errors),
    };

    let months = state.engine.horizon_months(kind, &params);
    if months > state.max_months {
        let mut errors = FieldErrors::new();
        errors.insert(
            "investmentTime",
            format!(
                "Investment horizon must not exceed {} months.",
                state.max_months
            ),
        );
        return field_errors(kind, errors);
    }

    match state.engine.run(kind, &params) {
        Ok(result) => {
            debug!(
                %kind,
                months,
                final_total = %result.final_total_amount,
                "Simulation completed"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(e) => {
            warn!(%kind, error = %e, "Simulation rejected");
            error_response(&from_simulation_error(e))
        }
    }
}

fn field_errors(kind: SimulationKind, errors: FieldErrors) -> Response {
    warn!(
        %kind,
        fields = ?errors.keys().collect::<Vec<_>>(),
        "Simulation request failed validation"
    );
    (StatusCode::BAD_REQUEST, Json(errors)).into_response()
}
