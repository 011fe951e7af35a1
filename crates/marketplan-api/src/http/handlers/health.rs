//! Liveness and readiness probes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::http::response::ReadinessBody;
use crate::state::AppState;

/// GET /health - Liveness. Always 200, regardless of configuration.
pub async fn health_check() -> &'static str {
    "OK"
}

/// GET /ready - 200 when startup validation found no problems, 503 otherwise.
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ReadinessBody>) {
    let readiness = state.readiness();

    if readiness.is_ready() {
        (
            StatusCode::OK,
            Json(ReadinessBody {
                status: "ready".to_string(),
                problems: Vec::new(),
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadinessBody {
                status: "not_ready".to_string(),
                problems: readiness.problems().iter().map(|p| p.to_string()).collect(),
            }),
        )
    }
}
