use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

/// `GET /readyz` — ready only when the database answers.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
