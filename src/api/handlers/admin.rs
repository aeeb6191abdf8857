use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use super::AppState;

/// Manual rebalancing trigger. Runs one full cycle synchronously; the
/// scheduled loop is unaffected either way.
pub async fn admin_rebalance(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    log::info!("Admin triggered rebalancing cycle");

    match state.engine.run_cycle() {
        Ok(()) => (StatusCode::OK, "Rebalancing cycle completed").into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{e}")).into_response(),
    }
}
