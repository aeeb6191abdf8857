use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{AppState, TopParams};
use crate::api::models::TopPlayersResponse;

pub async fn get_top_players(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TopParams>,
) -> impl IntoResponse {
    let count = params.count.unwrap_or(0);

    match state.ratings.get_top_players(count) {
        Ok(users) => Json(TopPlayersResponse { users }).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{e}")).into_response(),
    }
}
