use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::AppState;
use crate::api::models::{RatingResponse, UpdateRatingRequest};

pub async fn get_rating(
    State(state): State<Arc<AppState>>,
    Path(uuid): Path<String>,
) -> impl IntoResponse {
    match state.ratings.get_rating(&uuid) {
        Ok(Some(rating)) => Json(RatingResponse {
            id: rating.id,
            league: rating.league,
            best_score: rating.best_score,
            last_update: rating.last_update.to_string(),
        })
        .into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{e}")).into_response(),
    }
}

pub async fn update_rating(
    State(state): State<Arc<AppState>>,
    Path(uuid): Path<String>,
    Json(req): Json<UpdateRatingRequest>,
) -> impl IntoResponse {
    match state.ratings.update_rating(&uuid, req.score as i64) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{e}")).into_response(),
    }
}
