use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    admin::admin_rebalance,
    game::get_top_players,
    profile::{get_rating, update_rating},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/profile/:uuid/rating", get(get_rating).post(update_rating))
        .route("/api/v1/game/rating/top", get(get_top_players))
        .route("/api/v1/admin/rebalance", post(admin_rebalance))
        .with_state(state)
}
