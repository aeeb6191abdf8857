use serde::Deserialize;

use crate::league::PromotionEngine;
use crate::services::RatingService;

pub mod admin;
pub mod game;
pub mod profile;

pub struct AppState {
    pub ratings: RatingService,
    pub engine: PromotionEngine,
}

#[derive(Deserialize)]
pub struct TopParams {
    pub count: Option<i64>,
}
