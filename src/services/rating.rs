use chrono::Utc;
use log::error;

use crate::database::models::{PlayerRating, TopPlayer};
use crate::database::{ratings, DbPool};
use crate::errors::{ServiceError, StoreError};

/// Boundary-safe glue between the HTTP layer and the rating store. No
/// business logic lives here beyond input clamping and error wrapping.
pub struct RatingService {
    pool: DbPool,
    default_top_count: i64,
}

impl RatingService {
    pub fn new(pool: DbPool, default_top_count: i64) -> Self {
        Self {
            pool,
            default_top_count,
        }
    }

    pub fn update_rating(&self, id: &str, score: i64) -> Result<(), ServiceError> {
        let mut conn = self.get_conn()?;
        ratings::submit_score(&mut conn, id, score, Utc::now().naive_utc()).map_err(|e| {
            error!("Failed to update rating for {id}: {e}");
            ServiceError::RatingUpdateFailed(e)
        })
    }

    pub fn get_rating(&self, id: &str) -> Result<Option<PlayerRating>, ServiceError> {
        let mut conn = self.get_conn()?;
        ratings::get_rating(&mut conn, id).map_err(|e| {
            error!("Failed to get rating for {id}: {e}");
            ServiceError::RatingUpdateFailed(e)
        })
    }

    pub fn get_top_players(&self, count: i64) -> Result<Vec<TopPlayer>, ServiceError> {
        let count = if count <= 0 {
            self.default_top_count
        } else {
            count
        };

        let mut conn = self.get_conn()?;
        ratings::top_players(&mut conn, None, count).map_err(|e| {
            error!("Failed to get top players: {e}");
            ServiceError::RatingUpdateFailed(e)
        })
    }

    fn get_conn(&self) -> Result<crate::database::DbConn, ServiceError> {
        self.pool
            .get()
            .map_err(StoreError::from)
            .map_err(ServiceError::RatingUpdateFailed)
    }
}
