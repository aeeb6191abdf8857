use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct PlayerRating {
    pub id: String,
    pub league: i64,
    pub best_score: i64,
    pub last_update: NaiveDateTime,
}

/// Per-league rebalancing capacities. `retain_count == 0` disables forced
/// demotion for that league.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueSettings {
    pub league_id: i64,
    pub promote_count: i64,
    pub retain_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopPlayer {
    pub id: String,
    pub score: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// One planned promotion or demotion, expressed as data so the planning
/// step can be exercised without a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueMove {
    pub id: String,
    pub from_league: i64,
    pub to_league: i64,
    pub direction: MoveDirection,
}
