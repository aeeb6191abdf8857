use crate::database::models::LeagueSettings;

#[derive(Debug, Clone)]
pub struct LeaderboardSettings {
    pub default_top_count: i64,
}

impl Default for LeaderboardSettings {
    fn default() -> Self {
        Self {
            default_top_count: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RebalanceSettings {
    pub interval_secs: u64,
    pub default_leagues: Vec<LeagueSettings>,
}

impl Default for RebalanceSettings {
    fn default() -> Self {
        Self {
            interval_secs: 10,
            default_leagues: default_league_table(),
        }
    }
}

// Seed table used by `init`; live values are re-read from the leagues
// table every cycle, so runtime edits take effect without a restart.
fn default_league_table() -> Vec<LeagueSettings> {
    vec![
        LeagueSettings {
            league_id: 0,
            promote_count: 3,
            retain_count: 0,
        },
        LeagueSettings {
            league_id: 1,
            promote_count: 3,
            retain_count: 10,
        },
        LeagueSettings {
            league_id: 2,
            promote_count: 2,
            retain_count: 10,
        },
        LeagueSettings {
            league_id: 3,
            promote_count: 0,
            retain_count: 5,
        },
    ]
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub leaderboard: LeaderboardSettings,
    pub rebalance: RebalanceSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
