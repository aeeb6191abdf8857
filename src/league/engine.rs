use std::collections::BTreeMap;

use log::{error, info};

use crate::database::models::{LeagueMove, LeagueSettings, MoveDirection};
use crate::database::{self, DbPool};
use crate::errors::StoreError;

/// Periodic league rebalancer. Holds no state between cycles; everything
/// it needs is re-read from the store, so a cycle is idempotent to retry
/// against an unchanged snapshot.
pub struct PromotionEngine {
    pool: DbPool,
}

impl PromotionEngine {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// One full rebalancing cycle over every configured league.
    ///
    /// Per-league failures are logged and skipped so one league cannot
    /// starve the rest; the first error is returned for the benefit of
    /// the manual trigger. The scheduled loop ignores it.
    pub fn run_cycle(&self) -> Result<(), StoreError> {
        let mut conn = self.pool.get().map_err(StoreError::from)?;

        let settings = database::leagues::list_leagues(&mut conn)?;
        if settings.is_empty() {
            info!("No leagues configured, skipping rebalancing cycle");
            return Ok(());
        }
        let highest_league = settings.iter().map(|s| s.league_id).max().unwrap_or(0);

        let mut first_error = None;

        // Snapshot every league before planning anything. Moves planned
        // for one league must not feed another league's input within the
        // same cycle; they take effect next cycle.
        let mut snapshots = Vec::with_capacity(settings.len());
        for league in &settings {
            match database::ratings::ranked_members(&mut conn, league.league_id) {
                Ok(members) => snapshots.push((league.clone(), members)),
                Err(e) => {
                    error!("Failed to snapshot league {}: {e}", league.league_id);
                    first_error.get_or_insert(e);
                }
            }
        }

        let moves = plan_moves(&snapshots, highest_league);
        if let Err(e) = self.apply_moves(&mut conn, &moves) {
            first_error.get_or_insert(e);
        }

        match first_error {
            None => Ok(()),
            Some(e) => Err(e),
        }
    }

    /// Applies planned moves as one batch per target league, promotions
    /// before demotions so notification-style collaborators see the two
    /// directions as distinct batches.
    fn apply_moves(
        &self,
        conn: &mut database::DbConn,
        moves: &[LeagueMove],
    ) -> Result<(), StoreError> {
        let mut first_error = None;

        for direction in [MoveDirection::Up, MoveDirection::Down] {
            let mut batches: BTreeMap<i64, Vec<String>> = BTreeMap::new();
            for mv in moves.iter().filter(|m| m.direction == direction) {
                batches
                    .entry(mv.to_league)
                    .or_default()
                    .push(mv.id.clone());
            }

            for (target, ids) in batches {
                let label = match direction {
                    MoveDirection::Up => "Up",
                    MoveDirection::Down => "Down",
                };
                info!("{label}({target}): moving {} players", ids.len());

                if let Err(e) = database::ratings::set_league(conn, &ids, target) {
                    error!("Failed to apply {label} batch into league {target}: {e}");
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            None => Ok(()),
            Some(e) => Err(e),
        }
    }
}

/// Pure planning step: turns pre-cycle snapshots into an explicit move
/// list. `highest_league` never promotes and league 0 never demotes,
/// whatever the settings say.
pub fn plan_moves(
    snapshots: &[(LeagueSettings, Vec<String>)],
    highest_league: i64,
) -> Vec<LeagueMove> {
    snapshots
        .iter()
        .flat_map(|(settings, members)| plan_league(settings, members, highest_league))
        .collect()
}

fn plan_league(
    settings: &LeagueSettings,
    members: &[String],
    highest_league: i64,
) -> Vec<LeagueMove> {
    let league = settings.league_id;
    let mut moves = Vec::new();

    let promoted = if league < highest_league {
        (settings.promote_count.max(0) as usize).min(members.len())
    } else {
        0
    };
    for id in &members[..promoted] {
        moves.push(LeagueMove {
            id: id.clone(),
            from_league: league,
            to_league: league + 1,
            direction: MoveDirection::Up,
        });
    }

    if league > 0 && settings.retain_count > 0 {
        let remaining = &members[promoted..];
        let retain = settings.retain_count as usize;
        if remaining.len() > retain {
            for id in &remaining[retain..] {
                moves.push(LeagueMove {
                    id: id.clone(),
                    from_league: league,
                    to_league: league - 1,
                    direction: MoveDirection::Down,
                });
            }
        }
    }

    moves
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::database::{connection, leagues, ratings, setup};

    fn settings(league_id: i64, promote_count: i64, retain_count: i64) -> LeagueSettings {
        LeagueSettings {
            league_id,
            promote_count,
            retain_count,
        }
    }

    fn names(prefix: &str, count: usize) -> Vec<String> {
        (0..count).map(|i| format!("{prefix}{i}")).collect()
    }

    #[test]
    fn promotes_exactly_top_min_of_capacity_and_size() {
        let members = names("p", 5);
        let moves = plan_moves(&[(settings(0, 3, 0), members.clone())], 1);

        assert_eq!(moves.len(), 3);
        for (mv, expected) in moves.iter().zip(&members[..3]) {
            assert_eq!(&mv.id, expected);
            assert_eq!(mv.from_league, 0);
            assert_eq!(mv.to_league, 1);
            assert_eq!(mv.direction, MoveDirection::Up);
        }
    }

    #[test]
    fn promotion_capped_by_member_count() {
        let moves = plan_moves(&[(settings(0, 10, 0), names("p", 2))], 1);
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn highest_league_never_promotes() {
        let moves = plan_moves(&[(settings(3, 5, 0), names("p", 8))], 3);
        assert!(moves.is_empty());
    }

    #[test]
    fn lowest_league_never_demotes() {
        // 12 members, promote 3, retain 5: the arithmetic would demote
        // 4 of the remaining 9, but league 0 has no demotion target.
        let moves = plan_moves(&[(settings(0, 3, 5), names("p", 12))], 3);

        assert_eq!(moves.len(), 3);
        assert!(moves.iter().all(|m| m.direction == MoveDirection::Up));
    }

    #[test]
    fn demotes_overflow_beyond_retain_count() {
        let members = names("p", 12);
        let moves = plan_moves(&[(settings(1, 3, 5), members.clone())], 3);

        let ups: Vec<_> = moves
            .iter()
            .filter(|m| m.direction == MoveDirection::Up)
            .collect();
        let downs: Vec<_> = moves
            .iter()
            .filter(|m| m.direction == MoveDirection::Down)
            .collect();

        assert_eq!(ups.len(), 3);
        // remaining 9 vs retain 5: the 4 lowest-ranked remaining go down
        assert_eq!(downs.len(), 4);
        let demoted: Vec<_> = downs.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(demoted, vec!["p8", "p9", "p10", "p11"]);
        assert!(downs.iter().all(|m| m.to_league == 0));
    }

    #[test]
    fn retain_count_zero_disables_demotion() {
        let moves = plan_moves(&[(settings(1, 0, 0), names("p", 50))], 3);
        assert!(moves.is_empty());
    }

    #[test]
    fn top_league_still_demotes_overflow() {
        // No promotion slots at the top, so the whole membership counts
        // against retain_count.
        let moves = plan_moves(&[(settings(3, 5, 2), names("p", 4))], 3);

        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|m| m.direction == MoveDirection::Down));
        assert!(moves.iter().all(|m| m.to_league == 2));
    }

    #[test]
    fn planning_is_deterministic() {
        let snapshots = vec![
            (settings(0, 3, 0), names("a", 7)),
            (settings(1, 2, 3), names("b", 9)),
        ];
        assert_eq!(plan_moves(&snapshots, 1), plan_moves(&snapshots, 1));
    }

    fn at(secs: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, secs)
            .unwrap()
    }

    #[test]
    fn full_cycle_rebalances_against_store() {
        let pool = connection::create_test_pool();
        let mut conn = pool.get().unwrap();
        setup::init_database(&mut conn).unwrap();
        leagues::seed_leagues(
            &mut conn,
            &[settings(0, 2, 0), settings(1, 1, 2), settings(2, 0, 0)],
        )
        .unwrap();

        // league 0: five players, best first after ranking
        for (i, id) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            ratings::submit_score(&mut conn, id, 100 - i as i64, at(i as u32)).unwrap();
        }
        // league 1: four players, overflow of one beyond promote+retain
        for (i, id) in ["w", "x", "y", "z"].iter().enumerate() {
            ratings::submit_score(&mut conn, id, 200 - i as i64, at(10 + i as u32)).unwrap();
        }
        ratings::set_league(
            &mut conn,
            &names_of(&["w", "x", "y", "z"]),
            1,
        )
        .unwrap();
        drop(conn);

        let engine = PromotionEngine::new(pool.clone());
        engine.run_cycle().unwrap();

        let mut conn = pool.get().unwrap();
        // top two of league 0 promoted
        assert_eq!(league_of(&mut conn, "a"), 1);
        assert_eq!(league_of(&mut conn, "b"), 1);
        assert_eq!(league_of(&mut conn, "c"), 0);
        // league 1: w promoted, x/y retained, z demoted
        assert_eq!(league_of(&mut conn, "w"), 2);
        assert_eq!(league_of(&mut conn, "x"), 1);
        assert_eq!(league_of(&mut conn, "y"), 1);
        assert_eq!(league_of(&mut conn, "z"), 0);
    }

    #[test]
    fn cycle_surfaces_error_when_store_is_broken() {
        // no schema applied, so the settings fetch fails
        let pool = connection::create_test_pool();

        let engine = PromotionEngine::new(pool);
        assert!(matches!(
            engine.run_cycle(),
            Err(StoreError::Unavailable(_))
        ));
    }

    #[test]
    fn cycle_with_no_leagues_is_a_no_op() {
        let pool = connection::create_test_pool();
        let mut conn = pool.get().unwrap();
        setup::init_database(&mut conn).unwrap();
        drop(conn);

        let engine = PromotionEngine::new(pool);
        engine.run_cycle().unwrap();
    }

    fn names_of(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn league_of(conn: &mut database::DbConn, id: &str) -> i64 {
        ratings::get_rating(conn, id).unwrap().unwrap().league
    }
}
