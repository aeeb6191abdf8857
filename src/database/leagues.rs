use rusqlite::params;

use super::connection::DbConn;
use super::models::LeagueSettings;
use crate::errors::StoreError;

/// League settings ordered by league id, lowest first. Read fresh at the
/// start of every rebalancing cycle.
pub fn list_leagues(conn: &mut DbConn) -> Result<Vec<LeagueSettings>, StoreError> {
    let sql = "SELECT id, promote_count, retain_count FROM leagues ORDER BY id ASC";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_league_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_league_row(row: &rusqlite::Row) -> rusqlite::Result<LeagueSettings> {
    Ok(LeagueSettings {
        league_id: row.get(0)?,
        promote_count: row.get(1)?,
        retain_count: row.get(2)?,
    })
}

pub fn seed_leagues(conn: &mut DbConn, leagues: &[LeagueSettings]) -> Result<(), StoreError> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT OR REPLACE INTO leagues (id, promote_count, retain_count) VALUES (?1, ?2, ?3)",
        )?;
        for league in leagues {
            stmt.execute(params![
                league.league_id,
                league.promote_count,
                league.retain_count
            ])?;
        }
    }
    tx.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{connection, setup};

    #[test]
    fn seed_then_list_round_trips_in_id_order() {
        let pool = connection::create_test_pool();
        let mut conn = pool.get().unwrap();
        setup::init_database(&mut conn).unwrap();

        let leagues = vec![
            LeagueSettings {
                league_id: 1,
                promote_count: 3,
                retain_count: 10,
            },
            LeagueSettings {
                league_id: 0,
                promote_count: 3,
                retain_count: 0,
            },
        ];
        seed_leagues(&mut conn, &leagues).unwrap();

        let listed = list_leagues(&mut conn).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].league_id, 0);
        assert_eq!(listed[1].league_id, 1);
    }

    #[test]
    fn seeding_twice_overwrites_in_place() {
        let pool = connection::create_test_pool();
        let mut conn = pool.get().unwrap();
        setup::init_database(&mut conn).unwrap();

        let mut leagues = vec![LeagueSettings {
            league_id: 0,
            promote_count: 3,
            retain_count: 0,
        }];
        seed_leagues(&mut conn, &leagues).unwrap();

        leagues[0].promote_count = 5;
        seed_leagues(&mut conn, &leagues).unwrap();

        let listed = list_leagues(&mut conn).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].promote_count, 5);
    }
}
