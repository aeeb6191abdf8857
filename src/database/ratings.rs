use chrono::NaiveDateTime;
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::{PlayerRating, TopPlayer};
use crate::errors::StoreError;

pub const DEFAULT_TOP_COUNT: i64 = 10;

/// Upsert-if-better, as a single statement so concurrent submissions for
/// the same id cannot lose an update. A new id starts in league 0; an
/// existing record only changes when the submitted score strictly beats
/// the stored best, and `last_update` moves together with `best_score`.
pub fn submit_score(
    conn: &mut DbConn,
    id: &str,
    score: i64,
    now: NaiveDateTime,
) -> Result<(), StoreError> {
    let sql = "INSERT INTO player_ratings (id, league, best_score, last_update) VALUES (?1, 0, ?2, ?3) ON CONFLICT(id) DO UPDATE SET best_score = excluded.best_score, last_update = excluded.last_update WHERE excluded.best_score > player_ratings.best_score";

    conn.execute(sql, params![id, score, now])?;
    Ok(())
}

pub fn get_rating(conn: &mut DbConn, id: &str) -> Result<Option<PlayerRating>, StoreError> {
    let sql =
        "SELECT id, league, best_score, last_update FROM player_ratings WHERE id = ?1";

    conn.query_row(sql, params![id], parse_player_rating_row)
        .optional()
        .map_err(StoreError::from)
}

fn parse_player_rating_row(row: &rusqlite::Row) -> rusqlite::Result<PlayerRating> {
    Ok(PlayerRating {
        id: row.get(0)?,
        league: row.get(1)?,
        best_score: row.get(2)?,
        last_update: row.get(3)?,
    })
}

/// Members of one league, best to worst. Single SELECT, so the result is
/// one consistent snapshot of the league.
pub fn ranked_members(conn: &mut DbConn, league: i64) -> Result<Vec<String>, StoreError> {
    let sql = "SELECT id FROM player_ratings WHERE league = ?1 ORDER BY best_score DESC, last_update ASC";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![league], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn top_players(
    conn: &mut DbConn,
    league: Option<i64>,
    limit: i64,
) -> Result<Vec<TopPlayer>, StoreError> {
    let limit = if limit <= 0 { DEFAULT_TOP_COUNT } else { limit };

    let rows = match league {
        Some(league_id) => {
            let sql = "SELECT id, best_score FROM player_ratings WHERE league = ?1 ORDER BY best_score DESC, last_update ASC LIMIT ?2";
            let mut stmt = conn.prepare(sql)?;
            stmt.query_map(params![league_id, limit], parse_top_player_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?
        }
        None => {
            let sql = "SELECT id, best_score FROM player_ratings ORDER BY best_score DESC, last_update ASC LIMIT ?1";
            let mut stmt = conn.prepare(sql)?;
            stmt.query_map(params![limit], parse_top_player_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?
        }
    };

    Ok(rows)
}

fn parse_top_player_row(row: &rusqlite::Row) -> rusqlite::Result<TopPlayer> {
    Ok(TopPlayer {
        id: row.get(0)?,
        score: row.get(1)?,
    })
}

/// Batch-reassign `ids` to `league` in one transaction. Ids that matched
/// stay committed even when some did not; the shortfall is reported as
/// `PartialBatch` instead of being swallowed.
pub fn set_league(conn: &mut DbConn, ids: &[String], league: i64) -> Result<(), StoreError> {
    if ids.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    let mut applied = 0;
    {
        let mut stmt = tx.prepare("UPDATE player_ratings SET league = ?1 WHERE id = ?2")?;
        for id in ids {
            applied += stmt.execute(params![league, id])?;
        }
    }
    tx.commit()?;

    if applied != ids.len() {
        return Err(StoreError::PartialBatch {
            expected: ids.len(),
            applied,
        });
    }

    Ok(())
}
