//! Read-only change log queries.

use crate::errors::{persistence, Result};
use chrono::{DateTime, Utc};
use rankwatch_core::model::{ChangeRecord, RankPoint};
use rusqlite::{Connection, Row};

const CHANGE_COLUMNS: &str = "id, snapshot_id, previous_snapshot_id, category, entity_id, \
     entity_name, old_rank, new_rank, rank_delta, detected_at";

fn millis_to_datetime(idx: usize, ms: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, ms))
}

fn row_to_change_record(row: &Row) -> rusqlite::Result<ChangeRecord> {
    Ok(ChangeRecord {
        id: row.get(0)?,
        snapshot_id: row.get(1)?,
        previous_snapshot_id: row.get(2)?,
        category: row.get(3)?,
        entity_id: row.get(4)?,
        entity_name: row.get(5)?,
        old_rank: row.get(6)?,
        new_rank: row.get(7)?,
        rank_delta: row.get(8)?,
        detected_at: millis_to_datetime(9, row.get(9)?)?,
    })
}

fn query_changes<P: rusqlite::Params>(
    conn: &Connection,
    op: &str,
    sql: &str,
    params: P,
) -> Result<Vec<ChangeRecord>> {
    let mut stmt = conn.prepare(sql).map_err(|e| persistence(op, e))?;
    let rows = stmt
        .query_map(params, row_to_change_record)
        .map_err(|e| persistence(op, e))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| persistence(op, e))?;
    Ok(rows)
}

/// Most recently detected changes first, at most `limit` of them.
///
/// Records written by the same save share a detection time; among those
/// the later-written record comes first.
pub fn recent_changes(conn: &Connection, limit: usize) -> Result<Vec<ChangeRecord>> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    query_changes(
        conn,
        "recent_changes",
        &format!(
            "SELECT {} FROM change_records ORDER BY detected_at DESC, id DESC LIMIT ?1",
            CHANGE_COLUMNS
        ),
        [limit],
    )
}

/// Rank history of one entity within one category, oldest first.
///
/// Only snapshots where the rank changed contribute a point.
pub fn history_for(conn: &Connection, entity_id: &str, category: &str) -> Result<Vec<RankPoint>> {
    let mut stmt = conn
        .prepare(
            "SELECT new_rank, detected_at
             FROM change_records
             WHERE entity_id = ?1 AND category = ?2
             ORDER BY detected_at ASC, id ASC",
        )
        .map_err(|e| persistence("history_for", e))?;

    let points = stmt
        .query_map([entity_id, category], |row| {
            Ok(RankPoint {
                rank: row.get(0)?,
                detected_at: millis_to_datetime(1, row.get(1)?)?,
            })
        })
        .map_err(|e| persistence("history_for", e))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| persistence("history_for", e))?;

    Ok(points)
}

/// The records one save produced, in detector order.
pub fn changes_for_snapshot(conn: &Connection, snapshot_id: i64) -> Result<Vec<ChangeRecord>> {
    query_changes(
        conn,
        "changes_for_snapshot",
        &format!(
            "SELECT {} FROM change_records WHERE snapshot_id = ?1 ORDER BY id ASC",
            CHANGE_COLUMNS
        ),
        [snapshot_id],
    )
}
