//! Read-only snapshot queries.

use crate::errors::{persistence, Result};
use rankwatch_core::errors::{ExError, ExErrorKind};
use rankwatch_core::model::{Snapshot, SnapshotMeta};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row};

const SNAPSHOT_COLUMNS: &str = "id, data, updated_at, fetched_at, created_at";

fn row_to_snapshot(row: &Row) -> rusqlite::Result<Snapshot> {
    let data: String = row.get(1)?;
    let payload = serde_json::from_str(&data)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
    Ok(Snapshot {
        id: row.get(0)?,
        payload,
        updated_at: row.get(2)?,
        fetched_at: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// The snapshot with the highest id, if any.
pub fn latest_snapshot(conn: &Connection) -> Result<Option<Snapshot>> {
    conn.query_row(
        &format!(
            "SELECT {} FROM snapshots ORDER BY id DESC LIMIT 1",
            SNAPSHOT_COLUMNS
        ),
        [],
        row_to_snapshot,
    )
    .optional()
    .map_err(|e| persistence("latest_snapshot", e))
}

/// Fetch one snapshot by id.
///
/// # Errors
///
/// - `NotFound`: no snapshot with that id
/// - `Persistence`: SQLite read failed or the stored payload is corrupt
pub fn fetch_snapshot(conn: &Connection, snapshot_id: i64) -> Result<Snapshot> {
    conn.query_row(
        &format!("SELECT {} FROM snapshots WHERE id = ?1", SNAPSHOT_COLUMNS),
        [snapshot_id],
        row_to_snapshot,
    )
    .optional()
    .map_err(|e| persistence("fetch_snapshot", e))?
    .ok_or_else(|| {
        ExError::new(ExErrorKind::NotFound)
            .with_op("fetch_snapshot")
            .with_snapshot_id(snapshot_id)
            .with_message("snapshot not found")
    })
}

/// Snapshot metadata, newest first, with the number of changes each produced.
pub fn list_snapshots(conn: &Connection, limit: usize) -> Result<Vec<SnapshotMeta>> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let mut stmt = conn
        .prepare(
            "SELECT s.id, s.updated_at, s.fetched_at, s.created_at,
                    (SELECT COUNT(*) FROM change_records c WHERE c.snapshot_id = s.id)
             FROM snapshots s
             ORDER BY s.id DESC
             LIMIT ?1",
        )
        .map_err(|e| persistence("list_snapshots", e))?;

    let rows = stmt
        .query_map([limit], |row| {
            Ok(SnapshotMeta {
                id: row.get(0)?,
                updated_at: row.get(1)?,
                fetched_at: row.get(2)?,
                created_at: row.get(3)?,
                change_count: row.get(4)?,
            })
        })
        .map_err(|e| persistence("list_snapshots", e))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| persistence("list_snapshots", e))?;

    Ok(rows)
}

/// Number of stored snapshots
pub fn snapshot_count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM snapshots", [], |row| row.get(0))
        .map_err(|e| persistence("snapshot_count", e))
}
