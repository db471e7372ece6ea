//! Change record writes, always inside a save transaction.

use crate::errors::{persistence, Result};
use rankwatch_core::model::RankChange;
use rusqlite::Transaction;

/// Detection time for a new batch of records, in Unix milliseconds.
///
/// Never earlier than 1ms after the newest existing record, so ordering
/// by `detected_at` is strict across saves even when the clock is coarse
/// or steps backwards.
pub(crate) fn next_detection_time(tx: &Transaction, now_ms: i64) -> Result<i64> {
    let last: Option<i64> = tx
        .query_row("SELECT MAX(detected_at) FROM change_records", [], |row| {
            row.get(0)
        })
        .map_err(|e| persistence("next_detection_time", e))?;

    Ok(match last {
        Some(last) if last >= now_ms => last + 1,
        _ => now_ms,
    })
}

/// Append the detector's output for one snapshot. Returns the number of rows written.
pub(crate) fn append_changes(
    tx: &Transaction,
    snapshot_id: i64,
    previous_snapshot_id: Option<i64>,
    changes: &[RankChange],
) -> Result<usize> {
    if changes.is_empty() {
        return Ok(0);
    }

    let detected_at = next_detection_time(tx, chrono::Utc::now().timestamp_millis())?;

    let mut stmt = tx
        .prepare(
            "INSERT INTO change_records (
                snapshot_id, previous_snapshot_id, category, entity_id, entity_name,
                old_rank, new_rank, rank_delta, detected_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .map_err(|e| persistence("append_changes", e))?;

    for change in changes {
        stmt.execute(rusqlite::params![
            snapshot_id,
            previous_snapshot_id,
            change.category,
            change.entity_id,
            change.entity_name,
            change.old_rank,
            change.new_rank,
            change.rank_delta,
            detected_at,
        ])
        .map_err(|e| {
            persistence("append_changes", e).with_entity_id(change.entity_id.clone())
        })?;
    }

    tracing::debug!(
        snapshot_id = snapshot_id,
        change_count = changes.len(),
        detected_at = detected_at,
        "Appended change records"
    );

    Ok(changes.len())
}
