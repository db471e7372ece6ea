//! Snapshot save operation.
//!
//! Persists a payload and the changes it introduces as one transaction.

use crate::changelog::record::append_changes;
use crate::errors::{persistence, Result};
use rankwatch_core::diff::detect_changes;
use rankwatch_core::errors::{ExError, ExErrorKind};
use rankwatch_core::payload;
use rankwatch_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior};
use serde_json::Value;
use std::time::Instant;

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveResult {
    /// Id assigned to the new snapshot
    pub snapshot_id: i64,
    /// Predecessor the payload was diffed against, if any
    pub previous_snapshot_id: Option<i64>,
    /// Number of change records written
    pub change_count: usize,
}

/// Insert the snapshot row and return its id.
fn insert_snapshot(tx: &Transaction, payload: &Value) -> Result<i64> {
    let data = serde_json::to_string(payload).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("insert_snapshot")
            .with_message(format!("Failed to serialize payload: {}", e))
    })?;

    let fetched_at = payload::fetched_at(payload).unwrap_or_else(|| {
        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    });

    tx.execute(
        "INSERT INTO snapshots (data, updated_at, fetched_at, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![
            data,
            payload::updated_at(payload),
            fetched_at,
            chrono::Utc::now().timestamp_millis(),
        ],
    )
    .map_err(|e| persistence("insert_snapshot", e))?;

    Ok(tx.last_insert_rowid())
}

/// The snapshot immediately before `snapshot_id`, with its raw payload.
fn query_predecessor(tx: &Transaction, snapshot_id: i64) -> Result<Option<(i64, String)>> {
    tx.query_row(
        "SELECT id, data FROM snapshots WHERE id < ?1 ORDER BY id DESC LIMIT 1",
        [snapshot_id],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .optional()
    .map_err(|e| persistence("query_predecessor", e))
}

fn save_in_transaction(conn: &mut Connection, payload: &Value) -> Result<SaveResult> {
    // IMMEDIATE takes the write lock up front so concurrent savers queue
    // instead of racing for the predecessor.
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| persistence("save_snapshot", e))?;

    let snapshot_id = insert_snapshot(&tx, payload)?;

    let (previous_snapshot_id, change_count) = match query_predecessor(&tx, snapshot_id)? {
        Some((previous_id, previous_data)) => {
            let previous: Value = serde_json::from_str(&previous_data).unwrap_or_else(|e| {
                tracing::warn!(
                    snapshot_id = previous_id,
                    error = %e,
                    "Stored predecessor payload is not valid JSON; diffing against nothing"
                );
                Value::Null
            });
            let changes = detect_changes(&previous, payload);
            let written = append_changes(&tx, snapshot_id, Some(previous_id), &changes)?;
            (Some(previous_id), written)
        }
        None => (None, 0),
    };

    tx.commit().map_err(|e| persistence("save_snapshot", e))?;

    Ok(SaveResult {
        snapshot_id,
        previous_snapshot_id,
        change_count,
    })
}

/// Save a freshly fetched payload.
///
/// In one transaction this:
/// 1. Inserts the payload as a new snapshot (`fetched_at` defaults to now
///    when the payload carries no `fetchedAt`)
/// 2. Loads the immediately preceding snapshot by id
/// 3. If there is one, diffs the two payloads and appends the change records
///    tagged with the new snapshot id
///
/// Either everything is committed or nothing is.
///
/// ## Errors
///
/// - `ExErrorKind::Persistence`: SQLite rejected a statement or the commit
/// - `ExErrorKind::Serialization`: the payload could not be encoded
pub fn save_snapshot(conn: &mut Connection, payload: &Value) -> Result<SaveResult> {
    let started = Instant::now();
    log_op_start!("save_snapshot");

    let result = save_in_transaction(conn, payload);
    let duration_ms = started.elapsed().as_millis() as u64;

    match &result {
        Ok(saved) => {
            log_op_end!(
                "save_snapshot",
                duration_ms = duration_ms,
                snapshot_id = saved.snapshot_id,
                previous_snapshot_id = ?saved.previous_snapshot_id,
                change_count = saved.change_count
            );
        }
        Err(err) => {
            log_op_error!("save_snapshot", err.clone(), duration_ms = duration_ms);
        }
    }

    result
}
