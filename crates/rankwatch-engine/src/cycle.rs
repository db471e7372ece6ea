//! One fetch-and-save pass.

use crate::fetcher::Fetcher;
use rankwatch_core::errors::{ExError, Result};
use rankwatch_core::model::ChangeRecord;
use rankwatch_core::payload;
use rankwatch_core::{log_op_end, log_op_error, log_op_start};
use rankwatch_core_types::CycleId;
use rankwatch_store::RankStore;
use serde::Serialize;
use std::time::Instant;

/// What one cycle fetched and stored.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub cycle_id: CycleId,
    pub snapshot_id: i64,
    pub previous_snapshot_id: Option<i64>,
    /// Update time reported by the upstream API, if any
    pub updated_at: Option<String>,
    /// Records written by this cycle's save, in detector order
    pub changes: Vec<ChangeRecord>,
}

fn fetch_and_save(
    cycle_id: CycleId,
    store: &mut RankStore,
    fetcher: &dyn Fetcher,
) -> Result<CycleReport> {
    let payload = fetcher.fetch().map_err(ExError::from)?;
    let updated_at = payload::updated_at(&payload);

    let saved = store.save(&payload)?;
    let changes = store.changes_for_snapshot(saved.snapshot_id)?;

    Ok(CycleReport {
        cycle_id,
        snapshot_id: saved.snapshot_id,
        previous_snapshot_id: saved.previous_snapshot_id,
        updated_at,
        changes,
    })
}

/// Fetch one payload and save it.
///
/// A failed fetch never reaches the store.
///
/// # Errors
///
/// - `ExternalService` / `Timeout` / `Io`: the fetcher failed
/// - `Persistence`: the save failed and was rolled back
pub fn run_cycle(store: &mut RankStore, fetcher: &dyn Fetcher) -> Result<CycleReport> {
    let started = Instant::now();
    let cycle_id = CycleId::new();
    log_op_start!("run_cycle", cycle_id = %cycle_id);

    let result = fetch_and_save(cycle_id.clone(), store, fetcher);
    let duration_ms = started.elapsed().as_millis() as u64;

    match &result {
        Ok(report) => {
            log_op_end!(
                "run_cycle",
                duration_ms = duration_ms,
                cycle_id = %report.cycle_id,
                snapshot_id = report.snapshot_id,
                change_count = report.changes.len()
            );
        }
        Err(err) => {
            log_op_error!(
                "run_cycle",
                err.clone(),
                duration_ms = duration_ms,
                cycle_id = %cycle_id
            );
        }
    }

    result
}
