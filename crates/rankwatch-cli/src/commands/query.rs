//! Read-only commands printing JSON

use super::{open_store, print_json, CommandResult};
use crate::config::Settings;
use clap::Args;
use rankwatch_core::payload::summarize;

/// Default number of records for `changes` and `/api/changes`.
pub const DEFAULT_CHANGE_LIMIT: usize = 50;

#[derive(Debug, Args)]
pub struct ChangesArgs {
    #[arg(long, default_value_t = DEFAULT_CHANGE_LIMIT)]
    pub limit: usize,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Entity id (e.g. artistId)
    #[arg(long)]
    pub entity: String,

    /// Category name (e.g. groupName)
    #[arg(long)]
    pub category: String,
}

#[derive(Debug, Args)]
pub struct SnapshotsArgs {
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

pub fn execute_rankings(settings: &Settings) -> CommandResult {
    let store = open_store(settings)?;
    let latest = store.latest()?.ok_or("No snapshots stored yet")?;
    let summary = summarize(&latest.payload).ok_or_else(|| {
        format!("Snapshot #{} does not contain any rankings", latest.id)
    })?;
    print_json(&summary)
}

pub fn execute_changes(args: ChangesArgs, settings: &Settings) -> CommandResult {
    let store = open_store(settings)?;
    print_json(&store.recent(args.limit)?)
}

pub fn execute_history(args: HistoryArgs, settings: &Settings) -> CommandResult {
    let store = open_store(settings)?;
    print_json(&store.history_for(&args.entity, &args.category)?)
}

pub fn execute_snapshots(args: SnapshotsArgs, settings: &Settings) -> CommandResult {
    let store = open_store(settings)?;
    print_json(&store.list_snapshots(args.limit)?)
}
