//! Subcommand implementations.

pub mod fetch;
pub mod init;
pub mod query;
pub mod serve;

use crate::config::Settings;
use rankwatch_store::RankStore;

pub(crate) type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Open (and if needed create) the configured database.
pub(crate) fn open_store(settings: &Settings) -> Result<RankStore, rankwatch_core::ExError> {
    RankStore::initialize(&settings.db_path)
}

/// Pretty-print `value` as JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
