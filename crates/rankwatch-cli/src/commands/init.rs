//! Database initialization command

use super::{open_store, CommandResult};
use crate::config::Settings;

pub fn execute(settings: &Settings) -> CommandResult {
    let store = open_store(settings)?;
    println!(
        "Initialized database at {} ({} snapshots)",
        settings.db_path.display(),
        store.snapshot_count()?
    );
    Ok(())
}
