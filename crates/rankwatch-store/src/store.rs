//! Store facade.
//!
//! [`RankStore`] owns one configured connection and exposes the snapshot
//! store and change log operations. Concurrent readers open their own
//! `RankStore` on the same path; SQLite's WAL isolation keeps them from
//! seeing a half-written save.

use crate::changelog;
use crate::db;
use crate::errors::{persistence, Result};
use crate::migrations::apply_migrations;
use crate::snapshot::{self, SaveResult};
use rankwatch_core::model::{ChangeRecord, RankPoint, Snapshot, SnapshotMeta};
use rusqlite::Connection;
use serde_json::Value;
use std::path::{Path, PathBuf};

pub struct RankStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl RankStore {
    /// Open the store at `path`, creating the file and schema if needed.
    ///
    /// Safe to call any number of times; existing data is never touched.
    ///
    /// # Errors
    ///
    /// - `Io`: the parent directory could not be created
    /// - `Persistence`: SQLite could not open the file or a migration failed
    /// - `ConstraintViolation`: an applied migration's checksum changed
    pub fn initialize<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut conn = db::open(path)?;
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;

        tracing::debug!(db_path = %path.display(), "Store initialized");

        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// A private in-memory store (tests, dry runs).
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = db::open_in_memory()?;
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self { conn, path: None })
    }

    /// Database file backing this store, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Persist a payload and the rank changes it introduces.
    ///
    /// See [`snapshot::save_snapshot`].
    pub fn save(&mut self, payload: &Value) -> Result<SaveResult> {
        snapshot::save_snapshot(&mut self.conn, payload)
    }

    /// The snapshot with the highest id.
    pub fn latest(&self) -> Result<Option<Snapshot>> {
        snapshot::latest_snapshot(&self.conn)
    }

    /// The latest snapshot together with the changes its save produced,
    /// read from one consistent view of the database.
    pub fn latest_with_changes(&self) -> Result<Option<(Snapshot, Vec<ChangeRecord>)>> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| persistence("latest_with_changes", e))?;

        let view = match snapshot::latest_snapshot(&tx)? {
            Some(latest) => {
                let changes = changelog::changes_for_snapshot(&tx, latest.id)?;
                Some((latest, changes))
            }
            None => None,
        };

        // Read-only: dropping the transaction rolls back, nothing to keep.
        drop(tx);
        Ok(view)
    }

    pub fn snapshot(&self, snapshot_id: i64) -> Result<Snapshot> {
        snapshot::fetch_snapshot(&self.conn, snapshot_id)
    }

    pub fn list_snapshots(&self, limit: usize) -> Result<Vec<SnapshotMeta>> {
        snapshot::list_snapshots(&self.conn, limit)
    }

    pub fn snapshot_count(&self) -> Result<i64> {
        snapshot::snapshot_count(&self.conn)
    }

    /// Most recently detected changes first.
    pub fn recent(&self, limit: usize) -> Result<Vec<ChangeRecord>> {
        changelog::recent_changes(&self.conn, limit)
    }

    /// One entity's rank changes within a category, oldest first.
    pub fn history_for(&self, entity_id: &str, category: &str) -> Result<Vec<RankPoint>> {
        changelog::history_for(&self.conn, entity_id, category)
    }

    pub fn changes_for_snapshot(&self, snapshot_id: i64) -> Result<Vec<ChangeRecord>> {
        changelog::changes_for_snapshot(&self.conn, snapshot_id)
    }
}

impl std::fmt::Debug for RankStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankStore").field("path", &self.path).finish()
    }
}
