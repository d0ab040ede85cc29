//! Persisted last-known record per watched card

use crate::ccc::CardRecord;
use crate::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Card identity ("Nidoking_233") to the last record seen for it
pub type Snapshot = BTreeMap<String, CardRecord>;

/// JSON file holding the snapshot, read and written as a whole
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot; a missing file is an empty snapshot.
    ///
    /// A file that exists but can't be read or parsed is an error: starting over
    /// from an empty history would report every card as new.
    pub fn load(&self) -> Result<Snapshot> {
        if !self.path.exists() {
            log::info!(
                "No state file at {}, starting with empty snapshot",
                self.path.display()
            );
            return Ok(Snapshot::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        log::info!(
            "Loaded snapshot with {} cards from {}",
            snapshot.len(),
            self.path.display()
        );
        Ok(snapshot)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Replace the state file with `snapshot`
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // 4-space indent, same layout as the state files already committed
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        snapshot.serialize(&mut serializer)?;

        // Write beside the target and rename over it, so a crash mid-write
        // leaves the previous state file intact
        let tmp = self.tmp_path();
        std::fs::write(&tmp, buf)?;
        std::fs::rename(&tmp, &self.path)?;
        log::info!(
            "Saved snapshot with {} cards to {}",
            snapshot.len(),
            self.path.display()
        );
        Ok(())
    }
}
