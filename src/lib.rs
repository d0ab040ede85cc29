//! Pop Watch - CCC population report watcher
//!
//! Polls the CCC grading population report for a fixed watchlist of cards, compares
//! the grade counts with the last saved snapshot and sends a single Discord summary
//! per run: an alert when new high-grade pops appear, a routine status otherwise.

pub mod ccc;
pub mod config;
pub mod delta;
pub mod discord;
pub mod error;
pub mod scan;
pub mod snapshot;

#[cfg(test)]
mod test_support;

pub use ccc::{CardRecord, CardSource, CccClient};
pub use config::{Config, WatchItem};
pub use discord::{DiscordNotifier, LogNotifier, Notifier, Severity};
pub use error::{Result, WatchError};
pub use scan::{run_scan, ScanOutcome};
pub use snapshot::{Snapshot, SnapshotStore};
