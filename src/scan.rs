//! One watch run: locate every card, diff against the snapshot, notify once, persist

use crate::ccc::{locate, CardSource, GRADE_FIELDS};
use crate::config::{Config, WatchItem};
use crate::delta::{describe, diff, Observation};
use crate::discord::{Delivery, Notification, Notifier, Severity};
use crate::error::Result;
use crate::snapshot::{Snapshot, SnapshotStore};

const ALERT_TITLE: &str = "🚨 NOUVELLES POPS DÉTECTÉES !";
const ROUTINE_TITLE: &str = "✅ Scan terminé : R.A.S";
const ROUTINE_HEADER: &str = "Aucun changement détecté.\n\n📊 **État actuel :**";

/// Lines collected over a run, turned into the notification at the end
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// One line per card with new pops, e.g. "**Nidoking** : +1 (Gr10g)"
    pub changed: Vec<String>,
    /// One line per watch item, found or not
    pub status: Vec<String>,
}

impl RunSummary {
    fn record_found(&mut self, item: &WatchItem, total: u64, observation: &Observation) {
        if let Observation::Increased(changes) = observation {
            self.changed
                .push(format!("**{}** : {}", item.display_name, describe(changes)));
        }
        self.status
            .push(format!("{} : {} total", item.display_name, total));
    }

    fn record_missing(&mut self, item: &WatchItem) {
        self.status
            .push(format!("{} : ⚠️ Erreur scan", item.display_name));
    }

    pub fn severity(&self) -> Severity {
        if self.changed.is_empty() {
            Severity::Routine
        } else {
            Severity::Alert
        }
    }

    /// Alert lists only the cards with new pops; routine lists every card's status
    pub fn to_notification(&self) -> Notification {
        match self.severity() {
            Severity::Alert => Notification {
                title: ALERT_TITLE.to_string(),
                body: self.changed.join("\n"),
                severity: Severity::Alert,
            },
            Severity::Routine => Notification {
                title: ROUTINE_TITLE.to_string(),
                body: format!("{}\n{}", ROUTINE_HEADER, self.status.join("\n")),
                severity: Severity::Routine,
            },
        }
    }
}

/// Locate and diff every watch item, updating `snapshot` in place.
///
/// Returns the summary and whether any snapshot entry was replaced.
pub fn scan_watchlist<S>(
    source: &S,
    watchlist: &[WatchItem],
    max_pages: u32,
    snapshot: &mut Snapshot,
) -> (RunSummary, bool)
where
    S: CardSource + ?Sized,
{
    let mut summary = RunSummary::default();
    let mut dirty = false;

    for item in watchlist {
        let identity = item.identity();

        let Some(current) = locate(source, item, max_pages) else {
            log::warn!("{}: not found", identity);
            summary.record_missing(item);
            continue;
        };

        let observation = diff(snapshot.get(&identity), &current, &GRADE_FIELDS);
        match &observation {
            Observation::Initial => log::info!("{}: first observation", identity),
            Observation::Increased(changes) => {
                log::info!("{}: new pops {}", identity, describe(changes))
            }
            Observation::Unchanged => log::info!("{}: unchanged", identity),
        }

        summary.record_found(item, current.total(), &observation);
        if observation.must_update() {
            snapshot.insert(identity, current);
            dirty = true;
        }
    }

    (summary, dirty)
}

/// What a run did, for logging and tests
#[derive(Debug)]
pub struct ScanOutcome {
    pub summary: RunSummary,
    pub notification: Notification,
    pub delivery: Delivery,
    /// Snapshot changed during the run
    pub dirty: bool,
    /// Snapshot was written back to disk
    pub saved: bool,
}

/// Full run: load, scan, notify once, then persist if anything changed.
///
/// Only a snapshot that can't be loaded aborts the run. Lookup, delivery and save
/// failures are logged and the run carries on.
pub fn run_scan<S, N>(
    config: &Config,
    source: &S,
    notifier: &N,
    store: &SnapshotStore,
) -> Result<ScanOutcome>
where
    S: CardSource + ?Sized,
    N: Notifier + ?Sized,
{
    let mut snapshot = store.load()?;

    let (summary, dirty) = scan_watchlist(
        source,
        &config.watchlist,
        config.api.max_pages,
        &mut snapshot,
    );

    let notification = summary.to_notification();
    let delivery = notifier.notify(&notification);

    let saved = if !dirty {
        log::info!("No snapshot changes, state file left untouched");
        false
    } else if config.dry_run {
        log::info!("[dry run] Snapshot changed, not saving");
        false
    } else {
        match store.save(&snapshot) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to save snapshot to {}: {}", store.path().display(), e);
                false
            }
        }
    };

    Ok(ScanOutcome {
        summary,
        notification,
        delivery,
        dirty,
        saved,
    })
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
