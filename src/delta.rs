//! Grade count comparison between the stored snapshot and a fresh fetch

use crate::ccc::CardRecord;
use std::fmt;

/// One grade tier whose population went up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub field: String,
    pub delta: u64,
    pub old: u64,
    pub new: u64,
}

impl Change {
    /// Short tier label, e.g. "Gr10g" for "note10g"
    pub fn label(&self) -> String {
        grade_label(&self.field)
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{} ({})", self.delta, self.label())
    }
}

/// Increases found for one card, in grade priority order
pub type ChangeReport = Vec<Change>;

/// Result of comparing a fetched record against the snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// Card was not in the snapshot yet
    Initial,
    /// At least one watched tier went up
    Increased(ChangeReport),
    /// Nothing went up (decreases are ignored)
    Unchanged,
}

impl Observation {
    /// Whether the snapshot entry must be replaced by the fetched record
    pub fn must_update(&self) -> bool {
        !matches!(self, Observation::Unchanged)
    }

    /// The increases, empty for initial and unchanged observations
    pub fn report(&self) -> &[Change] {
        match self {
            Observation::Increased(changes) => changes,
            _ => &[],
        }
    }
}

/// "note10g" -> "Gr10g"; names without the prefix are kept as is
pub fn grade_label(field: &str) -> String {
    match field.strip_prefix("note") {
        Some(tier) => format!("Gr{}", tier),
        None => field.to_string(),
    }
}

/// Compare `current` against the stored `previous` record over `fields`.
///
/// Missing or null counts are zero. Only strict increases are reported.
pub fn diff(previous: Option<&CardRecord>, current: &CardRecord, fields: &[&str]) -> Observation {
    let Some(previous) = previous else {
        return Observation::Initial;
    };

    let changes: ChangeReport = fields
        .iter()
        .filter_map(|field| {
            let old = previous.count(field);
            let new = current.count(field);
            (new > old).then(|| Change {
                field: field.to_string(),
                delta: new - old,
                old,
                new,
            })
        })
        .collect();

    if changes.is_empty() {
        Observation::Unchanged
    } else {
        Observation::Increased(changes)
    }
}

/// "+1 (Gr10g), +2 (Gr9)"
pub fn describe(changes: &[Change]) -> String {
    changes
        .iter()
        .map(Change::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "delta_tests.rs"]
mod tests;
