//! Run configuration: upstream settings, webhook target and the watchlist

use crate::error::{Result, WatchError};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// CCC population report search endpoint
pub const DEFAULT_BASE_URL: &str = "https://cccgrading.com/api/v2/cards/report";

/// Default location of the persisted snapshot, relative to the working directory
pub const DEFAULT_STATE_FILE: &str = "suivi_pop_data.json";

/// Number of search pages scanned per card before giving up
pub const DEFAULT_MAX_PAGES: u32 = 5;

// The endpoint rejects requests that don't look like they come from the site itself.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const ACCEPT: &str = "application/ld+json";
const REFERER: &str = "https://cccgrading.com/";

/// Upstream search endpoint and the headers it expects
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub user_agent: String,
    pub accept: String,
    pub referer: String,
    pub max_pages: u32,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            accept: ACCEPT.to_string(),
            referer: REFERER.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl ApiSettings {
    /// Same headers, different endpoint (used to point the client at a mock server)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// A card to track on the population report
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WatchItem {
    #[serde(rename = "name")]
    pub display_name: String,
    /// Collector number; may hold non-digits (e.g. "TG12")
    #[serde(rename = "number")]
    pub target_number: String,
    /// Case-insensitive substring of the set name
    #[serde(rename = "set", default)]
    pub set_filter: Option<String>,
}

impl WatchItem {
    pub fn new(display_name: &str, target_number: &str, set_filter: Option<&str>) -> Self {
        Self {
            display_name: display_name.to_string(),
            target_number: target_number.to_string(),
            set_filter: set_filter.map(str::to_string),
        }
    }

    /// Snapshot key, e.g. "Nidoking_233"
    pub fn identity(&self) -> String {
        format!("{}_{}", self.display_name, self.target_number)
    }
}

/// The watchlist used when no watchlist file is given
pub fn default_watchlist() -> Vec<WatchItem> {
    vec![
        WatchItem::new("Nidoking", "233", None),
        WatchItem::new("Kyurem", "96", Some("Destinees")),
        WatchItem::new("Kyogre", "104", None),
        WatchItem::new("Zekrom", "114", Some("Noir")),
        WatchItem::new("Dracaufeu", "199", Some("151")),
    ]
}

/// Read a watchlist from a JSON array of `{ "name", "number", "set" }` objects
pub fn load_watchlist(path: &Path) -> Result<Vec<WatchItem>> {
    let content = std::fs::read_to_string(path)?;
    let items: Vec<WatchItem> = serde_json::from_str(&content)?;

    if items.is_empty() {
        return Err(WatchError::Watchlist(format!(
            "{} contains no cards",
            path.display()
        )));
    }

    let mut seen = HashSet::new();
    for item in &items {
        if item.display_name.trim().is_empty() || item.target_number.trim().is_empty() {
            return Err(WatchError::Watchlist(format!(
                "entry {:?} needs both a name and a number",
                item
            )));
        }
        if !seen.insert(item.identity()) {
            log::warn!(
                "Duplicate watchlist entry {}, the later one wins",
                item.identity()
            );
        }
    }

    log::info!("Loaded {} cards from {}", items.len(), path.display());
    Ok(items)
}

/// Everything a run needs, built once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord webhook; `None` disables delivery
    pub webhook_url: Option<String>,
    pub state_path: PathBuf,
    pub api: ApiSettings,
    pub watchlist: Vec<WatchItem>,
    /// Scan and log, but don't post or persist
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook_url: None,
            state_path: PathBuf::from(DEFAULT_STATE_FILE),
            api: ApiSettings::default(),
            watchlist: default_watchlist(),
            dry_run: false,
        }
    }
}

impl Config {
    /// Set the webhook, treating a blank value as "not configured"
    pub fn with_webhook(mut self, url: Option<String>) -> Self {
        self.webhook_url = url.filter(|u| !u.trim().is_empty());
        self
    }
}
