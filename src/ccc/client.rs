//! Blocking HTTP client for the CCC population report search

use crate::ccc::record::CardRecord;
use crate::config::ApiSettings;
use crate::error::{Result, WatchError};
use serde::Deserialize;
use serde_json::Value;

/// A paginated source of population report records, searched by card name.
///
/// `Ok(vec![])` means the page exists but has no results (end of the listing);
/// `Err` means the page could not be fetched at all.
pub trait CardSource {
    fn fetch_page(&self, name: &str, page: u32) -> Result<Vec<CardRecord>>;
}

/// JSON-LD collection envelope returned by the search endpoint
#[derive(Debug, Deserialize)]
pub struct ReportPage {
    #[serde(rename = "hydra:member", default)]
    pub members: Vec<Value>,
}

impl ReportPage {
    /// Card records of the page, in API order; entries that aren't JSON objects are skipped
    pub fn into_records(self) -> Vec<CardRecord> {
        self.members
            .into_iter()
            .filter_map(|member| match member {
                Value::Object(fields) => Some(CardRecord::from(fields)),
                other => {
                    log::debug!("Skipping non-object report entry: {}", other);
                    None
                }
            })
            .collect()
    }
}

/// CCC grading API client
pub struct CccClient {
    client: reqwest::blocking::Client,
    settings: ApiSettings,
}

impl CccClient {
    pub fn new(settings: ApiSettings) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            settings,
        }
    }

    fn page_url(&self, name: &str, page: u32) -> String {
        format!(
            "{}?name={}&page={}",
            self.settings.base_url,
            urlencoding::encode(name),
            page
        )
    }
}

impl CardSource for CccClient {
    fn fetch_page(&self, name: &str, page: u32) -> Result<Vec<CardRecord>> {
        let url = self.page_url(name, page);
        log::debug!("Fetching population report page: {}", url);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", &self.settings.user_agent)
            .header("Accept", &self.settings.accept)
            .header("Referer", &self.settings.referer)
            .send()?;

        if !response.status().is_success() {
            return Err(WatchError::HttpStatus(response.status()));
        }

        // Body is read as text first so a malformed document surfaces as a Parse error
        let body = response.text()?;
        let page: ReportPage = serde_json::from_str(&body)?;
        Ok(page.into_records())
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
