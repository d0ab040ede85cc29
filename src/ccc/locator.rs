//! Finds the population report record for a watched card

use crate::ccc::client::CardSource;
use crate::ccc::record::CardRecord;
use crate::config::WatchItem;

/// Does the record's set number refer to `target`?
///
/// The API is inconsistent across sets: some records carry a bare number ("104"),
/// others the printed "N/M" form ("104/203"). A prefix only counts when it is
/// followed by the "/" separator, so "1045" is not card 104.
pub fn matches_number(target: &str, extracted: &str) -> bool {
    let with_separator = format!("{}/", target);
    target == extracted
        || extracted.contains(&with_separator)
        || extracted.starts_with(&with_separator)
}

/// Case-insensitive substring check of the set filter; no filter accepts any set
pub fn matches_set(set_filter: Option<&str>, set_name: &str) -> bool {
    match set_filter {
        Some(filter) if !filter.is_empty() => set_name
            .to_lowercase()
            .contains(&filter.to_lowercase()),
        _ => true,
    }
}

/// First record of a page matching the watch item, in API order
pub fn find_in_page(records: Vec<CardRecord>, item: &WatchItem) -> Option<CardRecord> {
    records.into_iter().find(|card| {
        matches_number(&item.target_number, &card.number())
            && matches_set(item.set_filter.as_deref(), &card.set_name())
    })
}

/// Scan up to `max_pages` search pages for the watch item.
///
/// Stops at the first match, the first empty page, or the first page that fails
/// to load. Failures are logged here and reported to the caller as not found.
pub fn locate<S>(source: &S, item: &WatchItem, max_pages: u32) -> Option<CardRecord>
where
    S: CardSource + ?Sized,
{
    for page in 1..=max_pages {
        let records = match source.fetch_page(&item.display_name, page) {
            Ok(records) => records,
            Err(e) => {
                log::warn!(
                    "Failed to fetch page {} for {}: {}",
                    page,
                    item.display_name,
                    e
                );
                return None;
            }
        };

        if records.is_empty() {
            log::debug!("No more results for {} after page {}", item.display_name, page - 1);
            break;
        }

        if let Some(card) = find_in_page(records, item) {
            log::debug!("Found {} on page {}", item.identity(), page);
            return Some(card);
        }
    }

    log::info!("No record matching {} in the first {} page(s)", item.identity(), max_pages);
    None
}

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;
