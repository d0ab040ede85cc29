//! In-memory stand-ins for the CCC API and Discord, shared by unit tests

use crate::ccc::{CardRecord, CardSource, ReportPage};
use crate::discord::{Delivery, Notification, Notifier};
use crate::error::{Result, WatchError};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

pub fn card(value: Value) -> CardRecord {
    serde_json::from_value(value).unwrap()
}

/// Serves canned search pages per card name; `None` pages fail like a 503
#[derive(Default)]
pub struct FakeSource {
    pages: HashMap<String, Vec<Option<Value>>>,
    calls: RefCell<Vec<(String, u32)>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next page of results for `name`
    pub fn page(mut self, name: &str, members: Value) -> Self {
        self.pages.entry(name.to_string()).or_default().push(Some(members));
        self
    }

    pub fn failing_page(mut self, name: &str) -> Self {
        self.pages.entry(name.to_string()).or_default().push(None);
        self
    }

    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.borrow().clone()
    }
}

impl CardSource for FakeSource {
    fn fetch_page(&self, name: &str, page: u32) -> Result<Vec<CardRecord>> {
        self.calls.borrow_mut().push((name.to_string(), page));

        let entry = self
            .pages
            .get(name)
            .and_then(|pages| pages.get(page as usize - 1));
        match entry {
            Some(Some(members)) => {
                let report = ReportPage {
                    members: serde_json::from_value(members.clone())?,
                };
                Ok(report.into_records())
            }
            Some(None) => Err(WatchError::HttpStatus(
                reqwest::StatusCode::SERVICE_UNAVAILABLE,
            )),
            None => Ok(Vec::new()),
        }
    }
}

/// Keeps every notification it is asked to send
pub struct RecordingNotifier {
    sent: RefCell<Vec<Notification>>,
    delivery: Delivery,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::answering(Delivery::Sent)
    }

    pub fn answering(delivery: Delivery) -> Self {
        Self {
            sent: RefCell::new(Vec::new()),
            delivery,
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) -> Delivery {
        self.sent.borrow_mut().push(notification.clone());
        self.delivery
    }
}
