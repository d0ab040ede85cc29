//! CCC grading population report: record model, search client and card locator

mod client;
mod locator;
mod record;

pub use client::{CardSource, CccClient, ReportPage};
pub use locator::{find_in_page, locate, matches_number, matches_set};
pub use record::{CardRecord, GRADE_FIELDS};
