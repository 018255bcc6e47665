//! Report processing context
//!
//! Captures "which report of which ticker am I processing" for the
//! detail flow and its log lines.

use std::fmt::Display;

use crate::models::report::{Period, ReportEntry};

/// Context for processing a single opened report.
#[derive(Debug, Clone)]
pub struct ReportCtx {
    /// Ticker the crawl was started for.
    pub stock_code: String,

    /// Stable index parsed from the listing link id.
    pub global_index: usize,

    /// Listing title of the report.
    pub title: String,

    /// Period classified from the title; `Unknown` triggers the
    /// detail-page fallback.
    pub period: Period,
}

impl ReportCtx {
    pub fn new(stock_code: String, global_index: usize, title: String, period: Period) -> Self {
        Self {
            stock_code,
            global_index,
            title,
            period,
        }
    }

    pub fn from_entry(entry: &ReportEntry, stock_code: &str) -> Self {
        Self::new(
            stock_code.to_string(),
            entry.global_index,
            entry.title.clone(),
            entry.period,
        )
    }
}

impl Display for ReportCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} report #{} '{}']",
            self.stock_code, self.global_index, self.title
        )
    }
}
