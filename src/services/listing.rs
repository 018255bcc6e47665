//! Report lister - service layer
//!
//! Enumerates the visible report links on the search-results page,
//! filtering excluded titles and classifying each survivor's period.
//!
//! Element ids are only valid for the page instance that produced them:
//! callers must re-collect after every navigation and never reuse
//! entries across one.

use std::time::Duration;

use tracing::{info, warn};

use crate::error::Result;
use crate::infrastructure::PageDriver;
use crate::models::report::ReportEntry;
use crate::services::{filter, period};

/// Data container of the search-results table.
pub const RESULTS_TABLE_ID: &str = "pt9:t1::db";

/// Report links share a structural id suffix: `pt9:t1:<idx>:cl1`.
const REPORT_LINK_SUFFIX: &str = ":cl1";

/// One listing pass: surviving entries plus the filtered-out count.
#[derive(Debug, Default)]
pub struct ListingOutcome {
    pub entries: Vec<ReportEntry>,
    pub skipped: usize,
}

/// Collects the report entries currently visible on the results page.
pub async fn collect(driver: &PageDriver, timeout: Duration) -> Result<ListingOutcome> {
    driver.wait_for_id(RESULTS_TABLE_ID, timeout).await?;

    let selector = format!(r#"[id="{RESULTS_TABLE_ID}"] a[id$="{REPORT_LINK_SUFFIX}"]"#);
    let anchors = driver.find_all(&selector).await?;

    let mut outcome = ListingOutcome::default();

    for anchor in anchors {
        let link_id = match anchor.attribute("id").await {
            Ok(Some(id)) => id,
            _ => continue,
        };
        let title = anchor
            .inner_text()
            .await
            .ok()
            .flatten()
            .unwrap_or_default()
            .trim()
            .to_string();

        if filter::should_skip(&title) {
            outcome.skipped += 1;
            info!("⏭️ Skipping '{}'", title);
            continue;
        }

        let Some(global_index) = parse_link_index(&link_id) else {
            warn!("⚠️ Report link id '{}' has no index segment, dropping it", link_id);
            continue;
        };

        let period = period::from_title(&title);
        info!("✓ #{} {} → {}", global_index, title, period);

        outcome.entries.push(ReportEntry {
            global_index,
            link_id,
            title,
            period,
        });
    }

    Ok(outcome)
}

/// Pulls the numeric segment out of a link id (`pt9:t1:<idx>:cl1`).
pub(crate) fn parse_link_index(link_id: &str) -> Option<usize> {
    link_id.split(':').nth(2)?.parse().ok()
}
