//! Report detail flow - workflow layer
//!
//! The complete processing sequence for one opened report:
//!
//! 1. wait for the detail tab container (timeout fails this report only)
//! 2. heading check → skip parent-company-only reports
//! 3. period fallback from the metadata table when the title said nothing
//! 4. identifier cell → sanitized file-name prefix
//! 5. output directory from period + ticker
//! 6. default tab's table → CSV if non-empty
//! 7. remaining three tabs, in fixed order: activate, extract, save
//!
//! The flow holds no page resource; it only depends on the services and
//! the driver handed in per call.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::infrastructure::PageDriver;
use crate::models::report::TableKind;
use crate::services::{filter, period, storage, table};
use crate::workflow::report_ctx::ReportCtx;

/// Detail-page tab container; its presence marks the page as loaded.
const DETAIL_TAB_CONTAINER_ID: &str = "pt2:pt1::tabbc";

/// Container of the report's primary heading.
const DETAIL_HEADING_CONTAINER_ID: &str = "pt2:pb2";

/// Cell carrying the stock identifier used as the file-name prefix.
const STOCK_IDENTIFIER_SELECTOR: &str = "td.xth.xtk";

/// Outcome of processing one report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessResult {
    /// Tables were extracted; non-empty ones were written.
    Saved,
    /// Excluded by the heading check - no files written.
    Skipped,
}

/// Report detail flow.
pub struct ReportFlow {
    output_root: PathBuf,
    element_wait: Duration,
}

impl ReportFlow {
    pub fn new(config: &Config) -> Self {
        Self {
            output_root: config.output_root.clone(),
            element_wait: config.element_wait(),
        }
    }

    pub async fn run(&self, driver: &PageDriver, ctx: &ReportCtx) -> Result<ProcessResult> {
        driver
            .wait_for_id(DETAIL_TAB_CONTAINER_ID, self.element_wait)
            .await?;

        // the heading is the authoritative exclusion signal; titles are
        // sometimes ambiguous
        if self.should_skip_by_heading(driver).await {
            info!("⏭️ {} Skipped by detail heading", ctx);
            return Ok(ProcessResult::Skipped);
        }

        let period = if ctx.period.is_unknown() {
            let resolved = period::from_detail(driver).await;
            info!("{} Period from detail page: {}", ctx, resolved);
            resolved
        } else {
            ctx.period
        };

        let raw_identifier = driver.text_of(STOCK_IDENTIFIER_SELECTOR).await?;
        let identifier = storage::sanitize_identifier(&raw_identifier);

        let dir = storage::report_dir(&self.output_root, &period, &ctx.stock_code);
        storage::ensure_dir(&dir)?;

        for kind in TableKind::ALL {
            if let Some(tab_id) = kind.tab_id() {
                driver.click_by_id(tab_id).await?;
            }

            let extracted = table::extract(driver, kind, self.element_wait).await;
            if extracted.is_empty() {
                debug!("{} {} table is empty, nothing to save", ctx, kind.label());
                continue;
            }

            let path = storage::write_table_csv(&dir, &identifier, kind, &extracted)?;
            info!("✅ {} Saved the {} table to {}", ctx, kind.label(), path.display());
        }

        Ok(ProcessResult::Saved)
    }

    /// Inspects the `<h1>` inside the heading container. Lookup failure
    /// means "do not skip" - the report is processed normally.
    async fn should_skip_by_heading(&self, driver: &PageDriver) -> bool {
        let selector = format!(r#"[id="{DETAIL_HEADING_CONTAINER_ID}"] h1"#);
        match driver.text_of(&selector).await {
            Ok(heading) => {
                if filter::should_skip(&heading) {
                    info!("⏭️ Heading carries an exclusion keyword: '{}'", heading);
                    true
                } else {
                    false
                }
            }
            Err(e) => {
                warn!("⚠️ Could not inspect the detail heading: {}", e);
                false
            }
        }
    }
}
