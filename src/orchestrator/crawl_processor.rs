//! Crawl orchestrator
//!
//! ## Responsibilities
//!
//! Drives the end-to-end sequence for one ticker: search, enumerate,
//! open each report, run the detail flow, return to the results page,
//! repeat. One browser session, strictly sequential.
//!
//! The listing is re-collected after every return-to-results
//! navigation: element ids are minted per page instance and do not
//! survive a navigation, so entries are re-resolved by id each pass.
//!
//! Per-report failures are counted and skipped; only failing to reach
//! the search page or to locate the results table aborts the crawl.

use chromiumoxide::Browser;
use tracing::{error, info, warn};

use crate::browser;
use crate::config::Config;
use crate::error::Result;
use crate::infrastructure::PageDriver;
use crate::services::listing;
use crate::utils::logging;
use crate::workflow::{ProcessResult, ReportCtx, ReportFlow};

/// Search input on the portal's news-search page.
const SEARCH_INPUT_ID: &str = "pt9:it8112::content";

/// The search button has no stable id; it is the anchor enclosing the
/// "Tìm kiếm" label.
const SEARCH_BUTTON_XPATH: &str = "//span[text()='Tìm kiếm']/ancestor::a";

/// Aggregated outcome of one crawl run.
#[derive(Debug, Default)]
pub struct CrawlStats {
    /// Reports whose tables were extracted and written.
    pub saved: usize,
    /// Reports excluded by the title or heading filter.
    pub skipped: usize,
    /// Reports abandoned after an error.
    pub failed: usize,
    /// Entries visible in the initial listing pass.
    pub total: usize,
}

/// Application root: owns the browser session and the page driver.
pub struct App {
    config: Config,
    _browser: Browser,
    driver: PageDriver,
}

impl App {
    /// Launches the headless browser and prepares the page driver.
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config);

        let (browser, page) = browser::launch_headless_browser(&config).await?;
        let driver = PageDriver::new(page);

        Ok(Self {
            config,
            _browser: browser,
            driver,
        })
    }

    /// Runs a full crawl for one ticker.
    pub async fn run(&self, stock_code: &str) -> Result<CrawlStats> {
        let wait = self.config.element_wait();
        let flow = ReportFlow::new(&self.config);

        // failure to reach the search page aborts the whole crawl
        self.driver
            .goto(&self.config.search_url, self.config.page_load_timeout())
            .await?;
        self.driver.type_into(SEARCH_INPUT_ID, stock_code, wait).await?;
        self.driver.click_xpath(SEARCH_BUTTON_XPATH).await?;

        // so does a results page without the listing table
        let initial = listing::collect(&self.driver, wait).await?;
        let total = initial.entries.len();
        let mut stats = CrawlStats {
            skipped: initial.skipped,
            total,
            ..Default::default()
        };
        info!(
            "✓ Found {} reports for {} ({} filtered out by keyword)",
            total, stock_code, initial.skipped
        );

        for index in 0..total {
            // fresh ids every pass; entries never survive a navigation
            let outcome = listing::collect(&self.driver, wait).await?;
            let Some(entry) = outcome.entries.get(index) else {
                warn!(
                    "⚠️ Listing shrank to {} entries, stopping at index {}",
                    outcome.entries.len(),
                    index
                );
                break;
            };

            info!("\n=== Processing report {}/{}: {} ===", index + 1, total, entry.title);
            let ctx = ReportCtx::from_entry(entry, stock_code);

            if let Err(e) = self.driver.click_by_id(&entry.link_id).await {
                error!("❌ {} Could not open the report: {}", ctx, e);
                stats.failed += 1;
                continue; // still on the results page
            }

            match flow.run(&self.driver, &ctx).await {
                Ok(ProcessResult::Saved) => stats.saved += 1,
                Ok(ProcessResult::Skipped) => stats.skipped += 1,
                Err(e) => {
                    error!("❌ {} Processing failed: {}", ctx, e);
                    stats.failed += 1;
                }
            }

            // back to the results page for the next index
            self.driver.go_back().await?;
            self.driver.wait_for_id(listing::RESULTS_TABLE_ID, wait).await?;
        }

        logging::print_final_stats(&stats);
        Ok(stats)
    }
}
