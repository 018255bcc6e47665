//! Logging helpers
//!
//! Subscriber setup plus the banner lines the orchestrator emits at
//! start and finish.

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::orchestrator::CrawlStats;

/// Initializes the tracing subscriber. Reads the filter from
/// `RUST_LOG`, defaulting to `info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();
}

pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 Crawler starting - single-session sequential mode");
    info!("🔗 Portal: {}", config.search_url);
    info!("📁 Output root: {}", config.output_root.display());
    info!("{}", "=".repeat(60));
}

pub fn print_final_stats(stats: &CrawlStats) {
    info!("\n{}", "=".repeat(60));
    info!("📊 Crawl finished");
    info!(
        "Completed at: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ Saved: {}/{}", stats.saved, stats.total);
    info!("⏭️ Skipped: {}", stats.skipped);
    info!("❌ Failed: {}", stats.failed);
    info!("{}", "=".repeat(60));
}
