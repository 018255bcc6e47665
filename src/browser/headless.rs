use std::path::Path;
use std::time::Duration;

use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{BrowserError, Result};

/// Launches a sandboxed headless browser with a blank page.
///
/// The returned `Browser` must be kept alive for as long as the page is
/// used; dropping it tears down the CDP session.
pub async fn launch_headless_browser(config: &Config) -> Result<(Browser, Page)> {
    info!("🚀 Launching headless browser...");

    let mut builder = BrowserConfig::builder().new_headless_mode().args(vec![
        "--no-sandbox",
        "--disable-gpu",
        "--disable-dev-shm-usage",
    ]);
    if let Some(executable) = &config.chrome_executable {
        debug!("Using browser executable {}", executable);
        builder = builder.chrome_executable(Path::new(executable));
    }
    let browser_config = builder.build().map_err(BrowserError::Configuration)?;

    let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
        error!("❌ Failed to launch the headless browser: {}", e);
        BrowserError::Launch(e)
    })?;
    debug!("Headless browser launched");

    // drain CDP events in the background
    tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    });

    // give the CDP session a moment to settle before the first command
    sleep(Duration::from_millis(300)).await;

    let page = browser
        .new_page("about:blank")
        .await
        .map_err(BrowserError::Launch)?;
    debug!("Blank page ready");

    Ok((browser, page))
}
