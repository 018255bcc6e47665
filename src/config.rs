use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration.
///
/// Defaults target the public disclosure portal; every field can be
/// overridden through the environment.
#[derive(Clone, Debug)]
pub struct Config {
    /// Search page of the disclosure portal.
    pub search_url: String,
    /// Root of the per-period output tree.
    pub output_root: PathBuf,
    /// Ticker crawled when none is given on the command line.
    pub default_stock: String,
    /// Bound on full page loads.
    pub page_load_timeout_secs: u64,
    /// Bound on element-presence and render-stability waits.
    pub element_wait_secs: u64,
    /// Browser executable override; the system Chrome is used when unset.
    pub chrome_executable: Option<String>,
    // --- HTTP endpoint ---
    /// Listen address of the crawl API.
    pub listen_addr: String,
    /// Command the API runs to perform a crawl.
    pub crawler_command: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_url: "https://congbothongtin.ssc.gov.vn/faces/NewsSearch".to_string(),
            output_root: PathBuf::from("."),
            default_stock: "PVS".to_string(),
            page_load_timeout_secs: 30,
            element_wait_secs: 20,
            chrome_executable: None,
            listen_addr: "0.0.0.0:8000".to_string(),
            crawler_command: "ssc_crawler".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            search_url: std::env::var("SEARCH_URL").unwrap_or(default.search_url),
            output_root: std::env::var("OUTPUT_ROOT").map(PathBuf::from).unwrap_or(default.output_root),
            default_stock: std::env::var("DEFAULT_STOCK").unwrap_or(default.default_stock),
            page_load_timeout_secs: std::env::var("PAGE_LOAD_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.page_load_timeout_secs),
            element_wait_secs: std::env::var("ELEMENT_WAIT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.element_wait_secs),
            chrome_executable: std::env::var("CHROME_BIN").ok(),
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(default.listen_addr),
            crawler_command: std::env::var("CRAWLER_COMMAND").unwrap_or(default.crawler_command),
        }
    }

    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    pub fn element_wait(&self) -> Duration {
        Duration::from_secs(self.element_wait_secs)
    }
}
