//! Error taxonomy
//!
//! Recoverable failures (extraction, per-report timeouts) are handled
//! where they occur; only failing to reach the search page or to locate
//! the results table aborts a crawl. No retries anywhere - every
//! recoverable failure is a skip-and-continue.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::error::CdpError;
use thiserror::Error;

/// Top-level crawler error.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Browser lifecycle and page-interaction errors.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("invalid browser configuration: {0}")]
    Configuration(String),

    #[error("failed to launch headless browser: {0}")]
    Launch(#[source] CdpError),

    #[error("navigation to {url} failed: {source}")]
    Navigation {
        url: String,
        #[source]
        source: CdpError,
    },

    #[error("timed out after {timeout:?} waiting for {target}")]
    WaitTimeout { target: String, timeout: Duration },

    #[error("browser call failed: {0}")]
    Cdp(#[from] CdpError),
}

/// The page markup is missing structure the extractor relies on.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no element matches {selector}")]
    ElementNotFound { selector: String },

    #[error("element {id} exposes no markup")]
    MissingMarkup { id: String },

    #[error("header table {id} has no label row")]
    HeaderRowMissing { id: String },

    #[error("report link id {id} carries no numeric index segment")]
    BadLinkId { id: String },
}

/// Output-tree errors surfaced as a failed-report outcome.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV serialization failed for {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Crawler result type.
pub type Result<T> = std::result::Result<T, CrawlError>;
