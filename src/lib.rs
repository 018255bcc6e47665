//! # SSC Crawler
//!
//! Automated retrieval of quarterly financial-statement tables from the
//! State Securities Commission disclosure portal, persisted as
//! per-quarter CSV files, with a thin HTTP endpoint that triggers a
//! crawl and reassembles the output into JSON.
//!
//! ## Architecture
//!
//! The crate is layered strictly top-down:
//!
//! ### ① Infrastructure
//! - `infrastructure::PageDriver` - owns the scarce `Page` resource and
//!   exposes element-level capabilities (navigate, wait, read markup,
//!   click, type); knows nothing about reports
//!
//! ### ② Services
//! - `services::normalize` - diacritics stripping for pattern matching
//! - `services::period` - title and detail-page period classification
//! - `services::filter` - parent-company-only report exclusion
//! - `services::listing` - results-page enumeration
//! - `services::table` - tabbed-table extraction
//! - `services::storage` - directory routing and CSV persistence
//! - `services::aggregate` - CSV-to-JSON reassembly for the API
//!
//! ### ③ Workflow
//! - `workflow::ReportFlow` - the complete flow for one opened report
//!   (heading check → period fallback → four tables)
//!
//! ### ④ Orchestration
//! - `orchestrator::App` - one browser session, one sequential pass over
//!   the listing, statistics
//!
//! The `api` module is outside the crawl core: it serves the
//! `GET /crawl` trigger endpoint and re-aggregates stored CSV files.

pub mod api;
pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// re-export the commonly used types
pub use browser::launch_headless_browser;
pub use config::Config;
pub use error::{CrawlError, Result};
pub use infrastructure::PageDriver;
pub use models::report::{Period, ReportEntry, Table, TableKind};
pub use orchestrator::{App, CrawlStats};
pub use workflow::{ProcessResult, ReportCtx, ReportFlow};
