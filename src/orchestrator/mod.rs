//! Orchestration layer
//!
//! ## Responsibilities
//!
//! The crawl processor is the system's conductor: it owns the browser
//! session, walks the results listing index by index and delegates each
//! opened report to `workflow::ReportFlow`. It does no extraction of
//! its own - only scheduling, navigation and statistics.
//!
//! ## Layering
//!
//! ```text
//! orchestrator::crawl_processor (one crawl, Vec<ReportEntry>)
//!     ↓
//! workflow::ReportFlow (one opened report)
//!     ↓
//! services (listing / period / filter / table / storage)
//!     ↓
//! infrastructure::PageDriver (element-level page capabilities)
//! ```

pub mod crawl_processor;

pub use crawl_processor::{App, CrawlStats};
