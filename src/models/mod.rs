pub mod report;

pub use report::{Period, ReportEntry, Table, TableKind};
