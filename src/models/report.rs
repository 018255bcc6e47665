//! Report data model
//!
//! Types shared across the listing, extraction and storage layers:
//! the reporting period, the four statement tables the portal exposes
//! per report, and the transient listing entry.

use std::fmt;

/// Canonical reporting period of a disclosed financial statement.
///
/// Years are 4-digit values extracted from report titles or detail-page
/// metadata. Quarter numbers are trusted as extracted, with no upper
/// bound enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Semi-annual report ("bán niên").
    SemiAnnual { year: u32 },
    /// Full-year report ("năm").
    Annual { year: u32 },
    /// Quarterly report ("quý N").
    Quarter { quarter: u32, year: u32 },
    /// Neither the title nor the detail page yielded a period.
    Unknown,
}

impl Period {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Period::Unknown)
    }
}

impl fmt::Display for Period {
    /// Directory label used for output routing: `H1.2023`, `Y2022`,
    /// `Q3.2021`, or `unknown`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::SemiAnnual { year } => write!(f, "H1.{year}"),
            Period::Annual { year } => write!(f, "Y{year}"),
            Period::Quarter { quarter, year } => write!(f, "Q{quarter}.{year}"),
            Period::Unknown => write!(f, "unknown"),
        }
    }
}

/// One of the four tabbed statement tables on a report detail page.
///
/// Each kind carries the portal element ids of its header container,
/// its data container, and (except for the default tab) the accordion
/// link that activates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Balance sheet ("cân đối kế toán") - the default-selected tab.
    Cdkt,
    /// Income statement ("kết quả kinh doanh").
    Kqkd,
    /// Cash flow, direct method ("lưu chuyển tiền tệ - trực tiếp").
    LcttTt,
    /// Cash flow, indirect method ("lưu chuyển tiền tệ - gián tiếp").
    LcttGt,
}

impl TableKind {
    /// Fixed processing order: the default tab first, then the three
    /// tabs that need activation.
    pub const ALL: [TableKind; 4] = [
        TableKind::Cdkt,
        TableKind::Kqkd,
        TableKind::LcttTt,
        TableKind::LcttGt,
    ];

    /// File-name suffix, also the key in the aggregation payload.
    pub fn suffix(self) -> &'static str {
        match self {
            TableKind::Cdkt => "cdkt",
            TableKind::Kqkd => "kqkd",
            TableKind::LcttTt => "lctt_tt",
            TableKind::LcttGt => "lctt_gt",
        }
    }

    /// Short display label for log lines.
    pub fn label(self) -> &'static str {
        match self {
            TableKind::Cdkt => "CDKT",
            TableKind::Kqkd => "KQKD",
            TableKind::LcttTt => "LCTT-TT",
            TableKind::LcttGt => "LCTT-GT",
        }
    }

    /// Id of the header table holding the column labels.
    pub fn header_id(self) -> &'static str {
        match self {
            TableKind::Cdkt => "pt2:t2::ch::t",
            TableKind::Kqkd => "pt2:t3::ch::t",
            TableKind::LcttTt => "pt2:t5::ch::t",
            TableKind::LcttGt => "pt2:t6::ch::t",
        }
    }

    /// Id of the data container holding the body rows.
    pub fn body_id(self) -> &'static str {
        match self {
            TableKind::Cdkt => "pt2:t2::db",
            TableKind::Kqkd => "pt2:t3::db",
            TableKind::LcttTt => "pt2:t5::db",
            TableKind::LcttGt => "pt2:t6::db",
        }
    }

    /// Id of the accordion link that activates the tab. The balance
    /// sheet is the default-selected tab and has none.
    pub fn tab_id(self) -> Option<&'static str> {
        match self {
            TableKind::Cdkt => None,
            TableKind::Kqkd => Some("pt2:KQKD::disAcr"),
            TableKind::LcttTt => Some("pt2:LCTT-TT::disAcr"),
            TableKind::LcttGt => Some("pt2:LCTT-GT::disAcr"),
        }
    }

    /// Maps a stored CSV file name back to its table kind, by the first
    /// kind keyword the lowercased name contains.
    pub fn from_file_name(name: &str) -> Option<TableKind> {
        let lower = name.to_lowercase();
        TableKind::ALL.into_iter().find(|kind| lower.contains(kind.suffix()))
    }
}

/// A structured table extracted from the page.
///
/// Header and row cell counts are not required to match: the portal
/// occasionally renders ragged rows and the raw shape is preserved.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// A table with no data rows is "nothing to save", matching the
    /// conditional-write rule of the detail flow.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One visible report entry on the search-results page.
///
/// Entries are transient: element ids are only valid for the page
/// instance that produced them, so a fresh listing must be collected
/// after every navigation and entries must never be cached across one.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    /// Stable index parsed from the link id (`pt9:t1:<idx>:cl1`).
    pub global_index: usize,
    /// Structural id of the report link, used to re-resolve the anchor.
    pub link_id: String,
    /// Display text of the link.
    pub title: String,
    /// Period classified from the title; `Unknown` triggers the
    /// detail-page fallback later.
    pub period: Period,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_labels() {
        assert_eq!(Period::SemiAnnual { year: 2023 }.to_string(), "H1.2023");
        assert_eq!(Period::Annual { year: 2022 }.to_string(), "Y2022");
        assert_eq!(
            Period::Quarter { quarter: 3, year: 2021 }.to_string(),
            "Q3.2021"
        );
        assert_eq!(Period::Unknown.to_string(), "unknown");
    }

    #[test]
    fn table_kind_from_file_name() {
        assert_eq!(
            TableKind::from_file_name("PVS_baocao_cdkt.csv"),
            Some(TableKind::Cdkt)
        );
        assert_eq!(
            TableKind::from_file_name("pvs_BAOCAO_LCTT_GT.CSV"),
            Some(TableKind::LcttGt)
        );
        assert_eq!(
            TableKind::from_file_name("PVS_baocao_lctt_tt.csv"),
            Some(TableKind::LcttTt)
        );
        assert_eq!(TableKind::from_file_name("notes.csv"), None);
    }

    #[test]
    fn empty_table_has_no_rows() {
        let table = Table {
            columns: vec!["A".into()],
            rows: Vec::new(),
        };
        assert!(table.is_empty());
    }
}
