//! Period classifier - service layer
//!
//! Maps a report to its reporting period, from two sources:
//!
//! 1. the listing title, via accent-stripped pattern matching;
//! 2. the detail page's metadata table, as a fallback when the title
//!    says nothing.
//!
//! Patterns are tried most-specific first: "bán niên" and "năm" titles
//! also contain digit runs that would otherwise be misread as quarter
//! numbers, and "Quý N năm YYYY" must win over the bare "năm YYYY" it
//! embeds.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::infrastructure::PageDriver;
use crate::models::report::Period;
use crate::services::normalize::strip_accents;

/// Metadata table on the report detail page, scanned by the fallback.
const DETAIL_METADATA_ID: &str = "pt2:tt1::db";

static RE_SEMI_ANNUAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)ban nien\s*(\d{4})").expect("semi-annual pattern"));
static RE_QUARTER_NAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bquy\s*(\d+)[/ ]*nam\s*(\d{4})").expect("quarter-nam pattern"));
static RE_ANNUAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bnam\s*(\d{4})").expect("annual pattern"));
static RE_QUARTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bquy\s*(\d+)[/ ]*(\d{4})").expect("quarter pattern"));
static RE_YEAR_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").expect("year run pattern"));
static RE_DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("digit run pattern"));

static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("tr selector"));
static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("td selector"));

/// Classifies a report title.
pub fn from_title(title: &str) -> Period {
    let name = strip_accents(title);

    if let Some(year) = RE_SEMI_ANNUAL.captures(&name).and_then(|c| cap_u32(&c, 1)) {
        return Period::SemiAnnual { year };
    }

    if let Some(captures) = RE_QUARTER_NAM.captures(&name) {
        if let (Some(quarter), Some(year)) = (cap_u32(&captures, 1), cap_u32(&captures, 2)) {
            return Period::Quarter { quarter, year };
        }
    }

    if let Some(year) = RE_ANNUAL.captures(&name).and_then(|c| cap_u32(&c, 1)) {
        return Period::Annual { year };
    }

    if let Some(captures) = RE_QUARTER.captures(&name) {
        if let (Some(quarter), Some(year)) = (cap_u32(&captures, 1), cap_u32(&captures, 2)) {
            return Period::Quarter { quarter, year };
        }
    }

    Period::Unknown
}

/// Fallback for titles that classify as `Unknown`: reads the detail
/// page's metadata table and scans its label/value rows. Any access
/// failure yields `Unknown` - never a fatal error.
pub async fn from_detail(driver: &PageDriver) -> Period {
    match driver.outer_html(DETAIL_METADATA_ID).await {
        Ok(html) => from_detail_fragment(&html),
        Err(e) => {
            warn!("⚠️ Could not read the report metadata table: {e}");
            Period::Unknown
        }
    }
}

/// Scans the metadata table markup. Rows need at least 3 cells; the
/// first cell is the label (accent-stripped, lowercased), the third the
/// value. A label containing "nam" supplies the first 4-digit run as
/// the year, one containing "quy" the first digit run as the quarter;
/// scanning stops once both are captured.
pub fn from_detail_fragment(html: &str) -> Period {
    let fragment = Html::parse_fragment(html);

    let mut year: Option<u32> = None;
    let mut quarter: Option<u32> = None;

    for row in fragment.select(&ROW_SELECTOR) {
        let cells: Vec<ElementRef> = row.select(&CELL_SELECTOR).collect();
        if cells.len() < 3 {
            continue;
        }

        let label = strip_accents(&cell_text(&cells[0])).to_lowercase();
        let value = cell_text(&cells[2]);

        if year.is_none() && label.contains("nam") {
            year = RE_YEAR_RUN.find(&value).and_then(|m| m.as_str().parse().ok());
        }
        if quarter.is_none() && label.contains("quy") {
            quarter = RE_DIGIT_RUN.find(&value).and_then(|m| m.as_str().parse().ok());
        }

        if year.is_some() && quarter.is_some() {
            break;
        }
    }

    match (quarter, year) {
        (Some(quarter), Some(year)) => Period::Quarter { quarter, year },
        (None, Some(year)) => Period::Annual { year },
        _ => Period::Unknown,
    }
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn cap_u32(captures: &regex::Captures, index: usize) -> Option<u32> {
    captures.get(index)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_semi_annual() {
        assert_eq!(
            from_title("Báo cáo tài chính bán niên 2023"),
            Period::SemiAnnual { year: 2023 }
        );
    }

    #[test]
    fn classifies_annual() {
        assert_eq!(
            from_title("Báo cáo tài chính năm 2022"),
            Period::Annual { year: 2022 }
        );
    }

    #[test]
    fn classifies_quarter_with_slash() {
        assert_eq!(
            from_title("Báo cáo tài chính Quý 3/2021"),
            Period::Quarter { quarter: 3, year: 2021 }
        );
    }

    #[test]
    fn classifies_quarter_with_nam_token() {
        assert_eq!(
            from_title("Báo cáo tài chính Quý 1 năm 2020"),
            Period::Quarter { quarter: 1, year: 2020 }
        );
    }

    #[test]
    fn unrelated_titles_are_unknown() {
        assert_eq!(from_title("Nghị quyết Hội đồng quản trị"), Period::Unknown);
        assert_eq!(from_title(""), Period::Unknown);
    }

    #[test]
    fn semi_annual_outranks_quarter_like_digits() {
        // "bán niên" titles contain digit runs a quarter pattern could
        // misread; specificity ordering must hold
        assert_eq!(
            from_title("Báo cáo tài chính bán niên 2023 (Quý 2/2023)"),
            Period::SemiAnnual { year: 2023 }
        );
    }

    const DETAIL_HTML: &str = r#"
        <div id="pt2:tt1::db"><table><tbody>
            <tr><td>Loại báo cáo</td><td>:</td><td>Báo cáo tài chính</td></tr>
            <tr><td>Năm</td><td>:</td><td>2024</td></tr>
            <tr><td>Quý</td><td>:</td><td>2</td></tr>
        </tbody></table></div>
    "#;

    #[test]
    fn detail_fallback_finds_quarter_and_year() {
        assert_eq!(
            from_detail_fragment(DETAIL_HTML),
            Period::Quarter { quarter: 2, year: 2024 }
        );
    }

    #[test]
    fn detail_fallback_year_only_is_annual() {
        let html = r#"<table><tbody>
            <tr><td>Năm báo cáo</td><td>:</td><td>2022</td></tr>
        </tbody></table>"#;
        assert_eq!(from_detail_fragment(html), Period::Annual { year: 2022 });
    }

    #[test]
    fn detail_fallback_ignores_short_rows() {
        let html = r#"<table><tbody>
            <tr><td>Năm 2024</td></tr>
            <tr><td>Quý</td><td>2</td></tr>
        </tbody></table>"#;
        assert_eq!(from_detail_fragment(html), Period::Unknown);
    }
}
