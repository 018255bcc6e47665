//! Table extractor - service layer
//!
//! Turns one tab's header/body containers into a structured [`Table`].
//! The header table's first row is a grouping/spacer row; the second
//! holds the column labels. Body cells carry their text in a nested
//! `<span>`; cells without one contribute an empty string, and rows
//! yielding no cells at all are dropped.
//!
//! Extraction never fails the caller: any error is logged and an empty
//! table is returned, which downstream treats as "nothing to save".

use std::time::Duration;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::error::{ExtractionError, Result};
use crate::infrastructure::PageDriver;
use crate::models::report::{Table, TableKind};

static HEADER_ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tbody > tr").expect("header row selector"));
static HEADER_CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th").expect("header cell selector"));
static BODY_ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tbody > tr").expect("body row selector"));
static BODY_CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("body cell selector"));
static CELL_TEXT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span").expect("cell text selector"));

/// Extracts one tab's table from the page's current DOM state.
pub async fn extract(driver: &PageDriver, kind: TableKind, wait: Duration) -> Table {
    match try_extract(driver, kind, wait).await {
        Ok(table) => table,
        Err(e) => {
            warn!("⚠️ Failed to extract the {} table: {}", kind.label(), e);
            Table::default()
        }
    }
}

async fn try_extract(driver: &PageDriver, kind: TableKind, wait: Duration) -> Result<Table> {
    let header_html = driver.outer_html(kind.header_id()).await?;
    let columns = parse_headers(&header_html).ok_or_else(|| ExtractionError::HeaderRowMissing {
        id: kind.header_id().to_string(),
    })?;
    if columns.is_empty() {
        return Ok(Table::default());
    }

    // the body re-renders after tab activation; wait for it to settle
    let body_html = driver.wait_for_stable_html(kind.body_id(), wait).await?;
    let rows = parse_rows(&body_html);

    Ok(Table { columns, rows })
}

/// Column labels from the header container: the cells of the second
/// `tbody` row, in order. `None` when that row is absent.
pub(crate) fn parse_headers(html: &str) -> Option<Vec<String>> {
    let fragment = Html::parse_fragment(html);
    let label_row = fragment.select(&HEADER_ROW_SELECTOR).nth(1)?;
    Some(
        label_row
            .select(&HEADER_CELL_SELECTOR)
            .map(|cell| element_text(&cell))
            .collect(),
    )
}

/// Data rows from the body container. Row and header lengths are not
/// reconciled - ragged rows are stored as extracted.
pub(crate) fn parse_rows(html: &str) -> Vec<Vec<String>> {
    let fragment = Html::parse_fragment(html);
    fragment
        .select(&BODY_ROW_SELECTOR)
        .filter_map(|row| {
            let cells: Vec<String> = row
                .select(&BODY_CELL_SELECTOR)
                .map(|cell| {
                    cell.select(&CELL_TEXT_SELECTOR)
                        .next()
                        .map(|span| element_text(&span))
                        .unwrap_or_default()
                })
                .collect();
            if cells.is_empty() {
                None
            } else {
                Some(cells)
            }
        })
        .collect()
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const HEADER_HTML: &str = r#"
        <table id="pt2:t2::ch::t"><tbody>
            <tr><th colspan="3"></th></tr>
            <tr><th>Chỉ tiêu</th><th>Số đầu năm</th><th>Số cuối kỳ</th></tr>
        </tbody></table>
    "#;

    const BODY_HTML: &str = r#"
        <div id="pt2:t2::db"><table><tbody>
            <tr><td><span>Tài sản ngắn hạn</span></td><td><span>100</span></td><td><span>120</span></td></tr>
            <tr><td><span>Tiền</span></td><td></td><td><span>30</span></td></tr>
            <tr></tr>
        </tbody></table></div>
    "#;

    #[test]
    fn header_labels_come_from_second_row() {
        assert_eq!(
            parse_headers(HEADER_HTML),
            Some(vec![
                "Chỉ tiêu".to_string(),
                "Số đầu năm".to_string(),
                "Số cuối kỳ".to_string(),
            ])
        );
    }

    #[test]
    fn missing_label_row_is_none() {
        assert_eq!(parse_headers("<table><tbody><tr><th>only</th></tr></tbody></table>"), None);
        assert_eq!(parse_headers("<div></div>"), None);
    }

    #[test]
    fn rows_without_cells_are_dropped() {
        let rows = parse_rows(BODY_HTML);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["Tài sản ngắn hạn", "100", "120"]);
        // a cell without a nested span contributes an empty string
        assert_eq!(rows[1], vec!["Tiền", "", "30"]);
    }

    #[test]
    fn column_and_row_counts_match_the_markup() {
        let columns = parse_headers(HEADER_HTML).unwrap();
        let rows = parse_rows(BODY_HTML);
        assert_eq!(columns.len(), 3);
        // three markup rows, one of which yields no cells
        assert!(rows.len() <= 3);
    }
}
