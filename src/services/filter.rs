//! Report filter - service layer
//!
//! Parent-company-only reports ("công ty mẹ", "riêng") are excluded from
//! processing. The same keyword set is checked against two text sources:
//! the listing title when enumerating, and the opened report's heading,
//! which is the authoritative signal - a report can pass the title check
//! and still be skipped once its heading is inspected.

/// Markers of parent-company-only reports. Matched as raw substrings,
/// diacritics intact.
const EXCLUDE_KEYWORDS: [&str; 3] = ["Mẹ", "mẹ", "Riêng"];

/// True when the title or heading contains any exclusion keyword.
pub fn should_skip(text: &str) -> bool {
    EXCLUDE_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excludes_parent_company_markers() {
        assert!(should_skip("Báo cáo tài chính Quý 2/2024 của Công ty Mẹ"));
        assert!(should_skip("Báo cáo công ty mẹ năm 2023"));
        assert!(should_skip("Báo cáo tài chính Riêng bán niên 2023"));
    }

    #[test]
    fn keeps_consolidated_reports() {
        assert!(!should_skip("Báo cáo tài chính hợp nhất Quý 2/2024"));
        assert!(!should_skip(""));
    }

    #[test]
    fn exclusion_is_independent_of_period_classification() {
        // a perfectly classifiable title is still excluded
        let title = "Báo cáo tài chính bán niên 2023 - Công ty Mẹ";
        assert!(should_skip(title));
    }
}
