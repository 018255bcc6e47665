//! Title normalization - service layer
//!
//! Vietnamese report titles carry diacritics that get in the way of
//! pattern matching ("Quý" vs "Quy"). Classification always runs on the
//! stripped form.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Removes diacritical marks: canonical (NFD) decomposition, then drop
/// the combining marks. Base letters and case are preserved. Idempotent.
pub fn strip_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_vietnamese_diacritics() {
        assert_eq!(
            strip_accents("Báo cáo tài chính bán niên 2023"),
            "Bao cao tai chinh ban nien 2023"
        );
        assert_eq!(strip_accents("Quý 3 năm 2021"), "Quy 3 nam 2021");
        assert_eq!(strip_accents("Mẹ"), "Me");
    }

    #[test]
    fn preserves_case() {
        assert_eq!(strip_accents("BÁN NIÊN"), "BAN NIEN");
    }

    #[test]
    fn idempotent_on_stripped_input() {
        let stripped = strip_accents("Báo cáo tài chính Quý 1/2020");
        assert_eq!(strip_accents(&stripped), stripped);
    }
}
