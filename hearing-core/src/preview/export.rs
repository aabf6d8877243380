use std::sync::LazyLock;

use regex::Regex;

const FALLBACK_NAME: &str = "Hearing_Aid_Report";

static UNSAFE_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\\/:*?"<>|]"#).unwrap_or_else(|e| panic!("invalid filename pattern: {e}"))
});
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").unwrap_or_else(|e| panic!("invalid whitespace pattern: {e}"))
});

/// Suggested PDF file name for a report, derived from the identification
/// number.
///
/// # Examples
///
/// ```
/// use hearing_core::preview::export_filename;
///
/// assert_eq!(export_filename(" 12/34 AB "), "1234_AB.pdf");
/// assert_eq!(export_filename(""), "Hearing_Aid_Report.pdf");
/// ```
pub fn export_filename(identification: &str) -> String {
    let stripped = UNSAFE_CHARS.replace_all(identification.trim(), "");
    let stem = WHITESPACE.replace_all(&stripped, "_");
    if stem.is_empty() {
        format!("{FALLBACK_NAME}.pdf")
    } else {
        format!("{stem}.pdf")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn strips_every_unsafe_character() {
        assert_eq!(export_filename(r#"a\b/c:d*e?f"g<h>i|j"#), "abcdefghij.pdf");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(export_filename("ECHS  12\t34"), "ECHS_12_34.pdf");
    }

    #[test]
    fn only_unsafe_characters_falls_back() {
        assert_eq!(export_filename(" /// "), "Hearing_Aid_Report.pdf");
    }
}
