use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Remove diacritics: "Supervisão" -> "Supervisao", "MARÇO" -> "MARCO".
pub fn strip_diacritics(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Comparison key for free text: no diacritics, uppercase, single spaces.
pub fn normalize_key(s: &str) -> String {
    collapse_whitespace(&strip_diacritics(s).to_uppercase())
}

/// Comparison key for sector headers.
///
/// Like [`normalize_key`] but punctuation is dropped as well, so
/// "Unidades 1, 2 e 5" still matches after a CSV export split it on the comma.
pub fn sector_key(s: &str) -> String {
    let upper = strip_diacritics(s).to_uppercase();
    upper
        .split(|c: char| !c.is_alphanumeric() && c != '*')
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a table cell: collapse whitespace, blank cells become `None`.
pub fn normalize_cell(cell: Option<&str>) -> Option<String> {
    let collapsed = collapse_whitespace(cell?);
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}
