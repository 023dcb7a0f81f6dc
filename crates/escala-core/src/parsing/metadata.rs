use regex::Regex;
use std::sync::LazyLock;

use crate::model::ScheduleMetadata;
use crate::parsing::text::strip_diacritics;

/// Portuguese month names after diacritic stripping (MARÇO -> MARCO).
pub const MONTHS: [&str; 12] = [
    "JANEIRO", "FEVEREIRO", "MARCO", "ABRIL", "MAIO", "JUNHO", "JULHO", "AGOSTO", "SETEMBRO",
    "OUTUBRO", "NOVEMBRO", "DEZEMBRO",
];

static MONTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(JANEIRO|FEVEREIRO|MARCO|ABRIL|MAIO|JUNHO|JULHO|AGOSTO|SETEMBRO|OUTUBRO|NOVEMBRO|DEZEMBRO)",
    )
    .unwrap()
});

/// A `20xx` number not embedded in a longer digit run (so matricula 12023 is no year).
static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\D)(20\d{2})(?:\D|$)").unwrap());

/// Derive month/year from the filename and the document text.
///
/// Best effort: the first month name and the first `20xx` number in
/// "filename + text" win; missing values fall back to January and
/// `default_year`.
pub fn parse_metadata(filename: &str, text: &str, default_year: i32) -> ScheduleMetadata {
    let haystack = strip_diacritics(&format!("{filename}\n{text}")).to_uppercase();

    let month_name = MONTH_RE
        .find(&haystack)
        .map(|m| m.as_str())
        .unwrap_or(MONTHS[0]);
    let month = MONTHS
        .iter()
        .position(|m| *m == month_name)
        .map(|i| i as u32 + 1)
        .unwrap_or(1);

    let year = YEAR_RE
        .captures(&haystack)
        .and_then(|caps| caps[1].parse::<i32>().ok())
        .unwrap_or(default_year);

    ScheduleMetadata {
        month,
        month_name: month_name.to_string(),
        year,
        source_filename: filename.to_string(),
    }
}
