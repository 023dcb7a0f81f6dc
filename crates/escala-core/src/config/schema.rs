use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Roster layout knowledge that is not derived from the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    pub name: String,
    pub version: String,
    /// Canonical sector names, in output order. The first one is the
    /// sector employees land in before any sector header is seen.
    pub sectors: Vec<String>,
    /// Shift code -> description, attached verbatim to every response.
    pub legend: BTreeMap<String, String>,
    /// Line prefixes (compared after diacritic stripping and uppercasing)
    /// that mark column headers rather than employee rows.
    #[serde(default)]
    pub header_markers: Vec<String>,
    /// Year reported when neither the filename nor the text carries one.
    #[serde(default = "default_year")]
    pub default_year: i32,
}

fn default_year() -> i32 {
    2026
}
