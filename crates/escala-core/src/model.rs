use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::EscalaError;

/// Kind of uploaded roster, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Pdf,
    Csv,
}

impl FileKind {
    /// Resolve the kind from a filename, case-insensitively.
    pub fn from_filename(filename: &str) -> Result<FileKind, EscalaError> {
        let lower = filename.trim().to_lowercase();
        if lower.ends_with(".pdf") {
            Ok(FileKind::Pdf)
        } else if lower.ends_with(".csv") {
            Ok(FileKind::Csv)
        } else {
            Err(EscalaError::UnsupportedFileType(filename.to_string()))
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Pdf => write!(f, "pdf"),
            FileKind::Csv => write!(f, "csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    pub month: u32,
    pub month_name: String,
    pub year: i32,
    pub source_filename: String,
}

/// One employee's row in the roster.
///
/// `days` maps day-of-month (1..=31) to a shift code. serde_json writes the
/// integer keys as strings, giving `{"1": "P"}` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub matricula: String,
    pub name: String,
    pub role: String,
    pub shift_hours: String,
    pub days: BTreeMap<u8, String>,
}

impl Employee {
    pub fn new(matricula: impl Into<String>, name: impl Into<String>) -> Self {
        Employee {
            matricula: matricula.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub name: String,
    pub employees: Vec<Employee>,
}

impl Sector {
    pub fn day_assignments(&self) -> usize {
        self.employees.iter().map(|e| e.days.len()).sum()
    }
}

/// The response body: metadata, sectors in canonical order, and the legend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedSchedule {
    pub metadata: ScheduleMetadata,
    pub sectors: Vec<Sector>,
    pub legend: BTreeMap<String, String>,
}

impl ParsedSchedule {
    pub fn employee_count(&self) -> usize {
        self.sectors.iter().map(|s| s.employees.len()).sum()
    }

    pub fn day_assignments(&self) -> usize {
        self.sectors.iter().map(Sector::day_assignments).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Line,
    Table,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Line => write!(f, "line"),
            Strategy::Table => write!(f, "table"),
        }
    }
}

/// A day code that was overwritten while merging two fragments of the same employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayConflict {
    pub sector: String,
    pub matricula: String,
    pub day: u8,
    pub previous: String,
    pub incoming: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyScore {
    pub strategy: Strategy,
    pub employees: usize,
    pub day_assignments: usize,
    pub score: usize,
}

/// How the final result was chosen. Not part of the response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseDiagnostics {
    pub file_kind: FileKind,
    pub page_count: usize,
    pub selected: Strategy,
    pub scores: Vec<StrategyScore>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<DayConflict>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseOutcome {
    pub schedule: ParsedSchedule,
    pub diagnostics: ParseDiagnostics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kind_from_filename() {
        assert_eq!(FileKind::from_filename("escala.pdf").unwrap(), FileKind::Pdf);
        assert_eq!(FileKind::from_filename("ESCALA.PDF").unwrap(), FileKind::Pdf);
        assert_eq!(FileKind::from_filename("export.Csv").unwrap(), FileKind::Csv);
    }

    #[test]
    fn test_file_kind_rejects_other_extensions() {
        assert!(matches!(
            FileKind::from_filename("escala.xlsx"),
            Err(EscalaError::UnsupportedFileType(_))
        ));
        assert!(FileKind::from_filename("pdf").is_err());
        assert!(FileKind::from_filename("").is_err());
    }

    #[test]
    fn test_days_serialize_with_string_keys() {
        let mut e = Employee::new("1001", "MARIA DA SILVA");
        e.days.insert(1, "P".into());
        e.days.insert(12, "N".into());
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["days"]["1"], "P");
        assert_eq!(json["days"]["12"], "N");
    }
}
