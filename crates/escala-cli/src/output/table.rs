use escala_core::model::{ParseDiagnostics, ParsedSchedule, Sector};
use std::fmt;

/// Human-readable roster: one block per sector, one row per employee with
/// a column per day of the month that has any code.
pub struct ScheduleTable<'a>(pub &'a ParsedSchedule);

impl fmt::Display for ScheduleTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schedule = self.0;
        let meta = &schedule.metadata;
        writeln!(
            f,
            "Escala {} {} ({})\n",
            meta.month_name, meta.year, meta.source_filename
        )?;

        for sector in &schedule.sectors {
            fmt_sector(f, sector)?;
        }

        write!(
            f,
            "{} employee(s), {} day assignment(s)",
            schedule.employee_count(),
            schedule.day_assignments()
        )
    }
}

fn fmt_sector(f: &mut fmt::Formatter<'_>, sector: &Sector) -> fmt::Result {
    writeln!(
        f,
        "=== {} ({} employee(s)) ===\n",
        sector.name,
        sector.employees.len()
    )?;
    if sector.employees.is_empty() {
        return Ok(());
    }

    let last_day = sector
        .employees
        .iter()
        .filter_map(|e| e.days.keys().next_back().copied())
        .max()
        .unwrap_or(0);
    let name_width = sector
        .employees
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    write!(f, "  {:<6}  {:<name_width$}", "Matr.", "Nome")?;
    for day in 1..=last_day {
        write!(f, " {:>3}", day)?;
    }
    writeln!(f, "  Cargo / Horário")?;

    for e in &sector.employees {
        write!(f, "  {:<6}  {:<name_width$}", e.matricula, e.name)?;
        for day in 1..=last_day {
            let code = e.days.get(&day).map(String::as_str).unwrap_or("-");
            write!(f, " {:>3}", code)?;
        }
        let details = [e.role.as_str(), e.shift_hours.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" / ");
        writeln!(f, "  {}", details)?;
    }
    writeln!(f)
}

/// Strategy scores and merge conflicts, printed under the roster.
pub struct DiagnosticsTable<'a>(pub &'a ParseDiagnostics);

impl fmt::Display for DiagnosticsTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diagnostics = self.0;
        writeln!(
            f,
            "Diagnostics: {} ({} page(s)), selected {} strategy",
            diagnostics.file_kind, diagnostics.page_count, diagnostics.selected
        )?;
        for s in &diagnostics.scores {
            writeln!(
                f,
                "  {:<5}  score {:>5}  ({} employee(s), {} day(s))",
                s.strategy, s.score, s.employees, s.day_assignments
            )?;
        }
        if !diagnostics.conflicts.is_empty() {
            writeln!(f, "  Day codes overwritten while merging:")?;
            for c in &diagnostics.conflicts {
                writeln!(
                    f,
                    "    {} [{}] day {}: {} -> {}",
                    c.matricula, c.sector, c.day, c.previous, c.incoming
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use escala_core::model::{
        DayConflict, Employee, FileKind, ScheduleMetadata, Strategy, StrategyScore,
    };
    use std::collections::BTreeMap;

    fn schedule() -> ParsedSchedule {
        let mut maria = Employee::new("1001", "MARIA DA SILVA");
        maria.role = "Enfermeiro".into();
        maria.days.insert(1, "P".into());
        maria.days.insert(3, "***".into());
        ParsedSchedule {
            metadata: ScheduleMetadata {
                month: 3,
                month_name: "MARCO".into(),
                year: 2025,
                source_filename: "escala.pdf".into(),
            },
            sectors: vec![
                Sector {
                    name: "Supervisão / diarista".into(),
                    employees: vec![maria],
                },
                Sector {
                    name: "CTI / UCO (Noturno)".into(),
                    employees: vec![],
                },
            ],
            legend: BTreeMap::new(),
        }
    }

    #[test]
    fn test_format_schedule() {
        let text = ScheduleTable(&schedule()).to_string();
        assert!(text.starts_with("Escala MARCO 2025 (escala.pdf)"));
        assert!(text.contains("=== Supervisão / diarista (1 employee(s)) ==="));
        assert!(text.contains("=== CTI / UCO (Noturno) (0 employee(s)) ==="));
        let row = text.lines().find(|l| l.contains("1001")).unwrap();
        assert!(row.contains("   P   - ***  Enfermeiro"));
        assert!(text.ends_with("1 employee(s), 2 day assignment(s)"));
    }

    #[test]
    fn test_format_diagnostics_lists_conflicts() {
        let diagnostics = ParseDiagnostics {
            file_kind: FileKind::Pdf,
            page_count: 2,
            selected: Strategy::Table,
            scores: vec![StrategyScore {
                strategy: Strategy::Table,
                employees: 1,
                day_assignments: 3,
                score: 8,
            }],
            conflicts: vec![DayConflict {
                sector: "CTI / UCO (Diurno)".into(),
                matricula: "1001".into(),
                day: 2,
                previous: "P".into(),
                incoming: "N".into(),
            }],
        };
        let text = DiagnosticsTable(&diagnostics).to_string();
        assert!(text.starts_with("Diagnostics: pdf (2 page(s)), selected table strategy"));
        assert!(text.contains("(1 employee(s), 3 day(s))"));
        assert!(text.contains("    1001 [CTI / UCO (Diurno)] day 2: P -> N"));
    }
}
