//! Reconciliation of employee fragments.
//!
//! The same employee can be recognized several times: once from a table row,
//! again from the page text, again on a later page. Fragments are merged per
//! sector, keyed by matricula:
//!
//! - `name`, `role`, `shift_hours`: first non-empty value wins.
//! - `days`: the later fragment wins on a conflicting day.
//!
//! Because the day policy silently drops the earlier code, every overwrite
//! that changes a code is recorded as a [`DayConflict`].

use std::collections::HashMap;
use tracing::warn;

use crate::model::{DayConflict, Employee, Sector};

#[derive(Debug, Clone)]
struct SectorBook {
    name: String,
    employees: Vec<Employee>,
    by_matricula: HashMap<String, usize>,
}

/// Per-strategy accumulator of sectors and their employees.
#[derive(Debug, Clone)]
pub struct Roster {
    sectors: Vec<SectorBook>,
    conflicts: Vec<DayConflict>,
}

impl Roster {
    pub fn new(sector_names: &[String]) -> Self {
        Roster {
            sectors: sector_names
                .iter()
                .map(|name| SectorBook {
                    name: name.clone(),
                    employees: Vec::new(),
                    by_matricula: HashMap::new(),
                })
                .collect(),
            conflicts: Vec::new(),
        }
    }

    /// Add a fragment to the sector at `sector`, merging with an existing
    /// record for the same matricula.
    pub fn add(&mut self, sector: usize, fragment: Employee) {
        let Some(book) = self.sectors.get_mut(sector) else {
            return;
        };

        match book.by_matricula.get(&fragment.matricula) {
            Some(&idx) => {
                let existing = &mut book.employees[idx];
                for (day, previous, incoming) in merge_fragment(existing, fragment) {
                    warn!(
                        sector = %book.name,
                        matricula = %existing.matricula,
                        day,
                        %previous,
                        %incoming,
                        "day code overwritten while merging"
                    );
                    self.conflicts.push(DayConflict {
                        sector: book.name.clone(),
                        matricula: existing.matricula.clone(),
                        day,
                        previous,
                        incoming,
                    });
                }
            }
            None => {
                book.by_matricula
                    .insert(fragment.matricula.clone(), book.employees.len());
                book.employees.push(fragment);
            }
        }
    }

    pub fn employee_count(&self) -> usize {
        self.sectors.iter().map(|s| s.employees.len()).sum()
    }

    pub fn day_assignments(&self) -> usize {
        self.sectors
            .iter()
            .flat_map(|s| s.employees.iter())
            .map(|e| e.days.len())
            .sum()
    }

    pub fn conflicts(&self) -> &[DayConflict] {
        &self.conflicts
    }

    /// Finish: sectors in configured order, employees sorted by name
    /// (case-insensitive, stable for equal names).
    pub fn into_sectors(self) -> (Vec<Sector>, Vec<DayConflict>) {
        let sectors = self
            .sectors
            .into_iter()
            .map(|book| {
                let mut employees = book.employees;
                employees.sort_by_cached_key(|e| e.name.to_lowercase());
                Sector {
                    name: book.name,
                    employees,
                }
            })
            .collect();
        (sectors, self.conflicts)
    }
}

/// Merge `incoming` into `existing`. Returns `(day, previous, incoming)` for
/// every day whose code changed.
pub fn merge_fragment(existing: &mut Employee, incoming: Employee) -> Vec<(u8, String, String)> {
    if existing.name.is_empty() {
        existing.name = incoming.name;
    }
    if existing.role.is_empty() {
        existing.role = incoming.role;
    }
    if existing.shift_hours.is_empty() {
        existing.shift_hours = incoming.shift_hours;
    }

    let mut conflicts = Vec::new();
    for (day, code) in incoming.days {
        if let Some(previous) = existing.days.insert(day, code.clone()) {
            if previous != code {
                conflicts.push((day, previous, code));
            }
        }
    }
    conflicts
}
