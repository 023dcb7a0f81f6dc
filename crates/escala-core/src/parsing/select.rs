use tracing::info;

use crate::model::{DayConflict, Sector, Strategy, StrategyScore};
use crate::parsing::merge::Roster;

/// Weight of one recognized employee relative to one day assignment.
const EMPLOYEE_WEIGHT: usize = 5;

/// Finished output of one strategy, with the counts used to score it.
#[derive(Debug, Clone)]
pub struct StrategyResult {
    pub strategy: Strategy,
    pub sectors: Vec<Sector>,
    pub conflicts: Vec<DayConflict>,
    pub employees: usize,
    pub day_assignments: usize,
}

impl StrategyResult {
    pub fn from_roster(strategy: Strategy, roster: Roster) -> Self {
        let employees = roster.employee_count();
        let day_assignments = roster.day_assignments();
        let (sectors, conflicts) = roster.into_sectors();
        StrategyResult {
            strategy,
            sectors,
            conflicts,
            employees,
            day_assignments,
        }
    }

    pub fn score(&self) -> usize {
        self.employees * EMPLOYEE_WEIGHT + self.day_assignments
    }

    pub fn to_score(&self) -> StrategyScore {
        StrategyScore {
            strategy: self.strategy,
            employees: self.employees,
            day_assignments: self.day_assignments,
            score: self.score(),
        }
    }
}

/// Keep the higher-scoring result. Ties go to the line strategy.
pub fn select(line: StrategyResult, table: StrategyResult) -> StrategyResult {
    let (line_score, table_score) = (line.score(), table.score());
    let winner = if line_score >= table_score { line } else { table };
    info!(
        line = line_score,
        table = table_score,
        selected = %winner.strategy,
        "strategy selected"
    );
    winner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Employee;

    fn result(strategy: Strategy, employees: usize, days_each: usize) -> StrategyResult {
        let mut roster = Roster::new(&["Setor".to_string()]);
        for i in 0..employees {
            let mut e = Employee::new(format!("{}", 1000 + i), "ANA PAULA");
            for d in 0..days_each {
                e.days.insert(d as u8 + 1, "P".to_string());
            }
            roster.add(0, e);
        }
        StrategyResult::from_roster(strategy, roster)
    }

    #[test]
    fn test_score_weights_employees() {
        // 10 employees x 3 days -> 50 + 30
        let r = result(Strategy::Table, 10, 3);
        assert_eq!(r.employees, 10);
        assert_eq!(r.day_assignments, 30);
        assert_eq!(r.score(), 80);

        let s = r.to_score();
        assert_eq!(s.strategy, Strategy::Table);
        assert_eq!(s.score, 80);
    }

    #[test]
    fn test_higher_score_wins() {
        // line: 5 employees, 40 days -> 65; table: 6 employees, 10 days -> 40
        let line = result(Strategy::Line, 5, 8);
        assert_eq!(line.score(), 65);
        let mut table = result(Strategy::Table, 6, 0);
        table.day_assignments = 10;
        assert_eq!(table.score(), 40);

        assert_eq!(select(line, table.clone()).strategy, Strategy::Line);
        assert_eq!(select(result(Strategy::Line, 0, 0), table).strategy, Strategy::Table);
    }

    #[test]
    fn test_tie_goes_to_line() {
        let line = result(Strategy::Line, 2, 4);
        let table = result(Strategy::Table, 2, 4);
        assert_eq!(line.score(), table.score());
        assert_eq!(select(line, table).strategy, Strategy::Line);
    }

    #[test]
    fn test_empty_results_select_line() {
        let picked = select(result(Strategy::Line, 0, 0), result(Strategy::Table, 0, 0));
        assert_eq!(picked.strategy, Strategy::Line);
        assert_eq!(picked.score(), 0);
    }
}
