//! Table strategy: employees recognized from the page's cell grid.
//!
//! Day columns are located from the header rows at the top of each table
//! (cells holding 1..=31). Data rows are read left to right: matricula, then
//! the first plausible name, then role and shift hours, while the day columns
//! supply the codes.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::extraction::{PageContent, TableRow};
use crate::model::{Employee, Strategy};
use crate::parsing::lines::{clean_line, find_code_boundary};
use crate::parsing::merge::Roster;
use crate::parsing::sector::SectorState;
use crate::parsing::select::StrategyResult;
use crate::parsing::text::normalize_cell;
use crate::parsing::tokens::{find_matricula, normalize_code, CodeVocabulary};
use crate::parsing::ParseContext;

/// Only this many leading rows are searched for day numbers, so that digits
/// in data rows are never mistaken for a header.
const HEADER_ROWS: usize = 4;

static NAME_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d{4,6})\s+(.+)$").unwrap());

/// Collapse whitespace in every cell and drop rows with no content.
pub fn normalize_table(table: &[TableRow]) -> Vec<TableRow> {
    table
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| normalize_cell(cell.as_deref()))
                .collect::<TableRow>()
        })
        .filter(|row| row.iter().any(Option::is_some))
        .collect()
}

/// Day-of-month a header cell stands for: its digits, read as a number in 1..=31.
fn day_number(cell: &str) -> Option<u8> {
    let digits: String = cell.chars().filter(char::is_ascii_digit).collect();
    let value: u32 = digits.parse().ok()?;
    if (1..=31).contains(&value) {
        Some(value as u8)
    } else {
        None
    }
}

/// Map column index -> day number from the first rows of a normalized table.
/// A later header row overrides an earlier one for the same column.
pub fn detect_day_columns(rows: &[TableRow]) -> BTreeMap<usize, u8> {
    let mut columns = BTreeMap::new();
    for row in rows.iter().take(HEADER_ROWS) {
        for (col, cell) in row.iter().enumerate() {
            if let Some(day) = cell.as_deref().and_then(day_number) {
                columns.insert(col, day);
            }
        }
    }
    columns
}

/// Recognize one normalized row as an employee fragment.
pub fn recognize_row(
    row: &[Option<String>],
    day_columns: &BTreeMap<usize, u8>,
    vocab: &CodeVocabulary,
) -> Option<Employee> {
    let (id_col, matricula) = row
        .iter()
        .enumerate()
        .find_map(|(i, cell)| cell.as_deref().and_then(find_matricula).map(|m| (i, m)))?;

    let (name_col, name) = row.iter().enumerate().skip(id_col + 1).find_map(|(i, cell)| {
        cell.as_deref()
            .and_then(|c| vocab.sanitize_name(c))
            .map(|n| (i, n))
    })?;

    let free_text = |col: usize| {
        row.get(col)
            .and_then(|c| c.as_deref())
            .map(|c| vocab.sanitize_free_text(c))
            .unwrap_or_default()
    };

    let mut employee = Employee::new(matricula, name);
    employee.role = free_text(name_col + 1);
    employee.shift_hours = free_text(name_col + 2);

    for (&col, &day) in day_columns {
        if let Some(code) = row.get(col).and_then(|c| c.as_deref()).and_then(normalize_code) {
            employee.days.insert(day, code);
        }
    }

    Some(employee)
}

/// Page-text fallback: "<id> <name...>" lines yield a name-only fragment.
pub fn recognize_name_line(line: &str, vocab: &CodeVocabulary) -> Option<Employee> {
    let caps = NAME_LINE.captures(line)?;
    let tokens: Vec<&str> = caps[2].split_whitespace().collect();

    let alphabetic = tokens
        .iter()
        .take_while(|t| t.chars().all(char::is_alphabetic))
        .count();
    let end = find_code_boundary(&tokens)
        .unwrap_or(tokens.len())
        .min(alphabetic);

    let name = vocab.sanitize_name(&tokens[..end].join(" "))?;
    Some(Employee::new(&caps[1], name))
}

/// Process one page: table rows first, then the text fallback.
///
/// The page text is a sector unit of its own, so a header printed above the
/// table (outside the grid) still moves the table rows. Both passes start
/// from that state; the text pass sees every sector line on the page, so its
/// final state is the one carried to the next page.
pub fn scan_page(
    page: &PageContent,
    state: SectorState,
    ctx: &ParseContext,
    roster: &mut Roster,
) -> SectorState {
    let (state, _) = state.observe(&ctx.sectors, &page.text);
    let rows = normalize_table(&page.table);
    let day_columns = detect_day_columns(&rows);

    let mut table_state = state;
    for row in &rows {
        let joined = row
            .iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        let (next, is_marker) = table_state.observe(&ctx.sectors, &joined);
        table_state = next;
        if is_marker {
            continue;
        }
        if let Some(employee) = recognize_row(row, &day_columns, &ctx.vocab) {
            roster.add(table_state.current(), employee);
        }
    }

    page.text.lines().fold(state, |state, raw| {
        let line = clean_line(raw);
        if line.is_empty() {
            return state;
        }
        let (state, is_marker) = state.observe(&ctx.sectors, &line);
        if is_marker || ctx.is_header_line(&line) {
            return state;
        }
        if let Some(employee) = recognize_name_line(&line, &ctx.vocab) {
            roster.add(state.current(), employee);
        }
        state
    })
}

/// Run the table strategy over every page, in page order.
pub fn run(pages: &[PageContent], ctx: &ParseContext) -> StrategyResult {
    let mut roster = Roster::new(ctx.sectors.names());
    let mut state = SectorState::initial();
    for page in pages {
        state = scan_page(page, state, ctx, &mut roster);
    }
    StrategyResult::from_roster(Strategy::Table, roster)
}
