//! Line strategy: employees recognized from token sequences in text lines.
//!
//! A roster line looks like
//!
//! ```text
//! 1001 MARIA DA SILVA P T M N L F P T Enfermeiro 12:00 as 18:00
//! ^id  ^name          ^day codes 1..8  ^role      ^shift hours
//! ```
//!
//! Names and codes share an alphabet ("MOTA" is a valid long code), so the
//! name/code boundary is found by looking for a dense window of codes rather
//! than the first code-looking token.

use regex::Regex;
use std::sync::LazyLock;

use crate::extraction::csv_text::EMPTY_FIELD;
use crate::extraction::PageContent;
use crate::model::{Employee, Strategy};
use crate::parsing::merge::Roster;
use crate::parsing::sector::SectorState;
use crate::parsing::select::StrategyResult;
use crate::parsing::text::collapse_whitespace;
use crate::parsing::tokens::{
    classify_token, is_shift_code_token, is_valid_code, CodeVocabulary, TokenKind,
};
use crate::parsing::ParseContext;

static EMPLOYEE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4,6})\s+(.+)$").unwrap());

/// Fewest tokens after the id for a line to hold a name, codes and a tail.
const MIN_TOKENS: usize = 8;
/// The name has at least this many tokens.
const MIN_NAME_TOKENS: usize = 2;
const WINDOW: usize = 10;
const MIN_WINDOW: usize = 6;
const MIN_CODES_IN_WINDOW: usize = 6;
const MAX_DAYS: usize = 31;

/// Strip surrounding quotes (CSV artifact) and collapse whitespace.
pub fn clean_line(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches(|c: char| c == '"' || c == '\'');
    collapse_whitespace(trimmed)
}

/// Index of the first token of the day-code run, if any.
///
/// Position `i` qualifies when `tokens[i]` is a code and at least 6 of the
/// (up to 10) tokens starting at `i` are codes.
pub fn find_code_boundary(tokens: &[&str]) -> Option<usize> {
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| classify_token(t)).collect();
    (MIN_NAME_TOKENS..kinds.len()).find(|&i| {
        let window = &kinds[i..kinds.len().min(i + WINDOW)];
        window.len() >= MIN_WINDOW
            && kinds[i] == TokenKind::Code
            && window.iter().filter(|&&k| k == TokenKind::Code).count() >= MIN_CODES_IN_WINDOW
    })
}

/// Split the tokens after the day run into `(role, shift_hours)`.
///
/// Shift hours start at the first token that looks like a time ("07:00",
/// "12H", "as"/"a" between two times).
pub fn split_tail(tokens: &[&str]) -> (String, String) {
    let start = tokens.iter().position(|t| {
        let upper = t.to_uppercase();
        upper.contains(':') || upper.contains('H') || upper == "A" || upper == "AS"
    });
    match start {
        Some(i) => (tokens[..i].join(" "), tokens[i..].join(" ")),
        None => (tokens.join(" "), String::new()),
    }
}

/// Recognize one cleaned line as an employee fragment.
pub fn recognize_line(line: &str, vocab: &CodeVocabulary) -> Option<Employee> {
    let caps = EMPLOYEE_LINE.captures(line)?;
    let matricula = caps[1].to_string();
    let tokens: Vec<&str> = caps[2].split_whitespace().collect();
    if tokens.len() < MIN_TOKENS {
        return None;
    }

    let boundary = find_code_boundary(&tokens)?;
    let name = vocab.sanitize_name(&tokens[..boundary].join(" "))?;

    let run: Vec<&str> = tokens[boundary..]
        .iter()
        .copied()
        .take_while(|t| is_shift_code_token(t) || *t == EMPTY_FIELD)
        .take(MAX_DAYS)
        .collect();

    let mut employee = Employee::new(matricula, name);
    for (offset, code) in run.iter().enumerate() {
        // Blank cells and five-letter codes keep their day slot but fall
        // outside the stored grammar.
        if is_valid_code(code) {
            employee.days.insert(offset as u8 + 1, code.to_string());
        }
    }

    let (role, shift_hours) = split_tail(&tokens[boundary + run.len()..]);
    employee.role = role;
    employee.shift_hours = shift_hours;
    Some(employee)
}

/// Scan text lines, feeding sector markers and employee fragments.
///
/// Takes the sector state in and hands the final one back.
pub fn scan_lines<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    state: SectorState,
    ctx: &ParseContext,
    roster: &mut Roster,
) -> SectorState {
    lines.into_iter().fold(state, |state, raw| {
        let line = clean_line(raw);
        if line.is_empty() {
            return state;
        }

        let (state, is_marker) = state.observe(&ctx.sectors, &line);
        if is_marker || ctx.is_header_line(&line) {
            return state;
        }

        if let Some(employee) = recognize_line(&line, &ctx.vocab) {
            roster.add(state.current(), employee);
        }
        state
    })
}

/// Run the line strategy over every page's text, in page order.
pub fn run(pages: &[PageContent], ctx: &ParseContext) -> StrategyResult {
    let mut roster = Roster::new(ctx.sectors.names());
    let mut state = SectorState::initial();
    for page in pages {
        state = scan_lines(page.text.lines(), state, ctx, &mut roster);
    }
    StrategyResult::from_roster(Strategy::Line, roster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::builtin::default_config;

    fn ctx() -> ParseContext {
        ParseContext::new(&default_config().unwrap())
    }

    fn tokens(s: &str) -> Vec<&str> {
        s.split_whitespace().collect()
    }

    #[test]
    fn test_clean_line() {
        assert_eq!(clean_line("\"1001   MARIA  DA SILVA\"  "), "1001 MARIA DA SILVA");
        assert_eq!(clean_line("'CTI / UCO (Diurno)'"), "CTI / UCO (Diurno)");
    }

    #[test]
    fn test_boundary_after_name() {
        let t = tokens("MARIA DA SILVA P T M N L F P T Enfermeiro 12:00 as 18:00");
        assert_eq!(find_code_boundary(&t), Some(3));
    }

    #[test]
    fn test_boundary_needs_dense_window() {
        let t = tokens("MARIA DA SILVA P T Enfermeiro chefe de plantao noturno 12:00");
        assert_eq!(find_code_boundary(&t), None);
    }

    #[test]
    fn test_boundary_needs_six_tokens_left() {
        let t = tokens("MARIA DA SILVA P T M N L");
        assert_eq!(find_code_boundary(&t), None);
    }

    #[test]
    fn test_boundary_never_before_second_token() {
        let t = tokens("P T M N L F P T");
        assert_eq!(find_code_boundary(&t), Some(2));
    }

    #[test]
    fn test_split_tail() {
        assert_eq!(
            split_tail(&tokens("Enfermeiro 12:00 as 18:00")),
            ("Enfermeiro".to_string(), "12:00 as 18:00".to_string())
        );
        assert_eq!(
            split_tail(&tokens("Tecnico de enfermagem 12h")),
            ("Tecnico de enfermagem".to_string(), "12h".to_string())
        );
        assert_eq!(
            split_tail(&tokens("Auxiliar administrativo")),
            ("Auxiliar administrativo".to_string(), String::new())
        );
        assert_eq!(split_tail(&[]), (String::new(), String::new()));
    }

    #[test]
    fn test_recognize_full_line() {
        let ctx = ctx();
        let e = recognize_line(
            "1001 MARIA DA SILVA P T M N L F P T Enfermeiro 12:00 as 18:00",
            &ctx.vocab,
        )
        .unwrap();
        assert_eq!(e.matricula, "1001");
        assert_eq!(e.name, "MARIA DA SILVA");
        assert_eq!(e.role, "Enfermeiro");
        assert_eq!(e.shift_hours, "12:00 as 18:00");
        let days: Vec<(u8, &str)> = e.days.iter().map(|(d, c)| (*d, c.as_str())).collect();
        assert_eq!(
            days,
            vec![(1, "P"), (2, "T"), (3, "M"), (4, "N"), (5, "L"), (6, "F"), (7, "P"), (8, "T")]
        );
    }

    #[test]
    fn test_five_letter_code_keeps_day_slot() {
        let ctx = ctx();
        let e = recognize_line("1003 ANA LUCIA P T PLANT N L F P M", &ctx.vocab).unwrap();
        assert_eq!(e.days.get(&2).map(String::as_str), Some("T"));
        assert!(!e.days.contains_key(&3));
        assert_eq!(e.days.get(&4).map(String::as_str), Some("N"));
        assert_eq!(e.days.len(), 7);
    }

    #[test]
    fn test_blank_cell_keeps_later_days_in_place() {
        let ctx = ctx();
        let e = recognize_line("4001 CARLOS LIMA P - T T M M N N Auxiliar 12h", &ctx.vocab).unwrap();
        let days: Vec<(u8, &str)> = e.days.iter().map(|(d, c)| (*d, c.as_str())).collect();
        assert_eq!(
            days,
            vec![(1, "P"), (3, "T"), (4, "T"), (5, "M"), (6, "M"), (7, "N"), (8, "N")]
        );
        assert_eq!(e.role, "Auxiliar");
        assert_eq!(e.shift_hours, "12h");
    }

    #[test]
    fn test_day_run_capped_at_31() {
        let ctx = ctx();
        let codes = vec!["P"; 33].join(" ");
        let line = format!("1004 CARLOS SOUZA {codes}");
        let e = recognize_line(&line, &ctx.vocab).unwrap();
        assert_eq!(e.days.len(), 31);
        assert_eq!(e.days.keys().max(), Some(&31));
        assert_eq!(e.role, "P P");
    }

    #[test]
    fn test_short_line_rejected() {
        let ctx = ctx();
        assert!(recognize_line("1001 MARIA DA SILVA P T", &ctx.vocab).is_none());
    }

    #[test]
    fn test_implausible_name_rejected() {
        let ctx = ctx();
        assert!(recognize_line("1001 X Y P T M N L F P T", &ctx.vocab).is_none());
    }

    #[test]
    fn test_scan_lines_sticky_sector() {
        let ctx = ctx();
        let mut roster = Roster::new(ctx.sectors.names());
        let lines = [
            "CTI / UCO (Diurno)",
            "MATRICULA NOME 1 2 3 4 5 6 7 8",
            "1002 JOAO PEREIRA M M T T N N P P Tecnico 07:00 as 19:00",
        ];
        let end = scan_lines(lines, SectorState::initial(), &ctx, &mut roster);
        assert_eq!(end.current(), 2);

        let (sectors, _) = roster.into_sectors();
        assert!(sectors[0].employees.is_empty());
        assert_eq!(sectors[2].employees.len(), 1);
        assert_eq!(sectors[2].employees[0].name, "JOAO PEREIRA");
    }
}
