//! Token classifiers shared by both parsing strategies.
//!
//! The hard part of a roster line is the boundary between the employee name
//! and the run of day codes; these predicates classify one token at a time.

use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use crate::parsing::text::normalize_key;

static MATRICULA_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4,6}$").unwrap());

/// A 4-6 digit run not glued to further digits.
static MATRICULA_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\D)(\d{4,6})(?:\D|$)").unwrap());

static VALID_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z*]{1,4}$").unwrap());

static SHORT_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z*]{1,3}$").unwrap());

/// Longer shift codes seen in rosters: PLT, TN, MT... 3-5 letters led by P/T/M/F/N.
static LONG_SHIFT_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[PTMFN][A-Z]{2,4}$").unwrap());

const EXACT_SHIFT_CODES: [&str; 10] = ["***", "FE", "LC", "SE", "L", "F", "P", "T", "M", "N"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Employee id (matricula).
    Id,
    /// Day shift code.
    Code,
    /// Anything else: name parts, role, hours.
    Word,
}

pub fn classify_token(token: &str) -> TokenKind {
    if is_matricula(token) {
        TokenKind::Id
    } else if is_shift_code_token(token) {
        TokenKind::Code
    } else {
        TokenKind::Word
    }
}

/// Whole token is a 4-6 digit employee id.
pub fn is_matricula(token: &str) -> bool {
    MATRICULA_TOKEN.is_match(token)
}

/// First 4-6 digit run inside a cell, e.g. "Mat. 10234" -> "10234".
pub fn find_matricula(text: &str) -> Option<String> {
    MATRICULA_RUN
        .captures(text)
        .map(|caps| caps[1].to_string())
}

/// Shift-code grammar used for the day run of a text line. Case-sensitive:
/// "Tarde" in a role column is not a code, "T" is.
pub fn is_shift_code_token(token: &str) -> bool {
    EXACT_SHIFT_CODES.contains(&token) || LONG_SHIFT_CODE.is_match(token)
}

/// Grammar every stored day code satisfies.
pub fn is_valid_code(code: &str) -> bool {
    VALID_CODE.is_match(code)
}

/// Normalize a raw cell or token into a day code: uppercase, spaces removed.
pub fn normalize_code(raw: &str) -> Option<String> {
    let code: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    if is_valid_code(&code) {
        Some(code)
    } else {
        None
    }
}

/// Codes that count as "code-like" when sanitizing free text: the legend
/// codes plus `F` (folga), which rosters use without listing it.
#[derive(Debug, Clone)]
pub struct CodeVocabulary {
    codes: HashSet<String>,
}

impl CodeVocabulary {
    pub fn from_legend(legend: &BTreeMap<String, String>) -> Self {
        let mut codes: HashSet<String> = legend.keys().map(|c| normalize_key(c)).collect();
        codes.insert("F".to_string());
        CodeVocabulary { codes }
    }

    /// Token is a known code or short enough to be one (1-3 letters/asterisks).
    pub fn is_code_like(&self, token: &str) -> bool {
        let norm = normalize_key(token);
        self.codes.contains(&norm) || SHORT_CODE.is_match(&norm)
    }

    /// Heuristic: does this text look like a person's name?
    pub fn is_plausible_name(&self, text: &str) -> bool {
        let norm = normalize_key(text);
        if norm.chars().count() < 6 || norm.chars().any(|c| c.is_ascii_digit()) {
            return false;
        }

        let words: Vec<&str> = norm.split(' ').collect();
        if words.len() < 2 {
            return false;
        }
        if !words.iter().any(|w| w.chars().count() >= 3) {
            return false;
        }

        let single_chars = words.iter().filter(|w| w.chars().count() == 1).count();
        if single_chars * 2 > words.len() {
            return false;
        }

        !words.iter().all(|w| self.is_code_like(w))
    }

    /// Strip trailing code-like tokens, then keep the rest only if it is a
    /// plausible name. "MARIA DA SILVA P T" -> "MARIA DA SILVA".
    pub fn sanitize_name(&self, text: &str) -> Option<String> {
        let mut tokens: Vec<&str> = text.split_whitespace().collect();
        while tokens.last().is_some_and(|t| self.is_code_like(t)) {
            tokens.pop();
        }
        let candidate = tokens.join(" ");
        if self.is_plausible_name(&candidate) {
            Some(candidate)
        } else {
            None
        }
    }

    /// Blank a free-text field (role, hours) made only of code-like tokens.
    pub fn sanitize_free_text(&self, text: &str) -> String {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.is_empty() || tokens.iter().all(|t| self.is_code_like(t)) {
            String::new()
        } else {
            tokens.join(" ")
        }
    }
}
