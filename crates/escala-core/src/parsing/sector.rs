use crate::parsing::text::sector_key;

/// Recognizes the configured sector headers inside a unit of text.
#[derive(Debug, Clone)]
pub struct SectorMatcher {
    names: Vec<String>,
    keys: Vec<String>,
}

impl SectorMatcher {
    pub fn new(names: &[String]) -> Self {
        SectorMatcher {
            names: names.to_vec(),
            keys: names.iter().map(|n| sector_key(n)).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Index of the first sector whose name occurs in `unit`, ignoring
    /// case, diacritics and punctuation. Plain substring containment:
    /// "SUPERVISÃO / DIARISTAS" still names "Supervisão / diarista".
    pub fn find(&self, unit: &str) -> Option<usize> {
        let unit = sector_key(unit);
        self.keys
            .iter()
            .position(|key| !key.is_empty() && unit.contains(key.as_str()))
    }
}

/// The sticky "current sector" while scanning a document.
///
/// A plain value: each scan threads it through and gets a new one back, so
/// two strategies never share it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectorState {
    current: usize,
}

impl SectorState {
    /// Starts at the first configured sector.
    pub fn initial() -> Self {
        SectorState { current: 0 }
    }

    pub fn current(self) -> usize {
        self.current
    }

    /// Feed one unit (line, row text, page text). Returns the next state and whether
    /// the unit was a sector header, which callers then skip.
    pub fn observe(self, matcher: &SectorMatcher, unit: &str) -> (SectorState, bool) {
        match matcher.find(unit) {
            Some(current) => (SectorState { current }, true),
            None => (self, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> SectorMatcher {
        SectorMatcher::new(&[
            "Supervisão / diarista".to_string(),
            "Unidades 1, 2 e 5".to_string(),
            "CTI / UCO (Diurno)".to_string(),
            "CTI / UCO (Noturno)".to_string(),
        ])
    }

    #[test]
    fn test_find_is_case_and_accent_insensitive() {
        let m = matcher();
        assert_eq!(m.find("SUPERVISAO / DIARISTA - JANEIRO"), Some(0));
        assert_eq!(m.find("cti / uco (noturno)"), Some(3));
        assert_eq!(m.find("Setor: Unidades 1, 2 e 5"), Some(1));
        assert_eq!(m.find("Unidades 1 2 e 5"), Some(1));
        assert_eq!(m.find("1001 MARIA DA SILVA P T"), None);
    }

    #[test]
    fn test_find_is_substring_containment() {
        let m = matcher();
        assert_eq!(m.find("SUPERVISÃO / DIARISTAS"), Some(0));
        assert_eq!(m.find("XCTI / UCO (Diurno)"), Some(2));
        assert_eq!(m.find("ESCALA CTI / UCO (Diurno)Janeiro 2026"), Some(2));
    }

    #[test]
    fn test_find_whole_page_text() {
        let m = matcher();
        let page = "ESCALA DE SERVIÇO\nCTI / UCO (Noturno)\nMATRICULA NOME\n3001 PAULO ROBERTO";
        assert_eq!(m.find(page), Some(3));
    }

    #[test]
    fn test_state_is_sticky() {
        let m = matcher();
        let s = SectorState::initial();
        assert_eq!(s.current(), 0);

        let (s, marker) = s.observe(&m, "CTI / UCO (Diurno)");
        assert!(marker);
        assert_eq!(s.current(), 2);

        let (s, marker) = s.observe(&m, "1002 JOAO PEREIRA");
        assert!(!marker);
        assert_eq!(s.current(), 2);
    }

    #[test]
    fn test_fold_over_lines() {
        let m = matcher();
        let lines = ["header", "Unidades 1, 2 e 5", "1001 X", "CTI / UCO (Noturno)", "1002 Y"];
        let end = lines
            .iter()
            .fold(SectorState::initial(), |s, l| s.observe(&m, l).0);
        assert_eq!(end.current(), 3);
    }
}
