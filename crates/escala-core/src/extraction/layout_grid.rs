use crate::extraction::TableRow;

/// Reconstruct a table grid from `pdftotext -layout` output.
///
/// pdftotext -layout preserves column alignment using spaces, so runs of two
/// or more spaces are treated as cell boundaries. Every non-blank line becomes
/// one row; single spaces stay inside a cell ("MARIA DA SILVA").
pub fn layout_to_grid(text: &str) -> Vec<TableRow> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|line| {
            split_by_whitespace_gaps(line)
                .into_iter()
                .map(|cell| Some(cell.to_string()))
                .collect()
        })
        .collect()
}

/// Split a line by gaps of 2+ whitespace characters.
pub fn split_by_whitespace_gaps(line: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = None;
    let mut end = 0;
    let mut space_count = 0;

    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            space_count += 1;
            if space_count == 2 {
                if let Some(s) = start.take() {
                    segments.push(&line[s..end]);
                }
            }
        } else {
            if start.is_none() {
                start = Some(i);
            }
            space_count = 0;
            end = i + c.len_utf8();
        }
    }

    if let Some(s) = start {
        segments.push(&line[s..end]);
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_by_whitespace_gaps() {
        let segments = split_by_whitespace_gaps("1001   MARIA DA SILVA   Enfermeiro   P  T");
        assert_eq!(
            segments,
            vec!["1001", "MARIA DA SILVA", "Enfermeiro", "P", "T"]
        );
    }

    #[test]
    fn test_split_keeps_accented_text() {
        let segments = split_by_whitespace_gaps("  JOÃO ESTÊVÃO    Técnico ");
        assert_eq!(segments, vec!["JOÃO ESTÊVÃO", "Técnico"]);
    }

    #[test]
    fn test_split_tab_counts_as_gap_with_space() {
        let segments = split_by_whitespace_gaps("1001 \tMARIA");
        assert_eq!(segments, vec!["1001", "MARIA"]);
    }

    #[test]
    fn test_layout_to_grid_skips_blank_lines() {
        let text = "Matrícula   Nome            01   02\n\n   \n1001        MARIA DA SILVA  P    T\n";
        let grid = layout_to_grid(text);
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[1][0].as_deref(), Some("1001"));
        assert_eq!(grid[1][1].as_deref(), Some("MARIA DA SILVA"));
        assert_eq!(grid[1][3].as_deref(), Some("T"));
    }
}
