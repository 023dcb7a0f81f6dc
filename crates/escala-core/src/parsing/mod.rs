pub mod lines;
pub mod merge;
pub mod metadata;
pub mod sector;
pub mod select;
pub mod table;
pub mod text;
pub mod tokens;

use tracing::{debug, info};

use crate::config::schema::RosterConfig;
use crate::extraction::PageContent;
use crate::model::{FileKind, ParseDiagnostics, ParseOutcome, ParsedSchedule};
use metadata::parse_metadata;
use sector::SectorMatcher;
use select::{select, StrategyResult};
use text::normalize_key;
use tokens::CodeVocabulary;

/// Everything the strategies need from the configuration, prepared once
/// per document.
#[derive(Debug, Clone)]
pub struct ParseContext {
    pub sectors: SectorMatcher,
    pub vocab: CodeVocabulary,
    header_markers: Vec<String>,
}

impl ParseContext {
    pub fn new(config: &RosterConfig) -> Self {
        ParseContext {
            sectors: SectorMatcher::new(&config.sectors),
            vocab: CodeVocabulary::from_legend(&config.legend),
            header_markers: config.header_markers.iter().map(|m| normalize_key(m)).collect(),
        }
    }

    /// Column-header and footer lines ("MATRICULA NOME 1 2 3 ...", "TOTAL").
    /// A marker must be the whole first word, so "DIARISTA" is not "DIA".
    pub fn is_header_line(&self, line: &str) -> bool {
        let norm = normalize_key(line);
        self.header_markers.iter().any(|marker| {
            norm.strip_prefix(marker.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with(' '))
        })
    }
}

/// Turn extracted pages into a schedule.
///
/// CSV text has no table grid, so only the line strategy runs. PDFs run
/// both strategies over the same pages and keep the higher score.
pub fn parse_document(
    kind: FileKind,
    pages: &[PageContent],
    config: &RosterConfig,
    filename: &str,
) -> ParseOutcome {
    let ctx = ParseContext::new(config);

    let full_text = pages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let metadata = parse_metadata(filename, &full_text, config.default_year);
    debug!(
        pages = pages.len(),
        month = metadata.month,
        year = metadata.year,
        "metadata resolved"
    );

    let line = lines::run(pages, &ctx);
    debug!(employees = line.employees, days = line.day_assignments, "line strategy done");

    let (chosen, scores) = match kind {
        FileKind::Csv => {
            let scores = vec![line.to_score()];
            (line, scores)
        }
        FileKind::Pdf => {
            let table = table::run(pages, &ctx);
            debug!(employees = table.employees, days = table.day_assignments, "table strategy done");
            let scores = vec![line.to_score(), table.to_score()];
            (select(line, table), scores)
        }
    };

    let StrategyResult {
        strategy,
        sectors,
        conflicts,
        employees,
        ..
    } = chosen;
    info!(
        file = filename,
        kind = %kind,
        strategy = %strategy,
        employees,
        "roster parsed"
    );

    ParseOutcome {
        schedule: ParsedSchedule {
            metadata,
            sectors,
            legend: config.legend.clone(),
        },
        diagnostics: ParseDiagnostics {
            file_kind: kind,
            page_count: pages.len(),
            selected: strategy,
            scores,
            conflicts,
        },
    }
}
