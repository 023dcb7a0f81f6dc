use escala_core::error::EscalaError;
use escala_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;
use tracing::debug;

use crate::commands::resolve_config;
use crate::output;
use crate::output::table::{DiagnosticsTable, ScheduleTable};
use crate::OutputFormat;

pub fn run(
    input_file: PathBuf,
    output_format: OutputFormat,
    output_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
    diagnostics: bool,
) -> Result<(), EscalaError> {
    let config = resolve_config(config_file.as_deref())?;
    let bytes = std::fs::read(&input_file)?;
    let filename = input_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let extractor = PdftotextExtractor::new();
    debug!(file = %input_file.display(), config = %config.name, "parsing roster");
    let outcome = escala_core::parse_upload(&filename, &bytes, &extractor, &config)?;

    let output_str = match output_format {
        OutputFormat::Json => output::json::render(&outcome, diagnostics)?,
        OutputFormat::Table => {
            let mut s = ScheduleTable(&outcome.schedule).to_string();
            if diagnostics {
                s.push('\n');
                s.push_str(&DiagnosticsTable(&outcome.diagnostics).to_string());
            }
            s
        }
    };

    match output_file {
        Some(path) => {
            // Files always get JSON.
            let json = output::json::render(&outcome, diagnostics)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Parsed {} employee(s) in {} sector(s), written to {}",
                outcome.schedule.employee_count(),
                outcome.schedule.sectors.len(),
                path.display()
            );
            if !outcome.diagnostics.conflicts.is_empty() {
                eprintln!(
                    "  {} day code(s) overwritten while merging",
                    outcome.diagnostics.conflicts.len()
                );
            }
        }
        None => {
            println!("{output_str}");
        }
    }

    Ok(())
}
