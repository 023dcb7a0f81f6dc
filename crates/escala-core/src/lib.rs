pub mod config;
pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;

use config::schema::RosterConfig;
use error::EscalaError;
use extraction::PdfExtractor;
use model::{FileKind, HealthStatus, ParseOutcome};

/// Main API entry point: parse an uploaded roster (PDF or CSV).
///
/// The file kind comes from the filename's extension. Empty uploads are
/// rejected before any extraction work. Documents with no recognizable
/// employees still succeed, with every configured sector present and empty.
pub fn parse_upload(
    filename: &str,
    bytes: &[u8],
    extractor: &dyn PdfExtractor,
    config: &RosterConfig,
) -> Result<ParseOutcome, EscalaError> {
    let kind = FileKind::from_filename(filename)?;
    if bytes.is_empty() {
        return Err(EscalaError::EmptyInput);
    }

    let pages = extraction::extract_document(kind, bytes, extractor)?;
    Ok(parsing::parse_document(kind, &pages, config, filename))
}

/// Liveness payload for a service wrapping this crate.
pub fn health() -> HealthStatus {
    HealthStatus {
        status: "ok".to_string(),
    }
}
