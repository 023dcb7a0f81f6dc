pub mod csv_text;
pub mod layout_grid;
pub mod pdftotext;

use crate::error::EscalaError;
use crate::model::FileKind;
use tracing::debug;

/// A row of table cells; `None` marks a cell the backend saw as empty.
pub type TableRow = Vec<Option<String>>;

/// Content extracted from a single page of a roster document.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub page_number: usize,
    pub text: String,
    /// Table cell grid. Empty when the page has no detectable table.
    pub table: Vec<TableRow>,
}

impl PageContent {
    pub fn text_only(page_number: usize, text: impl Into<String>) -> Self {
        PageContent {
            page_number,
            text: text.into(),
            table: Vec::new(),
        }
    }
}

/// Trait for PDF text+table extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, EscalaError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Turn raw upload bytes into pages.
///
/// PDF extraction errors are returned as-is; CSV decoding cannot fail.
pub fn extract_document(
    kind: FileKind,
    bytes: &[u8],
    extractor: &dyn PdfExtractor,
) -> Result<Vec<PageContent>, EscalaError> {
    let pages = match kind {
        FileKind::Pdf => extractor.extract_pages(bytes)?,
        FileKind::Csv => {
            let text = csv_text::decode_csv(bytes);
            vec![PageContent::text_only(1, csv_text::flatten_records(&text))]
        }
    };
    debug!(
        kind = %kind,
        backend = extractor.backend_name(),
        pages = pages.len(),
        "extracted document"
    );
    Ok(pages)
}
