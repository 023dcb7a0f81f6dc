use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum EscalaError {
    #[error("unsupported file type '{0}'. Upload a .pdf or .csv roster")]
    UnsupportedFileType(String),

    #[error("uploaded file is empty")]
    EmptyInput,

    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("failed to load roster config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid roster config: {0}")]
    ConfigInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EscalaError {
    /// True for failures caused by the uploaded file itself (HTTP 400 territory).
    ///
    /// Extraction failures are not user errors: a corrupt PDF surfaces as a
    /// server-side failure.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            EscalaError::UnsupportedFileType(_) | EscalaError::EmptyInput
        )
    }
}
