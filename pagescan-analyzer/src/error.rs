use thiserror::Error;

/// Failures that abort an analysis before any extractor runs.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Failed to reach URL: HTTP {status}")]
    Unreachable { status: u16 },

    #[error("Invalid response content type: {actual}")]
    InvalidContentType { actual: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Analysis cancelled")]
    Cancelled,
}

/// A single extractor's failure. Recorded into `AnalysisResult::errors`,
/// never fatal for the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("empty HTML snippet")]
    EmptyInput,

    #[error("no links available")]
    NoLinks,

    #[error("{task} cancelled")]
    Cancelled { task: &'static str },

    #[error("{task} task failed: {reason}")]
    Panicked { task: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, AnalyzeError>;
