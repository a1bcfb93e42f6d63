pub mod analyzer;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod probe;
pub mod result;

pub use analyzer::{Analyzer, TASK_COUNT};
pub use config::AnalyzerConfig;
pub use error::{AnalyzeError, ExtractionError};
pub use probe::WorkerSizing;
pub use result::{AnalysisRequest, AnalysisResult, Link, LinkSummary, LinkType};
pub use tokio_util::sync::CancellationToken;
