pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    AnalyzeOptions, ReportFormat, build_analyzer, execute_analysis, generate_report,
    generate_text_report,
};
