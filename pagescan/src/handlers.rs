use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use pagescan_analyzer::{
    AnalysisRequest, AnalysisResult, AnalyzeError, Analyzer, AnalyzerConfig, CancellationToken,
    WorkerSizing,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format '{}'", other)),
        }
    }
}

/// Options for a single `analyze` run
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub url: String,
    pub format: ReportFormat,
    pub fetch_timeout: Duration,
    pub probe_timeout: Duration,
    pub max_probe_workers: Option<usize>,
    pub show_progress: bool,
}

impl AnalyzeOptions {
    pub fn new(url: impl Into<String>) -> Self {
        let defaults = AnalyzerConfig::default();
        Self {
            url: url.into(),
            format: ReportFormat::Text,
            fetch_timeout: defaults.fetch_timeout,
            probe_timeout: defaults.probe_timeout,
            max_probe_workers: None,
            show_progress: false,
        }
    }
}

pub fn print_banner() {
    eprintln!("{}", "pagescan".bright_cyan().bold());
    eprintln!("{}", format!("v{} - single page HTML analyzer", env!("CARGO_PKG_VERSION")).dimmed());
    eprintln!();
}

/// Installs the stderr log subscriber. `verbosity` is the number of `-v` flags.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn worker_sizing(max_probe_workers: Option<usize>) -> WorkerSizing {
    match max_probe_workers {
        Some(cap) => WorkerSizing::Capped(cap.max(1)),
        None => WorkerSizing::SqrtScaled,
    }
}

pub fn build_analyzer(options: &AnalyzeOptions) -> Result<Analyzer, AnalyzeError> {
    let config = AnalyzerConfig {
        fetch_timeout: options.fetch_timeout,
        probe_timeout: options.probe_timeout,
        worker_sizing: worker_sizing(options.max_probe_workers),
        ..AnalyzerConfig::default()
    };
    Analyzer::with_config(config)
}

/// Runs the analysis, showing a spinner while it is in flight if requested.
pub async fn execute_analysis(
    options: &AnalyzeOptions,
    cancel: &CancellationToken,
) -> Result<AnalysisResult, AnalyzeError> {
    let analyzer = build_analyzer(options)?;

    let spinner = if options.show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Analyzing {}", options.url));
        Some(pb)
    } else {
        None
    };

    let result = analyzer
        .analyze(&AnalysisRequest::new(options.url.clone()), cancel)
        .await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    result
}

pub fn generate_report(
    result: &AnalysisResult,
    url: &str,
    format: ReportFormat,
) -> anyhow::Result<String> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        ReportFormat::Text => Ok(generate_text_report(result, url)),
    }
}

pub fn generate_text_report(result: &AnalysisResult, url: &str) -> String {
    let divider = "━".repeat(52);
    let mut report = String::new();

    report.push_str(&format!("{}\n\n", divider));
    report.push_str(&format!("# Page: {}\n", url.bright_white().bold()));

    let version = if result.html_version.is_empty() {
        "n/a".dimmed().to_string()
    } else {
        result.html_version.clone()
    };
    report.push_str(&format!("  HTML version: {}\n", version));
    report.push_str(&format!("  Title: {}\n", result.title));

    let login = if result.has_login_form {
        "yes".green().to_string()
    } else {
        "no".to_string()
    };
    report.push_str(&format!("  Login form: {}\n", login));

    report.push_str("\n# Headings:\n");
    if result.headings.is_empty() {
        report.push_str("  (none)\n");
    }
    for (tag, count) in &result.headings {
        report.push_str(&format!("  {}: {}\n", tag, count));
    }

    report.push_str("\n# Links:\n");
    match &result.link_summary {
        Some(summary) => {
            report.push_str(&format!(
                "  Total: {}  Internal: {}  External: {}\n",
                summary.links.len(),
                summary.internal,
                summary.external
            ));
            report.push_str(&format!(
                "  Accessible: {}  Inaccessible: {}\n\n",
                summary.accessible.to_string().green(),
                summary.inaccessible.to_string().red()
            ));

            for link in &summary.links {
                let status = if link.accessible {
                    "✓".green()
                } else {
                    "✗".red()
                };
                let kind = if link.is_internal() { "internal" } else { "external" };
                report.push_str(&format!("  {} {:<8} {}\n", status, kind, link.url));
            }
        }
        None => report.push_str("  (none)\n"),
    }

    if !result.errors.is_empty() {
        report.push_str("\n# Errors:\n");
        for error in &result.errors {
            report.push_str(&format!("  {} {}\n", "!".yellow().bold(), error));
        }
    }

    report.push_str(&format!("\n{}\n", divider));
    report
}
