use std::time::Duration;

use crate::probe::WorkerSizing;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// DOCTYPE declarations sit at the start of a document.
pub const DEFAULT_VERSION_PREFIX: usize = 2048;

pub const DEFAULT_MAX_REDIRECTS: usize = 5;

pub const DEFAULT_USER_AGENT: &str = concat!("pagescan/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub fetch_timeout: Duration,
    pub probe_timeout: Duration,
    pub version_prefix: usize,
    pub max_redirects: usize,
    pub user_agent: String,
    pub worker_sizing: WorkerSizing,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            version_prefix: DEFAULT_VERSION_PREFIX,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            worker_sizing: WorkerSizing::default(),
        }
    }
}
