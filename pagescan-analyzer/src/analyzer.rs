use crate::config::AnalyzerConfig;
use crate::document::Document;
use crate::error::{AnalyzeError, ExtractionError, Result};
use crate::extract::{
    Extractor, HeadingCounter, LinkAnalyzer, LoginFormDetector, Page, TaskContext, TitleExtractor,
    VersionDetector,
};
use crate::fetch::{fetch_page, validate_url};
use crate::probe::WorkerSizing;
use crate::result::{AnalysisRequest, AnalysisResult, TaskMessage};
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};

/// Number of extractors dispatched per request.
pub const TASK_COUNT: usize = 5;

pub struct Analyzer {
    client: Client,
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new() -> Result<Self> {
        Self::with_config(AnalyzerConfig::default())
    }

    pub fn with_config(config: AnalyzerConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .pool_max_idle_per_host(50) // Connection pooling
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    /// Applied per request, so it also bounds connection setup.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.config.fetch_timeout = timeout;
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.config.probe_timeout = timeout;
        self
    }

    pub fn with_worker_sizing(mut self, sizing: WorkerSizing) -> Self {
        self.config.worker_sizing = sizing;
        self
    }

    pub fn with_version_prefix(mut self, bytes: usize) -> Self {
        self.config.version_prefix = bytes;
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Fetches, parses and analyzes one page.
    ///
    /// Errors before the extractors are dispatched are returned as `Err`.
    /// After that the call always yields a result, with extractor failures
    /// listed in `AnalysisResult::errors`.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
        cancel: &CancellationToken,
    ) -> Result<AnalysisResult> {
        let span = info_span!("analyze", url = %request.url);
        self.run(request, cancel, span.clone()).instrument(span).await
    }

    async fn run(
        &self,
        request: &AnalysisRequest,
        cancel: &CancellationToken,
        span: tracing::Span,
    ) -> Result<AnalysisResult> {
        // Spawned tasks outlive this future, so dropping it must cancel them too.
        let cancel = cancel.child_token();
        let _guard = cancel.clone().drop_guard();

        let started = Instant::now();
        let url = validate_url(&request.url)?;

        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(AnalyzeError::Cancelled),
            body = fetch_page(&self.client, &url, self.config.fetch_timeout) => body?,
        };

        let document = Document::parse(&body)?;

        if cancel.is_cancelled() {
            return Err(AnalyzeError::Cancelled);
        }

        let page = Arc::new(Page {
            url,
            body,
            document,
        });
        let ctx = TaskContext::new(cancel.clone(), span);

        let result = scatter_gather(self.extractors(), page, ctx).await;

        info!(
            "Analysis complete in {}ms ({} errors)",
            started.elapsed().as_millis(),
            result.errors.len()
        );
        Ok(result)
    }

    fn extractors(&self) -> [Box<dyn Extractor>; TASK_COUNT] {
        [
            Box::new(VersionDetector::new(self.config.version_prefix)),
            Box::new(TitleExtractor),
            Box::new(HeadingCounter),
            Box::new(LinkAnalyzer::new(
                self.client.clone(),
                self.config.probe_timeout,
                self.config.worker_sizing,
            )),
            Box::new(LoginFormDetector),
        ]
    }
}

/// Runs every extractor as its own task and merges their messages.
///
/// Each task sends exactly one message. A watcher owns the join handles,
/// reports tasks that died without sending, and closes the stream once all
/// of them are done. Only this function touches the aggregate.
pub async fn scatter_gather(
    extractors: [Box<dyn Extractor>; TASK_COUNT],
    page: Arc<Page>,
    ctx: TaskContext,
) -> AnalysisResult {
    let (tx, mut rx) = mpsc::channel::<TaskMessage>(TASK_COUNT);
    let mut handles = Vec::with_capacity(TASK_COUNT);

    for extractor in extractors {
        let name = extractor.name();
        let page = page.clone();
        let ctx = ctx.clone();
        let tx = tx.clone();
        let task_span = info_span!(parent: &ctx.span, "extract", task = name);

        let handle = tokio::spawn(
            async move {
                let started = Instant::now();
                let outcome = tokio::select! {
                    biased;
                    _ = ctx.cancel.cancelled() => Err(ExtractionError::Cancelled { task: name }),
                    outcome = extractor.extract(&page, &ctx) => outcome,
                };

                debug!(
                    "{} finished in {}µs (ok: {})",
                    name,
                    started.elapsed().as_micros(),
                    outcome.is_ok()
                );

                if tx.send(outcome).await.is_err() {
                    warn!("Result stream closed before {} reported", name);
                }
            }
            .instrument(task_span),
        );

        handles.push((name, handle));
    }

    tokio::spawn(async move {
        for (name, handle) in handles {
            if let Err(e) = handle.await {
                warn!("Extractor {} failed: {}", name, e);
                let message = Err(ExtractionError::Panicked {
                    task: name,
                    reason: e.to_string(),
                });
                let _ = tx.send(message).await;
            }
        }
        // the last sender is dropped here, which ends the drain loop below
    });

    let mut result = AnalysisResult::default();
    while let Some(message) = rx.recv().await {
        result.apply(message);
    }
    result
}
