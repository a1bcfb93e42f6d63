//! The five analysis passes run by the orchestrator.
//!
//! Every pass implements [`Extractor`] and reads the same immutable [`Page`].
//! A pass reports exactly one [`TaskMessage`](crate::result::TaskMessage).

pub mod headings;
pub mod links;
pub mod login;
pub mod title;
pub mod version;

use crate::document::Document;
use crate::error::ExtractionError;
use crate::result::Partial;
use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;
use tracing::Span;
use url::Url;

pub use headings::HeadingCounter;
pub use links::LinkAnalyzer;
pub use login::LoginFormDetector;
pub use title::TitleExtractor;
pub use version::VersionDetector;

/// The fetched page: shared read-only input of every extractor.
#[derive(Debug)]
pub struct Page {
    pub url: Url,
    pub body: Vec<u8>,
    pub document: Document,
}

/// Per-request collaborators handed to each extractor.
#[derive(Debug, Clone)]
pub struct TaskContext {
    pub cancel: CancellationToken,
    pub span: Span,
}

impl TaskContext {
    pub fn new(cancel: CancellationToken, span: Span) -> Self {
        Self { cancel, span }
    }

    /// A context with a fresh token and no logging span, for direct use in tests.
    pub fn detached() -> Self {
        Self::new(CancellationToken::new(), Span::none())
    }
}

pub trait Extractor: Send + Sync {
    fn name(&self) -> &'static str;

    fn extract<'a>(
        &'a self,
        page: &'a Page,
        ctx: &'a TaskContext,
    ) -> BoxFuture<'a, Result<Partial, ExtractionError>>;
}
