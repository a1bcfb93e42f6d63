use super::{Extractor, Page, TaskContext};
use crate::error::ExtractionError;
use crate::result::Partial;
use futures::FutureExt;
use futures::future::{self, BoxFuture};

pub const UNKNOWN_VERSION: &str = "Unknown";

/// Checked in order; the first version with a matching marker wins.
const SIGNATURES: &[(&str, &[&str])] = &[
    ("HTML5", &["<!doctype html>"]),
    (
        "HTML 4.01 Transitional",
        &["html 4.01 transitional", "html4/loose.dtd"],
    ),
    ("HTML 4.01 Strict", &["html 4.01 strict", "html4/strict.dtd"]),
    (
        "XHTML 1.0 Transitional",
        &["xhtml 1.0 transitional", "xhtml1-transitional.dtd"],
    ),
    ("XHTML 1.0 Strict", &["xhtml 1.0 strict", "xhtml1-strict.dtd"]),
    ("XHTML 1.1", &["xhtml 1.1", "xhtml11.dtd"]),
];

pub struct VersionDetector {
    prefix_len: usize,
}

impl VersionDetector {
    pub fn new(prefix_len: usize) -> Self {
        Self { prefix_len }
    }

    pub fn detect(&self, body: &[u8]) -> Result<&'static str, ExtractionError> {
        let prefix = &body[..body.len().min(self.prefix_len)];
        if prefix.is_empty() {
            return Err(ExtractionError::EmptyInput);
        }
        Ok(detect_html_version(&String::from_utf8_lossy(prefix)))
    }
}

pub fn detect_html_version(snippet: &str) -> &'static str {
    let lower = snippet.to_lowercase();
    SIGNATURES
        .iter()
        .find(|(_, markers)| markers.iter().any(|m| lower.contains(m)))
        .map(|(version, _)| *version)
        .unwrap_or(UNKNOWN_VERSION)
}

impl Extractor for VersionDetector {
    fn name(&self) -> &'static str {
        "HtmlVersion"
    }

    fn extract<'a>(
        &'a self,
        page: &'a Page,
        _ctx: &'a TaskContext,
    ) -> BoxFuture<'a, Result<Partial, ExtractionError>> {
        let outcome = self
            .detect(&page.body)
            .map(|version| Partial::HtmlVersion(version.to_string()));
        future::ready(outcome).boxed()
    }
}
