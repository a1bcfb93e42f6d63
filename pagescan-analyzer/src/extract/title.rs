use super::{Extractor, Page, TaskContext};
use crate::document::Document;
use crate::error::ExtractionError;
use crate::result::Partial;
use futures::FutureExt;
use futures::future::{self, BoxFuture};

pub struct TitleExtractor;

/// Text of the first `<title>` in document order, or an empty string.
pub fn extract_title(document: &Document) -> String {
    document
        .elements()
        .find(|node| node.is_element("title"))
        .and_then(|title| document.children(title).find_map(|child| child.text()))
        .map(str::to_string)
        .unwrap_or_default()
}

impl Extractor for TitleExtractor {
    fn name(&self) -> &'static str {
        "Title"
    }

    fn extract<'a>(
        &'a self,
        page: &'a Page,
        _ctx: &'a TaskContext,
    ) -> BoxFuture<'a, Result<Partial, ExtractionError>> {
        future::ready(Ok(Partial::Title(extract_title(&page.document)))).boxed()
    }
}
