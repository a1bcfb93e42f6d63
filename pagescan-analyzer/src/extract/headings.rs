use super::{Extractor, Page, TaskContext};
use crate::document::Document;
use crate::error::ExtractionError;
use crate::result::Partial;
use futures::FutureExt;
use futures::future::{self, BoxFuture};
use std::collections::BTreeMap;

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

pub struct HeadingCounter;

pub fn count_headings(document: &Document) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for name in document.elements().filter_map(|node| node.element_name()) {
        if HEADING_TAGS.contains(&name) {
            *counts.entry(name.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

impl Extractor for HeadingCounter {
    fn name(&self) -> &'static str {
        "Headings"
    }

    fn extract<'a>(
        &'a self,
        page: &'a Page,
        _ctx: &'a TaskContext,
    ) -> BoxFuture<'a, Result<Partial, ExtractionError>> {
        future::ready(Ok(Partial::Headings(count_headings(&page.document)))).boxed()
    }
}
