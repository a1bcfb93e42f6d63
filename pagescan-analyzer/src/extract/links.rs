use super::{Extractor, Page, TaskContext};
use crate::document::Document;
use crate::error::ExtractionError;
use crate::probe::{ProbePool, WorkerSizing, probe_link};
use crate::result::{Link, LinkSummary, LinkType, Partial};
use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub struct LinkAnalyzer {
    client: Client,
    probe_timeout: Duration,
    sizing: WorkerSizing,
}

impl LinkAnalyzer {
    pub fn new(client: Client, probe_timeout: Duration, sizing: WorkerSizing) -> Self {
        Self {
            client,
            probe_timeout,
            sizing,
        }
    }

    async fn analyze(&self, page: &Page, ctx: &TaskContext) -> Result<Partial, ExtractionError> {
        let links = collect_links(&page.document, &page.url);
        if links.is_empty() {
            return Err(ExtractionError::NoLinks);
        }

        let pool = ProbePool::new(self.sizing.workers(links.len()));
        info!("Probing {} links with {} workers", links.len(), pool.workers());

        let client = self.client.clone();
        let timeout = self.probe_timeout;
        let probed = pool
            .run(
                links,
                move |_worker, link| {
                    let client = client.clone();
                    async move { probe_link(&client, link, timeout).await }
                },
                &ctx.cancel,
            )
            .await;

        if ctx.cancel.is_cancelled() {
            return Err(ExtractionError::Cancelled { task: self.name() });
        }

        Ok(Partial::Links(LinkSummary::from_links(probed)))
    }
}

/// Every `<a href>` in document order, resolved against `base` and classified.
pub fn collect_links(document: &Document, base: &Url) -> Vec<Link> {
    let mut links = Vec::new();

    for node in document.elements().filter(|node| node.is_element("a")) {
        let Some(href) = node.attr("href") else {
            continue;
        };

        match resolve_link(base, href) {
            Some(url) => {
                let link_type = classify(&url, base);
                links.push(Link::unprobed(link_type, url.to_string()));
            }
            None => debug!("Skipping unresolvable href '{}'", href),
        }
    }

    links
}

fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    match Url::parse(href) {
        Ok(url) => Some(url),
        Err(_) => base.join(href).ok(),
    }
}

/// Internal iff the link points at the same host as the page. The scheme is
/// ignored; ports only matter when one of the URLs spells one out.
pub fn classify(link: &Url, base: &Url) -> LinkType {
    if link.host_str().is_some()
        && link.host_str() == base.host_str()
        && link.port() == base.port()
    {
        LinkType::Internal
    } else {
        LinkType::External
    }
}

impl Extractor for LinkAnalyzer {
    fn name(&self) -> &'static str {
        "Links"
    }

    fn extract<'a>(
        &'a self,
        page: &'a Page,
        ctx: &'a TaskContext,
    ) -> BoxFuture<'a, Result<Partial, ExtractionError>> {
        self.analyze(page, ctx).boxed()
    }
}
