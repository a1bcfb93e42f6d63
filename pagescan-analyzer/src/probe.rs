//! Bounded reachability probing.
//!
//! A single producer fills a queue with every collected link, then a fixed
//! number of workers drain it. Each worker takes ownership of the link it
//! dequeued, probes it and sends the updated value back, so no link is ever
//! shared between workers.

use crate::result::Link;
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// How many probe workers to start for a given number of links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkerSizing {
    /// `ceil(sqrt(n) * 3)`: grows sub-linearly with the link count.
    #[default]
    SqrtScaled,
    /// Always the same number of workers.
    Fixed(usize),
    /// `SqrtScaled`, but never more than the given cap.
    Capped(usize),
}

impl WorkerSizing {
    pub fn workers(&self, links: usize) -> usize {
        match *self {
            WorkerSizing::SqrtScaled => sqrt_scaled(links),
            WorkerSizing::Fixed(workers) => workers,
            WorkerSizing::Capped(cap) => sqrt_scaled(links).min(cap),
        }
    }
}

fn sqrt_scaled(links: usize) -> usize {
    ((links as f64).sqrt() * 3.0).ceil() as usize
}

/// Issues a HEAD request. Only a 200 response counts as accessible.
pub async fn probe_link(client: &Client, mut link: Link, timeout: Duration) -> Link {
    link.accessible = match client.head(&link.url).timeout(timeout).send().await {
        Ok(response) => response.status() == StatusCode::OK,
        Err(e) => {
            debug!("Probe failed for {}: {}", link.url, e);
            false
        }
    };
    link
}

pub struct ProbePool {
    workers: usize,
}

impl ProbePool {
    pub fn new(workers: usize) -> Self {
        Self { workers }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Probes every link exactly once and returns them in completion order.
    ///
    /// `probe` receives the worker id and the owned link. When `cancel` fires,
    /// workers stop taking new links and abandon in-flight probes, so the
    /// returned vector may be shorter than the input.
    pub async fn run<F, Fut>(&self, links: Vec<Link>, probe: F, cancel: &CancellationToken) -> Vec<Link>
    where
        F: Fn(usize, Link) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Link> + Send + 'static,
    {
        let total = links.len();
        if total == 0 {
            return Vec::new();
        }
        let workers = self.workers.max(1);

        // Capacity matches the link count, so neither the producer nor the
        // workers can block on send.
        let (queue_tx, queue_rx) = mpsc::channel::<Link>(total);
        let (results_tx, mut results_rx) = mpsc::channel::<Link>(total);

        for link in links {
            if queue_tx.try_send(link).is_err() {
                warn!("Probe queue rejected a link");
            }
        }
        drop(queue_tx);

        let queue = Arc::new(Mutex::new(queue_rx));
        let probe = Arc::new(probe);
        let mut worker_handles = Vec::with_capacity(workers);

        debug!("Probing {} links with {} workers", total, workers);

        for worker_id in 0..workers {
            let queue = queue.clone();
            let probe = probe.clone();
            let results_tx = results_tx.clone();
            let cancel = cancel.clone();

            let handle = tokio::spawn(async move {
                let mut probed = 0usize;
                loop {
                    if cancel.is_cancelled() {
                        break;
                    }

                    let next = {
                        let mut queue = queue.lock().await;
                        queue.recv().await
                    };
                    let Some(link) = next else {
                        break;
                    };

                    let link = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => break,
                        link = probe(worker_id, link) => link,
                    };

                    probed += 1;
                    if results_tx.send(link).await.is_err() {
                        break;
                    }
                }
                debug!("Probe worker {} finished after {} links", worker_id, probed);
            });

            worker_handles.push(handle);
        }
        drop(results_tx);

        for handle in worker_handles {
            if let Err(e) = handle.await {
                warn!("Probe worker failed: {}", e);
            }
        }

        let mut probed = Vec::with_capacity(total);
        while let Some(link) = results_rx.recv().await {
            probed.push(link);
        }
        probed
    }
}
