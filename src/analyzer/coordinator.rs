//! Accessibility coordinator: the link-probing worker pool
//!
//! Harvested links flow through three independent stages:
//!
//! ```text
//! producer ──links──▶ [worker × N] ──verdicts──▶ collector
//! ```
//!
//! - The producer feeds links into a bounded queue.
//! - Up to `max_workers` workers pull from the shared queue, classify and
//!   probe each link, and send one verdict per link.
//! - The collector (the calling task) is the only writer of the tallies.
//!
//! A shared deadline cancels the whole phase. Workers check it before taking
//! each link and abandon in-flight probes when it fires; verdicts already
//! produced are still counted.

use crate::analyzer::prober::{ProbeOutcome, Prober};
use crate::config::LinksConfig;
use crate::url::{classify_link, LinkLocality};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Tunables for one link-checking run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCheckSettings {
    /// Upper bound on concurrent probe workers
    pub max_workers: usize,
    /// Shared deadline for the whole probing phase
    pub deadline: Duration,
    /// Timeout for each probe request
    pub probe_timeout: Duration,
    /// Redirect hops followed before accepting the last response
    pub max_redirects: usize,
}

impl Default for LinkCheckSettings {
    fn default() -> Self {
        Self::from(&LinksConfig::default())
    }
}

impl From<&LinksConfig> for LinkCheckSettings {
    fn from(config: &LinksConfig) -> Self {
        Self {
            max_workers: config.max_workers,
            deadline: Duration::from_secs(config.deadline_secs),
            probe_timeout: Duration::from_secs(config.probe_timeout_secs),
            max_redirects: config.max_redirects,
        }
    }
}

/// Classification and probe result for one link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkVerdict {
    pub locality: LinkLocality,
    pub outcome: ProbeOutcome,
}

impl LinkVerdict {
    pub fn is_internal(&self) -> bool {
        self.locality.is_internal()
    }

    pub fn is_accessible(&self) -> bool {
        self.outcome.is_accessible()
    }
}

/// Aggregated link counts
///
/// `internal + external` equals the number of verdicts received, which equals
/// the number of links unless `deadline_exceeded` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkTally {
    pub internal: usize,
    pub external: usize,
    pub inaccessible: usize,
    pub deadline_exceeded: bool,
}

impl LinkTally {
    /// Adds one verdict to the counts
    pub fn record(&mut self, verdict: &LinkVerdict) {
        if verdict.is_internal() {
            self.internal += 1;
        } else {
            self.external += 1;
        }
        if !verdict.is_accessible() {
            self.inaccessible += 1;
        }
    }

    /// Number of links that received a verdict
    pub fn checked(&self) -> usize {
        self.internal + self.external
    }

    /// True if fewer than `total` links received a verdict
    pub fn is_partial(&self, total: usize) -> bool {
        self.checked() < total
    }
}

/// Classifies and probes every link, returning whatever counts accumulate
/// before the shared deadline
///
/// Zero links returns all-zero counts without spawning anything.
///
/// # Arguments
///
/// * `links` - Harvested `href` values, duplicates included
/// * `base_url` - URL of the analysed page
/// * `prober` - Prober configured with the per-request timeout
/// * `settings` - Pool size and deadline
pub async fn check_links(
    links: Vec<String>,
    base_url: &Url,
    prober: &Prober,
    settings: &LinkCheckSettings,
) -> LinkTally {
    if links.is_empty() {
        return LinkTally::default();
    }

    let total = links.len();
    let worker_count = settings.max_workers.max(1).min(total);
    let started = Instant::now();
    tracing::debug!("Checking {} links with {} workers", total, worker_count);

    let deadline = CancellationToken::new();
    let timer = {
        let deadline = deadline.clone();
        let limit = settings.deadline;
        tokio::spawn(async move {
            tokio::time::sleep(limit).await;
            deadline.cancel();
        })
    };

    let (link_tx, link_rx) = mpsc::channel::<String>(worker_count);
    let (verdict_tx, mut verdict_rx) = mpsc::channel::<LinkVerdict>(total);
    let queue = Arc::new(Mutex::new(link_rx));
    let base_url = Arc::new(base_url.clone());

    let producer = tokio::spawn(feed_links(links, link_tx, deadline.clone()));

    let mut workers = JoinSet::new();
    for id in 0..worker_count {
        workers.spawn(probe_worker(
            id,
            Arc::clone(&queue),
            verdict_tx.clone(),
            prober.clone(),
            Arc::clone(&base_url),
            deadline.clone(),
        ));
    }
    // The verdict channel closes once every worker has dropped its sender
    drop(verdict_tx);

    let mut tally = LinkTally::default();
    while let Some(verdict) = verdict_rx.recv().await {
        tally.record(&verdict);
    }

    while let Some(joined) = workers.join_next().await {
        if let Err(e) = joined {
            tracing::warn!("Probe worker failed: {}", e);
        }
    }
    if let Err(e) = producer.await {
        tracing::warn!("Link producer failed: {}", e);
    }

    // A deadline that fires after the last verdict truncates nothing
    tally.deadline_exceeded = tally.is_partial(total);
    timer.abort();

    if tally.deadline_exceeded {
        tracing::warn!(
            "Link check deadline of {:?} exceeded: {} of {} links checked",
            settings.deadline,
            tally.checked(),
            total
        );
    }
    tracing::info!(
        "Checked {} links in {:?}: {} internal, {} external, {} inaccessible",
        tally.checked(),
        started.elapsed(),
        tally.internal,
        tally.external,
        tally.inaccessible
    );

    tally
}

/// Pushes links into the work queue until exhausted or cancelled
async fn feed_links(links: Vec<String>, queue: mpsc::Sender<String>, deadline: CancellationToken) {
    for link in links {
        tokio::select! {
            biased;
            _ = deadline.cancelled() => break,
            sent = queue.send(link) => {
                if sent.is_err() {
                    break;
                }
            }
        }
    }
}

/// Pulls links from the shared queue and emits one verdict per link
async fn probe_worker(
    id: usize,
    queue: Arc<Mutex<mpsc::Receiver<String>>>,
    verdicts: mpsc::Sender<LinkVerdict>,
    prober: Prober,
    base_url: Arc<Url>,
    deadline: CancellationToken,
) {
    loop {
        if deadline.is_cancelled() {
            break;
        }

        let next = {
            let mut queue = queue.lock().await;
            tokio::select! {
                biased;
                _ = deadline.cancelled() => None,
                link = queue.recv() => link,
            }
        };
        let Some(link) = next else {
            break;
        };

        let locality = classify_link(&link, &base_url);
        let outcome = tokio::select! {
            biased;
            _ = deadline.cancelled() => {
                tracing::debug!("Worker {} abandoning probe of {:?}", id, link);
                break;
            }
            outcome = prober.probe(&link, &base_url) => outcome,
        };
        tracing::debug!(
            "Worker {} checked {:?}: {:?}, {:?}",
            id,
            link,
            locality,
            outcome
        );

        if verdicts.send(LinkVerdict { locality, outcome }).await.is_err() {
            break;
        }
    }
}
