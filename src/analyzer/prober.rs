//! Link reachability prober
//!
//! Judges whether a link answers over HTTP(S) with a non-error status.
//! Non-HTTP links are accepted without a request.

use crate::analyzer::coordinator::LinkCheckSettings;
use crate::url::resolve_link;
use reqwest::{redirect::Policy, Client};
use url::Url;

/// Result of probing one link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Not an HTTP(S) link (`mailto:`, `tel:`, `javascript:`, `ftp:` ...)
    Skipped { scheme: String },

    /// Answered with a status below 400
    Reachable { status: u16 },

    /// Answered with a status of 400 or above
    Broken { status: u16 },

    /// Unresolvable, or both HEAD and GET failed at the transport level
    Failed { error: String },
}

impl ProbeOutcome {
    /// Returns true if the link counts as accessible
    pub fn is_accessible(&self) -> bool {
        matches!(self, Self::Skipped { .. } | Self::Reachable { .. })
    }
}

/// Issues reachability probes with a shared, pooled HTTP client
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct Prober {
    client: Client,
}

impl Prober {
    /// Builds a prober from link-check settings
    ///
    /// Each request is bounded by `probe_timeout`. Redirects are followed for
    /// `max_redirects` hops; the response that would trigger one more hop is
    /// returned as-is instead of failing.
    pub fn new(settings: &LinkCheckSettings, user_agent: &str) -> Result<Self, reqwest::Error> {
        let max_redirects = settings.max_redirects;
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(settings.probe_timeout)
            .redirect(Policy::custom(move |attempt| {
                // `previous` holds every URL requested so far, the original included
                if attempt.previous().len() > max_redirects {
                    attempt.stop()
                } else {
                    attempt.follow()
                }
            }))
            .build()?;
        Ok(Self { client })
    }

    /// Probes a harvested link, resolved against the page's base URL
    ///
    /// # Request Flow
    ///
    /// 1. Resolve the link; unresolvable → `Failed`
    /// 2. Non-HTTP(S) scheme → `Skipped`
    /// 3. HEAD request
    ///    - transport failure → retry once with GET
    ///    - any response (including 4xx/5xx) is final
    /// 4. Status < 400 → `Reachable`, otherwise `Broken`
    pub async fn probe(&self, link: &str, base: &Url) -> ProbeOutcome {
        let resolved = match resolve_link(link, base) {
            Ok(url) => url,
            Err(e) => {
                return ProbeOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        match resolved.scheme() {
            "http" | "https" => {}
            other => {
                return ProbeOutcome::Skipped {
                    scheme: other.to_string(),
                }
            }
        }

        let response = match self.client.head(resolved.clone()).send().await {
            Ok(response) => response,
            Err(head_error) => {
                tracing::debug!(
                    "HEAD {} failed ({}), retrying with GET",
                    resolved,
                    head_error
                );
                match self.client.get(resolved.clone()).send().await {
                    Ok(response) => response,
                    Err(e) => {
                        return ProbeOutcome::Failed {
                            error: e.to_string(),
                        }
                    }
                }
            }
        };

        let status = response.status().as_u16();
        if status < 400 {
            ProbeOutcome::Reachable { status }
        } else {
            ProbeOutcome::Broken { status }
        }
    }
}
