// src/checker/http.rs
// =============================================================================
// Checks whether candidate URLs are alive before they are crawled.
//
// Key functionality:
// - Makes HTTP HEAD requests (lightweight, no body download)
// - Follows redirects; any 2xx at the end counts as reachable
// - If a URL is unreachable, tries it once more with http <-> https swapped
// - Runs checks concurrently, bounded by a Limiter
//
// Every failure (timeout, DNS, refused connection, 4xx/5xx...) means the same
// thing here: not reachable. Candidates that fail both attempts are dropped
// without being reported.
// =============================================================================

use anyhow::{Context, Result};
use futures::future::join_all;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

use super::repair::switch_protocol;
use crate::config::ValidateConfig;
use crate::crawl::Limiter;

/// Answers "does this URL respond?"
pub trait Probe {
    fn is_reachable(&self, url: &str) -> impl Future<Output = bool>;
}

/// HEAD-request probe backed by reqwest
#[derive(Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .context("Failed to create HTTP client for reachability probes")?;

        Ok(Self { client })
    }
}

impl Probe for HttpProbe {
    async fn is_reachable(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(response) => {
                let status = response.status();
                tracing::debug!(url, status = status.as_u16(), "probed");
                status.is_success()
            }
            Err(e) => {
                tracing::debug!(url, timeout = e.is_timeout(), error = %e, "probe failed");
                false
            }
        }
    }
}

// Validates candidates with a reqwest-backed probe built from `config`
//
// Returns the reachable URLs (original or protocol-switched) in input order.
pub async fn validate_urls(candidates: &[String], config: &ValidateConfig) -> Result<Vec<String>> {
    config.validate()?;
    let probe = HttpProbe::new(config.probe_timeout, &config.user_agent)?;
    Ok(validate(&probe, candidates, config).await)
}

/// Probes every candidate (at most `max_urls` of them) and keeps the live ones
pub async fn validate<P: Probe>(probe: &P, candidates: &[String], config: &ValidateConfig) -> Vec<String> {
    let limit = config.url_limit(candidates.len());
    let limiter = Limiter::new(config.max_concurrency);

    // One permit covers both the original probe and the repair probe
    let checks = candidates
        .iter()
        .take(limit)
        .map(|url| limiter.run(validate_and_repair(probe, url)));

    let valid: Vec<String> = join_all(checks).await.into_iter().flatten().collect();

    tracing::info!(
        checked = limit,
        valid = valid.len(),
        "validation complete"
    );
    valid
}

// Returns the first working variant of `url`, or None
pub async fn validate_and_repair<P: Probe>(probe: &P, url: &str) -> Option<String> {
    if probe.is_reachable(url).await {
        return Some(url.to_string());
    }

    let switched = switch_protocol(url)?;
    if probe.is_reachable(&switched).await {
        tracing::debug!(url, repaired = %switched, "protocol switch repaired URL");
        return Some(switched);
    }

    tracing::debug!(url, "dropping unreachable URL");
    None
}
