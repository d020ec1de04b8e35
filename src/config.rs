// src/config.rs
// =============================================================================
// Knobs for the two operations this tool performs: validating candidate URLs
// and crawling seed URLs layer by layer.
//
// Both configs carry sensible defaults (see Default impls) so library-style
// callers and tests can build one with struct update syntax:
//
//   let config = CrawlConfig { max_depth: 2, ..CrawlConfig::default() };
//
// The CLI overrides individual fields from its flags.
// =============================================================================

use anyhow::{bail, Result};
use std::time::Duration;
use tokio::sync::Semaphore;

/// Identifying header sent with every fetch and probe
pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Default per-page GET timeout
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(8);

/// Default per-probe HEAD timeout
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Default number of simultaneous page fetches
pub const DEFAULT_CRAWL_CONCURRENCY: usize = 20;

/// Default number of simultaneous reachability probes
pub const DEFAULT_VALIDATE_CONCURRENCY: usize = 50;

// Settings for one crawl invocation
//
// max_depth:  number of link hops past the seeds (0 = seeds only)
// max_pages:  how many seed URLs are kept (prefix of the seed list).
//             Layers discovered after seeding are NOT capped by this.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub max_depth: usize,
    pub max_pages: usize,
    pub max_concurrency: usize,
    pub fetch_timeout: Duration,
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 1,
            max_pages: 1,
            max_concurrency: DEFAULT_CRAWL_CONCURRENCY,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            user_agent: APP_USER_AGENT.to_string(),
        }
    }
}

impl CrawlConfig {
    /// Rejects settings the crawler cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrency == 0 {
            bail!("max concurrency must be greater than zero");
        }
        if self.max_concurrency > Semaphore::MAX_PERMITS {
            bail!(
                "max concurrency {} is too large (at most {})",
                self.max_concurrency,
                Semaphore::MAX_PERMITS
            );
        }
        if self.fetch_timeout.is_zero() {
            bail!("fetch timeout must be greater than zero");
        }
        Ok(())
    }
}

// Settings for one validation pass
//
// max_urls: keep only the first N candidates before probing (None or 0 = all)
#[derive(Debug, Clone)]
pub struct ValidateConfig {
    pub max_concurrency: usize,
    pub max_urls: Option<usize>,
    pub probe_timeout: Duration,
    pub user_agent: String,
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_VALIDATE_CONCURRENCY,
            max_urls: None,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            user_agent: APP_USER_AGENT.to_string(),
        }
    }
}

impl ValidateConfig {
    /// How many of `available` candidates get probed
    pub fn url_limit(&self, available: usize) -> usize {
        match self.max_urls {
            Some(max) if max > 0 => max.min(available),
            _ => available,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_concurrency == 0 {
            bail!("max concurrency must be greater than zero");
        }
        if self.max_concurrency > Semaphore::MAX_PERMITS {
            bail!(
                "max concurrency {} is too large (at most {})",
                self.max_concurrency,
                Semaphore::MAX_PERMITS
            );
        }
        if self.probe_timeout.is_zero() {
            bail!("probe timeout must be greater than zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_defaults() {
        let config = CrawlConfig::default();
        assert_eq!(config.max_depth, 1);
        assert_eq!(config.max_pages, 1);
        assert_eq!(config.max_concurrency, 20);
        assert_eq!(config.fetch_timeout, Duration::from_secs(8));
        assert!(config.user_agent.starts_with("layer-crawler/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_defaults() {
        let config = ValidateConfig::default();
        assert_eq!(config.max_concurrency, 50);
        assert_eq!(config.max_urls, None);
        assert_eq!(config.probe_timeout, Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_oversized_concurrency_rejected() {
        let crawl = CrawlConfig { max_concurrency: usize::MAX, ..CrawlConfig::default() };
        let err = crawl.validate().unwrap_err().to_string();
        assert!(err.contains("too large"), "unexpected error: {err}");

        let validate = ValidateConfig { max_concurrency: usize::MAX, ..ValidateConfig::default() };
        assert!(validate.validate().is_err());

        let at_limit = CrawlConfig { max_concurrency: Semaphore::MAX_PERMITS, ..CrawlConfig::default() };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_url_limit() {
        let mut config = ValidateConfig::default();
        assert_eq!(config.url_limit(7), 7);

        config.max_urls = Some(3);
        assert_eq!(config.url_limit(7), 3);
        assert_eq!(config.url_limit(2), 2);

        // Zero means "no cap", not "check nothing"
        config.max_urls = Some(0);
        assert_eq!(config.url_limit(7), 7);
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let crawl = CrawlConfig { max_concurrency: 0, ..CrawlConfig::default() };
        assert!(crawl.validate().is_err());

        let validate = ValidateConfig { max_concurrency: 0, ..ValidateConfig::default() };
        assert!(validate.validate().is_err());
    }
}
