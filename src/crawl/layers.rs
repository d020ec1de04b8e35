// src/crawl/layers.rs
// =============================================================================
// Breadth-first crawling, one layer at a time.
//
// How it works:
// 1. SEEDING: keep the first `max_pages` seed URLs and mark them visited
// 2. LAYER FETCH: fetch every URL of the current layer concurrently
//    (bounded by the Limiter) and wait until ALL of them resolved
// 3. LAYER EXTRACT: walk the layer in order, one page at a time:
//    record the page text, mark its new links visited, remember them as
//    this page's children and as candidates for the next layer
// 4. Repeat for layers 0..=max_depth, stopping early on an empty layer
//
// Why the two phases?
// - Fetches finish in any order, but the visited set and the link graph are
//   only touched in step 3, after the whole layer has landed. No locks are
//   needed and the result does not depend on network timing.
//
// Note: `max_pages` only trims the seed list. Layers found later are not
// capped, so a crawl with max_depth > 0 may fetch far more than max_pages.
// =============================================================================

use anyhow::Result;
use futures::future::join_all;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use super::extract::extract_page;
use super::fetch::{FetchFailure, HttpFetcher, PageFetcher};
use super::limiter::Limiter;
use crate::config::CrawlConfig;

/// Text of one successfully fetched page
///
/// Field names are renamed so the record serializes straight into the
/// `URL,Content` table other tools read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Content")]
    pub content: String,
}

/// Parent page -> links first discovered on it
pub type Adjacency = BTreeMap<String, Vec<String>>;

/// Everything one crawl produced
#[derive(Debug, Default, Serialize)]
pub struct CrawlOutput {
    pub pages: Vec<PageRecord>,
    pub adjacency: Adjacency,
}

// Crawls from `seeds` using a reqwest-backed fetcher built from `config`
//
// Fails only on bad configuration; unreachable pages are simply absent
// from the output.
pub async fn crawl_urls(seeds: &[String], config: &CrawlConfig) -> Result<CrawlOutput> {
    config.validate()?;
    let fetcher = HttpFetcher::new(config.fetch_timeout, &config.user_agent)?;
    Ok(crawl(&fetcher, seeds, config).await)
}

/// Runs the layer-by-layer crawl against any page source
pub async fn crawl<F: PageFetcher>(fetcher: &F, seeds: &[String], config: &CrawlConfig) -> CrawlOutput {
    let limiter = Limiter::new(config.max_concurrency);
    let (mut state, mut layer) = CrawlState::seed(seeds, config.max_pages);
    tracing::debug!(
        seeds = layer.len(),
        max_depth = config.max_depth,
        max_concurrency = limiter.capacity(),
        "crawl starting"
    );

    for depth in 0..=config.max_depth {
        if layer.is_empty() {
            break;
        }

        tracing::info!(depth, urls = layer.len(), "fetching layer");
        let bodies = fetch_layer(fetcher, &limiter, &layer).await;

        // Every fetch of this layer has resolved; extraction may now mutate state
        let next = state.extract_layer(&layer, bodies);
        tracing::info!(
            depth,
            pages = state.pages.len(),
            discovered = next.len(),
            "layer done"
        );

        layer = next;
    }

    CrawlOutput {
        pages: state.pages,
        adjacency: state.adjacency,
    }
}

// Fan-out / fan-in for one layer. Results come back in layer order,
// whatever order the requests finished in.
async fn fetch_layer<F: PageFetcher>(
    fetcher: &F,
    limiter: &Limiter,
    layer: &[String],
) -> Vec<Result<String, FetchFailure>> {
    let fetches = layer.iter().map(|url| {
        limiter.run(async move {
            let result = fetcher.fetch(url).await;
            match &result {
                Ok(html) => tracing::debug!(url = %url, bytes = html.len(), "fetched"),
                Err(failure) => tracing::debug!(url = %url, ?failure, "fetch failed"),
            }
            result
        })
    });

    join_all(fetches).await
}

// Mutable crawl state, owned by one crawl call
struct CrawlState {
    visited: HashSet<String>,
    pages: Vec<PageRecord>,
    adjacency: Adjacency,
}

impl CrawlState {
    // Builds layer 0 and marks it visited before anything is fetched.
    // Seeds are only trimmed: URL identity is the exact string.
    fn seed(seeds: &[String], max_pages: usize) -> (Self, Vec<String>) {
        let mut visited = HashSet::new();
        let mut layer = Vec::new();

        for seed in seeds.iter().take(max_pages) {
            let url = seed.trim().to_string();
            if visited.insert(url.clone()) {
                layer.push(url);
            } else {
                tracing::warn!(url = %url, "duplicate seed skipped");
            }
        }

        let state = Self {
            visited,
            pages: Vec::new(),
            adjacency: Adjacency::new(),
        };
        (state, layer)
    }

    // Processes one fetched layer sequentially and returns the next layer
    fn extract_layer(
        &mut self,
        layer: &[String],
        bodies: Vec<Result<String, FetchFailure>>,
    ) -> Vec<String> {
        let mut next = Vec::new();

        for (url, body) in layer.iter().zip(bodies) {
            // Failed pages leave no trace: no record, no adjacency entry
            let Ok(html) = body else {
                continue;
            };

            let page = extract_page(&html, url, &self.visited);
            for link in &page.links {
                self.visited.insert(link.clone());
            }
            next.extend(page.links.iter().cloned());

            self.adjacency.entry(url.clone()).or_insert(page.links);
            self.pages.push(PageRecord {
                url: url.clone(),
                content: page.text,
            });
        }

        next
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why join_all instead of tokio::spawn?
//    - join_all polls every fetch future on the current task
//    - The futures only borrow `fetcher`, `limiter` and the layer; nothing
//      has to be 'static or Send
//    - Results come back in the same order as the input URLs
//
// 2. What is the `let Ok(html) = body else { continue; }` syntax?
//    - let-else: bind on match, otherwise run the else block (which must
//      leave the scope: continue, return, break...)
//
// 3. Why BTreeMap for the adjacency map?
//    - Sorted keys make the JSON graph output stable between runs
//
// 4. Why `entry(..).or_insert(..)`?
//    - It only inserts when the key is missing, so a parent's children are
//      never replaced once recorded
// -----------------------------------------------------------------------------
