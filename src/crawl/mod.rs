// src/crawl/mod.rs
// =============================================================================
// This module handles crawling.
//
// Features:
// - Breadth-first crawling, one whole layer of URLs at a time
// - Bounded number of simultaneous requests (limiter)
// - Depth limit, plus a cap on how many seed URLs are used
// - Page text and a parent -> children link graph as output
//
// Submodules:
// - limiter: counting gate around every network operation
// - fetch: one GET, accepted only for 200 + text/html
// - extract: visible text and outbound links of a page
// - layers: the BFS loop tying the three together
// =============================================================================

mod extract;
mod fetch;
mod layers;
mod limiter;

pub use layers::{crawl_urls, Adjacency, CrawlOutput, PageRecord};
pub use limiter::Limiter;
