// src/checker/mod.rs
// =============================================================================
// This module decides which candidate URLs are worth crawling.
//
// Submodules:
// - http: reachability probes and the concurrent validation pass
// - repair: the http <-> https switch tried on unreachable URLs
//
// This file (mod.rs) is the module root - it exports the public API that
// the rest of the application uses.
// =============================================================================

mod http;
mod repair;

pub use http::validate_urls;
