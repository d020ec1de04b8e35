// src/crawl/extract.rs
// =============================================================================
// Turns a fetched HTML page into:
// - plain text: every visible text node, trimmed, one per line
// - outbound links: absolute http/https anchors not yet visited
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (html5ever underneath, same as browsers)
// - Supports CSS selectors for finding elements
//
// Only hrefs that already carry a scheme (http:// or https://) are followed.
// Relative links like "/docs" are ignored, so a crawl fans out across sites
// rather than walking one site's internal pages.
//
// Extraction never suspends: it is plain synchronous code that the crawler
// runs one page at a time.
// =============================================================================

use scraper::{Html, Node, Selector};
use std::collections::HashSet;
use url::Url;

// Elements whose text content never reaches the reader
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// What one page yields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    /// Visible text, one text node per line
    pub text: String,
    /// Absolute outbound links in document order, each at most once,
    /// none of them present in the visited set passed to extract_page
    pub links: Vec<String>,
}

// Extracts text and unvisited outbound links from a page
//
// Parameters:
//   html:     the page body
//   page_url: where the page was fetched from (base for resolution)
//   visited:  URLs the crawl has already seen; they are left out of `links`
pub fn extract_page(html: &str, page_url: &str, visited: &HashSet<String>) -> ExtractedPage {
    let document = Html::parse_document(html);

    ExtractedPage {
        text: visible_text(&document),
        links: outbound_links(&document, page_url, visited),
    }
}

fn visible_text(document: &Html) -> String {
    let mut lines = Vec::new();

    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| match ancestor.value() {
            Node::Element(element) => HIDDEN_ELEMENTS.contains(&element.name()),
            _ => false,
        });
        if hidden {
            continue;
        }

        let text = text.trim();
        if !text.is_empty() {
            lines.push(text);
        }
    }

    lines.join("\n")
}

fn outbound_links(document: &Html, page_url: &str, visited: &HashSet<String>) -> Vec<String> {
    // "a[href]" is a constant, known-valid selector
    let selector = Selector::parse("a[href]").unwrap();

    let base = match Url::parse(page_url) {
        Ok(url) => Some(url),
        Err(_) => {
            tracing::warn!(page_url, "page URL is not absolute, links resolved standalone");
            None
        }
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !has_http_scheme(href) {
            continue;
        }

        let Some(absolute) = resolve_url(base.as_ref(), href) else {
            continue;
        };

        if visited.contains(&absolute) || !seen.insert(absolute.clone()) {
            continue;
        }
        links.push(absolute);
    }

    links
}

// Resolves an href against the page it came from
//
// An href that already starts with http:// or https:// is returned exactly
// as written; resolution only has to succeed. Relative hrefs get the
// resolved form.
//
// Examples (base = "https://example.com/page"):
//   "http://C.test"          -> Some("http://C.test")
//   "/docs"                  -> Some("https://example.com/docs")
//   "http://[broken"         -> None
fn resolve_url(base: Option<&Url>, href: &str) -> Option<String> {
    let resolved = match base {
        Some(base) => base.join(href),
        None => Url::parse(href),
    };
    let resolved = resolved.ok()?;

    if has_http_scheme(href) {
        Some(href.to_string())
    } else {
        Some(resolved.to_string())
    }
}

fn has_http_scheme(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}
