// src/crawl/fetch.rs
// =============================================================================
// Fetches one page over HTTP.
//
// A fetch succeeds only when:
// - the GET completes within the configured timeout
// - the status is exactly 200
// - the Content-Type header declares HTML (text/html...)
//
// Anything else becomes a FetchFailure. The crawler treats every failure the
// same way (the page is dropped, no retry); the variants exist so tests and
// debug logs can tell them apart.
//
// Rust concepts:
// - Traits: PageFetcher lets the crawler run against a fake site in tests
// - impl Future in traits: async methods without boxing
// =============================================================================

use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::Duration;

/// Why a page could not be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// No complete response within the timeout
    Timeout,
    /// Response status other than 200
    BadStatus(u16),
    /// Response was not declared as HTML (holds the declared type, may be empty)
    BadContentType(String),
    /// DNS, connection, TLS, body decoding, malformed URL...
    Network(String),
}

/// Source of raw HTML for the crawler
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchFailure>>;
}

/// The production fetcher backed by reqwest
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .context("Failed to create HTTP client for page fetches")?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchFailure> {
        let response = self.client.get(url).send().await.map_err(categorize_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchFailure::BadStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !is_html(&content_type) {
            return Err(FetchFailure::BadContentType(content_type));
        }

        response.text().await.map_err(categorize_error)
    }
}

// "text/html", "text/html; charset=utf-8", "TEXT/HTML" all count
fn is_html(content_type: &str) -> bool {
    content_type.trim_start().to_ascii_lowercase().starts_with("text/html")
}

fn categorize_error(error: reqwest::Error) -> FetchFailure {
    if error.is_timeout() {
        FetchFailure::Timeout
    } else {
        FetchFailure::Network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(Duration::from_secs(2), "layer-crawler-test").unwrap()
    }

    #[test]
    fn test_is_html() {
        assert!(is_html("text/html"));
        assert!(is_html("text/html; charset=utf-8"));
        assert!(is_html("Text/HTML"));
        assert!(!is_html("application/json"));
        assert!(!is_html("application/xhtml+xml"));
        assert!(!is_html(""));
    }

    #[tokio::test]
    async fn test_fetch_html_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><body>hi</body></html>", "text/html; charset=utf-8"),
            )
            .mount(&server)
            .await;

        let html = fetcher().fetch(&format!("{}/page", server.uri())).await;
        assert_eq!(html, Ok("<html><body>hi</body></html>".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(wiremock::matchers::header("user-agent", "layer-crawler-test"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("<p>ok</p>", "text/html"))
            .mount(&server)
            .await;

        assert!(fetcher().fetch(&server.uri()).await.is_ok());
    }

    #[tokio::test]
    async fn test_non_200_is_bad_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/created"))
            .respond_with(ResponseTemplate::new(201).set_body_raw("<p>x</p>", "text/html"))
            .mount(&server)
            .await;

        let missing = fetcher().fetch(&format!("{}/missing", server.uri())).await;
        assert_eq!(missing, Err(FetchFailure::BadStatus(404)));

        // Only exactly 200 is accepted, not the whole 2xx range
        let created = fetcher().fetch(&format!("{}/created", server.uri())).await;
        assert_eq!(created, Err(FetchFailure::BadStatus(201)));
    }

    #[tokio::test]
    async fn test_non_html_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
            .mount(&server)
            .await;

        let result = fetcher().fetch(&server.uri()).await;
        assert_eq!(
            result,
            Err(FetchFailure::BadContentType("application/json".to_string()))
        );
    }

    #[tokio::test]
    async fn test_slow_page_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<p>late</p>", "text/html")
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(Duration::from_millis(200), "layer-crawler-test").unwrap();
        let result = fetcher.fetch(&server.uri()).await;
        assert_eq!(result, Err(FetchFailure::Timeout));
    }

    #[tokio::test]
    async fn test_malformed_url_is_network_failure() {
        let result = fetcher().fetch("not a url").await;
        assert!(matches!(result, Err(FetchFailure::Network(_))));
    }
}
