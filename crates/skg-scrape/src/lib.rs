//! SKG Scrape - Page fetching and text extraction
//!
//! Fetches one URL at a time and extracts the first `<title>` element plus
//! the text of every `<p>` element, joined by newlines.
//!
//! Contract: all fetch/parse failures are converted to [`ScrapeError`]
//! values and logged with the skipped URL - nothing panics past this
//! crate's boundary.

use scraper::{Html, Selector};
use skg_core::{FetchConfig, PageRecord, SkgError};
use thiserror::Error;
use tracing::{debug, warn};

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while fetching and extracting a page
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientError(String),

    /// Transport-level request failure (DNS, connect, timeout, ...)
    #[error("Request failed for {url}: {source}")]
    RequestError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response carried a non-success status
    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// Page was retrieved but has no `<title>` element
    #[error("No title tag found for {url}")]
    MissingTitle { url: String },
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

// ============================================================================
// Page Scraper
// ============================================================================

/// HTTP page fetcher with a fixed per-request timeout
pub struct PageScraper {
    client: reqwest::Client,
}

impl PageScraper {
    /// Create a new scraper from configuration (default timeout 10 s)
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ScrapeError::ClientError(e.to_string()))?;

        Ok(Self { client })
    }

    /// Fetch a URL and extract its title and paragraph text
    ///
    /// Emits one `warn!` naming the skipped URL on every error path.
    pub async fn fetch_page(&self, url: &str) -> Result<PageRecord> {
        debug!("Fetching {}", url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Skipping {}: {}", url, e);
                return Err(ScrapeError::RequestError {
                    url: url.to_string(),
                    source: e,
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Skipping {}: HTTP {}", url, status.as_u16());
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Skipping {}: {}", url, e);
                return Err(ScrapeError::RequestError {
                    url: url.to_string(),
                    source: e,
                });
            }
        };

        match extract_page(&body) {
            Some((title, text)) => Ok(PageRecord::new(url, title, text)),
            None => {
                warn!("Skipping {}: no title tag found", url);
                Err(ScrapeError::MissingTitle {
                    url: url.to_string(),
                })
            }
        }
    }
}

#[async_trait::async_trait]
impl skg_core::PageFetcher for PageScraper {
    async fn fetch(&self, url: &str) -> skg_core::Result<PageRecord> {
        self.fetch_page(url)
            .await
            .map_err(|e| SkgError::ScrapeError(e.to_string()))
    }
}

/// Parse HTML and pull out (title, paragraph text)
///
/// Returns `None` when the document has no `<title>` element. Kept
/// synchronous so the non-Send `Html` never lives across an await.
fn extract_page(html: &str) -> Option<(String, String)> {
    let document = Html::parse_document(html);

    let title_selector = Selector::parse("title").ok()?;
    let p_selector = Selector::parse("p").ok()?;

    let title: String = document
        .select(&title_selector)
        .next()?
        .text()
        .collect::<String>();

    let text = document
        .select(&p_selector)
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n");

    Some((title, text))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn scraper() -> PageScraper {
        PageScraper::new(&FetchConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_extracts_title_and_paragraphs() {
        let server = MockServer::start().await;

        let html = "<html><head><title>Altera News</title></head><body>\
                    <p>Altera builds chips.</p>\
                    <div><p>Intel bought Altera.</p></div>\
                    </body></html>";

        Mock::given(method("GET"))
            .and(path("/article"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_string(html),
            )
            .mount(&server)
            .await;

        let page = scraper()
            .fetch_page(&format!("{}/article", server.uri()))
            .await
            .unwrap();

        assert_eq!(page.title, "Altera News");
        assert_eq!(page.text, "Altera builds chips.\nIntel bought Altera.");
    }

    #[tokio::test]
    async fn test_missing_title_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/untitled"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body><p>No title here.</p></body></html>"),
            )
            .mount(&server)
            .await;

        let err = scraper()
            .fetch_page(&format!("{}/untitled", server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, ScrapeError::MissingTitle { .. }));
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = scraper()
            .fetch_page(&format!("{}/gone", server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, ScrapeError::HttpStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_connection_failure_is_an_error() {
        // Nothing listens on this port
        let err = scraper()
            .fetch_page("http://127.0.0.1:1/unreachable")
            .await
            .unwrap_err();

        assert!(matches!(err, ScrapeError::RequestError { .. }));
    }

    #[tokio::test]
    async fn test_page_without_paragraphs_has_empty_text() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/bare"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><head><title>Bare</title></head><body></body></html>"),
            )
            .mount(&server)
            .await;

        let page = scraper()
            .fetch_page(&format!("{}/bare", server.uri()))
            .await
            .unwrap();

        assert_eq!(page.title, "Bare");
        assert!(page.text.is_empty());
    }
}
