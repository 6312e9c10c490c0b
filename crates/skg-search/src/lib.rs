//! SKG Search - Web search client
//!
//! Implements [`SearchProvider`] against a Custom Search JSON API:
//! one GET with `q`, `key`, `cx`, and `num` query parameters, returning
//! the result URLs in ranking order.
//!
//! Transport failures and non-success statuses are returned as errors;
//! the pipeline treats them as run-aborting.

use serde::Deserialize;
use skg_core::{Result, SearchConfig, SearchProvider, SkgError};
use tracing::{debug, info};
use url::Url;

// ============================================================================
// Client
// ============================================================================

/// Search client for the Custom Search JSON API
pub struct GoogleSearchClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    engine_id: String,
    num_results: usize,
}

impl GoogleSearchClient {
    /// Create a new client from configuration
    ///
    /// Credentials are used as-is: an empty key surfaces as an
    /// authentication failure from the API, not as a local error.
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            engine_id: config.engine_id.clone(),
            num_results: config.num_results,
        }
    }

    /// Override the API endpoint (tests point this at a mock server)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the number of requested results
    pub fn with_num_results(mut self, num: usize) -> Self {
        self.num_results = num;
        self
    }

    fn request_url(&self, query: &str) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| SkgError::SearchError(format!("invalid endpoint: {e}")))?;

        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("key", &self.api_key)
            .append_pair("cx", &self.engine_id)
            .append_pair("num", &self.num_results.to_string());

        Ok(url)
    }
}

#[async_trait::async_trait]
impl SearchProvider for GoogleSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<String>> {
        let url = self.request_url(query)?;
        debug!("Searching for: {}", query);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SkgError::SearchError(format!("search request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SkgError::SearchError(format!("search request failed: {e}")))?;

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SkgError::SearchError(format!("malformed search response: {e}")))?;

        let links: Vec<String> = body
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|item| item.link)
            .collect();

        info!("Web search completed: {} results", links.len());
        Ok(links)
    }

    fn name(&self) -> &str {
        "google-custom-search"
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Subset of the Custom Search response we consume
#[derive(Debug, Deserialize)]
struct SearchResponse {
    /// Absent entirely when there are no results
    items: Option<Vec<SearchItem>>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    link: String,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GoogleSearchClient {
        let config = SearchConfig {
            api_key: "test-key".to_string(),
            engine_id: "test-cx".to_string(),
            ..Default::default()
        };
        GoogleSearchClient::new(&config).with_endpoint(format!("{}/customsearch/v1", server.uri()))
    }

    #[tokio::test]
    async fn test_search_returns_links_in_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .and(query_param("q", "Altera infuses AI"))
            .and(query_param("key", "test-key"))
            .and(query_param("cx", "test-cx"))
            .and(query_param("num", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    {"link": "https://a.example/1", "title": "A"},
                    {"link": "https://b.example/2", "title": "B"},
                    {"link": "https://c.example/3", "title": "C"}
                ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let links = client.search("Altera infuses AI").await.unwrap();

        assert_eq!(
            links,
            vec![
                "https://a.example/1",
                "https://b.example/2",
                "https://c.example/3"
            ]
        );
    }

    #[tokio::test]
    async fn test_search_without_items_is_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"searchInformation": {}})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let links = client.search("no hits").await.unwrap();
        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn test_search_http_error_propagates() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": {"code": 403, "message": "API key not valid"}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.search("anything").await.unwrap_err();
        assert!(matches!(err, SkgError::SearchError(_)));
    }

    #[tokio::test]
    async fn test_num_results_override() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .and(query_param("num", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{"link": "https://a.example/1"}]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).with_num_results(3);
        let links = client.search("q").await.unwrap();
        assert_eq!(links.len(), 1);
    }
}
