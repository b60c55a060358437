//! Query client for the remote search API.
//!
//! One call to [`QueryClient::search`] is exactly one `POST /api/search`.
//! Nothing is retried, cached or deduplicated.

use common::{ApiErrorBody, SearchQuery, SearchResult};
use reqwest::Client;
use tracing::{debug, error, info};

use crate::config::TrackerConfig;
use crate::error::{Result, SearchError};
use crate::input;

#[derive(Debug, Clone)]
pub struct QueryClient {
    client: Client,
    search_url: String,
    validate_input: bool,
}

impl QueryClient {
    pub fn new(config: &TrackerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(SearchError::Client)?;

        Ok(Self {
            client,
            search_url: config.search_url(),
            validate_input: config.validate_input,
        })
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    /// Sends `query` to the search API and returns the decoded body as-is.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResult> {
        if self.validate_input {
            input::validate(query)?;
        }

        debug!(
            url = %self.search_url,
            query = %query.query,
            location = %query.location,
            "Sending search request"
        );

        let response = self
            .client
            .post(&self.search_url)
            .json(query)
            .send()
            .await
            .map_err(|e| {
                error!("Search request to {} failed: {}", self.search_url, e);
                SearchError::Network(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(&response.text().await.unwrap_or_default());
            error!("Search service error {}: {}", status, message);
            return Err(SearchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await.map_err(SearchError::Network)?;
        let result: SearchResult = serde_json::from_slice(&body).map_err(|e| {
            error!("Failed to parse search response: {}", e);
            SearchError::Malformed(e)
        })?;

        info!(
            jobs = result.jobs.len(),
            companies = result
                .analysis
                .as_ref()
                .map_or(0, |a| a.top_companies.len()),
            "Search completed"
        );
        Ok(result)
    }
}

/// Prefers the service's `{"error": ...}` body, falls back to raw text.
fn error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        return parsed.error;
    }
    match body.trim() {
        "" => "Unknown error".to_string(),
        text => text.to_string(),
    }
}
