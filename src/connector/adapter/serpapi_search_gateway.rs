use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::SearchGateway;
use crate::domain::{SearchOutcome, SearchResult, MAX_SEARCH_RESULTS};

pub const DEFAULT_BASE_URL: &str = "https://serpapi.com";
const SEARCH_PATH: &str = "/search.json";
const DEFAULT_ENGINE: &str = "google";

/// Subset of the SerpAPI response we care about.
#[derive(Debug, Deserialize)]
pub struct SerpApiResponse {
    #[serde(default)]
    organic_results: Option<Vec<OrganicResult>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    title: Option<String>,
    snippet: Option<String>,
    link: Option<String>,
}

impl From<OrganicResult> for SearchResult {
    fn from(r: OrganicResult) -> Self {
        SearchResult::new(r.title, r.snippet, r.link)
    }
}

/// [`SearchGateway`] backed by the SerpAPI Google engine.
///
/// Requests up to three organic results per query. Every failure (transport,
/// non-2xx status, undecodable body, provider-reported error) is folded into
/// [`SearchOutcome::Error`].
///
/// ```text
/// SERP_API_KEY=...                       required
/// SERP_API_BASE_URL=https://serpapi.com  optional
/// SERP_API_ENGINE=google                 optional
/// ```
pub struct SerpApiSearchGateway {
    client: reqwest::Client,
    api_key: String,
    engine: String,
    url: String,
}

impl SerpApiSearchGateway {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), SEARCH_PATH);
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            engine: DEFAULT_ENGINE.to_string(),
            url,
        }
    }

    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        self
    }

    /// Reads `SERP_API_KEY`, `SERP_API_BASE_URL` and `SERP_API_ENGINE`.
    /// Returns `None` when the key is absent or empty.
    pub fn from_env() -> Option<Self> {
        let key = std::env::var("SERP_API_KEY").ok().filter(|k| !k.is_empty())?;
        let base = std::env::var("SERP_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let engine = std::env::var("SERP_API_ENGINE")
            .unwrap_or_else(|_| DEFAULT_ENGINE.to_string());
        Some(Self::new(key, base).with_engine(engine))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Map a decoded provider response onto a [`SearchOutcome`].
    pub fn outcome_from_response(response: SerpApiResponse) -> SearchOutcome {
        match response.organic_results {
            Some(results) => SearchOutcome::from_results(
                results
                    .into_iter()
                    .take(MAX_SEARCH_RESULTS)
                    .map(SearchResult::from)
                    .collect(),
            ),
            None => match response.error {
                // SerpAPI reports "no results" through the error field too.
                Some(e) if !e.contains("hasn't returned any results") => SearchOutcome::Error(e),
                _ => SearchOutcome::Empty,
            },
        }
    }

    /// Describe a non-2xx reply, keeping the provider's `error` text when the
    /// body carries one.
    fn status_error(status: reqwest::StatusCode, body: &str) -> String {
        match serde_json::from_str::<SerpApiResponse>(body) {
            Ok(SerpApiResponse {
                error: Some(error), ..
            }) => format!("HTTP {status}: {error}"),
            _ => format!("HTTP {status}"),
        }
    }

    async fn fetch(&self, query: &str) -> Result<SerpApiResponse, String> {
        let num = MAX_SEARCH_RESULTS.to_string();
        let params = [
            ("engine", self.engine.as_str()),
            ("q", query),
            ("num", num.as_str()),
            ("api_key", self.api_key.as_str()),
        ];

        let response = self
            .client
            .get(&self.url)
            .query(&params)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("SerpApiSearchGateway: API returned {status}: {body}");
            return Err(Self::status_error(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| format!("failed to parse response: {e}"))
    }
}

#[async_trait]
impl SearchGateway for SerpApiSearchGateway {
    async fn search(&self, query: &str) -> SearchOutcome {
        match self.fetch(query).await {
            Ok(response) => {
                let outcome = Self::outcome_from_response(response);
                debug!("SerpApiSearchGateway: {} result(s)", outcome.result_count());
                outcome
            }
            Err(e) => SearchOutcome::Error(e),
        }
    }

    fn provider_name(&self) -> &str {
        "serpapi"
    }
}
