//! Web-search collaborator contract and providers.

use std::sync::Arc;

use anyhow::{anyhow, Context as _};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

const TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";
const TAVILY_KEY_ENV: &str = "TAVILY_API_KEY";

/// One search hit as delivered on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub raw_content: Option<String>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

/// External search collaborator: a query plus result bound in, an ordered
/// result list out.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize)
        -> anyhow::Result<Vec<SearchResult>>;
}

pub type DynSearchProvider = Arc<dyn SearchProvider>;

/// Tavily-backed provider. The API key is read from the environment at
/// construction; an empty key fails at first use, not at startup.
pub struct TavilyClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl TavilyClient {
    pub fn from_env() -> Self {
        Self::new(std::env::var(TAVILY_KEY_ENV).unwrap_or_default())
    }

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            endpoint: TAVILY_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> anyhow::Result<Vec<SearchResult>> {
        if self.api_key.is_empty() {
            return Err(anyhow!("{TAVILY_KEY_ENV} is not set"));
        }

        let body = json!({
            "query": query,
            "search_depth": "basic",
            "max_results": max_results,
            "include_answer": false,
            "include_raw_content": false,
        });

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("tavily request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(anyhow!("tavily returned {status}: {detail}"));
        }

        let payload: TavilyResponse = response
            .json()
            .await
            .context("tavily response was not valid JSON")?;

        debug!(%query, results = payload.results.len(), "tavily search completed");
        Ok(payload.results.into_iter().take(max_results).collect())
    }
}

/// In-memory provider for tests and offline runs. Results are registered
/// per query; unknown queries return an empty list.
#[derive(Default)]
pub struct StubSearchProvider {
    store: DashMap<String, Vec<SearchResult>>,
}

impl StubSearchProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, query: impl Into<String>, results: Vec<SearchResult>) {
        self.store.insert(query.into(), results);
    }
}

#[async_trait]
impl SearchProvider for StubSearchProvider {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> anyhow::Result<Vec<SearchResult>> {
        let results = self
            .store
            .get(query)
            .map(|entry| entry.clone())
            .unwrap_or_default();
        Ok(results.into_iter().take(max_results).collect())
    }
}
