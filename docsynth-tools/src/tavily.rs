use std::time::Duration;

use docsynth_core::{DocsynthError, SearchTool, ToolError};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

pub const TAVILY_BASE_URL: &str = "https://api.tavily.com";

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    content: String,
}

/// Web search through the Tavily API; returns the content of the best hit.
#[derive(Clone)]
pub struct TavilySearch {
    http: Client,
    base_url: String,
    api_key: SecretString,
    max_results: usize,
}

impl TavilySearch {
    pub fn new(api_key: impl Into<String>) -> Result<Self, DocsynthError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(DocsynthError::InvalidConfig(
                "tavily api key is empty".to_string(),
            ));
        }
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|err| DocsynthError::InvalidConfig(err.to_string()))?;
        Ok(Self {
            http,
            base_url: TAVILY_BASE_URL.to_string(),
            api_key: SecretString::new(api_key),
            max_results: 1,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait::async_trait]
impl SearchTool for TavilySearch {
    fn name(&self) -> &str {
        "tavily"
    }

    async fn search(&self, query: &str) -> Result<String, ToolError> {
        if query.trim().is_empty() {
            return Err(ToolError::InvalidInput("query is empty".to_string()));
        }

        let request = SearchRequest {
            query,
            max_results: self.max_results,
        };
        let response = self
            .http
            .post(self.search_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|err| ToolError::ExecutionFailed(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ToolError::ExecutionFailed(format!("{status}: {body}")));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|err| ToolError::ExecutionFailed(err.to_string()))?;

        tracing::debug!(hits = body.results.len(), "tavily search finished");
        body.results
            .into_iter()
            .map(|hit| hit.content)
            .find(|content| !content.trim().is_empty())
            .ok_or_else(|| ToolError::NoResults(query.to_string()))
    }
}
