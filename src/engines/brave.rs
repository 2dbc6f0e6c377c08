//! Brave Search API engine implementation
//!
//! Uses the official JSON API. Authentication is the `X-Subscription-Token`
//! header carrying the raw key; Brave answers a bearer `Authorization`
//! header with a plain 401.

use super::traits::*;
use crate::config::{BraveSettings, DEFAULT_BRAVE_URL};
use crate::error::ResearchError;
use crate::results::SearchResult;
use serde::Deserialize;
use std::time::Duration;
use tracing::error;

/// Header Brave reads the subscription token from
pub const SUBSCRIPTION_TOKEN_HEADER: &str = "X-Subscription-Token";

/// Brave web search API engine
pub struct BraveApi {
    base_url: String,
    timeout: Duration,
}

impl BraveApi {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BRAVE_URL.to_string(),
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT),
        }
    }

    pub fn from_settings(settings: &BraveSettings) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: settings.base_url.clone(),
            timeout: settings.timeout_duration()?,
        })
    }

    /// Point the engine at another endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for BraveApi {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for BraveApi {
    fn name(&self) -> &str {
        "brave"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn request(&self, params: &RequestParams) -> Result<EngineRequest, ResearchError> {
        if params.api_key.trim().is_empty() {
            return Err(ResearchError::validation("Brave API key is required"));
        }

        Ok(EngineRequest::get(&self.base_url)
            .header(SUBSCRIPTION_TOKEN_HEADER, &params.api_key)
            .header("Accept", "application/json")
            .param("q", &params.query)
            .param("count", params.count.to_string()))
    }

    fn response(
        &self,
        response: EngineResponse,
        max_results: u32,
    ) -> Result<Vec<SearchResult>, ResearchError> {
        if !response.is_success() {
            return Err(ResearchError::from_status(response.status, &response.text));
        }

        let envelope: Envelope = response.json().map_err(|e| {
            error!("Malformed Brave response envelope: {}", e);
            ResearchError::Provider {
                status: Some(response.status),
                message: format!("Malformed Brave response: {}", e),
            }
        })?;

        let mut results = normalize(envelope);
        results.truncate(max_results as usize);
        Ok(results)
    }
}

/// Top-level Brave response
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    web: Option<WebSection>,
}

#[derive(Debug, Default, Deserialize)]
struct WebSection {
    #[serde(default)]
    results: Vec<WebHit>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WebHit {
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
    score: Option<f64>,
}

/// Project the envelope's web hits onto [`SearchResult`]s.
///
/// All knowledge of Brave's field layout lives here. Provider order is kept.
fn normalize(envelope: Envelope) -> Vec<SearchResult> {
    let hits = envelope.web.unwrap_or_default().results;

    hits.into_iter()
        .filter_map(|hit| {
            let url = hit.url.unwrap_or_default();
            let title = match hit.title {
                Some(title) if !title.trim().is_empty() => title,
                _ => url.clone(),
            };
            if title.trim().is_empty() {
                return None;
            }

            let score = hit
                .score
                .filter(|s| s.is_finite())
                .map(|s| s.clamp(0.0, 1.0))
                .unwrap_or(0.0);

            SearchResult::new(title, url, hit.description.unwrap_or_default(), score).ok()
        })
        .collect()
}
