//! Engine traits and types

use crate::error::ResearchError;
use crate::results::SearchResult;
use std::collections::HashMap;
use std::time::Duration;

/// Parameters for building a search request
#[derive(Clone)]
pub struct RequestParams {
    /// Search query string, already trimmed
    pub query: String,
    /// Number of results to ask for, already clamped
    pub count: u32,
    /// Provider API key
    pub api_key: String,
}

impl RequestParams {
    pub fn new(query: impl Into<String>, count: u32, api_key: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            count,
            api_key: api_key.into(),
        }
    }
}

impl std::fmt::Debug for RequestParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestParams")
            .field("query", &self.query)
            .field("count", &self.count)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// HTTP request to be made by the engine
#[derive(Clone)]
pub struct EngineRequest {
    /// URL to request
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters
    pub params: HashMap<String, String>,
    /// JSON body
    pub body: Option<serde_json::Value>,
}

impl EngineRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Get,
            headers: HashMap::new(),
            params: HashMap::new(),
            body: None,
        }
    }

    /// Create a POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            ..Self::get(url)
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add JSON body
    pub fn json(mut self, data: serde_json::Value) -> Self {
        self.body = Some(data);
        self
    }

    /// Look up a header case-insensitively
    pub fn get_header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

// Header values may carry credentials.
impl std::fmt::Debug for EngineRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header_names: Vec<&String> = self.headers.keys().collect();
        f.debug_struct("EngineRequest")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("headers", &header_names)
            .field("params", &self.params)
            .finish()
    }
}

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// HTTP response from engine request
#[derive(Debug)]
pub struct EngineResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
}

impl EngineResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.text)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A search provider: builds its request and normalizes its response
pub trait Engine: Send + Sync {
    /// Engine name
    fn name(&self) -> &str;

    /// Request timeout
    fn timeout(&self) -> Duration {
        Duration::from_secs(crate::DEFAULT_TIMEOUT)
    }

    /// Build the HTTP request for a search
    fn request(&self, params: &RequestParams) -> Result<EngineRequest, ResearchError>;

    /// Parse the HTTP response into at most `max_results` results
    fn response(
        &self,
        response: EngineResponse,
        max_results: u32,
    ) -> Result<Vec<SearchResult>, ResearchError>;
}
