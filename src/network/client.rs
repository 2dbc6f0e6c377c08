//! HTTP client for making requests to the search provider

use super::user_agent::{accept_json, user_agent};
use crate::config::OutgoingSettings;
use crate::engines::{EngineRequest, EngineResponse, HttpMethod};
use crate::error::ResearchError;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Client, Response};
use std::time::Duration;

/// Headers whose values must never show up in debug output
const SENSITIVE_HEADERS: &[&str] = &["x-subscription-token", "authorization"];

/// HTTP client wrapper around a pooled `reqwest::Client`
///
/// Cloning is cheap and shares the connection pool.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> anyhow::Result<Self> {
        Self::with_settings(
            &OutgoingSettings::default(),
            Duration::from_secs(crate::DEFAULT_TIMEOUT),
        )
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings, timeout: Duration) -> anyhow::Result<Self> {
        let mut builder = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true)
            .brotli(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Proxy settings
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            default_timeout: timeout,
            user_agent: user_agent(settings.useragent_suffix.as_deref()),
        })
    }

    /// Execute an engine request
    pub async fn execute(&self, request: EngineRequest) -> Result<EngineResponse, ResearchError> {
        self.execute_with_timeout(request, self.default_timeout).await
    }

    /// Execute an engine request with custom timeout
    pub async fn execute_with_timeout(
        &self,
        request: EngineRequest,
        timeout: Duration,
    ) -> Result<EngineResponse, ResearchError> {
        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        req_builder = req_builder
            .timeout(timeout)
            .header("User-Agent", &self.user_agent);

        if request.get_header("Accept").is_none() {
            req_builder = req_builder.header("Accept", accept_json());
        }

        for (key, value) in &request.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                ResearchError::validation(format!("invalid header name '{}': {}", key, e))
            })?;
            let mut value = HeaderValue::from_str(value).map_err(|_| {
                ResearchError::validation(format!("invalid value for header '{}'", key))
            })?;
            if SENSITIVE_HEADERS.contains(&name.as_str()) {
                value.set_sensitive(true);
            }
            req_builder = req_builder.header(name, value);
        }

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        if let Some(body) = request.body {
            req_builder = req_builder.json(&body);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| ResearchError::from_transport(&e))?;

        Self::parse_response(response).await
    }

    /// Parse response into EngineResponse
    async fn parse_response(response: Response) -> Result<EngineResponse, ResearchError> {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ResearchError::from_transport(&e))?;

        Ok(EngineResponse { status, text })
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
        let client = client.unwrap();
        assert_eq!(client.default_timeout(), Duration::from_secs(10));
        assert!(client.user_agent().starts_with("brave-research/"));
    }

    #[tokio::test]
    async fn test_execute_sends_headers_and_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "rust"))
            .and(header("Accept", "application/json"))
            .and(header("X-Subscription-Token", "key"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let request = EngineRequest::get(format!("{}/search", server.uri()))
            .header("X-Subscription-Token", "key")
            .param("q", "rust");

        let response = client.execute(request).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.text, "{}");
    }

    #[tokio::test]
    async fn test_timeout_is_classified() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let err = client
            .execute_with_timeout(EngineRequest::get(server.uri()), Duration::from_millis(50))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Timeout);
    }

    #[tokio::test]
    async fn test_connection_failure_is_provider_error() {
        let client = HttpClient::new().unwrap();
        let err = client
            .execute(EngineRequest::get("http://127.0.0.1:1/unreachable"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Provider);
    }
}
