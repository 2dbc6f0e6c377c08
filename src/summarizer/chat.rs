//! OpenAI-compatible chat-completions summarizer

use super::{format_results, Summarizer};
use crate::config::{LlmSettings, DEFAULT_LLM_TIMEOUT};
use crate::engines::EngineRequest;
use crate::network::HttpClient;
use crate::results::SearchResult;
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const SYSTEM_PROMPT: &str = "You are an expert research assistant. Summarize the web search \
results you are given into a clear, well-organized answer to the user's research query. \
Focus on credible sources, be concise but thorough, and cite source URLs.";

/// Summarizer backed by a `/chat/completions` endpoint
pub struct ChatCompletionSummarizer {
    client: HttpClient,
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl ChatCompletionSummarizer {
    pub fn new(
        client: HttpClient,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            timeout: Duration::from_secs_f64(DEFAULT_LLM_TIMEOUT),
        }
    }

    /// Build from settings; `None` when no API key is configured
    pub fn from_settings(client: HttpClient, settings: &LlmSettings) -> Result<Option<Self>> {
        let api_key = match settings.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
            Some(key) => key,
            None => return Ok(None),
        };

        let summarizer = Self::new(
            client,
            settings.base_url.clone(),
            api_key.clone(),
            settings.model.clone(),
        )
        .with_timeout(settings.timeout_duration()?);
        Ok(Some(summarizer))
    }

    /// Completion timeout, independent of the shared client's search timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl Summarizer for ChatCompletionSummarizer {
    fn name(&self) -> &str {
        &self.model
    }

    async fn summarize(&self, query: &str, results: &[SearchResult]) -> Result<Option<String>> {
        if results.is_empty() {
            return Ok(None);
        }

        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {
                    "role": "user",
                    "content": format!(
                        "Research query: {}\n\nSearch results:\n{}",
                        query,
                        format_results(results)
                    ),
                },
            ],
        });

        let request = EngineRequest::post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(body);

        let response = self
            .client
            .execute_with_timeout(request, self.timeout)
            .await
            .map_err(|e| anyhow!("chat completion request failed: {}", e))?;

        if !response.is_success() {
            bail!("chat completion returned {}", response.status);
        }

        let parsed: ChatResponse = response
            .json()
            .context("malformed chat completion response")?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutgoingSettings;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn results() -> Vec<SearchResult> {
        vec![SearchResult::new("Rust", "https://rust-lang.org", "A language", 0.0).unwrap()]
    }

    #[tokio::test]
    async fn test_summary_from_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer llm-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": " Rust is fast. "}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let summarizer = ChatCompletionSummarizer::new(
            HttpClient::new().unwrap(),
            format!("{}/v1/", server.uri()),
            "llm-key",
            "gpt-4",
        );

        let summary = summarizer.summarize("rust", &results()).await.unwrap();
        assert_eq!(summary.as_deref(), Some("Rust is fast."));
    }

    #[tokio::test]
    async fn test_error_status_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let summarizer =
            ChatCompletionSummarizer::new(HttpClient::new().unwrap(), server.uri(), "k", "m");
        assert!(summarizer.summarize("rust", &results()).await.is_err());
    }

    #[tokio::test]
    async fn test_no_results_skips_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let summarizer =
            ChatCompletionSummarizer::new(HttpClient::new().unwrap(), server.uri(), "k", "m");
        assert_eq!(summarizer.summarize("rust", &[]).await.unwrap(), None);
    }

    #[test]
    fn test_from_settings_requires_key() {
        let client = HttpClient::new().unwrap();
        let summarizer =
            ChatCompletionSummarizer::from_settings(client.clone(), &LlmSettings::default());
        assert!(summarizer.unwrap().is_none());

        let settings = LlmSettings {
            api_key: Some("k".to_string()),
            timeout: 45.0,
            ..Default::default()
        };
        let summarizer = ChatCompletionSummarizer::from_settings(client.clone(), &settings)
            .unwrap()
            .unwrap();
        assert_eq!(summarizer.endpoint(), "https://api.openai.com/v1/chat/completions");
        assert_eq!(summarizer.timeout(), Duration::from_secs(45));

        let settings = LlmSettings {
            timeout: f64::NAN,
            ..settings
        };
        assert!(ChatCompletionSummarizer::from_settings(client, &settings).is_err());
    }

    #[tokio::test]
    async fn test_completion_outlives_search_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(300))
                    .set_body_json(json!({
                        "choices": [{"message": {"content": "Slow but complete."}}]
                    })),
            )
            .expect(1)
            .mount(&server)
            .await;

        // Shared client tuned for a fast search provider
        let client =
            HttpClient::with_settings(&OutgoingSettings::default(), Duration::from_millis(50))
                .unwrap();
        let summarizer = ChatCompletionSummarizer::new(client, server.uri(), "k", "m")
            .with_timeout(Duration::from_secs(5));

        let summary = summarizer.summarize("rust", &results()).await.unwrap();
        assert_eq!(summary.as_deref(), Some("Slow but complete."));
    }
}
