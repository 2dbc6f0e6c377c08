//! Settings structures for brave-research configuration

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::warn;
use url::Url;

/// Default Brave web search endpoint
pub const DEFAULT_BRAVE_URL: &str = "https://api.search.brave.com/res/v1/web/search";

/// Default OpenAI-compatible endpoint
pub const DEFAULT_LLM_URL: &str = "https://api.openai.com/v1";

/// Default completion timeout in seconds; completions run far longer than searches
pub const DEFAULT_LLM_TIMEOUT: f64 = 60.0;

/// Main settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub brave: BraveSettings,
    pub outgoing: OutgoingSettings,
    pub retry: RetrySettings,
    pub llm: LlmSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("RESEARCH_DEBUG") {
            self.general.debug = parse_flag(&val);
        }
        if let Ok(val) = std::env::var("BRAVE_API_KEY") {
            self.brave.api_key = val;
        }
        if let Ok(val) = std::env::var("BRAVE_BASE_URL") {
            self.brave.base_url = val;
        }
        if let Ok(val) = std::env::var("BRAVE_TIMEOUT") {
            match val.parse() {
                Ok(timeout) => self.brave.timeout = timeout,
                Err(_) => warn!("Ignoring unparsable BRAVE_TIMEOUT '{}'", val),
            }
        }
        if let Ok(val) = std::env::var("LLM_API_KEY") {
            self.llm.api_key = Some(val);
        }
        if let Ok(val) = std::env::var("LLM_MODEL") {
            self.llm.model = val;
        }
        if let Ok(val) = std::env::var("LLM_BASE_URL") {
            self.llm.base_url = val;
        }
        if let Ok(val) = std::env::var("LLM_TIMEOUT") {
            match val.parse() {
                Ok(timeout) => self.llm.timeout = timeout,
                Err(_) => warn!("Ignoring unparsable LLM_TIMEOUT '{}'", val),
            }
        }
    }

    /// Check the settings once, before anything is built from them
    pub fn validate(&self) -> Result<()> {
        if self.brave.api_key.trim().is_empty() {
            bail!("Brave API key cannot be empty");
        }
        self.brave.timeout_duration()?;
        if let Err(e) = Url::parse(&self.brave.base_url) {
            bail!("brave.base_url '{}' is invalid: {}", self.brave.base_url, e);
        }
        if self.retry.max_attempts == 0 {
            bail!("retry.max_attempts must be at least 1");
        }
        if let Some(ref key) = self.llm.api_key {
            if key.trim().is_empty() {
                bail!("LLM API key cannot be empty");
            }
            if let Err(e) = Url::parse(&self.llm.base_url) {
                bail!("llm.base_url '{}' is invalid: {}", self.llm.base_url, e);
            }
            self.llm.timeout_duration()?;
        }
        Ok(())
    }
}

/// General settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
}

/// Brave Search API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BraveSettings {
    /// Subscription token sent in `X-Subscription-Token`
    pub api_key: String,
    /// Web search endpoint
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: f64,
    /// Result count used when a caller does not ask for one
    pub default_max_results: u32,
}

impl BraveSettings {
    pub fn timeout_duration(&self) -> Result<Duration> {
        seconds_to_duration("brave.timeout", self.timeout)
    }
}

impl Default for BraveSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BRAVE_URL.to_string(),
            timeout: crate::DEFAULT_TIMEOUT as f64,
            default_max_results: crate::DEFAULT_MAX_RESULTS,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Suffix appended to the User-Agent header
    pub useragent_suffix: Option<String>,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            useragent_suffix: None,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Caller-side retry settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay before the first retry
    pub base_delay_ms: u64,
    /// Upper bound on any single delay
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 500,
            max_delay_ms: 8000,
        }
    }
}

/// Language-model summarizer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// API key; no summarizer is built without one
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Completion timeout in seconds
    pub timeout: f64,
}

impl LlmSettings {
    pub fn timeout_duration(&self) -> Result<Duration> {
        seconds_to_duration("llm.timeout", self.timeout)
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4".to_string(),
            base_url: DEFAULT_LLM_URL.to_string(),
            timeout: DEFAULT_LLM_TIMEOUT,
        }
    }
}

/// Convert a positive number of seconds, rejecting values `Duration` cannot hold
fn seconds_to_duration(field: &str, seconds: f64) -> Result<Duration> {
    if seconds <= 0.0 {
        bail!("{} must be a positive number of seconds", field);
    }
    Duration::try_from_secs_f64(seconds)
        .map_err(|e| anyhow!("{} = {} is invalid: {}", field, seconds, e))
}

/// Read a boolean flag the way shells usually spell it
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
