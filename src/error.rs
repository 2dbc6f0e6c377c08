//! Error taxonomy and failure classification
//!
//! Every failure surfaced by the research pipeline is one of a fixed set of
//! kinds. Raw transport failures and provider status codes are mapped onto
//! that set by [`classify`], which is pure and total.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest provider body excerpt kept in an error message
const MAX_BODY_EXCERPT: usize = 200;

/// Closed set of error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Auth,
    RateLimit,
    Timeout,
    Provider,
    Summary,
}

impl ErrorKind {
    /// Map a provider HTTP status onto a kind.
    ///
    /// Unknown codes fall into `Provider`.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Auth,
            429 => Self::RateLimit,
            408 | 504 => Self::Timeout,
            _ => Self::Provider,
        }
    }

    /// Whether a caller-side policy may retry this kind
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimit | Self::Timeout)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "ValidationError"),
            Self::Auth => write!(f, "AuthError"),
            Self::RateLimit => write!(f, "RateLimitError"),
            Self::Timeout => write!(f, "TimeoutError"),
            Self::Provider => write!(f, "ProviderError"),
            Self::Summary => write!(f, "SummaryError"),
        }
    }
}

/// Classify a failure from its HTTP status and/or transport error.
///
/// A transport error wins over a bare status since it carries more detail.
pub fn classify(status: Option<u16>, transport: Option<&reqwest::Error>) -> ErrorKind {
    if let Some(err) = transport {
        if err.is_timeout() {
            return ErrorKind::Timeout;
        }
        if let Some(code) = err.status() {
            return ErrorKind::from_status(code.as_u16());
        }
        return ErrorKind::Provider;
    }

    match status {
        Some(code) => ErrorKind::from_status(code),
        None => ErrorKind::Provider,
    }
}

/// Classified error returned by the search client and orchestrator
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResearchError {
    #[error("ValidationError: {0}")]
    Validation(String),

    #[error("AuthError ({status}): {message}")]
    Auth { status: u16, message: String },

    #[error("RateLimitError ({status}): {message}")]
    RateLimit { status: u16, message: String },

    #[error("TimeoutError: {message}")]
    Timeout {
        status: Option<u16>,
        message: String,
    },

    #[error("ProviderError: {message}")]
    Provider {
        status: Option<u16>,
        message: String,
    },

    #[error("SummaryError: {0}")]
    Summary(String),
}

impl ResearchError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            status: None,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            status: None,
            message: message.into(),
        }
    }

    /// Build an error from a non-success provider response
    pub fn from_status(status: u16, body: &str) -> Self {
        match ErrorKind::from_status(status) {
            ErrorKind::Auth => Self::Auth {
                status,
                message: with_body("Invalid Brave API key", body),
            },
            ErrorKind::RateLimit => Self::RateLimit {
                status,
                message: with_body("Rate limit exceeded. Check your Brave API quota.", body),
            },
            ErrorKind::Timeout => Self::Timeout {
                status: Some(status),
                message: format!("Brave API timed out with status {}", status),
            },
            _ => Self::Provider {
                status: Some(status),
                message: format!("Brave API returned {}: {}", status, excerpt(body)),
            },
        }
    }

    /// Build an error from a transport failure
    pub fn from_transport(err: &reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        match classify(None, Some(err)) {
            ErrorKind::Timeout => Self::Timeout {
                status,
                message: format!("Request timed out: {}", err),
            },
            kind => match status {
                Some(code) if kind != ErrorKind::Provider => Self::from_status(code, ""),
                _ => Self::Provider {
                    status,
                    message: format!("Request failed: {}", err),
                },
            },
        }
    }

    /// Kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Auth { .. } => ErrorKind::Auth,
            Self::RateLimit { .. } => ErrorKind::RateLimit,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Provider { .. } => ErrorKind::Provider,
            Self::Summary(_) => ErrorKind::Summary,
        }
    }

    /// Provider status code, when the failure came from one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. } | Self::RateLimit { status, .. } => Some(*status),
            Self::Timeout { status, .. } | Self::Provider { status, .. } => *status,
            Self::Validation(_) | Self::Summary(_) => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }
}

fn with_body(message: &str, body: &str) -> String {
    if body.trim().is_empty() {
        message.to_string()
    } else {
        format!("{} ({})", message, excerpt(body))
    }
}

fn excerpt(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() <= MAX_BODY_EXCERPT {
        body.to_string()
    } else {
        let cut: String = body.chars().take(MAX_BODY_EXCERPT).collect();
        format!("{}...", cut)
    }
}
