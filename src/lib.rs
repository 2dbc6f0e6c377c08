//! Brave-Research: a research-query client over the Brave Search API
//!
//! Takes a free-text topic, queries the provider, normalizes the hits into a
//! stable schema, and optionally hands them to a summarizer.

pub mod config;
pub mod engines;
pub mod error;
pub mod network;
pub mod query;
pub mod results;
pub mod search;
pub mod summarizer;

pub use config::Settings;
pub use engines::{BraveApi, Engine};
pub use error::{classify, ErrorKind, ResearchError};
pub use query::ResearchQuery;
pub use results::{ResearchResponse, SearchResult};
pub use search::{Research, RetryPolicy, SearchClient};
pub use summarizer::Summarizer;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for provider requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 10;

/// Fewest results a request may ask for
pub const MIN_RESULTS: u32 = 1;

/// Provider hard limit on results per request
pub const MAX_RESULTS: u32 = 20;

/// Result count used when a caller does not ask for one
pub const DEFAULT_MAX_RESULTS: u32 = 5;
