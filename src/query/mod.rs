//! Research query validation
//!
//! Turns raw caller input into a [`ResearchQuery`]:
//! - the query text is trimmed and must not be empty
//! - `max_results` is clamped into `[MIN_RESULTS, MAX_RESULTS]`
//! - non-numeric `max_results` input is rejected

use crate::error::ResearchError;
use crate::{DEFAULT_MAX_RESULTS, MAX_RESULTS, MIN_RESULTS};
use serde::{Deserialize, Serialize};

/// A validated research request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchQuery {
    query: String,
    max_results: u32,
    include_summary: bool,
}

impl ResearchQuery {
    /// Validate a raw query and clamp the requested result count
    pub fn new(
        raw_query: &str,
        max_results: i64,
        include_summary: bool,
    ) -> Result<Self, ResearchError> {
        let query = raw_query.trim();
        if query.is_empty() {
            return Err(ResearchError::validation("Query cannot be empty"));
        }

        Ok(Self {
            query: query.to_string(),
            max_results: clamp_max_results(max_results),
            include_summary,
        })
    }

    /// Validate a query using the default result count
    pub fn simple(raw_query: &str) -> Result<Self, ResearchError> {
        Self::new(raw_query, DEFAULT_MAX_RESULTS as i64, false)
    }

    /// Validate a query whose result count arrives as text
    pub fn parse(
        raw_query: &str,
        max_results: &str,
        include_summary: bool,
    ) -> Result<Self, ResearchError> {
        let query = Self::new(raw_query, MIN_RESULTS as i64, include_summary)?;
        Ok(query.with_max_results(parse_max_results(max_results)? as i64))
    }

    /// Set the result count, clamping it
    pub fn with_max_results(mut self, max_results: i64) -> Self {
        self.max_results = clamp_max_results(max_results);
        self
    }

    /// Request a summary of the results
    pub fn with_summary(mut self, include_summary: bool) -> Self {
        self.include_summary = include_summary;
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn max_results(&self) -> u32 {
        self.max_results
    }

    pub fn include_summary(&self) -> bool {
        self.include_summary
    }
}

/// Clamp a requested result count into the provider's accepted range
pub fn clamp_max_results(requested: i64) -> u32 {
    requested.clamp(MIN_RESULTS as i64, MAX_RESULTS as i64) as u32
}

/// Parse a textual result count.
///
/// Integers of any magnitude are clamped; anything else is a validation error.
pub fn parse_max_results(raw: &str) -> Result<u32, ResearchError> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(clamp_max_results(value));
    }

    let digits = raw.strip_prefix('-').or_else(|| raw.strip_prefix('+')).unwrap_or(raw);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        // Integer too large for i64
        return Ok(if raw.starts_with('-') { MIN_RESULTS } else { MAX_RESULTS });
    }

    Err(ResearchError::validation(format!(
        "max_results must be an integer, got '{}'",
        raw
    )))
}
