//! Result type definitions

use crate::error::ResearchError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single normalized search hit
///
/// All four fields are always present. Construction goes through
/// [`SearchResult::new`], which rejects empty titles and scores outside
/// `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SearchResultFields")]
pub struct SearchResult {
    title: String,
    url: String,
    description: String,
    #[serde(rename = "score")]
    relevance_score: f64,
}

impl SearchResult {
    /// Create a new result
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
        relevance_score: f64,
    ) -> Result<Self, ResearchError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ResearchError::validation("result title cannot be empty"));
        }
        if !(0.0..=1.0).contains(&relevance_score) {
            return Err(ResearchError::validation(format!(
                "relevance score {} is outside [0.0, 1.0]",
                relevance_score
            )));
        }

        Ok(Self {
            title,
            url: url.into(),
            description: description.into(),
            relevance_score,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn relevance_score(&self) -> f64 {
        self.relevance_score
    }
}

/// Unvalidated wire form of [`SearchResult`]
#[derive(Debug, Deserialize)]
struct SearchResultFields {
    title: String,
    url: String,
    description: String,
    #[serde(default)]
    score: f64,
}

impl TryFrom<SearchResultFields> for SearchResult {
    type Error = ResearchError;

    fn try_from(fields: SearchResultFields) -> Result<Self, Self::Error> {
        SearchResult::new(fields.title, fields.url, fields.description, fields.score)
    }
}

/// Final artifact of a research request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ResearchResponseFields")]
pub struct ResearchResponse {
    query: String,
    results: Vec<SearchResult>,
    summary: Option<String>,
    total_results: usize,
    timestamp: DateTime<Utc>,
}

impl ResearchResponse {
    /// Assemble a response, stamping it with the current time
    pub fn new(
        query: impl Into<String>,
        results: Vec<SearchResult>,
        summary: Option<String>,
    ) -> Self {
        let total_results = results.len();
        Self {
            query: query.into(),
            results,
            summary,
            total_results,
            timestamp: Utc::now(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Number of results carried, not the provider's corpus count
    pub fn total_results(&self) -> usize {
        self.total_results
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Unvalidated wire form of [`ResearchResponse`]
#[derive(Debug, Deserialize)]
struct ResearchResponseFields {
    query: String,
    results: Vec<SearchResult>,
    #[serde(default)]
    summary: Option<String>,
    total_results: usize,
    timestamp: DateTime<Utc>,
}

impl TryFrom<ResearchResponseFields> for ResearchResponse {
    type Error = ResearchError;

    fn try_from(fields: ResearchResponseFields) -> Result<Self, Self::Error> {
        if fields.total_results != fields.results.len() {
            return Err(ResearchError::validation(format!(
                "total_results {} does not match {} results",
                fields.total_results,
                fields.results.len()
            )));
        }

        Ok(Self {
            query: fields.query,
            results: fields.results,
            summary: fields.summary,
            total_results: fields.total_results,
            timestamp: fields.timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_result_creation() {
        let result = SearchResult::new(
            "Rust Book",
            "https://doc.rust-lang.org/book/",
            "The Rust Programming Language",
            0.9,
        )
        .unwrap();

        assert_eq!(result.title(), "Rust Book");
        assert_eq!(result.url(), "https://doc.rust-lang.org/book/");
        assert_eq!(result.relevance_score(), 0.9);
    }

    #[test]
    fn test_empty_description_is_allowed() {
        let result = SearchResult::new("Title", "https://example.com", "", 0.0).unwrap();
        assert_eq!(result.description(), "");
    }

    #[test]
    fn test_score_bounds() {
        assert!(SearchResult::new("t", "https://a.com", "", 0.0).is_ok());
        assert!(SearchResult::new("t", "https://a.com", "", 1.0).is_ok());

        let err = SearchResult::new("t", "https://a.com", "", 1.5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        let err = SearchResult::new("t", "https://a.com", "", -0.1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(SearchResult::new("t", "https://a.com", "", f64::NAN).is_err());
    }

    #[test]
    fn test_blank_title_rejected() {
        let err = SearchResult::new("   ", "https://a.com", "", 0.5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_unparsable_url_kept() {
        let result = SearchResult::new("t", "not a url", "", 0.1).unwrap();
        assert_eq!(result.url(), "not a url");
    }

    #[test]
    fn test_serialized_shape() {
        let result = SearchResult::new("t", "https://a.com", "d", 0.25).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["score"], 0.25);
        assert_eq!(json["description"], "d");

        let back: SearchResult =
            serde_json::from_str(r#"{"title":"t","url":"https://a.com","description":"d"}"#)
                .unwrap();
        assert_eq!(back.relevance_score(), 0.0);

        let invalid: Result<SearchResult, _> =
            serde_json::from_str(r#"{"title":"t","url":"u","description":"","score":3.0}"#);
        assert!(invalid.is_err());
    }

    #[test]
    fn test_response_counts_results() {
        let results = vec![
            SearchResult::new("a", "https://a.com", "", 0.0).unwrap(),
            SearchResult::new("b", "https://b.com", "", 0.0).unwrap(),
        ];
        let response = ResearchResponse::new("query", results, None);

        assert_eq!(response.query(), "query");
        assert_eq!(response.total_results(), 2);
        assert_eq!(response.total_results(), response.results().len());
        assert!(response.summary().is_none());
        assert!(response.timestamp() <= Utc::now());
    }

    #[test]
    fn test_response_deserialization_checks_count() {
        let results = vec![SearchResult::new("a", "https://a.com", "", 0.5).unwrap()];
        let response = ResearchResponse::new("query", results, Some("summary".to_string()));
        let json = serde_json::to_string(&response).unwrap();

        let back: ResearchResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, response);

        let mut tampered = serde_json::to_value(&response).unwrap();
        tampered["total_results"] = serde_json::json!(5);
        let invalid: Result<ResearchResponse, _> = serde_json::from_value(tampered);
        assert!(invalid.is_err());
    }
}
