//! Summarizer collaborators
//!
//! A summarizer turns a validated query and its results into prose. The
//! orchestrator treats every summarizer failure as non-fatal.

mod chat;

pub use chat::ChatCompletionSummarizer;

use crate::results::SearchResult;
use async_trait::async_trait;

/// Turns a result set into summary text
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarizer name, used in logs
    fn name(&self) -> &str;

    /// Summarize `results` for `query`. `Ok(None)` means nothing to say.
    async fn summarize(
        &self,
        query: &str,
        results: &[SearchResult],
    ) -> anyhow::Result<Option<String>>;
}

/// Render results as a numbered plain-text list
pub fn format_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            if r.description().is_empty() {
                format!("{}. {}\n   {}", i + 1, r.title(), r.url())
            } else {
                format!("{}. {}\n   {}\n   {}", i + 1, r.title(), r.url(), r.description())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl Summarizer for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        async fn summarize(
            &self,
            query: &str,
            results: &[SearchResult],
        ) -> anyhow::Result<Option<String>> {
            Ok(Some(format!("{}: {}", query, results.len())))
        }
    }

    #[test]
    fn test_format_results() {
        let results = vec![
            SearchResult::new("Rust", "https://rust-lang.org", "A language", 0.0).unwrap(),
            SearchResult::new("Crates", "https://crates.io", "", 0.0).unwrap(),
        ];
        let text = format_results(&results);
        assert!(text.starts_with("1. Rust\n   https://rust-lang.org\n   A language"));
        assert!(text.ends_with("2. Crates\n   https://crates.io"));
    }

    #[test]
    fn test_summarizer_object() {
        let summarizer: Box<dyn Summarizer> = Box::new(Echo);
        let summary = tokio_test::block_on(summarizer.summarize("rust", &[])).unwrap();
        assert_eq!(summary.as_deref(), Some("rust: 0"));
    }
}
