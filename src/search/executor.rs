//! Research execution and orchestration

use super::client::SearchClient;
use super::retry::RetryPolicy;
use crate::error::ResearchError;
use crate::query::ResearchQuery;
use crate::results::{ResearchResponse, SearchResult};
use crate::summarizer::Summarizer;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Query orchestrator: validate, search, truncate, summarize, assemble
pub struct Research {
    client: SearchClient,
    summarizer: Option<Arc<dyn Summarizer>>,
    retry: RetryPolicy,
}

impl Research {
    /// Create a new orchestrator without a summarizer
    pub fn new(client: SearchClient) -> Self {
        Self {
            client,
            summarizer: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Attach a summarizer
    pub fn with_summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    /// Set the policy used by [`Research::research_with_retry`]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn has_summarizer(&self) -> bool {
        self.summarizer.is_some()
    }

    /// Validate raw input and run one research request.
    ///
    /// Empty queries and missing keys fail before any network call.
    pub async fn research(
        &self,
        raw_query: &str,
        max_results: i64,
        include_summary: bool,
        api_key: &str,
    ) -> Result<ResearchResponse, ResearchError> {
        let query = ResearchQuery::new(raw_query, max_results, include_summary)?;
        self.execute(&query, api_key).await
    }

    /// Run an already validated query once
    pub async fn execute(
        &self,
        query: &ResearchQuery,
        api_key: &str,
    ) -> Result<ResearchResponse, ResearchError> {
        if api_key.trim().is_empty() {
            return Err(ResearchError::validation("Brave API key is required"));
        }

        let max_results = query.max_results();
        let mut results = self
            .client
            .search(query.query(), max_results, api_key)
            .await?;
        results.truncate(max_results as usize);

        let summary = if query.include_summary() {
            self.summarize(query, &results).await
        } else {
            None
        };

        Ok(ResearchResponse::new(query.query(), results, summary))
    }

    /// Run a validated query, retrying rate-limit and timeout failures
    pub async fn research_with_retry(
        &self,
        query: &ResearchQuery,
        api_key: &str,
    ) -> Result<ResearchResponse, ResearchError> {
        self.retry.run(|| self.execute(query, api_key)).await
    }

    /// Run independent queries concurrently, returning outcomes in input order
    pub async fn research_many(
        &self,
        queries: &[ResearchQuery],
        api_key: &str,
    ) -> Vec<Result<ResearchResponse, ResearchError>> {
        info!("Executing {} research queries", queries.len());
        join_all(queries.iter().map(|q| self.execute(q, api_key))).await
    }

    /// Summarize results; every failure is logged and yields `None`
    async fn summarize(
        &self,
        query: &ResearchQuery,
        results: &[SearchResult],
    ) -> Option<String> {
        let summarizer = match self.summarizer {
            Some(ref s) => s,
            None => {
                debug!("Summary requested but no summarizer is configured");
                return None;
            }
        };

        match summarizer.summarize(query.query(), results).await {
            Ok(summary) => summary,
            Err(e) => {
                let err = ResearchError::Summary(format!("{}: {:#}", summarizer.name(), e));
                warn!("{}", err);
                None
            }
        }
    }
}
