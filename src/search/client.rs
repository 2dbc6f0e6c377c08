//! Search client: one provider call per invocation

use crate::engines::{Engine, RequestParams};
use crate::error::ResearchError;
use crate::network::HttpClient;
use crate::query::clamp_max_results;
use crate::results::SearchResult;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Runs a single search against one engine
///
/// Stateless apart from the shared connection pool, so one instance can serve
/// concurrent callers. No retries happen here.
#[derive(Clone)]
pub struct SearchClient {
    client: HttpClient,
    engine: Arc<dyn Engine>,
}

impl SearchClient {
    pub fn new(client: HttpClient, engine: Arc<dyn Engine>) -> Self {
        Self { client, engine }
    }

    pub fn engine(&self) -> &dyn Engine {
        self.engine.as_ref()
    }

    /// Search the provider, returning at most `max_results` hits in provider order.
    ///
    /// Dropping the returned future aborts the in-flight request.
    pub async fn search(
        &self,
        query: &str,
        max_results: u32,
        api_key: &str,
    ) -> Result<Vec<SearchResult>, ResearchError> {
        let engine_name = self.engine.name();
        let count = clamp_max_results(max_results as i64);
        let engine_timeout = self.engine.timeout();
        let start = Instant::now();

        let request = self
            .engine
            .request(&RequestParams::new(query, count, api_key))?;

        info!("Searching {} for: {}", engine_name, query);
        debug!("Request {:?} with timeout {:?}", request, engine_timeout);

        let call = self.client.execute_with_timeout(request, engine_timeout);
        let response = match timeout(engine_timeout, call).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!("Request failed for {}: {}", engine_name, e);
                return Err(e);
            }
            Err(_) => {
                warn!("Timeout for engine {}", engine_name);
                return Err(ResearchError::timeout(format!(
                    "{} did not answer within {:?}",
                    engine_name, engine_timeout
                )));
            }
        };

        let results = self.engine.response(response, count).map_err(|e| {
            warn!("{} search failed: {}", engine_name, e);
            e
        })?;

        info!(
            "Found {} results for query: {} in {:?}",
            results.len(),
            query,
            start.elapsed()
        );

        Ok(results)
    }
}
