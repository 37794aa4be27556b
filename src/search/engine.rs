// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::context::{Cause, Context};
use crate::errors::SearchError;

/// A search backend. Opaque to the pipeline; it only has to honour `ctx`.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Answer `request`. Failures, including running out of time, are
    /// reported inside the response.
    async fn search(&self, ctx: &Context, request: &SearchRequest) -> SearchResponse;

    fn name(&self) -> &str;
}

/// One query addressed to one engine.
#[derive(Clone)]
pub struct SearchRequest {
    pub query: String,
    pub engine: Arc<dyn SearchEngine>,
}

impl std::fmt::Debug for SearchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchRequest")
            .field("query", &self.query)
            .field("engine", &self.engine.name())
            .finish()
    }
}

/// An engine's answer, or why it has none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResponse {
    pub engine: String,
    pub result: Result<String, SearchError>,
}

impl SearchResponse {
    pub fn found(engine: &str, text: impl Into<String>) -> Self {
        Self {
            engine: engine.to_string(),
            result: Ok(text.into()),
        }
    }

    pub fn failed(engine: &str, error: SearchError) -> Self {
        Self {
            engine: engine.to_string(),
            result: Err(error),
        }
    }
}

/// Engine that answers after a fixed latency, or fails with a fixed message.
#[derive(Debug, Clone)]
pub struct SimulatedEngine {
    name: String,
    latency: Duration,
    failure: Option<String>,
}

impl SimulatedEngine {
    pub fn new(name: impl Into<String>, latency: Duration) -> Self {
        Self {
            name: name.into(),
            latency,
            failure: None,
        }
    }

    /// An engine that takes `latency` and then reports `message` as an error.
    pub fn failing(name: impl Into<String>, latency: Duration, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            latency,
            failure: Some(message.into()),
        }
    }
}

#[async_trait]
impl SearchEngine for SimulatedEngine {
    async fn search(&self, ctx: &Context, _request: &SearchRequest) -> SearchResponse {
        tokio::select! {
            biased;
            _ = ctx.done() => {
                let cause = ctx.err().unwrap_or(Cause::Canceled);
                return SearchResponse::failed(&self.name, cause.into());
            }
            _ = tokio::time::sleep(self.latency) => {}
        }

        match &self.failure {
            Some(message) => SearchResponse::failed(
                &self.name,
                SearchError::EngineFailed {
                    engine: self.name.clone(),
                    message: message.clone(),
                },
            ),
            None => SearchResponse::found(&self.name, format!("founded by {}", self.name)),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_for(engine: &Arc<SimulatedEngine>) -> SearchRequest {
        SearchRequest {
            query: "query".to_string(),
            engine: engine.clone(),
        }
    }

    #[tokio::test]
    async fn test_simulated_engine_answers() {
        let engine = Arc::new(SimulatedEngine::new("engine1", Duration::from_millis(5)));
        let response = engine.search(&Context::background(), &request_for(&engine)).await;
        assert_eq!(response, SearchResponse::found("engine1", "founded by engine1"));
    }

    #[tokio::test]
    async fn test_simulated_engine_reports_deadline() {
        let engine = Arc::new(SimulatedEngine::new("slow", Duration::from_secs(10)));
        let (ctx, _guard) = Context::with_timeout(&Context::background(), Duration::from_millis(10));

        let response = engine.search(&ctx, &request_for(&engine)).await;
        assert_eq!(response.result, Err(SearchError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn test_failing_engine_reports_failure() {
        let engine = Arc::new(SimulatedEngine::failing("broken", Duration::ZERO, "index offline"));
        let response = engine.search(&Context::background(), &request_for(&engine)).await;
        assert_eq!(
            response.result,
            Err(SearchError::EngineFailed {
                engine: "broken".to_string(),
                message: "index offline".to_string(),
            })
        );
    }

    #[test]
    fn test_request_debug_names_engine() {
        let engine = Arc::new(SimulatedEngine::new("engine9", Duration::ZERO));
        let debug = format!("{:?}", request_for(&engine));
        assert!(debug.contains("engine9"));
    }
}
