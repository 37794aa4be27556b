// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::context::Context;
use crate::errors::{PipelineError, SearchError};
use crate::observability::messages::{search::EngineResponseDiscarded, StructuredLog};
use crate::search::engine::SearchResponse;
use crate::traits::Aggregator;

/// What a search gathered: the answers that arrived, sorted, plus the first
/// genuine engine failure if there was one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSummary {
    pub results: Vec<String>,
    pub error: Option<SearchError>,
}

impl SearchSummary {
    /// Collapse into a plain result; any recorded failure wins over the answers.
    pub fn into_result(self) -> Result<Vec<String>, PipelineError> {
        match self.error {
            Some(error) => Err(error.into()),
            None => Ok(self.results),
        }
    }
}

/// Aggregator for search responses that can also report a summary.
#[async_trait]
pub trait SearchCollector: Aggregator<SearchResponse> {
    async fn summary(&self) -> SearchSummary;
}

/// Makes a fresh collector for every search request.
pub trait CollectorFactory: Send + Sync {
    fn create(&self) -> Box<dyn SearchCollector>;
}

/// Default collector.
///
/// Deadline-exceeded responses are dropped: a slow engine is expected under
/// a deadline and is not a failure. Any other failure is remembered (first
/// one wins) without aborting, so answers from healthy engines still count.
#[derive(Debug, Default)]
pub struct SearchAggregator {
    state: Mutex<SearchSummary>,
}

impl SearchAggregator {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Aggregator<SearchResponse> for SearchAggregator {
    async fn aggregate(&self, _ctx: &Context, response: SearchResponse) -> Result<(), PipelineError> {
        let mut state = self.state.lock().await;

        match response.result {
            Ok(text) => state.results.push(text),
            Err(SearchError::DeadlineExceeded) => {
                EngineResponseDiscarded {
                    reason: &SearchError::DeadlineExceeded,
                }
                .log();
            }
            Err(error) => {
                if state.error.is_none() {
                    state.error = Some(error);
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl SearchCollector for SearchAggregator {
    async fn summary(&self) -> SearchSummary {
        let mut state = self.state.lock().await;
        state.results.sort();
        state.clone()
    }
}

/// Factory for [`SearchAggregator`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchAggregatorFactory;

impl CollectorFactory for SearchAggregatorFactory {
    fn create(&self) -> Box<dyn SearchCollector> {
        Box::new(SearchAggregator::new())
    }
}
