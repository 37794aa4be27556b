// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::consumer::consume;
use crate::context::Context;
use crate::errors::PipelineError;
use crate::observability::messages::{
    search::{SearchCompleted, SearchStarted},
    StructuredLog,
};
use crate::search::aggregator::{CollectorFactory, SearchSummary};
use crate::search::engine::{SearchEngine, SearchRequest, SearchResponse};
use crate::sources::{iterator, Yielder};
use crate::stages::{fan_in, fan_out, operations};
use crate::stream::Stream;
use crate::traits::OpFn;

/// Broadcasts a query to every engine and gathers what comes back in time.
pub struct Searcher {
    engines: Vec<Arc<dyn SearchEngine>>,
    collectors: Arc<dyn CollectorFactory>,
    timeout: Option<Duration>,
}

impl Searcher {
    /// `timeout` bounds the producer side; `None` waits for every engine.
    pub fn new(
        collectors: Arc<dyn CollectorFactory>,
        timeout: Option<Duration>,
        engines: Vec<Arc<dyn SearchEngine>>,
    ) -> Self {
        Self {
            engines,
            collectors,
            timeout,
        }
    }

    pub fn engine_count(&self) -> usize {
        self.engines.len()
    }

    /// Run one search.
    ///
    /// Engine failures land in [`SearchSummary::error`]; `Err` is reserved
    /// for the collector itself rejecting a response.
    pub async fn search(&self, ctx: &Context, query: &str) -> Result<SearchSummary, PipelineError> {
        let started = SearchStarted {
            query,
            engine_count: self.engines.len(),
            timeout: self.timeout,
        };
        started.log();
        let start_time = Instant::now();

        let (producers, _guard) = match self.timeout {
            Some(timeout) => Context::with_timeout(ctx, timeout),
            None => Context::with_cancel(ctx),
        };

        let collector = self.collectors.create();
        let responses = self.gather(&producers, query);

        // Consumer is deliberately not bound to the producers' deadline.
        match consume(&Context::background(), responses, collector.as_ref()).await {
            Err(error) if !error.is_cancellation() => return Err(error),
            _ => {}
        }

        let summary = collector.summary().await;
        SearchCompleted {
            results: summary.results.len(),
            engine_count: self.engines.len(),
            duration: start_time.elapsed(),
        }
        .log();
        Ok(summary)
    }

    fn gather(&self, ctx: &Context, query: &str) -> Stream<SearchResponse> {
        let ask = Arc::new(OpFn::new(|ctx: Context, request: SearchRequest| async move {
            request.engine.search(&ctx, &request).await
        }));

        let engines = self.engines.clone();
        let query = query.to_string();
        let requests = iterator(ctx, move |mut yielder: Yielder<SearchRequest>| async move {
            for engine in engines {
                let request = SearchRequest {
                    query: query.clone(),
                    engine,
                };
                if !yielder.emit(request).await {
                    return;
                }
            }
        });

        let lanes = fan_out(ctx, requests, self.engines.len());
        fan_in(ctx, operations(ctx, ask, lanes))
    }
}
