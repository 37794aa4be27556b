// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::{Config, EngineConfig};
use crate::search::{SearchAggregatorFactory, SearchEngine, Searcher, SimulatedEngine};

/// Builds a ready-to-run [`Searcher`] from configuration.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use the_conduit::config::{Config, EngineConfig, SearcherBuilder};
///
/// let config = Config {
///     query: None,
///     timeout_ms: Some(250),
///     engines: vec![EngineConfig {
///         name: "web".to_string(),
///         latency_ms: 20,
///         fail: None,
///     }],
/// };
///
/// let searcher = SearcherBuilder::from_config(&config);
/// assert_eq!(searcher.engine_count(), 1);
/// ```
pub struct SearcherBuilder;

impl SearcherBuilder {
    /// One [`SimulatedEngine`] per configured engine, the default
    /// aggregator, and the configured (or default) deadline.
    pub fn from_config(cfg: &Config) -> Searcher {
        let engines = cfg.engines.iter().map(Self::engine).collect();
        Searcher::new(Arc::new(SearchAggregatorFactory), Some(cfg.timeout()), engines)
    }

    fn engine(engine: &EngineConfig) -> Arc<dyn SearchEngine> {
        match &engine.fail {
            Some(message) => Arc::new(SimulatedEngine::failing(
                engine.name.clone(),
                engine.latency(),
                message.clone(),
            )),
            None => Arc::new(SimulatedEngine::new(engine.name.clone(), engine.latency())),
        }
    }
}
