// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Scatter-gather search built from pipeline stages.
//!
//! A query is broadcast to every engine, responses are gathered under a
//! shared deadline, and the aggregator keeps whatever arrived in time:
//!
//! ```text
//! iterator(requests) ─► fan_out(N) ─► operations(engine.search) ×N ─► fan_in ─► consume
//!        └──────────── deadline context ────────────────────────────┘   └ background context
//! ```
//!
//! The producer side runs under a deadline so slow engines are abandoned;
//! the consumer runs under a context without that deadline so responses
//! that made it out before expiry are still aggregated.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use the_conduit::context::Context;
//! use the_conduit::search::{SearchAggregatorFactory, SearchEngine, Searcher, SimulatedEngine};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let engines: Vec<Arc<dyn SearchEngine>> = vec![
//!     Arc::new(SimulatedEngine::new("fast", Duration::from_millis(5))),
//!     Arc::new(SimulatedEngine::new("stuck", Duration::from_secs(60))),
//! ];
//! let searcher = Searcher::new(
//!     Arc::new(SearchAggregatorFactory),
//!     Some(Duration::from_millis(200)),
//!     engines,
//! );
//!
//! let summary = searcher.search(&Context::background(), "rust").await.unwrap();
//! assert_eq!(summary.results, vec!["founded by fast".to_string()]);
//! assert!(summary.error.is_none());
//! # }
//! ```

pub mod aggregator;
pub mod engine;
pub mod searcher;

pub use aggregator::{CollectorFactory, SearchAggregator, SearchAggregatorFactory, SearchCollector, SearchSummary};
pub use engine::{SearchEngine, SearchRequest, SearchResponse, SimulatedEngine};
pub use searcher::Searcher;
