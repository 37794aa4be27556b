// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the scatter-gather searcher.
//!
//! This module contains message types for logging events related to:
//! * Search request fan-out across engines
//! * Search completion and partial results
//! * Engine responses dropped by the aggregator

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A search was dispatched to every engine.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use std::time::Duration;
/// use the_conduit::observability::messages::search::SearchStarted;
///
/// let msg = SearchStarted {
///     query: "rust",
///     engine_count: 4,
///     timeout: Some(Duration::from_millis(500)),
/// };
/// assert!(msg.to_string().contains("4 engines"));
/// ```
pub struct SearchStarted<'a> {
    pub query: &'a str,
    pub engine_count: usize,
    pub timeout: Option<std::time::Duration>,
}

impl Display for SearchStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.timeout {
            Some(timeout) => write!(
                f,
                "Searching '{}' across {} engines with a {:?} deadline",
                self.query, self.engine_count, timeout
            ),
            None => write!(
                f,
                "Searching '{}' across {} engines without a deadline",
                self.query, self.engine_count
            ),
        }
    }
}

impl StructuredLog for SearchStarted<'_> {
    fn log(&self) {
        tracing::info!(
            query = self.query,
            engine_count = self.engine_count,
            timeout_ms = self.timeout.map(|t| t.as_millis() as u64),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "search",
            span_name = name,
            query = self.query,
            engine_count = self.engine_count,
        )
    }
}

/// A search finished gathering responses.
///
/// # Log Level
/// `info!` - Important operational event
pub struct SearchCompleted {
    pub results: usize,
    pub engine_count: usize,
    pub duration: std::time::Duration,
}

impl Display for SearchCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Search completed: {} of {} engines answered in {:?}",
            self.results, self.engine_count, self.duration
        )
    }
}

impl StructuredLog for SearchCompleted {
    fn log(&self) {
        tracing::info!(
            results = self.results,
            engine_count = self.engine_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "search_completed",
            span_name = name,
            results = self.results,
            engine_count = self.engine_count,
            duration = ?self.duration,
        )
    }
}

/// The aggregator dropped a response instead of keeping it.
///
/// # Log Level
/// `debug!` for timeouts, which are expected under a deadline
pub struct EngineResponseDiscarded<'a> {
    pub reason: &'a dyn std::error::Error,
}

impl Display for EngineResponseDiscarded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Discarding engine response: {}", self.reason)
    }
}

impl StructuredLog for EngineResponseDiscarded<'_> {
    fn log(&self) {
        tracing::debug!(reason = %self.reason, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("response_discarded", span_name = name, reason = %self.reason)
    }
}
