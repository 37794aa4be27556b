// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the terminal consumer.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Input stream closed and every item was aggregated.
///
/// # Log Level
/// `debug!`
pub struct ConsumeCompleted {
    pub aggregated: usize,
}

impl Display for ConsumeCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Consume completed: {} items aggregated", self.aggregated)
    }
}

impl StructuredLog for ConsumeCompleted {
    fn log(&self) {
        tracing::debug!(aggregated = self.aggregated, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("consume_completed", span_name = name, aggregated = self.aggregated)
    }
}

/// The aggregator returned an error; consumption stopped.
///
/// # Log Level
/// `warn!` - The caller receives the error; this records where it happened
///
/// # Example
/// ```
/// use the_conduit::observability::messages::consumer::ConsumeAborted;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "full");
/// let msg = ConsumeAborted { aggregated: 3, error: &error };
/// assert_eq!(msg.to_string(), "Consume aborted after 3 items: full");
/// ```
pub struct ConsumeAborted<'a> {
    pub aggregated: usize,
    pub error: &'a dyn std::error::Error,
}

impl Display for ConsumeAborted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Consume aborted after {} items: {}",
            self.aggregated, self.error
        )
    }
}

impl StructuredLog for ConsumeAborted<'_> {
    fn log(&self) {
        tracing::warn!(aggregated = self.aggregated, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "consume_aborted",
            span_name = name,
            aggregated = self.aggregated,
            error = %self.error,
        )
    }
}

/// The consumer's context fired before the input closed.
///
/// # Log Level
/// `debug!`
pub struct ConsumeCancelled<'a> {
    pub aggregated: usize,
    pub cause: &'a dyn std::error::Error,
}

impl Display for ConsumeCancelled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Consume cancelled after {} items: {}",
            self.aggregated, self.cause
        )
    }
}

impl StructuredLog for ConsumeCancelled<'_> {
    fn log(&self) {
        tracing::debug!(aggregated = self.aggregated, cause = %self.cause, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "consume_cancelled",
            span_name = name,
            aggregated = self.aggregated,
            cause = %self.cause,
        )
    }
}
