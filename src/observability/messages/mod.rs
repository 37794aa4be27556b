// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Messages are organized by subsystem:
//!
//! * `stage` - stream producer, fan-out, fan-in and operation task lifecycle
//! * `consumer` - terminal sink outcomes
//! * `search` - the scatter-gather searcher

use tracing::Span;

pub mod consumer;
pub mod search;
pub mod stage;

/// A message that knows how to emit itself as a `tracing` event and span.
pub trait StructuredLog: std::fmt::Display {
    /// Emit the message at its designated level with structured fields.
    fn log(&self);

    /// Build a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
