// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for stage task lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Stage task start and shutdown (sources, fan-out workers, relays, operations)
//! * Fan-out configuration adjustments
//! * Relay task failures observed by the fan-in barrier

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A stage task started.
///
/// # Log Level
/// `trace!` - One per spawned task
///
/// # Example
/// ```
/// use the_conduit::observability::messages::stage::StageStarted;
///
/// let msg = StageStarted { stage: "fan_in", index: 2 };
/// assert_eq!(msg.to_string(), "Stage 'fan_in' task 2 started");
/// ```
pub struct StageStarted<'a> {
    pub stage: &'a str,
    pub index: usize,
}

impl Display for StageStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Stage '{}' task {} started", self.stage, self.index)
    }
}

impl StructuredLog for StageStarted<'_> {
    fn log(&self) {
        tracing::trace!(stage = self.stage, index = self.index, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "stage",
            span_name = name,
            stage = self.stage,
            index = self.index,
        )
    }
}

/// A stage task closed its output.
///
/// `cancelled` is true when the context fired before the input was
/// exhausted.
///
/// # Log Level
/// `debug!` - Routine shutdown
pub struct StageClosed<'a> {
    pub stage: &'a str,
    pub index: usize,
    pub emitted: usize,
    pub cancelled: bool,
}

impl Display for StageClosed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let how = if self.cancelled { "cancelled" } else { "exhausted" };
        write!(
            f,
            "Stage '{}' task {} closed ({}) after emitting {} items",
            self.stage, self.index, how, self.emitted
        )
    }
}

impl StructuredLog for StageClosed<'_> {
    fn log(&self) {
        tracing::debug!(
            stage = self.stage,
            index = self.index,
            emitted = self.emitted,
            cancelled = self.cancelled,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "stage_closed",
            span_name = name,
            stage = self.stage,
            index = self.index,
            emitted = self.emitted,
            cancelled = self.cancelled,
        )
    }
}

/// Fan-out was asked for zero workers and was clamped.
///
/// # Log Level
/// `warn!` - Caller passed an unusable value
///
/// # Example
/// ```
/// use the_conduit::observability::messages::stage::FanOutWorkersClamped;
///
/// let msg = FanOutWorkersClamped { requested: 0, used: 1 };
/// assert!(msg.to_string().contains("clamped to 1"));
/// ```
pub struct FanOutWorkersClamped {
    pub requested: usize,
    pub used: usize,
}

impl Display for FanOutWorkersClamped {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Fan-out requested {} workers, clamped to {}",
            self.requested, self.used
        )
    }
}

impl StructuredLog for FanOutWorkersClamped {
    fn log(&self) {
        tracing::warn!(requested = self.requested, used = self.used, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "fan_out_clamped",
            span_name = name,
            requested = self.requested,
            used = self.used,
        )
    }
}

/// A fan-in relay task terminated abnormally (panicked or was aborted).
///
/// # Log Level
/// `error!` - The merged stream lost a branch
pub struct RelayTaskFailed<'a> {
    pub error: &'a dyn std::error::Error,
}

impl Display for RelayTaskFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Fan-in relay task failed: {}", self.error)
    }
}

impl StructuredLog for RelayTaskFailed<'_> {
    fn log(&self) {
        tracing::error!(error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("relay_failed", span_name = name, error = %self.error)
    }
}
