// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors surfaced by pipeline consumers.

use thiserror::Error;

use crate::context::Cause;
use crate::errors::SearchError;

/// Errors a pipeline reports to its caller.
///
/// Producer-side stages never return these; they stop silently when their
/// context fires. Only [`consume`](crate::consumer::consume) and the
/// aggregators it drives produce a `PipelineError`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PipelineError {
    /// The context was cancelled explicitly.
    #[error("context canceled")]
    Canceled,

    /// The context deadline passed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,

    /// An aggregator rejected an item.
    #[error("aggregator '{aggregator}' failed: {message}")]
    Aggregation { aggregator: String, message: String },

    /// A search-specific failure reported through an aggregator.
    #[error(transparent)]
    Search(#[from] SearchError),
}

impl PipelineError {
    /// True for the two cancellation variants.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, PipelineError::Canceled | PipelineError::DeadlineExceeded)
    }
}

impl From<Cause> for PipelineError {
    fn from(cause: Cause) -> Self {
        match cause {
            Cause::Canceled => PipelineError::Canceled,
            Cause::DeadlineExceeded => PipelineError::DeadlineExceeded,
        }
    }
}
