// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::context::Cause;

/// Per-engine failure carried inside a search response payload.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("search deadline exceeded")]
    DeadlineExceeded,

    #[error("search canceled")]
    Canceled,

    #[error("engine '{engine}' failed: {message}")]
    EngineFailed { engine: String, message: String },
}

impl From<Cause> for SearchError {
    fn from(cause: Cause) -> Self {
        match cause {
            Cause::Canceled => SearchError::Canceled,
            Cause::DeadlineExceeded => SearchError::DeadlineExceeded,
        }
    }
}
