// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Intermediate pipeline stages.
//!
//! Every stage takes ownership of its input streams, spawns its tasks and
//! returns its output streams immediately. Stages compose by passing the
//! outputs of one into the next:
//!
//! ```text
//! source ──► fan_out(N) ──► operations ×N ──► fan_in ──► consume
//! ```
//!
//! All stage constructors must be called from within a tokio runtime.

pub mod fan_in;
pub mod fan_out;
pub mod operation;

#[cfg(test)]
mod integration_tests;

pub use fan_in::fan_in;
pub use fan_out::fan_out;
pub use operation::{operation, operations};
