// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Every diagnostic event in the crate is a message struct in
//! [`messages`] with a `Display` implementation and a [`StructuredLog`]
//! implementation. Call sites build the struct and call `.log()`, so event
//! text and field names live in one place instead of being scattered as
//! string literals through the stage code.
//!
//! # Usage
//!
//! ```rust
//! use the_conduit::observability::messages::stage::StageStarted;
//! use the_conduit::observability::messages::StructuredLog;
//!
//! StageStarted { stage: "fan_out", index: 0 }.log();
//! ```
//!
//! [`StructuredLog`]: messages::StructuredLog

pub mod messages;
