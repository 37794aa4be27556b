// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;        // YAML config for the search demo
pub mod consumer;      // terminal sinks
pub mod context;       // cancellation scopes
pub mod errors;        // error handling
pub mod observability;
pub mod search;        // scatter-gather example
pub mod sources;       // generator / iterator
pub mod stages;        // fan-out, fan-in, operation
pub mod stream;        // unbuffered typed streams
pub mod traits;        // Operation, Aggregator

mod task;
