// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod aggregator;
pub mod operation;

pub use aggregator::{AggregateFn, Aggregator};
pub use operation::{OpFn, Operation};
