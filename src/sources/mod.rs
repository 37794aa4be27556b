// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pipeline sources: the tasks that put values into a stream in the first place.

pub mod generator;
pub mod iterator;

pub use generator::generator;
pub use iterator::{from_iter, iterator, Yielder};
