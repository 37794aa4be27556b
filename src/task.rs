// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::future::Future;
use tokio::task::JoinHandle;
use tracing::instrument::Instrumented;
use tracing::Instrument;

use crate::observability::messages::{stage::StageStarted, StructuredLog};

/// Wrap a stage future in its task span and log the start.
pub(crate) fn instrumented<F>(stage: &'static str, index: usize, fut: F) -> Instrumented<F>
where
    F: Future<Output = ()>,
{
    let started = StageStarted { stage, index };
    let span = started.span(stage);
    span.in_scope(|| started.log());
    fut.instrument(span)
}

/// Spawn one stage task. Every producer, worker and relay goes through here.
pub(crate) fn spawn_stage<F>(stage: &'static str, index: usize, fut: F) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(instrumented(stage, index, fut))
}
