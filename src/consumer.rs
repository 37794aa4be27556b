// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Terminal sinks.

use std::fmt::Display;

use crate::context::{Cause, Context};
use crate::errors::PipelineError;
use crate::observability::messages::{
    consumer::{ConsumeAborted, ConsumeCancelled, ConsumeCompleted},
    StructuredLog,
};
use crate::stream::Stream;
use crate::traits::Aggregator;

enum Step<T> {
    Cancelled,
    Item(T),
    Closed,
}

/// Drain `input` into `aggregator`.
///
/// * input closes → `Ok(())`
/// * `aggregate` fails → that error, immediately; the rest of the input is
///   left undrained, so upstream must be able to stop on its own (usually
///   because it shares `ctx` or an ancestor of it)
/// * `ctx` fires first → the context's cause
///
/// To keep results produced before a deadline, run the producers under the
/// deadline context and pass a context without that deadline here.
pub async fn consume<T, A>(ctx: &Context, mut input: Stream<T>, aggregator: &A) -> Result<(), PipelineError>
where
    T: Send + 'static,
    A: Aggregator<T> + ?Sized,
{
    let mut aggregated = 0;

    loop {
        let step = tokio::select! {
            biased;
            _ = ctx.done() => Step::Cancelled,
            next = input.recv() => match next {
                Some(item) => Step::Item(item),
                None => Step::Closed,
            },
        };

        match step {
            Step::Item(item) => {
                if let Err(error) = aggregator.aggregate(ctx, item).await {
                    ConsumeAborted {
                        aggregated,
                        error: &error,
                    }
                    .log();
                    return Err(error);
                }
                aggregated += 1;
            }
            Step::Closed => {
                ConsumeCompleted { aggregated }.log();
                return Ok(());
            }
            Step::Cancelled => {
                let error = PipelineError::from(ctx.err().unwrap_or(Cause::Canceled));
                ConsumeCancelled {
                    aggregated,
                    cause: &error,
                }
                .log();
                return Err(error);
            }
        }
    }
}

/// Debug sink: print every value on its own line until the stream closes.
///
/// Ignores cancellation and has no error path; meant for demos only.
pub async fn print<T: Display>(mut input: Stream<T>) {
    while let Some(value) = input.recv().await {
        println!("{}", value);
    }
}
