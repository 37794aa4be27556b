// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::context::Context;
use crate::observability::messages::{stage::StageClosed, StructuredLog};
use crate::stream::{channel, Stream};
use crate::task::spawn_stage;
use crate::traits::Operation;

/// Apply `op` to every item of `input`.
///
/// The stage awaits each transform before taking the next item, so the
/// operation's own latency is the per-item cost of this link. Results are
/// emitted in input order, racing `ctx`.
///
/// If `execute` panics the stage task unwinds, its output closes, and the
/// branch ends early. Nothing is converted into a payload error.
pub fn operation<S, D, O>(ctx: &Context, op: Arc<O>, input: Stream<S>) -> Stream<D>
where
    S: Send + 'static,
    D: Send + 'static,
    O: Operation<S, D> + ?Sized + 'static,
{
    spawn_operation(ctx, op, input, 0)
}

/// Build one operation stage per input, all sharing `op`.
///
/// Output `i` carries the results of input `i`. Use this after
/// [`fan_out`](crate::stages::fan_out) to get an N-way worker pool.
pub fn operations<S, D, O, I>(ctx: &Context, op: Arc<O>, inputs: I) -> Vec<Stream<D>>
where
    S: Send + 'static,
    D: Send + 'static,
    O: Operation<S, D> + ?Sized + 'static,
    I: IntoIterator<Item = Stream<S>>,
{
    inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| spawn_operation(ctx, Arc::clone(&op), input, index))
        .collect()
}

fn spawn_operation<S, D, O>(ctx: &Context, op: Arc<O>, mut input: Stream<S>, index: usize) -> Stream<D>
where
    S: Send + 'static,
    D: Send + 'static,
    O: Operation<S, D> + ?Sized + 'static,
{
    let (emitter, output) = channel();
    let ctx = ctx.clone();

    spawn_stage("operation", index, async move {
        let mut emitted = 0;
        while let Some(value) = input.recv_or_done(&ctx).await {
            let result = op.execute(&ctx, value).await;
            if !emitter.emit(&ctx, result).await {
                break;
            }
            emitted += 1;
        }
        StageClosed {
            stage: "operation",
            index,
            emitted,
            cancelled: ctx.is_done(),
        }
        .log();
    });

    output
}
