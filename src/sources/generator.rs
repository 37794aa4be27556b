// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::context::Context;
use crate::observability::messages::{stage::StageClosed, StructuredLog};
use crate::stream::{channel, Stream};
use crate::task::spawn_stage;

/// Emit a fixed sequence of values in order, then close.
///
/// Each emission races `ctx`. When the context fires the remaining values
/// are dropped and the stream closes without reporting anything; callers
/// learn why from [`Context::err`].
///
/// The values are collected up front, so `values` itself need not be `Send`.
pub fn generator<T, I>(ctx: &Context, values: I) -> Stream<T>
where
    T: Send + 'static,
    I: IntoIterator<Item = T>,
{
    let values: Vec<T> = values.into_iter().collect();
    let (emitter, stream) = channel();
    let ctx = ctx.clone();

    spawn_stage("generator", 0, async move {
        let mut emitted = 0;
        for value in values {
            if !emitter.emit(&ctx, value).await {
                break;
            }
            emitted += 1;
        }
        StageClosed {
            stage: "generator",
            index: 0,
            emitted,
            cancelled: ctx.is_done(),
        }
        .log();
    });

    stream
}
