// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::future::Future;

use crate::context::Context;
use crate::observability::messages::{stage::StageClosed, StructuredLog};
use crate::stream::{channel, Emitter, Stream};
use crate::task::spawn_stage;

/// Handle a push-style producer uses to deliver items.
///
/// The stream closes when the producer drops its `Yielder`, which normally
/// happens when the producer's future returns.
pub struct Yielder<T> {
    ctx: Context,
    emitter: Emitter<T>,
    emitted: usize,
}

impl<T> Yielder<T> {
    /// Deliver `value` downstream. `false` means stop producing.
    pub async fn emit(&mut self, value: T) -> bool {
        let delivered = self.emitter.emit(&self.ctx, value).await;
        if delivered {
            self.emitted += 1;
        }
        delivered
    }
}

impl<T> Drop for Yielder<T> {
    fn drop(&mut self) {
        StageClosed {
            stage: "iterator",
            index: 0,
            emitted: self.emitted,
            cancelled: self.ctx.is_done(),
        }
        .log();
    }
}

/// Run a callback-driven producer and stream whatever it yields.
///
/// The producer receives a [`Yielder`] and calls [`Yielder::emit`] once per
/// item, stopping as soon as it returns `false`. Sequences of unknown or
/// unbounded length work; nothing is materialized ahead of the consumer.
///
/// ```rust
/// use the_conduit::context::Context;
/// use the_conduit::sources::iterator;
///
/// # #[tokio::main]
/// # async fn main() {
/// let ctx = Context::background();
/// let stream = iterator(&ctx, |mut y| async move {
///     for i in 1..=3 {
///         if !y.emit(i).await {
///             return;
///         }
///     }
/// });
/// assert_eq!(stream.collect().await, vec![1, 2, 3]);
/// # }
/// ```
pub fn iterator<T, F, Fut>(ctx: &Context, producer: F) -> Stream<T>
where
    T: Send + 'static,
    F: FnOnce(Yielder<T>) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let (emitter, stream) = channel();
    let yielder = Yielder {
        ctx: ctx.clone(),
        emitter,
        emitted: 0,
    };

    spawn_stage("iterator", 0, async move {
        producer(yielder).await;
    });

    stream
}

/// Stream the items of any iterator, pulling each only when the previous
/// one has been taken downstream.
pub fn from_iter<I>(ctx: &Context, items: I) -> Stream<I::Item>
where
    I: IntoIterator,
    I::IntoIter: Send + 'static,
    I::Item: Send + 'static,
{
    let items = items.into_iter();
    iterator(ctx, move |mut yielder| async move {
        for item in items {
            if !yielder.emit(item).await {
                return;
            }
        }
    })
}
