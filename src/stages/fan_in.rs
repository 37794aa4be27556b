// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use tokio::task::JoinSet;

use crate::context::Context;
use crate::observability::messages::{
    stage::{RelayTaskFailed, StageClosed},
    StructuredLog,
};
use crate::stream::{channel, Stream};
use crate::task::instrumented;

/// Merge any number of streams into one.
///
/// One relay task per input forwards items to the shared output, racing
/// `ctx` on every receive and send. A supervisor joins every relay and only
/// then releases its handle on the output, so the merged stream closes
/// after the last relay finishes: either every input closed, or `ctx` fired
/// and each relay quit without draining its input.
///
/// No ordering holds between items from different inputs.
pub fn fan_in<T, I>(ctx: &Context, inputs: I) -> Stream<T>
where
    T: Send + 'static,
    I: IntoIterator<Item = Stream<T>>,
{
    let (emitter, merged) = channel();
    let emitter = Arc::new(emitter);
    let mut relays = JoinSet::new();

    for (index, mut input) in inputs.into_iter().enumerate() {
        let emitter = Arc::clone(&emitter);
        let ctx = ctx.clone();

        relays.spawn(instrumented("fan_in", index, async move {
            let mut emitted = 0;
            while let Some(value) = input.recv_or_done(&ctx).await {
                if !emitter.emit(&ctx, value).await {
                    break;
                }
                emitted += 1;
            }
            StageClosed {
                stage: "fan_in",
                index,
                emitted,
                cancelled: ctx.is_done(),
            }
            .log();
        }));
    }

    tokio::spawn(async move {
        while let Some(joined) = relays.join_next().await {
            if let Err(error) = joined {
                RelayTaskFailed { error: &error }.log();
            }
        }
        drop(emitter);
    });

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::generator;
    use std::time::Duration;

    #[tokio::test]
    async fn test_fan_in_merges_all_items() {
        let ctx = Context::background();
        let merged = fan_in(
            &ctx,
            vec![
                generator(&ctx, vec![1, 2, 3]),
                generator(&ctx, vec![4, 5, 6]),
                generator(&ctx, vec![7, 8, 9]),
            ],
        );

        let mut values = merged.collect().await;
        assert_eq!(values.len(), 9);
        values.sort();
        assert_eq!(values, (1..=9).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_fan_in_of_nothing_is_closed() {
        let ctx = Context::background();
        let mut merged = fan_in(&ctx, Vec::<Stream<u8>>::new());
        assert_eq!(merged.recv().await, None);
    }

    #[tokio::test]
    async fn test_fan_in_waits_for_slowest_input() {
        let ctx = Context::background();
        let (slow_emitter, slow) = channel();
        let merged = fan_in(&ctx, vec![generator(&ctx, vec![1]), slow]);

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            slow_emitter.emit(&Context::background(), 2).await;
        });

        let mut values = merged.collect().await;
        values.sort();
        assert_eq!(values, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_fan_in_closes_on_cancel_despite_open_input() {
        let (ctx, guard) = Context::with_cancel(&Context::background());
        // Never closed while the test runs.
        let (_held, open) = channel::<u32>();
        let merged = fan_in(&ctx, vec![generator(&ctx, vec![1]), open]);

        tokio::time::sleep(Duration::from_millis(10)).await;
        guard.cancel();

        tokio::time::timeout(Duration::from_secs(1), merged.collect())
            .await
            .expect("merged stream must close after cancel");
    }
}
