// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::context::Context;
use crate::observability::messages::{
    stage::{FanOutWorkersClamped, StageClosed},
    StructuredLog,
};
use crate::stream::{channel, Stream};
use crate::task::spawn_stage;

/// Distribute one input across `workers` output streams.
///
/// Each worker task competes for the shared input; whichever is free first
/// claims the next item and hands it to its own output. There is no
/// assignment policy beyond that, so no ordering or fairness holds across
/// outputs. An output whose worker never wins an item closes empty.
///
/// Every output closes when the input is exhausted or `ctx` fires.
/// `workers == 0` is treated as 1.
pub fn fan_out<T>(ctx: &Context, input: Stream<T>, workers: usize) -> Vec<Stream<T>>
where
    T: Send + 'static,
{
    let used = workers.max(1);
    if used != workers {
        FanOutWorkersClamped {
            requested: workers,
            used,
        }
        .log();
    }

    let shared = Arc::new(Mutex::new(input));

    (0..used)
        .map(|index| {
            let (emitter, output) = channel();
            let shared = Arc::clone(&shared);
            let ctx = ctx.clone();

            spawn_stage("fan_out", index, async move {
                let mut emitted = 0;
                loop {
                    // Holding the lock across recv makes this worker the next claimant.
                    let next = tokio::select! {
                        biased;
                        _ = ctx.done() => None,
                        value = async { shared.lock().await.recv().await } => value,
                    };
                    let Some(value) = next else { break };

                    if !emitter.emit(&ctx, value).await {
                        break;
                    }
                    emitted += 1;
                }
                StageClosed {
                    stage: "fan_out",
                    index,
                    emitted,
                    cancelled: ctx.is_done(),
                }
                .log();
            });

            output
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::generator;
    use std::time::Duration;

    #[tokio::test]
    async fn test_fan_out_returns_requested_outputs() {
        let ctx = Context::background();
        let outputs = fan_out(&ctx, generator(&ctx, 1..=3), 4);
        assert_eq!(outputs.len(), 4);
    }

    #[tokio::test]
    async fn test_zero_workers_clamped_to_one() {
        let ctx = Context::background();
        let mut outputs = fan_out(&ctx, generator(&ctx, vec![1, 2]), 0);
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs.remove(0).collect().await, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_every_item_delivered_exactly_once() {
        let ctx = Context::background();
        let outputs = fan_out(&ctx, generator(&ctx, 0..20), 3);

        let mut handles = Vec::new();
        for output in outputs {
            handles.push(tokio::spawn(output.collect()));
        }
        let mut seen = Vec::new();
        for handle in handles {
            seen.extend(handle.await.unwrap());
        }
        seen.sort();
        assert_eq!(seen, (0..20).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_more_workers_than_items_closes_extras_empty() {
        let ctx = Context::background();
        let outputs = fan_out(&ctx, generator(&ctx, vec!['x']), 5);

        let mut handles = Vec::new();
        for output in outputs {
            handles.push(tokio::spawn(output.collect()));
        }
        let mut counts = Vec::new();
        for handle in handles {
            counts.push(handle.await.unwrap().len());
        }
        assert_eq!(counts.iter().sum::<usize>(), 1);
        assert_eq!(counts.iter().filter(|c| **c == 0).count(), 4);
    }

    #[tokio::test]
    async fn test_outputs_close_on_cancel() {
        let (ctx, guard) = Context::with_cancel(&Context::background());
        // The input never closes on its own.
        let (_emitter, input) = channel::<u32>();
        let outputs = fan_out(&ctx, input, 3);

        guard.cancel();
        for output in outputs {
            let values = tokio::time::timeout(Duration::from_secs(1), output.collect())
                .await
                .expect("output should close after cancel");
            assert!(values.is_empty());
        }
    }
}
