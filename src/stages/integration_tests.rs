// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::consumer::consume;
use crate::context::Context;
use crate::errors::PipelineError;
use crate::sources::{from_iter, generator};
use crate::stages::{fan_in, fan_out, operation, operations};
use crate::traits::{AggregateFn, OpFn};

/// End-to-end compositions of sources, stages and the consumer
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fan_in_cardinality() {
        for sources in 1..=5 {
            let ctx = Context::background();
            let inputs = (0..sources).map(|s| generator(&ctx, vec![s; 3]));
            let count = fan_in(&ctx, inputs).collect().await.len();
            assert_eq!(count, sources * 3, "with {} sources", sources);
        }
    }

    #[tokio::test]
    async fn test_fan_out_fan_in_round_trip() {
        for workers in 1..=9 {
            let ctx = Context::background();
            let outputs = fan_out(&ctx, generator(&ctx, 1..=9), workers);
            let mut values = fan_in(&ctx, outputs).collect().await;
            values.sort();
            assert_eq!(values, (1..=9).collect::<Vec<_>>(), "with {} workers", workers);
        }
    }

    #[tokio::test]
    async fn test_worker_pool_applies_operation_to_every_item() {
        let ctx = Context::background();
        let square = Arc::new(OpFn::new(|_ctx: Context, value: u64| async move { value * value }));

        let merged = fan_in(
            &ctx,
            operations(&ctx, square, fan_out(&ctx, from_iter(&ctx, 1..=10u64), 4)),
        );

        let mut values = merged.collect().await;
        values.sort();
        assert_eq!(values, (1..=10u64).map(|v| v * v).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_worker_pool_runs_in_parallel() {
        let ctx = Context::background();
        let nap = Arc::new(OpFn::new(|_ctx: Context, value: u32| async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            value
        }));

        let started = tokio::time::Instant::now();
        let merged = fan_in(&ctx, operations(&ctx, nap, fan_out(&ctx, generator(&ctx, 0..4), 4)));
        assert_eq!(merged.collect().await.len(), 4);
        assert!(
            started.elapsed() < Duration::from_millis(350),
            "four 100ms items on four workers took {:?}",
            started.elapsed()
        );
    }

    #[tokio::test]
    async fn test_deadline_shuts_down_whole_chain() {
        let (ctx, _guard) = Context::with_timeout(&Context::background(), Duration::from_millis(50));
        let stall = Arc::new(OpFn::new(|ctx: Context, value: u64| async move {
            ctx.done().await;
            value
        }));

        // Unbounded source, stalled workers: only the deadline can end this.
        let merged = fan_in(
            &ctx,
            operations(&ctx, stall, fan_out(&ctx, from_iter(&ctx, 0u64..), 3)),
        );
        let ignore = AggregateFn::new(|_ctx: Context, _item: u64| async { Ok(()) });

        let result = tokio::time::timeout(Duration::from_secs(1), consume(&ctx, merged, &ignore))
            .await
            .expect("pipeline must shut down after the deadline");
        assert_eq!(result, Err(PipelineError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn test_independent_consumer_keeps_results_after_deadline() {
        let (producers, _guard) =
            Context::with_timeout(&Context::background(), Duration::from_millis(100));
        let delay = Arc::new(OpFn::new(|ctx: Context, millis: u64| async move {
            tokio::select! {
                _ = ctx.done() => None,
                _ = tokio::time::sleep(Duration::from_millis(millis)) => Some(millis),
            }
        }));

        let merged = fan_in(
            &producers,
            operations(
                &producers,
                delay,
                fan_out(&producers, generator(&producers, vec![10, 20, 5000]), 3),
            ),
        );

        let kept = std::sync::Mutex::new(Vec::new());
        let keep = AggregateFn::new(|_ctx: Context, item: Option<u64>| {
            if let Some(millis) = item {
                kept.lock().unwrap().push(millis);
            }
            async { Ok(()) }
        });

        let result = consume(&Context::background(), merged, &keep).await;
        assert!(result.is_ok());

        let mut kept = kept.into_inner().unwrap();
        kept.sort();
        assert_eq!(kept, vec![10, 20]);
    }

    #[tokio::test]
    async fn test_aggregate_failure_stops_consumption_and_upstream_via_context() {
        let (ctx, guard) = Context::with_cancel(&Context::background());
        let aggregated = AtomicUsize::new(0);
        let fail_on_fifth = AggregateFn::new(|_ctx: Context, _item: u64| {
            let n = aggregated.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n == 5 {
                    Err(PipelineError::Aggregation {
                        aggregator: "fail_on_fifth".to_string(),
                        message: "enough".to_string(),
                    })
                } else {
                    Ok(())
                }
            }
        });

        let identity = Arc::new(OpFn::new(|_ctx: Context, value: u64| async move { value }));
        let merged = fan_in(
            &ctx,
            operations(&ctx, identity, fan_out(&ctx, from_iter(&ctx, 0u64..), 2)),
        );

        let result = consume(&ctx, merged, &fail_on_fifth).await;
        assert!(matches!(result, Err(PipelineError::Aggregation { .. })));
        assert_eq!(aggregated.load(Ordering::SeqCst), 5);

        // Caller cancels its own context so the unbounded upstream winds down.
        guard.cancel();
    }

    #[tokio::test]
    async fn test_single_path_preserves_order() {
        let ctx = Context::background();
        let label = Arc::new(OpFn::new(|_ctx: Context, value: char| async move {
            value.to_ascii_uppercase()
        }));
        let values = operation(&ctx, label, generator(&ctx, "pipeline".chars()))
            .collect()
            .await;
        assert_eq!(values.into_iter().collect::<String>(), "PIPELINE");
    }
}
