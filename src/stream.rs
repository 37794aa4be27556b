// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Unbuffered, single-owner typed streams.
//!
//! A stream is a pair: the [`Emitter`] owned by exactly one producing task,
//! and the [`Stream`] read by the next stage. Handoff is a rendezvous: an
//! `emit` does not complete until the receiver has taken the value, so a
//! producer stalls whenever nothing downstream is ready. That stall is the
//! only backpressure in the system.
//!
//! Closing is dropping the emitter. There is no end-of-stream value, and
//! because `Emitter` is not `Clone` a stream is closed exactly once by its
//! owner and nothing can be sent after that.

use tokio::sync::{mpsc, oneshot};

use crate::context::Context;

struct Handoff<T> {
    value: T,
    ack: oneshot::Sender<()>,
}

/// Receiving half of a stream.
pub struct Stream<T> {
    rx: mpsc::Receiver<Handoff<T>>,
}

/// Sending half of a stream. Dropping it closes the stream.
pub struct Emitter<T> {
    tx: mpsc::Sender<Handoff<T>>,
}

/// Create a connected emitter/stream pair.
pub fn channel<T>() -> (Emitter<T>, Stream<T>) {
    // One slot carries the in-flight handoff; the ack makes it a rendezvous.
    let (tx, rx) = mpsc::channel(1);
    (Emitter { tx }, Stream { rx })
}

impl<T> Emitter<T> {
    /// Hand `value` to the receiver, racing `ctx`.
    ///
    /// Returns `true` once the receiver has taken the value. Returns `false`
    /// if `ctx` fired first or the receiver is gone; the caller should stop
    /// emitting. If `ctx` fires after the value entered the channel but
    /// before it was acknowledged, the receiver may still see that value.
    pub async fn emit(&self, ctx: &Context, value: T) -> bool {
        let permit = tokio::select! {
            biased;
            _ = ctx.done() => return false,
            permit = self.tx.reserve() => match permit {
                Ok(permit) => permit,
                Err(_) => return false,
            },
        };

        let (ack, acked) = oneshot::channel();
        permit.send(Handoff { value, ack });

        tokio::select! {
            biased;
            _ = ctx.done() => false,
            result = acked => result.is_ok(),
        }
    }

    /// True once the receiving [`Stream`] has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl<T> Stream<T> {
    /// Next value, or `None` once the emitter has closed the stream.
    ///
    /// Cancel-safe: dropping this future before it resolves loses nothing.
    pub async fn recv(&mut self) -> Option<T> {
        let Handoff { value, ack } = self.rx.recv().await?;
        // The emitter may have given up waiting; the value is still ours.
        let _ = ack.send(());
        Some(value)
    }

    /// Next value racing `ctx`; `None` on close or cancellation.
    pub async fn recv_or_done(&mut self, ctx: &Context) -> Option<T> {
        tokio::select! {
            biased;
            _ = ctx.done() => None,
            value = self.recv() => value,
        }
    }

    /// Drain every remaining value until the stream closes.
    pub async fn collect(mut self) -> Vec<T> {
        let mut values = Vec::new();
        while let Some(value) = self.recv().await {
            values.push(value);
        }
        values
    }
}

impl<T> std::fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stream").finish_non_exhaustive()
    }
}

impl<T> std::fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_emit_waits_for_receiver() {
        let ctx = Context::background();
        let (emitter, mut stream) = channel::<u32>();

        let producer = tokio::spawn(async move {
            let delivered = emitter.emit(&Context::background(), 7).await;
            (delivered, emitter)
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!producer.is_finished(), "emit completed without a receiver");

        assert_eq!(stream.recv_or_done(&ctx).await, Some(7));
        let (delivered, _emitter) = producer.await.unwrap();
        assert!(delivered);
    }

    #[tokio::test]
    async fn test_drop_closes_stream() {
        let (emitter, mut stream) = channel::<u32>();
        drop(emitter);
        assert_eq!(stream.recv().await, None);
        assert_eq!(stream.recv().await, None);
    }

    #[tokio::test]
    async fn test_emit_unblocks_on_cancel() {
        let (ctx, guard) = Context::with_cancel(&Context::background());
        let (emitter, _stream) = channel::<u32>();

        let producer = tokio::spawn(async move { emitter.emit(&ctx, 1).await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        guard.cancel();

        let delivered = tokio::time::timeout(Duration::from_secs(1), producer)
            .await
            .expect("emit should unblock")
            .unwrap();
        assert!(!delivered);
    }

    #[tokio::test]
    async fn test_emit_to_dropped_stream_fails() {
        let (emitter, stream) = channel::<u32>();
        drop(stream);
        assert!(emitter.is_closed());
        assert!(!emitter.emit(&Context::background(), 1).await);
    }

    #[tokio::test]
    async fn test_recv_or_done_on_cancelled_context() {
        let (ctx, guard) = Context::with_cancel(&Context::background());
        let (_emitter, mut stream) = channel::<u32>();
        guard.cancel();
        assert_eq!(stream.recv_or_done(&ctx).await, None);
    }

    #[tokio::test]
    async fn test_collect_preserves_order() {
        let (emitter, stream) = channel::<u32>();
        tokio::spawn(async move {
            let ctx = Context::background();
            for i in 0..5 {
                emitter.emit(&ctx, i).await;
            }
        });
        assert_eq!(stream.collect().await, vec![0, 1, 2, 3, 4]);
    }
}
