// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Hierarchical cancellation with deadlines and a recorded cause.
//!
//! A [`Context`] wraps a [`tokio_util::sync::CancellationToken`] and adds the
//! two things a pipeline caller needs to tell shutdowns apart: an optional
//! deadline and the *first* reason the context fired. Children observe their
//! parent; a parent never observes its children.
//!
//! ```text
//! background ──► with_timeout(500ms) ──► with_cancel
//!      (never fires)   (DeadlineExceeded)     (Canceled, or inherits)
//! ```
//!
//! Components only ever read a context. Whoever derives one holds the
//! [`CancelGuard`] and is the only party able to cancel it.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Why a context fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cause {
    Canceled,
    DeadlineExceeded,
}

/// Cloneable, read-only view of a cancellation scope.
#[derive(Clone, Debug)]
pub struct Context {
    inner: Arc<ContextInner>,
}

#[derive(Debug)]
struct ContextInner {
    token: CancellationToken,
    deadline: Option<Instant>,
    cause: OnceLock<Cause>,
    parent: Option<Context>,
}

impl Context {
    /// Root context that is never cancelled.
    pub fn background() -> Self {
        Self::derive(None, None)
    }

    /// Child context plus the guard that cancels it.
    ///
    /// Dropping the guard cancels the child with [`Cause::Canceled`].
    pub fn with_cancel(parent: &Context) -> (Context, CancelGuard) {
        let ctx = Self::derive(Some(parent), parent.deadline());
        let guard = CancelGuard { ctx: ctx.clone() };
        (ctx, guard)
    }

    /// Child context that fires with [`Cause::DeadlineExceeded`] after `timeout`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn with_timeout(parent: &Context, timeout: Duration) -> (Context, CancelGuard) {
        Self::with_deadline(parent, Instant::now() + timeout)
    }

    /// Child context that fires at `deadline`, or at the parent's deadline if
    /// that comes first.
    pub fn with_deadline(parent: &Context, deadline: Instant) -> (Context, CancelGuard) {
        let effective = match parent.deadline() {
            Some(inherited) if inherited < deadline => inherited,
            _ => deadline,
        };
        let ctx = Self::derive(Some(parent), Some(effective));

        if effective <= Instant::now() {
            ctx.fire(Cause::DeadlineExceeded);
        } else {
            let timer = ctx.clone();
            tokio::spawn(async move {
                tokio::select! {
                    biased;
                    _ = timer.inner.token.cancelled() => {}
                    _ = tokio::time::sleep_until(effective) => timer.fire(Cause::DeadlineExceeded),
                }
            });
        }

        let guard = CancelGuard { ctx: ctx.clone() };
        (ctx, guard)
    }

    fn derive(parent: Option<&Context>, deadline: Option<Instant>) -> Self {
        let token = match parent {
            Some(p) => p.inner.token.child_token(),
            None => CancellationToken::new(),
        };
        Self {
            inner: Arc::new(ContextInner {
                token,
                deadline,
                cause: OnceLock::new(),
                parent: parent.cloned(),
            }),
        }
    }

    /// Record `cause` (first writer wins) and then wake every waiter.
    ///
    /// A context that already fired through an ancestor keeps the cause it
    /// resolved to at that point.
    fn fire(&self, cause: Cause) {
        let cause = self.err().unwrap_or(cause);
        let _ = self.inner.cause.set(cause);
        self.inner.token.cancel();
    }

    /// Resolves once the context has fired. Safe to await repeatedly.
    pub async fn done(&self) {
        self.inner.token.cancelled().await
    }

    pub fn is_done(&self) -> bool {
        self.inner.token.is_cancelled()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }

    /// The reason this context fired, or `None` while it is live.
    pub fn err(&self) -> Option<Cause> {
        if !self.is_done() {
            return None;
        }
        if let Some(cause) = self.inner.cause.get() {
            return Some(*cause);
        }
        // Cancelled without a cause of its own means an ancestor fired.
        Some(
            self.inner
                .parent
                .as_ref()
                .and_then(Context::err)
                .unwrap_or(Cause::Canceled),
        )
    }
}

/// Owner handle for a derived [`Context`]; cancels it on [`cancel`](Self::cancel) or drop.
#[derive(Debug)]
pub struct CancelGuard {
    ctx: Context,
}

impl CancelGuard {
    pub fn cancel(&self) {
        self.ctx.fire(Cause::Canceled);
    }
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}
