// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::future::Future;
use std::marker::PhantomData;

use crate::context::Context;

/// Per-item transform applied by an operation stage.
///
/// There is no error channel: a transform that can fail must say so in `D`
/// (for example `Result<T, E>` or a response struct with an error field)
/// and leave the decision to the aggregator.
///
/// One instance is shared by every stage built from it, so implementations
/// that keep state must make it safe for concurrent use.
#[async_trait]
pub trait Operation<S, D>: Send + Sync
where
    S: Send + 'static,
    D: Send + 'static,
{
    async fn execute(&self, ctx: &Context, value: S) -> D;
}

/// Adapts a closure `Fn(Context, S) -> impl Future<Output = D>` into an [`Operation`].
///
/// ```rust
/// use the_conduit::context::Context;
/// use the_conduit::traits::{OpFn, Operation};
///
/// # #[tokio::main]
/// # async fn main() {
/// let double = OpFn::new(|_ctx: Context, value: i32| async move { value * 2 });
/// assert_eq!(double.execute(&Context::background(), 21).await, 42);
/// # }
/// ```
pub struct OpFn<F, S, D> {
    func: F,
    _types: PhantomData<fn(S) -> D>,
}

impl<F, S, D> OpFn<F, S, D> {
    pub fn new<Fut>(func: F) -> Self
    where
        F: Fn(Context, S) -> Fut,
        Fut: Future<Output = D>,
    {
        Self {
            func,
            _types: PhantomData,
        }
    }
}

#[async_trait]
impl<F, Fut, S, D> Operation<S, D> for OpFn<F, S, D>
where
    F: Fn(Context, S) -> Fut + Send + Sync,
    Fut: Future<Output = D> + Send,
    S: Send + 'static,
    D: Send + 'static,
{
    async fn execute(&self, ctx: &Context, value: S) -> D {
        (self.func)(ctx.clone(), value).await
    }
}
