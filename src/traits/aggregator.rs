// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::future::Future;
use std::marker::PhantomData;

use crate::context::Context;
use crate::errors::PipelineError;

/// Terminal sink fed one item at a time by [`consume`](crate::consumer::consume).
///
/// The first `Err` aborts consumption and is returned to the caller as-is.
/// Methods take `&self` so an aggregator can expose a read path (a summary)
/// to another caller; such implementations guard their state internally.
#[async_trait]
pub trait Aggregator<T>: Send + Sync
where
    T: Send + 'static,
{
    async fn aggregate(&self, ctx: &Context, item: T) -> Result<(), PipelineError>;
}

/// Adapts a closure into an [`Aggregator`].
///
/// The closure is called once per item; any state it captures must be
/// shareable (`Fn`, not `FnMut`), typically behind a mutex or atomic.
pub struct AggregateFn<F, T> {
    func: F,
    _item: PhantomData<fn(T)>,
}

impl<F, T> AggregateFn<F, T> {
    pub fn new<Fut>(func: F) -> Self
    where
        F: Fn(Context, T) -> Fut,
        Fut: Future<Output = Result<(), PipelineError>>,
    {
        Self {
            func,
            _item: PhantomData,
        }
    }
}

#[async_trait]
impl<F, Fut, T> Aggregator<T> for AggregateFn<F, T>
where
    F: Fn(Context, T) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), PipelineError>> + Send,
    T: Send + 'static,
{
    async fn aggregate(&self, ctx: &Context, item: T) -> Result<(), PipelineError> {
        (self.func)(ctx.clone(), item).await
    }
}
