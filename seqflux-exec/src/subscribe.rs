// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Push-based consumer interface.

mod implementation;

use async_trait::async_trait;
use futures::Stream;
use seqflux_core::{CancellationToken, SeqfluxError, StreamItem};

/// How a subscription ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionOutcome {
    /// Upstream completed; `on_complete` was called.
    Completed {
        /// Number of values delivered to `on_item`
        items: usize,
    },
    /// Upstream failed; `on_failure` was called.
    Failed {
        /// Number of values delivered to `on_item` before the failure
        items: usize,
    },
    /// The cancellation token fired; neither terminal callback was called.
    Cancelled {
        /// Number of values delivered to `on_item` before cancellation
        items: usize,
    },
}

impl SubscriptionOutcome {
    /// Number of values delivered to `on_item`.
    pub const fn items(&self) -> usize {
        match self {
            Self::Completed { items } | Self::Failed { items } | Self::Cancelled { items } => {
                *items
            }
        }
    }
}

/// Extension trait providing the consumer interface for pipeline streams.
#[async_trait]
pub trait SubscribeExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Drains the stream, pushing every signal to the given callbacks.
    ///
    /// # Behavior
    ///
    /// - `on_item` is called once per value, in emission order
    /// - on completion `on_complete` is called once
    /// - on the first error `on_failure` is called once and draining stops
    /// - if `cancellation_token` fires, draining stops without a terminal callback;
    ///   the stream is dropped, which cancels any outstanding scheduled work
    ///
    /// # Example
    ///
    /// ```
    /// use seqflux_core::Sequence;
    /// use seqflux_exec::{SubscribeExt, SubscriptionOutcome};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let names = Sequence::from(&["AJ", "Jm"][..]);
    ///
    /// let outcome = names
    ///     .produce()
    ///     .subscribe(|name| println!("{name}"), || println!("done"), |err| eprintln!("{err}"), None)
    ///     .await;
    ///
    /// assert_eq!(outcome, SubscriptionOutcome::Completed { items: 2 });
    /// # }
    /// ```
    async fn subscribe<OnItem, OnComplete, OnFailure>(
        self,
        on_item: OnItem,
        on_complete: OnComplete,
        on_failure: OnFailure,
        cancellation_token: Option<CancellationToken>,
    ) -> SubscriptionOutcome
    where
        OnItem: FnMut(T) + Send + 'static,
        OnComplete: FnOnce() + Send + 'static,
        OnFailure: FnOnce(SeqfluxError) + Send + 'static;
}

#[async_trait]
impl<S, T> SubscribeExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
{
    async fn subscribe<OnItem, OnComplete, OnFailure>(
        self,
        on_item: OnItem,
        on_complete: OnComplete,
        on_failure: OnFailure,
        cancellation_token: Option<CancellationToken>,
    ) -> SubscriptionOutcome
    where
        OnItem: FnMut(T) + Send + 'static,
        OnComplete: FnOnce() + Send + 'static,
        OnFailure: FnOnce(SeqfluxError) + Send + 'static,
    {
        implementation::subscribe_impl(self, on_item, on_complete, on_failure, cancellation_token)
            .await
    }
}
