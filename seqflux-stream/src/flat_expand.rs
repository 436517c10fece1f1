// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! One-to-many expansion on a [`Scheduler`].
//!
//! Each upstream value is handed to the scheduler as soon as it is pulled; the
//! expansion function returns a lazy sub-sequence. The two operators differ only
//! in how the sub-sequences are merged back:
//!
//! | Operator | Output order | Analogue |
//! |----------|--------------|----------|
//! | [`flat_expand_unordered`](FlatExpandExt::flat_expand_unordered) | availability order; each sub-sequence keeps its own order | `flatMap` |
//! | [`flat_expand_ordered`](FlatExpandExt::flat_expand_ordered) | strict concatenation in input order | `concatMap` |
//!
//! Any failure (an expansion returning `Err`, a sub-sequence emitting an error or the
//! scheduler failing the submission) ends the output with a single error. Dropping
//! the output stream drops every outstanding [`WorkHandle`](seqflux_exec::WorkHandle),
//! which cancels work that has not started.

mod ordered;
mod unordered;

use futures::Stream;
use seqflux_core::{BoxSequence, Result, StreamItem};
use seqflux_exec::Scheduler;
use std::num::NonZeroUsize;
use std::sync::Arc;

use ordered::FlatExpandOrdered;
use unordered::FlatExpandUnordered;

/// Tuning for the flat-expand operators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlatExpandOptions {
    /// Upper bound on expansions that are submitted but not yet fully emitted.
    /// `None` pulls upstream eagerly without limit.
    pub max_in_flight: Option<NonZeroUsize>,
}

impl FlatExpandOptions {
    /// No limit on in-flight expansions.
    pub const fn unbounded() -> Self {
        Self {
            max_in_flight: None,
        }
    }

    /// At most `limit` expansions in flight.
    pub const fn with_max_in_flight(limit: NonZeroUsize) -> Self {
        Self {
            max_in_flight: Some(limit),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.max_in_flight.map_or(usize::MAX, NonZeroUsize::get)
    }
}

/// Extension trait providing the flat-expand operators.
pub trait FlatExpandExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Expands every value into a sub-sequence, merging results as they become
    /// available.
    ///
    /// Cardinality is the sum of all sub-sequence lengths. Relative order across
    /// sub-sequences depends on the scheduler and is not deterministic.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seqflux_core::Sequence;
    /// use seqflux_exec::{DrainExt, ParallelScheduler};
    /// use seqflux_stream::FlatExpandExt;
    /// use std::sync::Arc;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> seqflux_core::Result<()> {
    /// let names = Sequence::from(&["AJ", "Jm"][..]);
    ///
    /// let mut letters = names
    ///     .produce()
    ///     .flat_expand_unordered(Arc::new(ParallelScheduler::new()), |name: String| {
    ///         Ok(name.chars().map(String::from).collect::<Sequence<_>>().produce_boxed())
    ///     })
    ///     .drain_to_list()
    ///     .await?;
    ///
    /// letters.sort();
    /// assert_eq!(letters, vec!["A", "J", "J", "m"]);
    /// # Ok(())
    /// # }
    /// ```
    fn flat_expand_unordered<U, F>(
        self,
        scheduler: Arc<dyn Scheduler>,
        expand: F,
    ) -> impl Stream<Item = StreamItem<U>> + Send
    where
        Self: Send + 'static,
        T: Send + 'static,
        U: Send + 'static,
        F: Fn(T) -> Result<BoxSequence<U>> + Send + Sync + 'static,
    {
        self.flat_expand_unordered_with(scheduler, FlatExpandOptions::default(), expand)
    }

    /// [`flat_expand_unordered`](FlatExpandExt::flat_expand_unordered) with options.
    fn flat_expand_unordered_with<U, F>(
        self,
        scheduler: Arc<dyn Scheduler>,
        options: FlatExpandOptions,
        expand: F,
    ) -> impl Stream<Item = StreamItem<U>> + Send
    where
        Self: Send + 'static,
        T: Send + 'static,
        U: Send + 'static,
        F: Fn(T) -> Result<BoxSequence<U>> + Send + Sync + 'static;

    /// Expands every value into a sub-sequence and emits the sub-sequences back to
    /// back in input order.
    ///
    /// Expansions still run concurrently; sub-sequences that resolve early are
    /// buffered until all earlier ones have been emitted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seqflux_core::Sequence;
    /// use seqflux_exec::{DrainExt, ParallelScheduler};
    /// use seqflux_stream::FlatExpandExt;
    /// use std::sync::Arc;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> seqflux_core::Result<()> {
    /// let names = Sequence::from(&["AJ", "Jm"][..]);
    ///
    /// let letters = names
    ///     .produce()
    ///     .flat_expand_ordered(Arc::new(ParallelScheduler::new()), |name: String| {
    ///         Ok(name.chars().map(String::from).collect::<Sequence<_>>().produce_boxed())
    ///     })
    ///     .drain_to_list()
    ///     .await?;
    ///
    /// assert_eq!(letters, vec!["A", "J", "J", "m"]);
    /// # Ok(())
    /// # }
    /// ```
    fn flat_expand_ordered<U, F>(
        self,
        scheduler: Arc<dyn Scheduler>,
        expand: F,
    ) -> impl Stream<Item = StreamItem<U>> + Send
    where
        Self: Send + 'static,
        T: Send + 'static,
        U: Send + 'static,
        F: Fn(T) -> Result<BoxSequence<U>> + Send + Sync + 'static,
    {
        self.flat_expand_ordered_with(scheduler, FlatExpandOptions::default(), expand)
    }

    /// [`flat_expand_ordered`](FlatExpandExt::flat_expand_ordered) with options.
    fn flat_expand_ordered_with<U, F>(
        self,
        scheduler: Arc<dyn Scheduler>,
        options: FlatExpandOptions,
        expand: F,
    ) -> impl Stream<Item = StreamItem<U>> + Send
    where
        Self: Send + 'static,
        T: Send + 'static,
        U: Send + 'static,
        F: Fn(T) -> Result<BoxSequence<U>> + Send + Sync + 'static;
}

impl<S, T> FlatExpandExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn flat_expand_unordered_with<U, F>(
        self,
        scheduler: Arc<dyn Scheduler>,
        options: FlatExpandOptions,
        expand: F,
    ) -> impl Stream<Item = StreamItem<U>> + Send
    where
        Self: Send + 'static,
        T: Send + 'static,
        U: Send + 'static,
        F: Fn(T) -> Result<BoxSequence<U>> + Send + Sync + 'static,
    {
        FlatExpandUnordered::new(self, scheduler, options, expand)
    }

    fn flat_expand_ordered_with<U, F>(
        self,
        scheduler: Arc<dyn Scheduler>,
        options: FlatExpandOptions,
        expand: F,
    ) -> impl Stream<Item = StreamItem<U>> + Send
    where
        Self: Send + 'static,
        T: Send + 'static,
        U: Send + 'static,
        F: Fn(T) -> Result<BoxSequence<U>> + Send + Sync + 'static,
    {
        FlatExpandOrdered::new(self, scheduler, options, expand)
    }
}
