// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Emptiness fallbacks.
//!
//! Both operators decide only once upstream completion has been observed, so
//! they hold back nothing: values pass through as they arrive. An upstream error
//! does not count as "empty"; it is forwarded and no fallback runs.

use futures::{Stream, StreamExt};
use pin_project::pin_project;
use seqflux_core::{BoxSequence, Sequence, StreamItem};
use std::pin::Pin;
use std::task::{Context, Poll};

/// Extension trait providing `default_if_empty` and `switch_if_empty`.
pub trait IfEmptyExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Emits `value` once if upstream completes without emitting any value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seqflux_core::Sequence;
    /// use seqflux_exec::DrainExt;
    /// use seqflux_stream::{FilterItemsExt, IfEmptyExt};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> seqflux_core::Result<()> {
    /// let names = Sequence::from(&["AJ", "Jm"][..]);
    ///
    /// let result = names
    ///     .produce()
    ///     .filter_items(|name| name.len() > 10)
    ///     .default_if_empty("nobody".to_string())
    ///     .drain_to_list()
    ///     .await?;
    ///
    /// assert_eq!(result, vec!["nobody"]);
    /// # Ok(())
    /// # }
    /// ```
    fn default_if_empty(self, value: T) -> impl Stream<Item = StreamItem<T>> + Send
    where
        Self: Send + 'static,
        T: Clone + Send + Sync + 'static;

    /// Drains `fallback` instead if upstream completes without emitting any value.
    ///
    /// The fallback may itself be empty, in which case the result is empty.
    fn switch_if_empty(self, fallback: Sequence<T>) -> impl Stream<Item = StreamItem<T>> + Send
    where
        Self: Send + 'static,
        T: Clone + Send + Sync + 'static;
}

impl<S, T> IfEmptyExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn default_if_empty(self, value: T) -> impl Stream<Item = StreamItem<T>> + Send
    where
        Self: Send + 'static,
        T: Clone + Send + Sync + 'static,
    {
        IfEmptyStream::new(self, Fallback::Value(value))
    }

    fn switch_if_empty(self, fallback: Sequence<T>) -> impl Stream<Item = StreamItem<T>> + Send
    where
        Self: Send + 'static,
        T: Clone + Send + Sync + 'static,
    {
        IfEmptyStream::new(self, Fallback::Sequence(fallback))
    }
}

enum Fallback<T> {
    Value(T),
    Sequence(Sequence<T>),
}

enum State<T> {
    Upstream { seen_value: bool },
    Fallback(BoxSequence<T>),
    Done,
}

#[pin_project]
struct IfEmptyStream<S, T> {
    #[pin]
    stream: S,
    fallback: Option<Fallback<T>>,
    state: State<T>,
}

impl<S, T> IfEmptyStream<S, T> {
    fn new(stream: S, fallback: Fallback<T>) -> Self {
        Self {
            stream,
            fallback: Some(fallback),
            state: State::Upstream { seen_value: false },
        }
    }
}

impl<S, T> Stream for IfEmptyStream<S, T>
where
    S: Stream<Item = StreamItem<T>>,
    T: Clone + Send + Sync + 'static,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            match this.state {
                State::Upstream { seen_value } => match this.stream.as_mut().poll_next(cx) {
                    Poll::Ready(Some(StreamItem::Value(value))) => {
                        *seen_value = true;
                        return Poll::Ready(Some(StreamItem::Value(value)));
                    }
                    Poll::Ready(Some(StreamItem::Error(error))) => {
                        *this.state = State::Done;
                        return Poll::Ready(Some(StreamItem::Error(error)));
                    }
                    Poll::Ready(None) if *seen_value => {
                        *this.state = State::Done;
                        return Poll::Ready(None);
                    }
                    Poll::Ready(None) => match this.fallback.take() {
                        Some(Fallback::Value(value)) => {
                            *this.state = State::Done;
                            return Poll::Ready(Some(StreamItem::Value(value)));
                        }
                        Some(Fallback::Sequence(sequence)) => {
                            *this.state = State::Fallback(sequence.produce_boxed());
                        }
                        None => *this.state = State::Done,
                    },
                    Poll::Pending => return Poll::Pending,
                },
                State::Fallback(fallback) => {
                    let next = fallback.poll_next_unpin(cx);
                    if let Poll::Ready(None) = next {
                        *this.state = State::Done;
                    }
                    return next;
                }
                State::Done => return Poll::Ready(None),
            }
        }
    }
}
