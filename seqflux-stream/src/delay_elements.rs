// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Per-element latency injection.

use futures::{ready, Stream};
use pin_project::pin_project;
use seqflux_core::StreamItem;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{sleep, Sleep};

/// Extension trait providing the `delay_elements` operator.
pub trait DelayElementsExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Delays every value by `duration` before emitting it.
    ///
    /// Delays run one after another: the next value is not pulled until the
    /// previous one has been emitted, so `n` values take at least `n * duration`.
    /// Errors are passed through without delay and end the stream.
    ///
    /// # Example
    ///
    /// ```rust
    /// use seqflux_core::Sequence;
    /// use seqflux_exec::DrainExt;
    /// use seqflux_stream::DelayElementsExt;
    /// use std::time::{Duration, Instant};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> seqflux_core::Result<()> {
    /// let letters = Sequence::from(&["M", "A"][..]);
    /// let start = Instant::now();
    ///
    /// let result = letters
    ///     .produce()
    ///     .delay_elements(Duration::from_millis(10))
    ///     .drain_to_list()
    ///     .await?;
    ///
    /// assert_eq!(result, vec!["M", "A"]);
    /// assert!(start.elapsed() >= Duration::from_millis(20));
    /// # Ok(())
    /// # }
    /// ```
    fn delay_elements(self, duration: Duration) -> impl Stream<Item = StreamItem<T>> + Send
    where
        Self: Send,
        T: Send;
}

impl<S, T> DelayElementsExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn delay_elements(self, duration: Duration) -> impl Stream<Item = StreamItem<T>> + Send
    where
        Self: Send,
        T: Send,
    {
        DelayElementsStream {
            stream: self,
            duration,
            pending: None,
            done: false,
        }
    }
}

#[pin_project]
struct DelayElementsStream<S, T> {
    #[pin]
    stream: S,
    duration: Duration,
    pending: Option<(Pin<Box<Sleep>>, T)>,
    done: bool,
}

impl<S, T> Stream for DelayElementsStream<S, T>
where
    S: Stream<Item = StreamItem<T>>,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some((delay, _)) = this.pending.as_mut() {
                ready!(delay.as_mut().poll(cx));
                if let Some((_, value)) = this.pending.take() {
                    return Poll::Ready(Some(StreamItem::Value(value)));
                }
            }

            if *this.done {
                return Poll::Ready(None);
            }

            match ready!(this.stream.as_mut().poll_next(cx)) {
                Some(StreamItem::Value(value)) => {
                    *this.pending = Some((Box::pin(sleep(*this.duration)), value));
                }
                Some(StreamItem::Error(error)) => {
                    // Errors are not delayed
                    *this.done = true;
                    return Poll::Ready(Some(StreamItem::Error(error)));
                }
                None => {
                    *this.done = true;
                    return Poll::Ready(None);
                }
            }
        }
    }
}
