// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Stream wrapper that injects a `StreamItem::Error` at a chosen position.

use futures::Stream;
use seqflux_core::{SeqfluxError, StreamItem};
use std::pin::Pin;
use std::task::{Context, Poll};

/// Wraps plain values in `StreamItem::Value`, emitting one injected error at
/// `inject_error_at` (0-indexed). Upstream values after the error are still
/// emitted, so tests can check that operators stop on their own.
///
/// # Examples
///
/// ```rust
/// use seqflux_test_utils::ErrorInjectingStream;
/// use seqflux_core::StreamItem;
/// use futures::{stream, StreamExt};
///
/// # futures::executor::block_on(async {
/// let mut stream = ErrorInjectingStream::new(stream::iter(vec!["AJ", "Jm"]), 1);
///
/// assert!(matches!(stream.next().await, Some(StreamItem::Value("AJ"))));
/// assert!(matches!(stream.next().await, Some(StreamItem::Error(_))));
/// assert!(matches!(stream.next().await, Some(StreamItem::Value("Jm"))));
/// # });
/// ```
pub struct ErrorInjectingStream<S> {
    inner: S,
    inject_error_at: Option<usize>,
    count: usize,
}

impl<S> ErrorInjectingStream<S> {
    /// Creates a new error-injecting stream wrapper.
    pub fn new(inner: S, inject_error_at: usize) -> Self {
        Self {
            inner,
            inject_error_at: Some(inject_error_at),
            count: 0,
        }
    }
}

impl<S> Stream for ErrorInjectingStream<S>
where
    S: Stream + Unpin,
{
    type Item = StreamItem<S::Item>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.inject_error_at == Some(self.count) {
            self.inject_error_at = None;
            self.count += 1;
            return Poll::Ready(Some(StreamItem::Error(SeqfluxError::stream_error(
                "Injected test error",
            ))));
        }

        match Pin::new(&mut self.inner).poll_next(cx) {
            Poll::Ready(Some(item)) => {
                self.count += 1;
                Poll::Ready(Some(StreamItem::Value(item)))
            }
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}
