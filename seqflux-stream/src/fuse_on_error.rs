// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::{ready, Stream};
use pin_project::pin_project;
use seqflux_core::StreamItem;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Ends the stream right after the first `StreamItem::Error` it forwards.
#[pin_project]
pub(crate) struct FuseOnError<S> {
    #[pin]
    stream: S,
    done: bool,
}

impl<S> FuseOnError<S> {
    pub(crate) fn new(stream: S) -> Self {
        Self {
            stream,
            done: false,
        }
    }
}

impl<S, T> Stream for FuseOnError<S>
where
    S: Stream<Item = StreamItem<T>>,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        if *this.done {
            return Poll::Ready(None);
        }

        let item = ready!(this.stream.poll_next(cx));
        *this.done = item.as_ref().map_or(true, StreamItem::is_terminal);
        Poll::Ready(item)
    }
}
