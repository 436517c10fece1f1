// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Signal logging that leaves the stream untouched.

use futures::{ready, Stream};
use pin_project::pin_project;
use seqflux_core::StreamItem;
use std::borrow::Cow;
use std::fmt::Debug;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Extension trait providing the `log` operator.
pub trait LogExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Logs every signal under `label`: `onNext` per value, `onError` per error and
    /// `onComplete` once at the end.
    ///
    /// Lines go through the crate's logging shim, so they reach `tracing` when the
    /// `tracing` feature is enabled and stdout/stderr otherwise.
    fn log(self, label: impl Into<Cow<'static, str>>) -> impl Stream<Item = StreamItem<T>> + Send
    where
        Self: Send,
        T: Debug;
}

impl<S, T> LogExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn log(self, label: impl Into<Cow<'static, str>>) -> impl Stream<Item = StreamItem<T>> + Send
    where
        Self: Send,
        T: Debug,
    {
        LogStream {
            stream: self,
            label: label.into(),
            completed: false,
        }
    }
}

#[pin_project]
struct LogStream<S> {
    #[pin]
    stream: S,
    label: Cow<'static, str>,
    completed: bool,
}

impl<S, T> Stream for LogStream<S>
where
    S: Stream<Item = StreamItem<T>>,
    T: Debug,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        let label = &*this.label;

        let item = ready!(this.stream.poll_next(cx));
        match &item {
            Some(StreamItem::Value(value)) => crate::info!("[{label}] onNext({value:?})"),
            Some(StreamItem::Error(error)) => crate::error!("[{label}] onError({error})"),
            None if !*this.completed => {
                *this.completed = true;
                crate::info!("[{label}] onComplete()");
            }
            None => {}
        }

        Poll::Ready(item)
    }
}
