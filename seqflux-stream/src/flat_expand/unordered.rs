// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::FlatExpandOptions;
use futures::stream::{FuturesUnordered, SelectAll};
use futures::{Stream, StreamExt};
use pin_project::pin_project;
use seqflux_core::{BoxSequence, Result, SeqfluxError, StreamItem};
use seqflux_exec::{Scheduler, SchedulerExt, WorkHandle};
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// Merges sub-sequences in whatever order their items become available.
///
/// Submitted work waits in `pending`; once a handle resolves, its sub-sequence
/// moves into `active`, where all sub-sequences are polled fairly.
#[pin_project]
pub(super) struct FlatExpandUnordered<S, T, U, F> {
    #[pin]
    stream: S,
    scheduler: Arc<dyn Scheduler>,
    expand: Arc<F>,
    capacity: usize,
    pending: FuturesUnordered<WorkHandle<BoxSequence<U>>>,
    active: SelectAll<BoxSequence<U>>,
    upstream_done: bool,
    terminated: bool,
    _input: PhantomData<fn(T)>,
}

impl<S, T, U, F> FlatExpandUnordered<S, T, U, F> {
    pub(super) fn new(
        stream: S,
        scheduler: Arc<dyn Scheduler>,
        options: FlatExpandOptions,
        expand: F,
    ) -> Self {
        Self {
            stream,
            scheduler,
            expand: Arc::new(expand),
            capacity: options.capacity(),
            pending: FuturesUnordered::new(),
            active: SelectAll::new(),
            upstream_done: false,
            terminated: false,
            _input: PhantomData,
        }
    }
}

impl<S, T, U, F> Stream for FlatExpandUnordered<S, T, U, F>
where
    S: Stream<Item = StreamItem<T>>,
    T: Send + 'static,
    U: Send + 'static,
    F: Fn(T) -> Result<BoxSequence<U>> + Send + Sync + 'static,
{
    type Item = StreamItem<U>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        if *this.terminated {
            return Poll::Ready(None);
        }

        loop {
            // 1. Submit every upstream value we have room for
            let mut upstream_pending = false;
            while !*this.upstream_done && in_flight(this.pending, this.active) < *this.capacity {
                match this.stream.as_mut().poll_next(cx) {
                    Poll::Ready(Some(StreamItem::Value(value))) => {
                        let expand = Arc::clone(this.expand);
                        this.pending.push(this.scheduler.submit(move || expand(value)));
                    }
                    Poll::Ready(Some(StreamItem::Error(error))) => {
                        return terminate(this.terminated, this.pending, this.active, error);
                    }
                    Poll::Ready(None) => *this.upstream_done = true,
                    Poll::Pending => {
                        upstream_pending = true;
                        break;
                    }
                }
            }

            // 2. Move resolved expansions into the merge set
            while let Poll::Ready(Some(resolved)) = this.pending.poll_next_unpin(cx) {
                match resolved {
                    Ok(sequence) => this.active.push(sequence),
                    Err(error) => {
                        crate::error!("flat_expand_unordered: expansion failed: {error}");
                        return terminate(this.terminated, this.pending, this.active, error);
                    }
                }
            }

            // 3. Emit whatever is ready first
            match this.active.poll_next_unpin(cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => {
                    return Poll::Ready(Some(StreamItem::Value(value)));
                }
                Poll::Ready(Some(StreamItem::Error(error))) => {
                    return terminate(this.terminated, this.pending, this.active, error);
                }
                Poll::Ready(None) | Poll::Pending => {}
            }

            if *this.upstream_done && this.pending.is_empty() && this.active.is_empty() {
                *this.terminated = true;
                return Poll::Ready(None);
            }

            // A finished sub-sequence may have freed room for more upstream values
            if !*this.upstream_done
                && !upstream_pending
                && in_flight(this.pending, this.active) < *this.capacity
            {
                continue;
            }

            return Poll::Pending;
        }
    }
}

fn in_flight<U>(
    pending: &FuturesUnordered<WorkHandle<BoxSequence<U>>>,
    active: &SelectAll<BoxSequence<U>>,
) -> usize {
    pending.len() + active.len()
}

// Dropping the outstanding handles cancels work that has not started
fn terminate<U>(
    terminated: &mut bool,
    pending: &mut FuturesUnordered<WorkHandle<BoxSequence<U>>>,
    active: &mut SelectAll<BoxSequence<U>>,
    error: SeqfluxError,
) -> Poll<Option<StreamItem<U>>> {
    *terminated = true;
    pending.clear();
    active.clear();
    Poll::Ready(Some(StreamItem::Error(error)))
}
