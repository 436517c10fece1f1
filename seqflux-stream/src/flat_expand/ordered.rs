// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::FlatExpandOptions;
use futures::{Stream, StreamExt};
use pin_project::pin_project;
use seqflux_core::{BoxSequence, Result, SeqfluxError, StreamItem};
use seqflux_exec::{Scheduler, SchedulerExt, WorkHandle};
use std::collections::VecDeque;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// One submitted expansion, in input order.
///
/// Only the head slot emits. Every other slot is drained into `buffer` as its
/// items become available, and a failure is parked in `failed` until the slot
/// reaches the head.
struct Slot<U> {
    handle: Option<WorkHandle<BoxSequence<U>>>,
    stream: Option<BoxSequence<U>>,
    buffer: VecDeque<U>,
    failed: Option<SeqfluxError>,
    finished: bool,
}

enum HeadPoll<U> {
    Item(U),
    Failed(SeqfluxError),
    Finished,
    Pending,
}

impl<U> Slot<U> {
    fn new(handle: WorkHandle<BoxSequence<U>>) -> Self {
        Self {
            handle: Some(handle),
            stream: None,
            buffer: VecDeque::new(),
            failed: None,
            finished: false,
        }
    }

    fn poll_next_item(&mut self, cx: &mut Context<'_>) -> Poll<Option<Result<U>>> {
        if let Some(handle) = self.handle.as_mut() {
            match Pin::new(handle).poll(cx) {
                Poll::Ready(Ok(stream)) => {
                    self.handle = None;
                    self.stream = Some(stream);
                }
                Poll::Ready(Err(error)) => {
                    self.handle = None;
                    self.finished = true;
                    return Poll::Ready(Some(Err(error)));
                }
                Poll::Pending => return Poll::Pending,
            }
        }

        let Some(stream) = self.stream.as_mut() else {
            self.finished = true;
            return Poll::Ready(None);
        };

        match stream.poll_next_unpin(cx) {
            Poll::Ready(Some(StreamItem::Value(value))) => Poll::Ready(Some(Ok(value))),
            Poll::Ready(Some(StreamItem::Error(error))) => {
                self.stream = None;
                self.finished = true;
                Poll::Ready(Some(Err(error)))
            }
            Poll::Ready(None) => {
                self.stream = None;
                self.finished = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }

    fn poll_head(&mut self, cx: &mut Context<'_>) -> HeadPoll<U> {
        if let Some(value) = self.buffer.pop_front() {
            return HeadPoll::Item(value);
        }
        if let Some(error) = self.failed.take() {
            return HeadPoll::Failed(error);
        }
        if self.finished {
            return HeadPoll::Finished;
        }

        match self.poll_next_item(cx) {
            Poll::Ready(Some(Ok(value))) => HeadPoll::Item(value),
            Poll::Ready(Some(Err(error))) => HeadPoll::Failed(error),
            Poll::Ready(None) => HeadPoll::Finished,
            Poll::Pending => HeadPoll::Pending,
        }
    }

    fn poll_fill(&mut self, cx: &mut Context<'_>) {
        while !self.finished {
            match self.poll_next_item(cx) {
                Poll::Ready(Some(Ok(value))) => self.buffer.push_back(value),
                Poll::Ready(Some(Err(error))) => self.failed = Some(error),
                Poll::Ready(None) | Poll::Pending => break,
            }
        }
    }
}

/// Emits sub-sequences back to back in the order their inputs arrived.
#[pin_project]
pub(super) struct FlatExpandOrdered<S, T, U, F> {
    #[pin]
    stream: S,
    scheduler: Arc<dyn Scheduler>,
    expand: Arc<F>,
    capacity: usize,
    slots: VecDeque<Slot<U>>,
    upstream_done: bool,
    terminated: bool,
    _input: PhantomData<fn(T)>,
}

impl<S, T, U, F> FlatExpandOrdered<S, T, U, F> {
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
            slots: VecDeque::new(),
            upstream_done: false,
            terminated: false,
            _input: PhantomData,
        }
    }
}

impl<S, T, U, F> Stream for FlatExpandOrdered<S, T, U, F>
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
            while !*this.upstream_done && this.slots.len() < *this.capacity {
                match this.stream.as_mut().poll_next(cx) {
                    Poll::Ready(Some(StreamItem::Value(value))) => {
                        let expand = Arc::clone(this.expand);
                        let handle = this.scheduler.submit(move || expand(value));
                        this.slots.push_back(Slot::new(handle));
                    }
                    Poll::Ready(Some(StreamItem::Error(error))) => {
                        // Earlier slots are abandoned; the error is terminal
                        this.slots.clear();
                        *this.terminated = true;
                        return Poll::Ready(Some(StreamItem::Error(error)));
                    }
                    Poll::Ready(None) => *this.upstream_done = true,
                    Poll::Pending => break,
                }
            }

            // 2. The head slot is the only one allowed to emit
            if let Some(head) = this.slots.front_mut() {
                match head.poll_head(cx) {
                    HeadPoll::Item(value) => return Poll::Ready(Some(StreamItem::Value(value))),
                    HeadPoll::Failed(error) => {
                        crate::error!("flat_expand_ordered: expansion failed: {error}");
                        this.slots.clear();
                        *this.terminated = true;
                        return Poll::Ready(Some(StreamItem::Error(error)));
                    }
                    HeadPoll::Finished => {
                        this.slots.pop_front();
                        continue;
                    }
                    HeadPoll::Pending => {}
                }
            }

            // 3. Buffer whatever later slots already have
            for slot in this.slots.iter_mut().skip(1) {
                slot.poll_fill(cx);
            }

            if *this.upstream_done && this.slots.is_empty() {
                *this.terminated = true;
                return Poll::Ready(None);
            }

            return Poll::Pending;
        }
    }
}
