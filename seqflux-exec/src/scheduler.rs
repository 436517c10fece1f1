// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Schedulers decide where per-item expansion work runs.
//!
//! A [`Scheduler`] only knows how to run an opaque [`Job`]. [`SchedulerExt::submit`]
//! wraps typed work into a job and hands back a [`WorkHandle`] that resolves to the
//! work's result. The scheduler never reorders anything: completion order is
//! whatever the workers produce, and the flat-expand operators decide whether to
//! restore input order.
//!
//! | Scheduler | Runs work | Use when |
//! |-----------|-----------|----------|
//! | [`InlineScheduler`] | synchronously, inside `submit` | deterministic tests |
//! | [`ParallelScheduler`] | on tokio's blocking pool | slow per-item work must not block the pipeline |
//!
//! Dropping a `WorkHandle` cancels work that has not started. Work that is already
//! running finishes normally and its result is discarded.

mod inline;
#[cfg(feature = "runtime-tokio")]
mod parallel;

pub use inline::InlineScheduler;
#[cfg(feature = "runtime-tokio")]
pub use parallel::ParallelScheduler;

use futures::channel::oneshot;
use seqflux_core::{CancellationToken, Result, SeqfluxError};
use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::pin::Pin;
use std::task::{Context, Poll};

/// An opaque unit of work handed to a scheduler.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Runs jobs somewhere.
///
/// Implementations must run every accepted job at most once and must never run
/// it on the caller's behalf after returning an error.
pub trait Scheduler: Send + Sync + 'static {
    /// Short name used in logs and in [`SeqfluxError::SchedulerError`].
    fn name(&self) -> &'static str;

    /// Accepts a job for execution.
    ///
    /// # Errors
    ///
    /// Returns [`SeqfluxError::SchedulerError`] when the job cannot be accepted,
    /// e.g. because no runtime is available.
    fn schedule(&self, job: Job) -> Result<()>;
}

/// Typed submission on top of any [`Scheduler`].
pub trait SchedulerExt: Scheduler {
    /// Submits `work` and returns a handle resolving to its result.
    ///
    /// A panic inside `work` is caught and surfaces as a
    /// [`SeqfluxError::SchedulerError`] on the handle.
    ///
    /// # Example
    ///
    /// ```
    /// use seqflux_exec::{InlineScheduler, SchedulerExt};
    ///
    /// # futures::executor::block_on(async {
    /// let handle = InlineScheduler.submit(|| Ok("AJ".to_lowercase()));
    /// assert_eq!(handle.await.unwrap(), "aj");
    /// # });
    /// ```
    fn submit<T, F>(&self, work: F) -> WorkHandle<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static;
}

impl<S> SchedulerExt for S
where
    S: Scheduler + ?Sized,
{
    fn submit<T, F>(&self, work: F) -> WorkHandle<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let scheduler = self.name();
        let token = CancellationToken::new();
        let (tx, rx) = oneshot::channel();

        let job_token = token.clone();
        let job: Job = Box::new(move || {
            if job_token.is_cancelled() {
                crate::debug!("{scheduler}: skipping cancelled work");
                return;
            }

            let result = catch_unwind(AssertUnwindSafe(work)).unwrap_or_else(|panic| {
                let message = panic_message(panic.as_ref());
                crate::warn!("{scheduler}: work panicked: {message}");
                Err(SeqfluxError::scheduler_error(
                    scheduler,
                    format!("work panicked: {message}"),
                ))
            });

            // The handle may be gone already; the result is simply discarded
            let _ = tx.send(result);
        });

        crate::debug!("{scheduler}: submitting work");
        match self.schedule(job) {
            Ok(()) => WorkHandle {
                state: HandleState::Pending(rx),
                token,
                scheduler,
            },
            Err(error) => WorkHandle {
                state: HandleState::Rejected(Some(error)),
                token,
                scheduler,
            },
        }
    }
}

enum HandleState<T> {
    Pending(oneshot::Receiver<Result<T>>),
    Rejected(Option<SeqfluxError>),
}

/// Future resolving to the result of submitted work.
///
/// Dropping the handle cancels the work if it has not started yet.
#[must_use = "dropping a WorkHandle cancels the submitted work"]
pub struct WorkHandle<T> {
    state: HandleState<T>,
    token: CancellationToken,
    scheduler: &'static str,
}

impl<T> WorkHandle<T> {
    /// Cancels the work if it has not started. The handle then resolves to
    /// [`SeqfluxError::WorkCancelled`] unless a result had already been produced.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Name of the scheduler the work was submitted to.
    pub fn scheduler(&self) -> &'static str {
        self.scheduler
    }
}

impl<T> Future for WorkHandle<T> {
    type Output = Result<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match &mut this.state {
            HandleState::Pending(rx) => match Pin::new(rx).poll(cx) {
                Poll::Ready(Ok(result)) => Poll::Ready(result),
                Poll::Ready(Err(oneshot::Canceled)) => {
                    Poll::Ready(Err(if this.token.is_cancelled() {
                        SeqfluxError::WorkCancelled
                    } else {
                        SeqfluxError::scheduler_error(
                            this.scheduler,
                            "work was dropped before it ran",
                        )
                    }))
                }
                Poll::Pending => Poll::Pending,
            },
            HandleState::Rejected(error) => Poll::Ready(Err(error.take().unwrap_or_else(|| {
                SeqfluxError::scheduler_error(this.scheduler, "handle polled after completion")
            }))),
        }
    }
}

impl<T> Drop for WorkHandle<T> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

impl<T> fmt::Debug for WorkHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkHandle")
            .field("scheduler", &self.scheduler)
            .field("cancelled", &self.token.is_cancelled())
            .finish()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
