// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::{Job, Scheduler};
use seqflux_core::{Result, SeqfluxError};
use tokio::runtime::Handle;

/// Runs jobs on tokio's blocking thread pool.
///
/// Per-item work is synchronous, so it goes to `spawn_blocking` rather than
/// onto the async workers. The pool size is whatever the runtime was built
/// with (`max_blocking_threads`).
///
/// Without an explicit handle the scheduler uses the runtime it is called
/// from; submitting outside any runtime fails the submission with
/// [`SeqfluxError::SchedulerError`].
#[derive(Clone, Debug, Default)]
pub struct ParallelScheduler {
    handle: Option<Handle>,
}

impl ParallelScheduler {
    /// Uses the runtime current at submission time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Always runs jobs on the given runtime.
    pub fn with_handle(handle: Handle) -> Self {
        Self {
            handle: Some(handle),
        }
    }
}

impl Scheduler for ParallelScheduler {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn schedule(&self, job: Job) -> Result<()> {
        let handle = match &self.handle {
            Some(handle) => handle.clone(),
            None => Handle::try_current().map_err(|e| {
                SeqfluxError::scheduler_error(self.name(), format!("no tokio runtime: {e}"))
            })?,
        };

        // Detached: the result travels back through the WorkHandle channel
        drop(handle.spawn_blocking(job));
        Ok(())
    }
}
