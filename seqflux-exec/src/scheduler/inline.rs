// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::{Job, Scheduler};
use seqflux_core::Result;

/// Runs every job synchronously inside `schedule`.
///
/// Handles returned by [`submit`](super::SchedulerExt::submit) are already
/// resolved, so expansion order equals submission order. Swap this in for
/// [`ParallelScheduler`](super::ParallelScheduler) to make pipelines fully
/// deterministic in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct InlineScheduler;

impl Scheduler for InlineScheduler {
    fn name(&self) -> &'static str {
        "inline"
    }

    fn schedule(&self, job: Job) -> Result<()> {
        job();
        Ok(())
    }
}
