// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Execution layer for seqflux pipelines.
//!
//! - [`Scheduler`]: where per-item expansion work runs ([`InlineScheduler`], [`ParallelScheduler`])
//! - [`SubscribeExt`]: the push-based consumer interface (`on_item` / `on_complete` / `on_failure`)
//! - [`DrainExt`]: pull everything into a `Vec`, mostly for tests

pub mod drain;
mod logging;
pub mod scheduler;
pub mod subscribe;

pub use drain::DrainExt;
#[cfg(feature = "runtime-tokio")]
pub use scheduler::ParallelScheduler;
pub use scheduler::{InlineScheduler, Job, Scheduler, SchedulerExt, WorkHandle};
pub use subscribe::{SubscribeExt, SubscriptionOutcome};
