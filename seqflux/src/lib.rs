// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # seqflux
//!
//! Lazy asynchronous pipelines over finite sequences, with deterministic and
//! non-deterministic expansion modes.
//!
//! ## Overview
//!
//! - A [`Sequence`] is an immutable, shareable seed list. [`Sequence::produce`]
//!   yields its values lazily as a stream of [`StreamItem`]s.
//! - Operators (`map_items`, `filter_items`, `flat_expand_ordered`, ...) wrap that
//!   stream; nothing runs until the result is drained.
//! - Expansion work is handed to an explicitly injected [`Scheduler`]: swap
//!   [`ParallelScheduler`] for [`InlineScheduler`] to make a pipeline deterministic.
//! - [`Pipeline`] captures a list of [`Stage`]s so the same chain can be run again
//!   and again, or folded into another pipeline with
//!   [`Pipeline::into_transform`].
//!
//! ## Quick Start
//!
//! ```rust
//! use seqflux::prelude::*;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> seqflux::Result<()> {
//! let names = Sequence::from(&["AJ", "Charles", "Erick", "Jerome", "Jm"][..]);
//!
//! let letters = names
//!     .produce()
//!     .filter_items(|name| name.len() > 3)
//!     .map_items(|name| name.to_uppercase())
//!     .flat_expand_ordered(Arc::new(ParallelScheduler::new()), |name: String| {
//!         Ok(name.chars().map(String::from).collect::<Sequence<_>>().produce_boxed())
//!     })
//!     .drain_to_list()
//!     .await?;
//!
//! assert_eq!(letters.concat(), "CHARLESERICKJEROME");
//! # Ok(())
//! # }
//! ```

mod logging;

pub mod catalog;

// Re-export core types
pub use seqflux_core::{
    BoxSequence, CancellationToken, IntoSeqfluxError, Item, Result, ResultExt, SeqfluxError,
    Sequence, StreamItem,
};

// Re-export execution types
#[cfg(feature = "runtime-tokio")]
pub use seqflux_exec::ParallelScheduler;
pub use seqflux_exec::{
    DrainExt, InlineScheduler, Scheduler, SchedulerExt, SubscribeExt, SubscriptionOutcome,
    WorkHandle,
};

// Re-export operators and pipelines
pub use seqflux_stream::{FlatExpandOptions, Pipeline, Stage, TransformFn};

/// Prelude module for convenient imports
pub mod prelude {
    pub use seqflux_core::{BoxSequence, Item, Sequence, StreamItem};
    #[cfg(feature = "runtime-tokio")]
    pub use seqflux_exec::ParallelScheduler;
    pub use seqflux_exec::{DrainExt, InlineScheduler, Scheduler, SubscribeExt};
    pub use seqflux_stream::prelude::*;
}
