// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Lazy operators over sequences of [`StreamItem`](seqflux_core::StreamItem)s.
//!
//! Every operator is an extension trait on `Stream<Item = StreamItem<T>>` and
//! returns a new lazy stream: nothing runs until the result is polled, and each
//! poll pulls only as much upstream as needed.
//!
//! ## Operators
//!
//! ### One-to-one
//!
//! - **[`map_items`](MapItemsExt::map_items)**: transform every value
//! - **[`try_map_items`](MapItemsExt::try_map_items)**: transform with a fallible function
//! - **[`filter_items`](FilterItemsExt::filter_items)**: keep values matching a predicate
//!
//! ### One-to-many
//!
//! - **[`flat_expand_unordered`](FlatExpandExt::flat_expand_unordered)**: expand on a
//!   scheduler, merge in availability order
//! - **[`flat_expand_ordered`](FlatExpandExt::flat_expand_ordered)**: expand on a
//!   scheduler, emit in input order
//!
//! ### Emptiness
//!
//! - **[`default_if_empty`](IfEmptyExt::default_if_empty)**: single fallback value
//! - **[`switch_if_empty`](IfEmptyExt::switch_if_empty)**: fallback sequence
//!
//! ### Composition and diagnostics
//!
//! - **[`transform`](TransformExt::transform)**: apply a reusable operator chain
//! - **[`delay_elements`](DelayElementsExt::delay_elements)**: add per-value latency
//!   (`runtime-tokio`)
//! - **[`log`](LogExt::log)**: log every signal
//!
//! ## Errors
//!
//! A `StreamItem::Error` is terminal. Every operator forwards the first error it
//! sees and then completes; values emitted before it stay valid.
//!
//! ## Pipelines
//!
//! [`Pipeline`] holds a list of [`Stage`]s that lower to the operators above and
//! can be run repeatedly against [`Sequence`](seqflux_core::Sequence)s.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

mod logging;

#[cfg(feature = "runtime-tokio")]
pub mod delay_elements;
pub mod filter_items;
pub mod flat_expand;
mod fuse_on_error;
pub mod if_empty;
pub mod log;
pub mod map_items;
pub mod pipeline;
pub mod prelude;
pub mod transform;

#[cfg(feature = "runtime-tokio")]
pub use self::delay_elements::DelayElementsExt;
pub use self::filter_items::FilterItemsExt;
pub use self::flat_expand::{FlatExpandExt, FlatExpandOptions};
pub use self::if_empty::IfEmptyExt;
pub use self::log::LogExt;
pub use self::map_items::MapItemsExt;
pub use self::pipeline::{
    ExpandFn, MapFn, Pipeline, PredicateFn, Stage, TransformFn, TryMapFn,
};
pub use self::transform::TransformExt;
