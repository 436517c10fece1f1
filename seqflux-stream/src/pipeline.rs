// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A reusable, data-driven chain of stages.
//!
//! The operator extension traits compose at compile time. [`Pipeline`] is the
//! runtime counterpart: an ordered list of [`Stage`]s plus the scheduler used by
//! the flat-expand stages, built once and run against any number of
//! [`Sequence`]s. Every stage lowers to the matching operator, so both styles
//! behave identically.
//!
//! ```rust
//! use seqflux_core::Sequence;
//! use seqflux_exec::DrainExt;
//! use seqflux_stream::Pipeline;
//!
//! # #[tokio::main]
//! # async fn main() -> seqflux_core::Result<()> {
//! let names = Sequence::from(&["AJ", "Charles", "Erick", "Jerome", "Jm"][..]);
//!
//! let pipeline = Pipeline::inline()
//!     .filter(|name: &String| name.len() > 3)
//!     .map(|name| name.to_uppercase());
//!
//! assert_eq!(
//!     pipeline.run(&names).drain_to_list().await?,
//!     vec!["CHARLES", "ERICK", "JEROME"]
//! );
//! // Stages are immutable: running again gives the same result
//! assert_eq!(pipeline.run(&names).drain_to_list().await?.len(), 3);
//! # Ok(())
//! # }
//! ```

use crate::{
    FilterItemsExt, FlatExpandExt, FlatExpandOptions, IfEmptyExt, LogExt, MapItemsExt,
};
use futures::StreamExt;
use seqflux_core::{BoxSequence, Result, Sequence};
use seqflux_exec::{InlineScheduler, Scheduler};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
#[cfg(feature = "runtime-tokio")]
use std::time::Duration;

/// Shared 1:1 transformation.
pub type MapFn<T> = Arc<dyn Fn(T) -> T + Send + Sync>;
/// Shared fallible 1:1 transformation.
pub type TryMapFn<T> = Arc<dyn Fn(T) -> Result<T> + Send + Sync>;
/// Shared filter predicate.
pub type PredicateFn<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;
/// Shared one-to-many expansion.
pub type ExpandFn<T> = Arc<dyn Fn(T) -> Result<BoxSequence<T>> + Send + Sync>;
/// Shared stream-to-stream composition.
pub type TransformFn<T> = Arc<dyn Fn(BoxSequence<T>) -> BoxSequence<T> + Send + Sync>;

/// One step of a [`Pipeline`].
///
/// Stages only hold shared functions and values, so cloning one is cheap and a
/// stage can appear in several pipelines.
#[derive(Clone)]
pub enum Stage<T> {
    /// See [`MapItemsExt::map_items`].
    Map(MapFn<T>),
    /// See [`MapItemsExt::try_map_items`].
    TryMap(TryMapFn<T>),
    /// See [`FilterItemsExt::filter_items`].
    Filter(PredicateFn<T>),
    /// See [`FlatExpandExt::flat_expand_ordered`].
    FlatExpandOrdered {
        expand: ExpandFn<T>,
        options: FlatExpandOptions,
    },
    /// See [`FlatExpandExt::flat_expand_unordered`].
    FlatExpandUnordered {
        expand: ExpandFn<T>,
        options: FlatExpandOptions,
    },
    /// See [`IfEmptyExt::default_if_empty`].
    DefaultIfEmpty(T),
    /// See [`IfEmptyExt::switch_if_empty`].
    SwitchIfEmpty(Sequence<T>),
    /// See [`TransformExt::transform`](crate::TransformExt::transform).
    Transform(TransformFn<T>),
    /// See [`DelayElementsExt::delay_elements`](crate::DelayElementsExt::delay_elements).
    #[cfg(feature = "runtime-tokio")]
    DelayElements(Duration),
    /// See [`LogExt::log`].
    Log(Cow<'static, str>),
}

impl<T> Stage<T>
where
    T: Clone + Send + Sync + fmt::Debug + 'static,
{
    /// A [`Stage::Map`] stage.
    pub fn map(f: impl Fn(T) -> T + Send + Sync + 'static) -> Self {
        Self::Map(Arc::new(f))
    }

    /// A [`Stage::TryMap`] stage.
    pub fn try_map(f: impl Fn(T) -> Result<T> + Send + Sync + 'static) -> Self {
        Self::TryMap(Arc::new(f))
    }

    /// A [`Stage::Filter`] stage.
    pub fn filter(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self::Filter(Arc::new(predicate))
    }

    /// A [`Stage::FlatExpandOrdered`] stage with default options.
    pub fn flat_expand_ordered(
        expand: impl Fn(T) -> Result<BoxSequence<T>> + Send + Sync + 'static,
    ) -> Self {
        Self::FlatExpandOrdered {
            expand: Arc::new(expand),
            options: FlatExpandOptions::default(),
        }
    }

    /// A [`Stage::FlatExpandUnordered`] stage with default options.
    pub fn flat_expand_unordered(
        expand: impl Fn(T) -> Result<BoxSequence<T>> + Send + Sync + 'static,
    ) -> Self {
        Self::FlatExpandUnordered {
            expand: Arc::new(expand),
            options: FlatExpandOptions::default(),
        }
    }

    /// A [`Stage::Transform`] stage.
    pub fn transform(f: impl Fn(BoxSequence<T>) -> BoxSequence<T> + Send + Sync + 'static) -> Self {
        Self::Transform(Arc::new(f))
    }

    /// Short name of the stage kind, as used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Map(_) => "map",
            Self::TryMap(_) => "try_map",
            Self::Filter(_) => "filter",
            Self::FlatExpandOrdered { .. } => "flat_expand_ordered",
            Self::FlatExpandUnordered { .. } => "flat_expand_unordered",
            Self::DefaultIfEmpty(_) => "default_if_empty",
            Self::SwitchIfEmpty(_) => "switch_if_empty",
            Self::Transform(_) => "transform",
            #[cfg(feature = "runtime-tokio")]
            Self::DelayElements(_) => "delay_elements",
            Self::Log(_) => "log",
        }
    }

    /// Wraps `input` with this stage's operator. Nothing is polled.
    pub fn apply(&self, input: BoxSequence<T>, scheduler: &Arc<dyn Scheduler>) -> BoxSequence<T> {
        match self {
            Self::Map(f) => {
                let f = Arc::clone(f);
                input.map_items(move |value| f(value)).boxed()
            }
            Self::TryMap(f) => {
                let f = Arc::clone(f);
                input.try_map_items(move |value| f(value)).boxed()
            }
            Self::Filter(predicate) => {
                let predicate = Arc::clone(predicate);
                input.filter_items(move |value| predicate(value)).boxed()
            }
            Self::FlatExpandOrdered { expand, options } => {
                let expand = Arc::clone(expand);
                input
                    .flat_expand_ordered_with(Arc::clone(scheduler), *options, move |value| {
                        expand(value)
                    })
                    .boxed()
            }
            Self::FlatExpandUnordered { expand, options } => {
                let expand = Arc::clone(expand);
                input
                    .flat_expand_unordered_with(Arc::clone(scheduler), *options, move |value| {
                        expand(value)
                    })
                    .boxed()
            }
            Self::DefaultIfEmpty(value) => input.default_if_empty(value.clone()).boxed(),
            Self::SwitchIfEmpty(fallback) => input.switch_if_empty(fallback.clone()).boxed(),
            Self::Transform(f) => f(input),
            #[cfg(feature = "runtime-tokio")]
            Self::DelayElements(duration) => {
                crate::DelayElementsExt::delay_elements(input, *duration).boxed()
            }
            Self::Log(label) => input.log(label.clone()).boxed(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Stage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Map(_) => f.write_str("Map"),
            Self::TryMap(_) => f.write_str("TryMap"),
            Self::Filter(_) => f.write_str("Filter"),
            Self::FlatExpandOrdered { options, .. } => f
                .debug_struct("FlatExpandOrdered")
                .field("options", options)
                .finish_non_exhaustive(),
            Self::FlatExpandUnordered { options, .. } => f
                .debug_struct("FlatExpandUnordered")
                .field("options", options)
                .finish_non_exhaustive(),
            Self::DefaultIfEmpty(value) => f.debug_tuple("DefaultIfEmpty").field(value).finish(),
            Self::SwitchIfEmpty(fallback) => {
                f.debug_tuple("SwitchIfEmpty").field(fallback).finish()
            }
            Self::Transform(_) => f.write_str("Transform"),
            #[cfg(feature = "runtime-tokio")]
            Self::DelayElements(duration) => f.debug_tuple("DelayElements").field(duration).finish(),
            Self::Log(label) => f.debug_tuple("Log").field(label).finish(),
        }
    }
}

/// An ordered list of stages and the scheduler its expansions run on.
#[derive(Clone)]
pub struct Pipeline<T> {
    stages: Vec<Stage<T>>,
    scheduler: Arc<dyn Scheduler>,
}

impl<T> Pipeline<T>
where
    T: Clone + Send + Sync + fmt::Debug + 'static,
{
    /// An empty pipeline whose expansions run on `scheduler`.
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            stages: Vec::new(),
            scheduler,
        }
    }

    /// An empty pipeline on the [`InlineScheduler`]; every run is deterministic.
    pub fn inline() -> Self {
        Self::new(Arc::new(InlineScheduler))
    }

    /// An empty pipeline on the tokio blocking pool.
    #[cfg(feature = "runtime-tokio")]
    pub fn parallel() -> Self {
        Self::new(Arc::new(seqflux_exec::ParallelScheduler::new()))
    }

    /// Appends a stage.
    #[must_use]
    pub fn stage(mut self, stage: Stage<T>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Appends a [`Stage::Map`].
    #[must_use]
    pub fn map(self, f: impl Fn(T) -> T + Send + Sync + 'static) -> Self {
        self.stage(Stage::map(f))
    }

    /// Appends a [`Stage::TryMap`]; the first `Err` ends the run.
    #[must_use]
    pub fn try_map(self, f: impl Fn(T) -> Result<T> + Send + Sync + 'static) -> Self {
        self.stage(Stage::try_map(f))
    }

    /// Appends a [`Stage::Filter`].
    #[must_use]
    pub fn filter(self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.stage(Stage::filter(predicate))
    }

    /// Appends an ordered expansion running on this pipeline's scheduler.
    #[must_use]
    pub fn flat_expand_ordered(
        self,
        expand: impl Fn(T) -> Result<BoxSequence<T>> + Send + Sync + 'static,
    ) -> Self {
        self.stage(Stage::flat_expand_ordered(expand))
    }

    /// Appends an unordered expansion running on this pipeline's scheduler.
    #[must_use]
    pub fn flat_expand_unordered(
        self,
        expand: impl Fn(T) -> Result<BoxSequence<T>> + Send + Sync + 'static,
    ) -> Self {
        self.stage(Stage::flat_expand_unordered(expand))
    }

    /// Unordered expansion with at most `options.max_in_flight` expansions pending.
    #[must_use]
    pub fn flat_expand_unordered_with(
        self,
        options: FlatExpandOptions,
        expand: impl Fn(T) -> Result<BoxSequence<T>> + Send + Sync + 'static,
    ) -> Self {
        self.stage(Stage::FlatExpandUnordered {
            expand: Arc::new(expand),
            options,
        })
    }

    /// Emits `value` if nothing reaches this stage.
    #[must_use]
    pub fn default_if_empty(self, value: T) -> Self {
        self.stage(Stage::DefaultIfEmpty(value))
    }

    /// Switches to `fallback` if nothing reaches this stage.
    #[must_use]
    pub fn switch_if_empty(self, fallback: Sequence<T>) -> Self {
        self.stage(Stage::SwitchIfEmpty(fallback))
    }

    /// Appends a [`Stage::Transform`].
    #[must_use]
    pub fn transform(
        self,
        f: impl Fn(BoxSequence<T>) -> BoxSequence<T> + Send + Sync + 'static,
    ) -> Self {
        self.stage(Stage::transform(f))
    }

    /// Delays every value by `duration`.
    #[cfg(feature = "runtime-tokio")]
    #[must_use]
    pub fn delay_elements(self, duration: Duration) -> Self {
        self.stage(Stage::DelayElements(duration))
    }

    /// Logs every signal under `label`.
    #[must_use]
    pub fn log(self, label: impl Into<Cow<'static, str>>) -> Self {
        self.stage(Stage::Log(label.into()))
    }

    /// The stages, in application order.
    pub fn stages(&self) -> &[Stage<T>] {
        &self.stages
    }

    /// The scheduler expansion stages run on.
    pub fn scheduler(&self) -> &Arc<dyn Scheduler> {
        &self.scheduler
    }

    /// Builds the lazy output stream for `source`.
    ///
    /// Can be called any number of times; each call produces an independent stream.
    pub fn run(&self, source: &Sequence<T>) -> BoxSequence<T> {
        self.apply(source.produce_boxed())
    }

    /// Wraps an arbitrary input stream with every stage, in order.
    pub fn apply(&self, input: BoxSequence<T>) -> BoxSequence<T> {
        crate::debug!(
            "building pipeline of {} stages on '{}'",
            self.stages.len(),
            self.scheduler.name()
        );
        self.stages.iter().fold(input, |stream, stage| {
            crate::debug!("  stage: {}", stage.kind());
            stage.apply(stream, &self.scheduler)
        })
    }

    /// Turns the whole pipeline into a single reusable [`Stage::Transform`] function.
    pub fn into_transform(self) -> TransformFn<T> {
        let pipeline = Arc::new(self);
        Arc::new(move |input| pipeline.apply(input))
    }
}

impl<T: fmt::Debug> fmt::Debug for Pipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stages)
            .field("scheduler", &self.scheduler.name())
            .finish()
    }
}
