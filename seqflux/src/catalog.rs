// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Ready-made pipelines over the five-name seed list.
//!
//! Each function builds one pipeline showing a single operator family. Run it
//! against [`names`] (or any other sequence of names).
//!
//! | Pipeline | Output for [`names`] |
//! |----------|----------------------|
//! | [`uppercase_names`] | `AJ CHARLES ERICK JEROME JM` in any order |
//! | [`lowercase_names`] | `aj charles erick jerome jm` |
//! | [`long_names`] | `Charles Erick Jerome` |
//! | [`short_name_letters`] | `A J J m` (letters of one name stay together) |
//! | [`long_name_letters`] | the 18 letters of `CHARLESERICKJEROME`, in order |
//! | [`transformed_long_names`] | `CHARLES ERICK JEROME` |
//! | [`long_names_or_default`] | [`NO_LONG_NAME`] |
//! | [`long_names_or_fallback`] | [`NO_NAME_LONGER_THAN_TEN`] |

use futures::StreamExt;
use seqflux_core::{BoxSequence, Item, Result, Sequence};
use seqflux_exec::{DrainExt, InlineScheduler, Scheduler};
use seqflux_stream::{Pipeline, Stage, TransformFn};
#[cfg(feature = "runtime-tokio")]
use seqflux_stream::DelayElementsExt;
use std::sync::Arc;
#[cfg(feature = "runtime-tokio")]
use std::time::Duration;

/// The seed names, in order.
pub const NAMES: [&str; 5] = ["AJ", "Charles", "Erick", "Jerome", "Jm"];

/// Emitted by [`long_names_or_default`] when no name qualifies.
pub const NO_LONG_NAME: &str = "No names more than the length of 10";

/// Emitted by [`long_names_or_fallback`] when no name qualifies.
pub const NO_NAME_LONGER_THAN_TEN: &str = "No name is more than the length of 10";

/// The seed sequence.
pub fn names() -> Sequence<Item> {
    Sequence::from(&NAMES[..])
}

/// A name's letters as a lazy sequence of one-character strings.
pub fn letters(name: &str) -> BoxSequence<Item> {
    name.chars()
        .map(String::from)
        .collect::<Sequence<_>>()
        .produce_boxed()
}

/// Uppercases every name on `scheduler`, emitting results as they finish.
pub fn uppercase_names(scheduler: Arc<dyn Scheduler>) -> Pipeline<Item> {
    Pipeline::new(scheduler)
        .flat_expand_unordered(|name: Item| {
            crate::debug!(
                "Processing name: {name} on {:?}",
                std::thread::current().name()
            );
            Ok(Sequence::new(vec![name.to_uppercase()]).produce_boxed())
        })
        .log("uppercase_names")
}

/// Lowercases every name, keeping input order.
pub fn lowercase_names() -> Pipeline<Item> {
    Pipeline::inline()
        .map(|name: Item| name.to_lowercase())
        .log("lowercase_names")
}

/// Keeps the names longer than three characters.
pub fn long_names() -> Pipeline<Item> {
    Pipeline::inline()
        .filter(|name: &Item| name.len() > 3)
        .log("long_names")
}

/// Letters of the names shorter than three characters, expanded on `scheduler`.
pub fn short_name_letters(scheduler: Arc<dyn Scheduler>) -> Pipeline<Item> {
    Pipeline::new(scheduler)
        .filter(|name: &Item| name.len() < 3)
        .flat_expand_unordered(|name| Ok(letters(&name)))
        .log("short_name_letters")
}

/// Like [`short_name_letters`], but each name's letters are spaced by a random
/// delay below `max_delay`, so names interleave differently on every run.
#[cfg(feature = "runtime-tokio")]
pub fn short_name_letters_jittered(
    scheduler: Arc<dyn Scheduler>,
    max_delay: Duration,
) -> Pipeline<Item> {
    let max_millis = u64::try_from(max_delay.as_millis()).unwrap_or(u64::MAX).max(1);

    Pipeline::new(scheduler)
        .filter(|name: &Item| name.len() < 3)
        .flat_expand_unordered(move |name| {
            let delay = Duration::from_millis(fastrand::u64(0..max_millis));
            Ok(letters(&name).delay_elements(delay).boxed())
        })
        .log("short_name_letters_jittered")
}

/// Letters of the uppercased long names, strictly in input order, each letter
/// delayed by `delay`.
#[cfg(feature = "runtime-tokio")]
pub fn long_name_letters(scheduler: Arc<dyn Scheduler>, delay: Duration) -> Pipeline<Item> {
    Pipeline::new(scheduler)
        .filter(|name: &Item| name.len() > 3)
        .map(|name| name.to_uppercase())
        .flat_expand_ordered(move |name| Ok(letters(&name).delay_elements(delay).boxed()))
        .log("long_name_letters")
}

/// Uppercases then keeps names longer than three characters.
pub fn uppercase_long_names() -> TransformFn<Item> {
    Pipeline::inline()
        .map(|name: Item| name.to_uppercase())
        .filter(|name| name.len() > 3)
        .into_transform()
}

/// Runs [`uppercase_long_names`] as a single transform stage.
pub fn transformed_long_names() -> Pipeline<Item> {
    Pipeline::inline()
        .stage(Stage::Transform(uppercase_long_names()))
        .log("transformed_long_names")
}

/// Names longer than ten characters, or [`NO_LONG_NAME`] when there are none.
pub fn long_names_or_default() -> Pipeline<Item> {
    Pipeline::inline()
        .filter(|name: &Item| name.len() > 10)
        .default_if_empty(NO_LONG_NAME.to_string())
        .log("long_names_or_default")
}

/// Names longer than ten characters, or a fallback sequence holding
/// [`NO_NAME_LONGER_THAN_TEN`] when there are none.
pub fn long_names_or_fallback() -> Pipeline<Item> {
    Pipeline::inline()
        .filter(|name: &Item| name.len() > 10)
        .switch_if_empty(Sequence::from(&[NO_NAME_LONGER_THAN_TEN][..]))
        .log("long_names_or_fallback")
}

/// The uppercased letters of a single name as a sequence.
pub fn name_letters(name: impl Into<Item>, scheduler: Arc<dyn Scheduler>) -> BoxSequence<Item> {
    Pipeline::new(scheduler)
        .map(|name: Item| name.to_uppercase())
        .flat_expand_ordered(|name| Ok(letters(&name)))
        .log("name_letters")
        .run(&Sequence::new(vec![name.into()]))
}

/// The uppercased letters of a single name, collected into one list.
///
/// # Errors
///
/// Returns any error raised while expanding the name.
pub async fn collect_name_letters(name: impl Into<Item>) -> Result<Vec<Item>> {
    name_letters(name, Arc::new(InlineScheduler))
        .drain_to_list()
        .await
}
