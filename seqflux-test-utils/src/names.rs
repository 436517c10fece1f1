// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The name fixtures every pipeline test is built around.

use seqflux_core::{BoxSequence, Item, Sequence};

/// The seed names, in order.
pub const NAMES: [&str; 5] = ["AJ", "Charles", "Erick", "Jerome", "Jm"];

/// Fallback emitted when no name is longer than ten characters.
pub const NO_LONG_NAME: &str = "No names more than the length of 10";

/// Fallback sequence used with `switch_if_empty`.
pub const NO_NAME_LONGER_THAN_TEN: &str = "No name is more than the length of 10";

/// The seed sequence.
pub fn names() -> Sequence<Item> {
    Sequence::from(&NAMES[..])
}

/// Seed names upper-cased, in seed order.
pub fn upper_names() -> Vec<Item> {
    NAMES.iter().map(|name| name.to_uppercase()).collect()
}

/// Splits a name into one-character strings.
pub fn split_chars(name: &str) -> Vec<Item> {
    name.chars().map(String::from).collect()
}

/// A name's characters as a lazy sub-sequence, for expansion stages.
pub fn char_sequence(name: &str) -> BoxSequence<Item> {
    Sequence::new(split_chars(name)).produce_boxed()
}
