// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The root of every pipeline: an immutable, ordered, finite seed list.

use crate::StreamItem;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use std::fmt;
use std::sync::Arc;

/// The canonical item flowing through name pipelines.
pub type Item = String;

/// A type-erased, sendable pipeline stream.
pub type BoxSequence<T> = BoxStream<'static, StreamItem<T>>;

/// An immutable seed list that produces lazy streams.
///
/// Cloning is cheap (the values are shared), so one `Sequence` can root any
/// number of pipelines and be produced any number of times. Each call to
/// [`produce`](Sequence::produce) yields every seed value exactly once, in order.
///
/// # Example
///
/// ```
/// use seqflux_core::{Sequence, StreamItem};
/// use futures::StreamExt;
///
/// # futures::executor::block_on(async {
/// let names = Sequence::new(["AJ", "Jm"].map(String::from));
/// let produced: Vec<_> = names.produce().collect().await;
///
/// assert_eq!(
///     produced,
///     vec![StreamItem::Value("AJ".to_string()), StreamItem::Value("Jm".to_string())]
/// );
/// # });
/// ```
pub struct Sequence<T> {
    values: Arc<[T]>,
}

impl<T> Sequence<T> {
    /// Creates a sequence from an ordered list of seed values.
    pub fn new(values: impl Into<Vec<T>>) -> Self {
        let values: Vec<T> = values.into();
        Self {
            values: Arc::from(values),
        }
    }

    /// A sequence with no values. Useful as a `switch_if_empty` fallback.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Number of seed values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` when the sequence has no seed values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The seed values, in order.
    pub fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T> Sequence<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Produces a lazy stream over the seed values.
    ///
    /// Nothing is cloned until the stream is polled.
    pub fn produce(&self) -> impl Stream<Item = StreamItem<T>> + Send + 'static {
        let values = Arc::clone(&self.values);
        stream::iter(0..values.len()).map(move |index| StreamItem::Value(values[index].clone()))
    }

    /// Same as [`produce`](Sequence::produce), boxed.
    pub fn produce_boxed(&self) -> BoxSequence<T> {
        self.produce().boxed()
    }
}

impl<T> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        Self {
            values: Arc::clone(&self.values),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values.iter()).finish()
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(values: Vec<T>) -> Self {
        Self::new(values)
    }
}

impl From<&[&str]> for Sequence<Item> {
    fn from(values: &[&str]) -> Self {
        values.iter().map(|v| (*v).to_string()).collect()
    }
}
