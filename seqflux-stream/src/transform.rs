// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Reusable stream-to-stream composition.

use futures::Stream;
use seqflux_core::StreamItem;

/// Extension trait providing the `transform` operator.
pub trait TransformExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Applies a composed chain of operators, written once and reused.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use futures::Stream;
    /// use seqflux_core::{Item, Sequence, StreamItem};
    /// use seqflux_exec::DrainExt;
    /// use seqflux_stream::{FilterItemsExt, MapItemsExt, TransformExt};
    ///
    /// fn shout_long_names(
    ///     names: impl Stream<Item = StreamItem<Item>> + Send + 'static,
    /// ) -> impl Stream<Item = StreamItem<Item>> + Send + 'static {
    ///     names
    ///         .map_items(|name| name.to_uppercase())
    ///         .filter_items(|name| name.len() > 3)
    /// }
    ///
    /// # #[tokio::main]
    /// # async fn main() -> seqflux_core::Result<()> {
    /// let names = Sequence::from(&["AJ", "Charles", "Jm"][..]);
    ///
    /// let result = names.produce().transform(shout_long_names).drain_to_list().await?;
    ///
    /// assert_eq!(result, vec!["CHARLES"]);
    /// # Ok(())
    /// # }
    /// ```
    fn transform<U, S2, F>(self, f: F) -> S2
    where
        F: FnOnce(Self) -> S2,
        S2: Stream<Item = StreamItem<U>>,
    {
        f(self)
    }
}

impl<S, T> TransformExt<T> for S where S: Stream<Item = StreamItem<T>> {}
