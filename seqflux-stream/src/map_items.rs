// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! One-to-one transformation operators.

use crate::fuse_on_error::FuseOnError;
use futures::{Stream, StreamExt};
use seqflux_core::{Result, StreamItem};

/// Extension trait providing `map_items` and `try_map_items`.
pub trait MapItemsExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Transforms every value with `f`, keeping order and cardinality.
    ///
    /// `f` runs once per value, when the value is pulled. An upstream error is
    /// forwarded once and ends the stream.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seqflux_core::Sequence;
    /// use seqflux_exec::DrainExt;
    /// use seqflux_stream::MapItemsExt;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> seqflux_core::Result<()> {
    /// let names = Sequence::from(&["AJ", "Charles"][..]);
    ///
    /// let lower = names.produce().map_items(|name| name.to_lowercase());
    ///
    /// assert_eq!(lower.drain_to_list().await?, vec!["aj", "charles"]);
    /// # Ok(())
    /// # }
    /// ```
    fn map_items<U, F>(self, f: F) -> impl Stream<Item = StreamItem<U>> + Send
    where
        Self: Send + 'static,
        U: Send + 'static,
        F: FnMut(T) -> U + Send + 'static;

    /// Like [`map_items`](MapItemsExt::map_items) for a fallible `f`.
    ///
    /// The first failure is emitted as a `StreamItem::Error` and ends the stream;
    /// values emitted before it stay valid.
    fn try_map_items<U, F>(self, f: F) -> impl Stream<Item = StreamItem<U>> + Send
    where
        Self: Send + 'static,
        U: Send + 'static,
        F: FnMut(T) -> Result<U> + Send + 'static;
}

impl<S, T> MapItemsExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn map_items<U, F>(self, mut f: F) -> impl Stream<Item = StreamItem<U>> + Send
    where
        Self: Send + 'static,
        U: Send + 'static,
        F: FnMut(T) -> U + Send + 'static,
    {
        FuseOnError::new(self.map(move |item| item.map(&mut f)))
    }

    fn try_map_items<U, F>(self, mut f: F) -> impl Stream<Item = StreamItem<U>> + Send
    where
        Self: Send + 'static,
        U: Send + 'static,
        F: FnMut(T) -> Result<U> + Send + 'static,
    {
        FuseOnError::new(self.map(move |item| item.try_map(&mut f)))
    }
}
