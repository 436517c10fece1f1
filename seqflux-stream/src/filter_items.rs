// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Predicate filtering.

use crate::fuse_on_error::FuseOnError;
use futures::future::ready;
use futures::{Stream, StreamExt};
use seqflux_core::StreamItem;

/// Extension trait providing the `filter_items` operator.
pub trait FilterItemsExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Keeps the values for which `predicate` returns `true`, in their original
    /// relative order.
    ///
    /// Errors are always forwarded and end the stream.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use seqflux_core::Sequence;
    /// use seqflux_exec::DrainExt;
    /// use seqflux_stream::FilterItemsExt;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> seqflux_core::Result<()> {
    /// let names = Sequence::from(&["AJ", "Charles", "Erick", "Jerome", "Jm"][..]);
    ///
    /// let long = names.produce().filter_items(|name| name.len() > 3);
    ///
    /// assert_eq!(long.drain_to_list().await?, vec!["Charles", "Erick", "Jerome"]);
    /// # Ok(())
    /// # }
    /// ```
    fn filter_items<F>(self, predicate: F) -> impl Stream<Item = StreamItem<T>> + Send
    where
        Self: Send + 'static,
        T: Send + 'static,
        F: FnMut(&T) -> bool + Send + 'static;
}

impl<S, T> FilterItemsExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn filter_items<F>(self, mut predicate: F) -> impl Stream<Item = StreamItem<T>> + Send
    where
        Self: Send + 'static,
        T: Send + 'static,
        F: FnMut(&T) -> bool + Send + 'static,
    {
        FuseOnError::new(self.filter_map(move |item| {
            ready(match item {
                StreamItem::Value(value) if predicate(&value) => Some(StreamItem::Value(value)),
                StreamItem::Value(_) => None,
                StreamItem::Error(e) => Some(StreamItem::Error(e)),
            })
        }))
    }
}
