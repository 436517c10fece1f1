// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Pull-based draining, the list-returning twin of [`SubscribeExt`](crate::SubscribeExt).

use async_trait::async_trait;
use futures::{pin_mut, Stream, StreamExt};
use seqflux_core::{Result, SeqfluxError, StreamItem};

/// Extension trait collecting a pipeline stream into memory.
#[async_trait]
pub trait DrainExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Drains the stream to completion.
    ///
    /// # Errors
    ///
    /// Returns the stream's terminal error, if any. Values emitted before the
    /// failure are dropped; use [`drain_items`](DrainExt::drain_items) to keep them.
    ///
    /// # Example
    ///
    /// ```
    /// use seqflux_core::Sequence;
    /// use seqflux_exec::DrainExt;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> seqflux_core::Result<()> {
    /// let names = Sequence::from(&["AJ", "Jm"][..]);
    /// assert_eq!(names.produce().drain_to_list().await?, vec!["AJ", "Jm"]);
    /// # Ok(())
    /// # }
    /// ```
    async fn drain_to_list(self) -> Result<Vec<T>>;

    /// Drains the stream, returning every value emitted plus the terminal error.
    async fn drain_items(self) -> (Vec<T>, Option<SeqfluxError>);
}

#[async_trait]
impl<S, T> DrainExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
{
    async fn drain_to_list(self) -> Result<Vec<T>> {
        match self.drain_items().await {
            (_, Some(error)) => Err(error),
            (values, None) => Ok(values),
        }
    }

    async fn drain_items(self) -> (Vec<T>, Option<SeqfluxError>) {
        let stream = self;
        pin_mut!(stream);
        let mut values = Vec::new();

        while let Some(item) = stream.next().await {
            match item.into_result() {
                Ok(value) => values.push(value),
                // Failure is terminal even if upstream keeps going
                Err(error) => return (values, Some(error)),
            }
        }

        (values, None)
    }
}
