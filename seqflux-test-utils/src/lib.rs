// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for seqflux pipelines.
//!
//! Production code builds pipelines from immutable [`Sequence`](seqflux_core::Sequence)s.
//! Tests often need to push values imperatively instead, so this crate provides
//! channel-backed streams alongside fixtures and assertion helpers.
//!
//! # Contents
//!
//! - [`test_channel`] / [`test_channel_with_errors`]: push-driven pipeline sources
//! - [`names`]: the five-name seed list and helpers around it
//! - [`helpers`]: timeout-guarded pulls and multiset assertions
//! - [`ErrorInjectingStream`]: inject a failure at a chosen position
//!
//! ```rust
//! use seqflux_test_utils::{names::names, helpers::unwrap_stream};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut stream = Box::pin(names().produce());
//! assert_eq!(unwrap_stream(&mut stream, 100).await.unwrap(), "AJ");
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod error_injection;
pub mod helpers;
pub mod names;

use futures::{Stream, StreamExt};
use seqflux_core::StreamItem;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use error_injection::ErrorInjectingStream;
pub use helpers::{assert_no_element_emitted, assert_same_multiset, random_delay, unwrap_stream};

/// Creates a test channel that wraps every sent value in `StreamItem::Value`.
///
/// The stream completes once the sender is dropped.
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Send,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx).map(StreamItem::Value);
    (tx, stream)
}

/// Creates a test channel that accepts raw `StreamItem<T>`s, errors included.
pub fn test_channel_with_errors<T: Send + 'static>() -> (
    mpsc::UnboundedSender<StreamItem<T>>,
    impl Stream<Item = StreamItem<T>> + Send,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx);
    (tx, stream)
}
