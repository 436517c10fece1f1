// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core types shared by every seqflux crate.
//!
//! - [`StreamItem`]: the element carried by every pipeline stream (a value or a terminal error)
//! - [`SeqfluxError`] and the crate-wide [`Result`] alias
//! - [`Sequence`]: an immutable, shareable seed list that produces lazy streams
//! - [`CancellationToken`]: cooperative cancellation for scheduled work

pub mod cancellation_token;
pub mod error;
pub mod sequence;
pub mod stream_item;

pub use self::cancellation_token::{CancellationToken, Cancelled};
pub use self::error::{IntoSeqfluxError, Result, ResultExt, SeqfluxError};
pub use self::sequence::{BoxSequence, Item, Sequence};
pub use self::stream_item::StreamItem;
