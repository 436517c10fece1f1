// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude module re-exporting every operator trait and the pipeline types.
//!
//! ```ignore
//! use seqflux_stream::prelude::*;
//!
//! let letters = names
//!     .produce()
//!     .filter_items(|name| name.len() > 3)
//!     .flat_expand_ordered(scheduler, split_chars);
//! ```

#[cfg(feature = "runtime-tokio")]
pub use crate::DelayElementsExt;
pub use crate::{
    FilterItemsExt, FlatExpandExt, FlatExpandOptions, IfEmptyExt, LogExt, MapItemsExt, Pipeline,
    Stage, TransformExt,
};
