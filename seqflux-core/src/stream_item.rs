// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::{Result, SeqfluxError};

/// One element of a pipeline stream.
///
/// A pipeline never yields bare values: each element is either a `Value` or the
/// single terminal `Error`. Operators forward an error once and then complete, so
/// consumers can stop at the first [`is_terminal`](StreamItem::is_terminal) item.
#[derive(Debug, Clone)]
pub enum StreamItem<T> {
    /// A produced value
    Value(T),
    /// The failure that ends the stream
    Error(SeqfluxError),
}

// Two failures are not "the same output", so errors compare unequal
impl<T: PartialEq> PartialEq for StreamItem<T> {
    fn eq(&self, other: &Self) -> bool {
        matches!((self, other), (Self::Value(a), Self::Value(b)) if a == b)
    }
}

impl<T> StreamItem<T> {
    /// `true` for the error that ends a stream.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Applies `f` to a value; an error passes through untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> StreamItem<U> {
        match self {
            Self::Value(value) => StreamItem::Value(f(value)),
            Self::Error(error) => StreamItem::Error(error),
        }
    }

    /// Applies a fallible `f` to a value. An `Err` becomes the terminal error.
    pub fn try_map<U>(self, f: impl FnOnce(T) -> Result<U>) -> StreamItem<U> {
        match self {
            Self::Value(value) => f(value).into(),
            Self::Error(error) => StreamItem::Error(error),
        }
    }

    /// Converts into a `Result`, for `?` at the consumer end.
    pub fn into_result(self) -> Result<T> {
        match self {
            Self::Value(value) => Ok(value),
            Self::Error(error) => Err(error),
        }
    }
}

impl<T> From<Result<T>> for StreamItem<T> {
    fn from(result: Result<T>) -> Self {
        result.map_or_else(Self::Error, Self::Value)
    }
}

impl<T> From<StreamItem<T>> for Result<T> {
    fn from(item: StreamItem<T>) -> Self {
        item.into_result()
    }
}
