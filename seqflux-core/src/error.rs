// Copyright 2025 seqflux contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for seqflux pipelines.
//!
//! A single root [`SeqfluxError`] covers every failure a pipeline can surface:
//! user transformation failures, scheduler failures and cancelled work.
//! Emptiness is never an error; it is the trigger for the `*_if_empty` fallbacks.
//!
//! # Examples
//!
//! ```
//! use seqflux_core::{Result, SeqfluxError};
//!
//! fn expand(name: &str) -> Result<Vec<String>> {
//!     if name.is_empty() {
//!         return Err(SeqfluxError::stream_error("cannot expand an empty name"));
//!     }
//!     Ok(name.chars().map(String::from).collect())
//! }
//!
//! assert!(expand("").is_err());
//! ```

/// Root error type for all seqflux operations.
#[derive(Debug, thiserror::Error)]
pub enum SeqfluxError {
    /// Stream processing encountered an error
    ///
    /// General failure of a stage that doesn't fit the other categories.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong during stream processing
        context: String,
    },

    /// Custom error from user code
    ///
    /// Wraps errors returned by user-provided map or expansion functions.
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A scheduler could not run a submitted unit of work
    ///
    /// Raised when a worker panicked or the underlying runtime went away.
    #[error("Scheduler '{scheduler}' failed: {context}")]
    SchedulerError {
        /// Name of the scheduler the work was submitted to
        scheduler: &'static str,
        /// What went wrong
        context: String,
    },

    /// Submitted work was cancelled before it produced a result
    #[error("Work cancelled before completion")]
    WorkCancelled,
}

impl SeqfluxError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Create a scheduler error for the named scheduler
    pub fn scheduler_error(scheduler: &'static str, context: impl Into<String>) -> Self {
        Self::SchedulerError {
            scheduler,
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Whether the failure came from the scheduling layer rather than from user code.
    #[must_use]
    pub const fn is_scheduler_failure(&self) -> bool {
        matches!(self, Self::SchedulerError { .. } | Self::WorkCancelled)
    }

    /// Check if this error indicates a permanent failure
    ///
    /// Nothing in a pipeline is retried, so user and processing errors are permanent.
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::StreamProcessingError { .. } | Self::UserError(_)
        )
    }
}

/// Specialized Result type for seqflux operations
pub type Result<T> = std::result::Result<T, SeqfluxError>;

/// Extension trait for converting errors into `SeqfluxError`
///
/// Implemented for every `std::error::Error + Send + Sync + 'static`.
pub trait IntoSeqfluxError {
    /// Convert this error into a `SeqfluxError` with additional context
    fn into_seqflux_error(self, context: &str) -> SeqfluxError;

    /// Convert this error into a `SeqfluxError` without additional context
    fn into_seqflux(self) -> SeqfluxError
    where
        Self: Sized,
    {
        self.into_seqflux_error("")
    }
}

impl<E: std::error::Error + Send + Sync + 'static> IntoSeqfluxError for E {
    fn into_seqflux_error(self, context: &str) -> SeqfluxError {
        if context.is_empty() {
            SeqfluxError::user_error(self)
        } else {
            SeqfluxError::stream_error(format!("{context}: {self}"))
        }
    }
}

/// Helper trait for adding context to `Result`s
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// # Errors
    /// Returns `Err(SeqfluxError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(SeqfluxError)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<SeqfluxError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.with_context(|| context.into())
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| match e.into() {
            SeqfluxError::UserError(inner) => SeqfluxError::StreamProcessingError {
                context: format!("{}: {inner}", f()),
            },
            other => other,
        })
    }
}

impl Clone for SeqfluxError {
    fn clone(&self) -> Self {
        match self {
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
            // Boxed user errors can't be cloned, keep the message
            Self::UserError(e) => Self::StreamProcessingError {
                context: format!("User error: {e}"),
            },
            Self::SchedulerError { scheduler, context } => Self::SchedulerError {
                scheduler: *scheduler,
                context: context.clone(),
            },
            Self::WorkCancelled => Self::WorkCancelled,
        }
    }
}
