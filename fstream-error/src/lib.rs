// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the fstream pull-stream library
//!
//! This crate provides the error handling system shared by every fstream crate.
//! It defines a root [`FStreamError`] type with specific variants for the failure
//! modes of bounded channels, worker pools and user-supplied functions.
//!
//! Stream exhaustion is never an error: it is reported as `Ok(None)` by `next()`.
//!
//! # Examples
//!
//! ```
//! use fstream_error::{FStreamError, Result};
//!
//! fn supply_into_closed_channel() -> Result<()> {
//!     Err(FStreamError::Closed)
//! }
//!
//! assert!(supply_into_closed_channel().unwrap_err().is_illegal_use());
//! ```

use std::time::Duration;

/// Root error type for all fstream operations
#[derive(Debug, thiserror::Error)]
pub enum FStreamError {
    /// A value was supplied into a channel whose consumer already closed it
    #[error("Stream is closed")]
    Closed,

    /// A value was supplied after `end_of_supply` was signaled
    #[error("Supplier already ended")]
    SupplierEnded,

    /// Stream processing encountered an error
    ///
    /// This is a general error for stream operations that don't fit
    /// other specific categories.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong during stream processing
        context: String,
    },

    /// A task running on a worker thread panicked
    ///
    /// The panic is caught at the task boundary so sibling workers keep running.
    #[error("Worker panicked: {context}")]
    WorkerPanic {
        /// Panic payload rendered as text, when available
        context: String,
    },

    /// The executor refused a job because it is shutting down
    #[error("Executor is shut down")]
    ExecutorShutdown,

    /// Timeout occurred while waiting for an operation
    #[error("Operation timed out after {duration:?}: {operation}")]
    Timeout {
        /// The operation that timed out
        operation: String,
        /// How long we waited
        duration: Duration,
    },

    /// Custom error from user code
    ///
    /// This wraps errors produced by user-provided mapping functions and callbacks.
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl FStreamError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Create a worker panic error with the given context
    pub fn worker_panic(context: impl Into<String>) -> Self {
        Self::WorkerPanic {
            context: context.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Check if this error reports misuse of a channel
    ///
    /// Supplying into a closed or ended channel is a programmer error and is
    /// reported synchronously to the caller that attempted it.
    #[must_use]
    pub const fn is_illegal_use(&self) -> bool {
        matches!(
            self,
            Self::Closed | Self::SupplierEnded | Self::ExecutorShutdown
        )
    }

    /// Check if this is a recoverable error
    ///
    /// Timeouts may succeed when retried.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

impl Clone for FStreamError {
    fn clone(&self) -> Self {
        match self {
            Self::Closed => Self::Closed,
            Self::SupplierEnded => Self::SupplierEnded,
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
            Self::WorkerPanic { context } => Self::WorkerPanic {
                context: context.clone(),
            },
            Self::ExecutorShutdown => Self::ExecutorShutdown,
            Self::Timeout {
                operation,
                duration,
            } => Self::Timeout {
                operation: operation.clone(),
                duration: *duration,
            },
            // The boxed source cannot be cloned, keep its rendering
            Self::UserError(e) => Self::StreamProcessingError {
                context: format!("User error: {e}"),
            },
        }
    }
}

/// Specialized Result type for fstream operations
///
/// # Examples
///
/// ```
/// use fstream_error::Result;
///
/// fn process() -> Result<String> {
///     Ok("processed".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, FStreamError>;

/// Extension trait for converting errors into `FStreamError`
///
/// Implemented for every `std::error::Error + Send + Sync + 'static`.
pub trait IntoFStreamError {
    /// Convert this error into a `FStreamError` with additional context
    fn into_fstream_error(self, context: &str) -> FStreamError;

    /// Convert this error into a `FStreamError` without additional context
    fn into_fstream(self) -> FStreamError
    where
        Self: Sized,
    {
        self.into_fstream_error("")
    }
}

impl<E: std::error::Error + Send + Sync + 'static> IntoFStreamError for E {
    fn into_fstream_error(self, context: &str) -> FStreamError {
        if context.is_empty() {
            FStreamError::user_error(self)
        } else {
            FStreamError::stream_error(format!("{context}: {self}"))
        }
    }
}

/// Helper trait for adding context to `Result`s
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// # Errors
    /// Returns `Err(FStreamError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(FStreamError)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<FStreamError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.with_context(|| context.into())
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| match e.into() {
            FStreamError::UserError(inner) => FStreamError::StreamProcessingError {
                context: format!("{}: {inner}", f()),
            },
            other => other,
        })
    }
}
