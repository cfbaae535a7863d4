//! Error types for reducr

use crate::dtype::DType;
use std::any::Any;
use thiserror::Error;

/// Result type alias using reducr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up or running a reduction
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// The backend rejected or faulted while executing a kernel
    #[error("{backend} execution failure: {reason}")]
    DeviceExecution {
        /// The backend that reported the failure
        backend: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// A dependency resolved to failure, so the reduction never started
    #[error("Dependency event {event} failed: {reason}")]
    DependencyFailed {
        /// Id of the failed event
        event: u64,
        /// Failure reason recorded on the event
        reason: String,
    },

    /// DType mismatch between a runtime-tagged value and the requested type
    #[error("DType mismatch: {lhs:?} vs {rhs:?}")]
    DTypeMismatch {
        /// Stored dtype
        lhs: DType,
        /// Requested dtype
        rhs: DType,
    },

    /// Backend-specific error
    #[error("Backend error: {0}")]
    Backend(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Create a device execution error
    pub fn device_execution(backend: &'static str, reason: impl Into<String>) -> Self {
        Self::DeviceExecution {
            backend,
            reason: reason.into(),
        }
    }

    /// Map a caught kernel panic to a device execution error
    pub(crate) fn from_panic(backend: &'static str, payload: &(dyn Any + Send)) -> Self {
        let reason = if let Some(msg) = payload.downcast_ref::<&str>() {
            format!("kernel panicked: {msg}")
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            format!("kernel panicked: {msg}")
        } else {
            "kernel panicked".to_string()
        };
        Self::device_execution(backend, reason)
    }

    /// Returns true if retrying the same call could not change the outcome
    /// without the caller fixing its inputs.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::DTypeMismatch { .. })
    }
}
