//! Error types for the Callweave system.
//!
//! Uses `thiserror` for ergonomic error definition.
//!
//! Only configuration mistakes (bad method names, bad prefixes) surface as
//! hard errors. Faults raised by a method handler are caught at the call
//! boundary, logged, and demoted to "no replacement" so one misbehaving
//! handler cannot take down an expansion.

use thiserror::Error;

use crate::value::ValueKind;

/// Convenience result alias used throughout Callweave.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Callweave operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates an invalid method name error.
    #[must_use]
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidName {
            name: name.into(),
            reason: reason.into(),
        })
    }

    /// Creates an invalid prefix error.
    #[must_use]
    pub fn invalid_prefix(prefix: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPrefix {
            prefix: prefix.into(),
            reason: reason.into(),
        })
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: ValueKind, actual: ValueKind) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates a method fault error.
    #[must_use]
    pub fn method_fault(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MethodFault {
            method: method.into(),
            message: message.into(),
        })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A method name failed validation at registration time.
    #[error("invalid method name {name:?}: {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A method prefix failed validation.
    #[error("invalid prefix {prefix:?}: {reason}")]
    InvalidPrefix {
        /// The rejected prefix.
        prefix: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A handler received a value of the wrong kind.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected value kind.
        expected: ValueKind,
        /// The actual value kind encountered.
        actual: ValueKind,
    },

    /// A handler reported a fault.
    #[error("method {method} failed: {message}")]
    MethodFault {
        /// Name the handler was invoked under.
        method: String,
        /// Description of the fault.
        message: String,
    },
}
