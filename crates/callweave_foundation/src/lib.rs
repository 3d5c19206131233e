//! Value model, numeric display formats, and error types for Callweave.
//!
//! This crate provides:
//! - [`Value`] - The core value type flowing through method calls
//! - [`FloatFormat`] - Decimal display policy attached to float values
//! - [`Error`] - Error types for registration and method faults
//!
//! Values are immutable and cheaply cloneable; the array variant uses a
//! persistent vector so memoized copies share structure.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod format;
pub mod value;

pub use error::{Error, ErrorKind, Result};
pub use format::FloatFormat;
pub use value::{Value, ValueKind};
