//! Callweave - Recursive inline macro expander
//!
//! This crate re-exports all layers of the Callweave system for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: callweave_stdlib     — Default method library (print, conditionals,
//!                                 math, variables, arrays, case, random)
//! Layer 1: callweave_engine     — Tokenizer, registry, variables, expansion
//! Layer 0: callweave_foundation — Core types (Value, FloatFormat, Error)
//! ```
//!
//! # Quick start
//!
//! ```
//! use callweave::engine::Engine;
//!
//! let mut engine = Engine::new();
//! callweave::stdlib::install(&mut engine).unwrap();
//! assert_eq!(engine.execute("Total: add(2, 3, 5)"), "Total: 10");
//! ```

pub use callweave_engine as engine;
pub use callweave_foundation as foundation;
pub use callweave_stdlib as stdlib;
