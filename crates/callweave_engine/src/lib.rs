//! Tokenizer, method registry, and recursive evaluation loop for Callweave.
//!
//! This crate provides:
//! - [`Engine`] - The facade owning registry, variables, prefix, and syntax
//! - [`Compiled`] - A parsed line, reusable across evaluations
//! - [`Method`] - The handler trait behind every registered method
//! - [`MethodRegistry`] - Name and arity dispatch with "at least n" fallback
//! - [`RuntimeContext`] - Per-evaluation state handed to handlers
//! - [`AliasMethod`] / [`RedirectMethod`] - Textual and forwarding indirection
//!
//! A line is compiled once into a segment tree; evaluation walks the tree,
//! resolving `name(args)` spans through the registry and splicing results
//! back in place. Spans that do not resolve stay literal.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod alias;
pub mod context;
pub mod engine;
pub mod method;
pub mod parameter;
pub mod parser;
pub mod registry;
pub mod syntax;
pub mod variables;

pub use alias::{AliasMethod, RedirectMethod};
pub use context::{RuntimeContext, STOPPING_THRESHOLD, WARNING_THRESHOLD};
pub use engine::{Engine, RedirectRequest};
pub use method::{Method, MethodResult, method_fn};
pub use parameter::{Call, Compiled, Parameter, Segment};
pub use registry::MethodRegistry;
pub use syntax::Syntax;
pub use variables::VariableStore;
