//! Integration tests for Layer 1: Engine
//!
//! Tests the expansion pipeline through the public Engine API: dispatch,
//! aliases and redirects, variables, and evaluation semantics.

mod dispatch;
mod expansion;
mod variables;
