//! Per-evaluation state handed to method handlers.

use std::collections::HashMap;
use std::sync::Arc;

use callweave_foundation::{FloatFormat, Value};
use tracing::{error, warn};

use crate::method::Method;
use crate::parameter::{Compiled, Parameter};
use crate::parser;
use crate::registry::MethodRegistry;
use crate::syntax::Syntax;
use crate::variables::VariableStore;

/// Depth at which further calls are refused and left literal.
pub const STOPPING_THRESHOLD: usize = 100;

/// Depth at which a warning is logged before proceeding.
pub const WARNING_THRESHOLD: usize = 90;

/// Per-evaluation state: registry and variable access, the method prefix,
/// and the recursion depth counter.
///
/// A context borrows its state from the engine for the duration of one
/// evaluation. Every method invocation goes through [`RuntimeContext::call`]
/// so the depth ceiling holds across aliases, redirects, and handlers that
/// re-enter the engine.
pub struct RuntimeContext<'a> {
    registry: &'a MethodRegistry,
    variables: &'a mut VariableStore,
    factories: &'a HashMap<String, Arc<dyn Method>>,
    prefix: &'a str,
    syntax: &'a Syntax,
    default_format: FloatFormat,
    depth: usize,
}

impl<'a> RuntimeContext<'a> {
    /// Creates a context at depth zero.
    pub fn new(
        registry: &'a MethodRegistry,
        variables: &'a mut VariableStore,
        factories: &'a HashMap<String, Arc<dyn Method>>,
        prefix: &'a str,
        syntax: &'a Syntax,
        default_format: FloatFormat,
    ) -> Self {
        Self {
            registry,
            variables,
            factories,
            prefix,
            syntax,
            default_format,
            depth: 0,
        }
    }

    /// The method prefix in effect.
    #[must_use]
    pub fn prefix(&self) -> &str {
        self.prefix
    }

    /// The tokenizer configuration in effect.
    #[must_use]
    pub fn syntax(&self) -> &Syntax {
        self.syntax
    }

    /// The display format given to freshly computed floats.
    #[must_use]
    pub fn default_format(&self) -> FloatFormat {
        self.default_format
    }

    /// Current recursion depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Read access to the variable store.
    #[must_use]
    pub fn variables(&self) -> &VariableStore {
        self.variables
    }

    /// Write access to the variable store.
    pub fn variables_mut(&mut self) -> &mut VariableStore {
        self.variables
    }

    /// Looks up a value factory by name (case-insensitive).
    #[must_use]
    pub fn factory(&self, name: &str) -> Option<Arc<dyn Method>> {
        self.factories.get(&name.to_lowercase()).map(Arc::clone)
    }

    /// Resolves a written call name against the registry.
    ///
    /// With a non-empty prefix, a name that lacks the prefix does not
    /// resolve and the span stays literal.
    #[must_use]
    pub fn resolve(&self, name: &str, argc: usize) -> Option<Arc<dyn Method>> {
        let bare = name.strip_prefix(self.prefix)?;
        self.registry.resolve(bare, argc)
    }

    /// Invokes a method under the depth ceiling.
    ///
    /// At [`STOPPING_THRESHOLD`] the call is refused and `None` is
    /// returned, which leaves the span literal and terminates any
    /// expansion cycle. A handler fault is logged and likewise demoted to
    /// `None`.
    pub fn call(&mut self, name: &str, method: &dyn Method, args: &[Parameter]) -> Option<Value> {
        if self.depth >= STOPPING_THRESHOLD {
            error!(method = name, depth = self.depth, "expansion depth ceiling reached, span left literal");
            return None;
        }
        if self.depth >= WARNING_THRESHOLD {
            warn!(method = name, depth = self.depth, "expansion depth approaching ceiling");
        }
        self.depth += 1;
        let result = method.call(args, self);
        self.depth -= 1;
        match result {
            Ok(value) => value,
            Err(err) => {
                warn!(method = name, error = %err, "method handler fault, span left literal");
                None
            }
        }
    }

    /// Compiles a line with the context's syntax.
    #[must_use]
    pub fn compile(&self, line: &str) -> Compiled {
        parser::compile(line, self.syntax)
    }

    /// Evaluates a compiled line in this context.
    pub fn eval(&mut self, compiled: &Compiled) -> Value {
        compiled.eval(self)
    }
}
