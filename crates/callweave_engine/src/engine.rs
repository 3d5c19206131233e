//! The engine facade owning all expansion state.

use std::collections::HashMap;
use std::sync::Arc;

use callweave_foundation::{Error, FloatFormat, Result, Value};

use crate::alias::{AliasMethod, RedirectMethod};
use crate::context::RuntimeContext;
use crate::method::Method;
use crate::parameter::Compiled;
use crate::parser;
use crate::registry::MethodRegistry;
use crate::syntax::Syntax;
use crate::variables::VariableStore;

/// A pending redirect for [`Engine::create_redirect_chain`].
#[derive(Clone, Debug)]
pub struct RedirectRequest {
    /// Name to register the redirect under.
    pub name: String,
    /// Name of the method being forwarded to.
    pub existing: String,
    /// Arity keys to redirect; empty means every registered arity.
    pub arities: Vec<i32>,
}

/// The expansion engine: registry, variables, prefix, syntax, and the
/// compile/execute entry points.
///
/// All state lives here; two engines never share anything. Evaluation
/// borrows the engine mutably, which is what makes the whole crate
/// single-threaded by construction.
pub struct Engine {
    registry: MethodRegistry,
    factories: HashMap<String, Arc<dyn Method>>,
    variables: VariableStore,
    prefix: String,
    syntax: Syntax,
    default_format: FloatFormat,
}

impl Engine {
    /// Creates an engine with no methods, no variables, an empty prefix,
    /// and the default syntax.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: MethodRegistry::new(),
            factories: HashMap::new(),
            variables: VariableStore::new(),
            prefix: String::new(),
            syntax: Syntax::DEFAULT,
            default_format: FloatFormat::DEFAULT,
        }
    }

    // ==================================================================
    // Methods
    // ==================================================================

    /// Registers a method. See [`MethodRegistry::register`].
    ///
    /// # Errors
    /// Returns an error if the name fails validation.
    pub fn register_method(
        &mut self,
        name: &str,
        method: Arc<dyn Method>,
        arities: &[i32],
    ) -> Result<usize> {
        self.registry.register(name, &method, arities)
    }

    /// Registers a persistent method, immune to overwrite, unregister,
    /// and [`Engine::clear_methods`].
    ///
    /// # Errors
    /// Returns an error if the name fails validation.
    pub fn register_persistent_method(
        &mut self,
        name: &str,
        method: Arc<dyn Method>,
        arities: &[i32],
    ) -> Result<usize> {
        self.registry.register_persistent(name, &method, arities)
    }

    /// Registers a template alias at an exact arity.
    ///
    /// # Errors
    /// Returns an error if the name fails validation.
    pub fn register_alias(
        &mut self,
        name: &str,
        template: impl Into<String>,
        arity: usize,
    ) -> Result<usize> {
        let key = i32::try_from(arity)
            .map_err(|_| Error::invalid_name(name, "alias arity out of range"))?;
        let alias: Arc<dyn Method> = Arc::new(AliasMethod::new(template, arity));
        self.registry.register(name, &alias, &[key])
    }

    /// Unregisters a method. See [`MethodRegistry::unregister`].
    pub fn unregister_method(&mut self, name: &str, arities: &[i32]) -> usize {
        self.registry.unregister(name, arities)
    }

    /// Returns the handler registered at exactly this arity key.
    #[must_use]
    pub fn get_method(&self, name: &str, arity: i32) -> Option<Arc<dyn Method>> {
        self.registry.resolve_arity(name, arity)
    }

    /// Returns the arity keys registered under `name`.
    #[must_use]
    pub fn method_arities(&self, name: &str) -> Vec<i32> {
        self.registry.arities_of(name)
    }

    /// Removes all non-persistent methods.
    pub fn clear_methods(&mut self) {
        self.registry.clear();
    }

    /// Registers `name` as a forwarder to `existing`.
    ///
    /// One redirect entry is created per arity key; an empty arity list
    /// redirects every arity currently registered for `existing`. Returns
    /// the number of entries created. A missing target arity is skipped,
    /// so the count can be lower than requested.
    ///
    /// # Errors
    /// Returns an error if `name` fails validation.
    pub fn create_redirected(
        &mut self,
        name: &str,
        existing: &str,
        arities: &[i32],
    ) -> Result<usize> {
        let arities = if arities.is_empty() {
            self.registry.arities_of(existing)
        } else {
            arities.to_vec()
        };
        let mut created = 0;
        for arity in arities {
            if let Some(target) = self.registry.resolve_arity(existing, arity) {
                let redirect: Arc<dyn Method> = Arc::new(RedirectMethod::new(existing, target));
                self.registry.register(name, &redirect, &[arity])?;
                created += 1;
            }
        }
        Ok(created)
    }

    /// Applies a batch of redirects whose targets may themselves be
    /// created by other requests in the batch.
    ///
    /// Passes over the pending list until a pass makes no progress;
    /// requests whose targets never appear are returned to the caller.
    ///
    /// # Errors
    /// Returns an error if a request's name fails validation.
    pub fn create_redirect_chain(
        &mut self,
        requests: Vec<RedirectRequest>,
    ) -> Result<Vec<RedirectRequest>> {
        let mut pending = requests;
        loop {
            let mut progressed = false;
            let mut remaining = Vec::new();
            for request in pending {
                if self.registry.contains(&request.existing) {
                    self.create_redirected(&request.name, &request.existing, &request.arities)?;
                    progressed = true;
                } else {
                    remaining.push(request);
                }
            }
            if !progressed || remaining.is_empty() {
                return Ok(remaining);
            }
            pending = remaining;
        }
    }

    // ==================================================================
    // Prefix, syntax, format
    // ==================================================================

    /// The method prefix in effect. Call names must start with it.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Sets the method prefix. The empty prefix is valid and means call
    /// names are used as written.
    ///
    /// # Errors
    /// Returns an error if the prefix contains whitespace or structural
    /// characters.
    pub fn set_prefix(&mut self, prefix: &str) -> Result<()> {
        if prefix.chars().any(char::is_whitespace) {
            return Err(Error::invalid_prefix(prefix, "prefix contains whitespace"));
        }
        if prefix.contains(['(', ')', ',', '"', '\\']) {
            return Err(Error::invalid_prefix(
                prefix,
                "prefix contains a structural character",
            ));
        }
        self.prefix = prefix.to_string();
        Ok(())
    }

    /// The tokenizer configuration in effect.
    #[must_use]
    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    /// Sets or clears the comment marker.
    pub fn set_comment_marker(&mut self, marker: Option<char>) {
        self.syntax.comment = marker;
    }

    /// Enables or disables quote trimming in arguments.
    pub fn set_trim_quotes(&mut self, trim: bool) {
        self.syntax.trim_quotes = trim;
    }

    /// The display format given to freshly computed floats.
    #[must_use]
    pub fn default_format(&self) -> FloatFormat {
        self.default_format
    }

    /// Sets the default float display format.
    pub fn set_default_format(&mut self, format: FloatFormat) {
        self.default_format = format;
    }

    // ==================================================================
    // Variables
    // ==================================================================

    /// Sets a transient variable.
    pub fn set_variable(&mut self, name: impl Into<String>, value: Value) {
        self.variables.set(name, value);
    }

    /// Sets a persistent variable, surviving the end-of-execute sweep.
    pub fn set_persistent_variable(&mut self, name: impl Into<String>, value: Value) {
        self.variables.set_persistent(name, value);
    }

    /// Returns the value of a variable.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Removes a variable, returning its value.
    pub fn unset_variable(&mut self, name: &str) -> Option<Value> {
        self.variables.unset(name)
    }

    /// Returns true if the variable exists.
    #[must_use]
    pub fn is_variable_set(&self, name: &str) -> bool {
        self.variables.is_set(name)
    }

    /// Returns true if the variable exists and is persistent.
    #[must_use]
    pub fn is_variable_persistent(&self, name: &str) -> bool {
        self.variables.is_persistent(name)
    }

    /// Changes the persistence flag of an existing variable.
    pub fn set_variable_persistency(&mut self, name: &str, persistent: bool) -> bool {
        self.variables.set_persistency(name, persistent)
    }

    // ==================================================================
    // Factories
    // ==================================================================

    /// Registers a value factory for the `create` method. Factory names
    /// are case-insensitive.
    pub fn set_factory(&mut self, name: &str, factory: Arc<dyn Method>) {
        self.factories.insert(name.to_lowercase(), factory);
    }

    /// Looks up a value factory.
    #[must_use]
    pub fn factory(&self, name: &str) -> Option<Arc<dyn Method>> {
        self.factories.get(&name.to_lowercase()).map(Arc::clone)
    }

    // ==================================================================
    // Compile and execute
    // ==================================================================

    /// Compiles a line into a reusable segment tree.
    #[must_use]
    pub fn compile(&self, line: &str) -> Compiled {
        parser::compile(line, &self.syntax)
    }

    /// Evaluates a compiled line, preserving the native value kind of a
    /// whole-line call. Transient variables are NOT swept, so hosts can
    /// evaluate several related lines as a batch.
    pub fn evaluate(&mut self, compiled: &Compiled) -> Value {
        let mut ctx = RuntimeContext::new(
            &self.registry,
            &mut self.variables,
            &self.factories,
            &self.prefix,
            &self.syntax,
            self.default_format,
        );
        compiled.eval(&mut ctx)
    }

    /// Evaluates a compiled line to its display text and sweeps transient
    /// variables afterwards.
    pub fn execute_compiled(&mut self, compiled: &Compiled) -> String {
        let text = self.evaluate(compiled).as_string();
        self.variables.sweep();
        text
    }

    /// Compiles and executes a line in one step.
    pub fn execute(&mut self, line: &str) -> String {
        let compiled = self.compile(line);
        self.execute_compiled(&compiled)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
