//! Textual aliases and forwarding redirects.

use std::sync::Arc;

use crate::context::RuntimeContext;
use crate::method::{Method, MethodResult};
use crate::parameter::Parameter;

/// A method defined by a template string.
///
/// `$0;`, `$1;`, ... placeholders are replaced with the corresponding
/// argument's value rendered as parsable call syntax, and the resulting
/// text is compiled and evaluated in place. Because the template can call
/// methods that expand back into this alias, termination relies entirely
/// on the context's depth ceiling.
pub struct AliasMethod {
    template: String,
    arity: usize,
}

impl AliasMethod {
    /// Creates an alias expecting exactly `arity` arguments.
    #[must_use]
    pub fn new(template: impl Into<String>, arity: usize) -> Self {
        Self {
            template: template.into(),
            arity,
        }
    }

    /// The template text.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }
}

impl Method for AliasMethod {
    fn call(&self, args: &[Parameter], ctx: &mut RuntimeContext<'_>) -> MethodResult {
        if args.len() != self.arity {
            return Ok(None);
        }
        let mut text = self.template.clone();
        for (i, arg) in args.iter().enumerate() {
            let placeholder = format!("${i};");
            // Unreferenced arguments are never evaluated.
            if text.contains(&placeholder) {
                let replacement = arg.value(ctx).as_parsable_string(ctx.prefix());
                text = text.replace(&placeholder, &replacement);
            }
        }
        let compiled = ctx.compile(&text);
        Ok(Some(ctx.eval(&compiled)))
    }
}

/// Forwards every invocation to another handler.
///
/// The forwarded invocation goes through [`RuntimeContext::call`], so it
/// counts against the depth ceiling like any direct call.
pub struct RedirectMethod {
    target_name: String,
    target: Arc<dyn Method>,
}

impl RedirectMethod {
    /// Creates a redirect to `target`, labelled with the name it forwards
    /// to for logging.
    #[must_use]
    pub fn new(target_name: impl Into<String>, target: Arc<dyn Method>) -> Self {
        Self {
            target_name: target_name.into(),
            target,
        }
    }
}

impl Method for RedirectMethod {
    fn call(&self, args: &[Parameter], ctx: &mut RuntimeContext<'_>) -> MethodResult {
        Ok(ctx.call(&self.target_name, self.target.as_ref(), args))
    }
}
