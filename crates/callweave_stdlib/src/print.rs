//! Printing methods and constants.

use std::sync::Arc;

use callweave_engine::{Engine, Method, MethodResult, Parameter, RuntimeContext};
use callweave_foundation::{Result, Value};

/// `call(args...)`: resolves every argument, joins the results with
/// spaces, and evaluates the joined text as a template again, so values
/// that render to call syntax expand in turn.
///
/// Array results are flattened element by element. An argument without a
/// value renders as `##null##`, an empty result as `##empty##`, which
/// keeps dropped values visible instead of silently collapsing spacing.
pub struct CallMethod;

impl Method for CallMethod {
    fn call(&self, args: &[Parameter], ctx: &mut RuntimeContext<'_>) -> MethodResult {
        let mut pieces = Vec::new();
        for arg in args {
            flatten(arg.inner_value(ctx).as_ref(), &mut pieces);
        }
        let joined = pieces.join(" ");
        let compiled = ctx.compile(&joined);
        Ok(Some(ctx.eval(&compiled)))
    }
}

fn flatten(value: Option<&Value>, pieces: &mut Vec<String>) {
    match value {
        None | Some(Value::Null) => pieces.push("##null##".to_string()),
        Some(Value::Array(items)) => {
            for item in items {
                flatten(Some(item), pieces);
            }
        }
        Some(value) => {
            let text = value.as_string();
            if text.is_empty() {
                pieces.push("##empty##".to_string());
            } else {
                pieces.push(text);
            }
        }
    }
}

/// `print(args...)`: joins the literal argument texts with spaces,
/// without resolving anything.
pub struct PrintMethod;

impl Method for PrintMethod {
    fn call(&self, args: &[Parameter], _ctx: &mut RuntimeContext<'_>) -> MethodResult {
        let texts: Vec<&str> = args.iter().map(Parameter::text).collect();
        Ok(Some(Value::from(texts.join(" "))))
    }
}

/// A zero-argument method returning a fixed value.
pub struct ConstantMethod {
    value: Value,
}

impl ConstantMethod {
    /// Creates a constant returning `value`.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

impl Method for ConstantMethod {
    fn call(&self, args: &[Parameter], _ctx: &mut RuntimeContext<'_>) -> MethodResult {
        if args.is_empty() {
            Ok(Some(self.value.clone()))
        } else {
            Ok(None)
        }
    }
}

/// Zero-argument method returning the engine prefix, registered under the
/// prefix name itself so the prefix can be escaped in templates.
struct PrefixEcho;

impl Method for PrefixEcho {
    fn call(&self, args: &[Parameter], ctx: &mut RuntimeContext<'_>) -> MethodResult {
        if args.is_empty() {
            Ok(Some(Value::from(ctx.prefix())))
        } else {
            Ok(None)
        }
    }
}

/// Registers `call`, `print`, the `null` and `sp` constants, and (under a
/// non-empty prefix) the prefix echo method.
///
/// # Errors
/// Returns an error if a registration fails name validation.
pub fn register(engine: &mut Engine) -> Result<()> {
    engine.register_method("call", Arc::new(CallMethod), &[-1])?;
    engine.register_method("print", Arc::new(PrintMethod), &[-1])?;
    engine.register_method("null", Arc::new(ConstantMethod::new(Value::Null)), &[0])?;
    engine.register_method("sp", Arc::new(ConstantMethod::new(Value::from(""))), &[0])?;
    if !engine.prefix().is_empty() {
        let prefix = engine.prefix().to_string();
        engine.register_method(&prefix, Arc::new(PrefixEcho), &[0])?;
    }
    Ok(())
}

// =================================================================
// Tests
// =================================================================
