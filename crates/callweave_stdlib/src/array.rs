//! Array construction and the value factory dispatcher.

use std::sync::Arc;

use callweave_engine::{Engine, Method, MethodResult, Parameter, RuntimeContext, method_fn};
use callweave_foundation::{Result, Value};

use crate::coerce;

/// `array(args...)`: collects the argument values into an array. Also
/// serves as the `array` value factory for `create`.
pub struct ArrayMethod;

impl Method for ArrayMethod {
    fn call(&self, args: &[Parameter], ctx: &mut RuntimeContext<'_>) -> MethodResult {
        Ok(Some(Value::Array(
            args.iter().map(|arg| arg.value(ctx)).collect(),
        )))
    }
}

/// `create(type, args...)`: dispatches to the value factory registered
/// under `type` (case-insensitive), abstaining for unknown types.
pub struct CreateMethod;

impl Method for CreateMethod {
    fn call(&self, args: &[Parameter], ctx: &mut RuntimeContext<'_>) -> MethodResult {
        let Some((type_arg, rest)) = args.split_first() else {
            return Ok(None);
        };
        let type_name = type_arg.value(ctx).as_string();
        match ctx.factory(&type_name) {
            Some(factory) => factory.call(rest, ctx),
            None => Ok(None),
        }
    }
}

/// Registers `array`.
///
/// # Errors
/// Returns an error if the registration fails name validation.
pub fn register(engine: &mut Engine) -> Result<()> {
    engine.register_method("array", Arc::new(ArrayMethod), &[0, -1])?;
    Ok(())
}

/// Registers `create` and the default factories: `long`, `double`,
/// `string`, `boolean`, and `array`.
///
/// # Errors
/// Returns an error if the registration fails name validation.
pub fn register_create(engine: &mut Engine) -> Result<()> {
    engine.register_method("create", Arc::new(CreateMethod), &[-1])?;
    engine.set_factory(
        "long",
        method_fn(
            |args: &[Parameter], ctx: &mut RuntimeContext| -> MethodResult {
                match args {
                    [arg] => Ok(Some(Value::Int(coerce::require_int(arg, ctx)?))),
                    _ => Ok(None),
                }
            },
        ),
    );
    engine.set_factory(
        "double",
        method_fn(
            |args: &[Parameter], ctx: &mut RuntimeContext| -> MethodResult {
                match args {
                    [arg] => {
                        let f = coerce::require_float(arg, ctx)?;
                        Ok(Some(Value::Float(f, ctx.default_format())))
                    }
                    _ => Ok(None),
                }
            },
        ),
    );
    engine.set_factory(
        "string",
        method_fn(
            |args: &[Parameter], ctx: &mut RuntimeContext| -> MethodResult {
                match args {
                    [arg] => Ok(Some(Value::from(arg.value(ctx).as_string()))),
                    [] => Ok(Some(Value::from(""))),
                    _ => Ok(None),
                }
            },
        ),
    );
    engine.set_factory(
        "boolean",
        method_fn(
            |args: &[Parameter], ctx: &mut RuntimeContext| -> MethodResult {
                match args {
                    [arg] => Ok(coerce::to_bool(&arg.value(ctx)).map(Value::Bool)),
                    _ => Ok(None),
                }
            },
        ),
    );
    engine.set_factory("array", Arc::new(ArrayMethod));
    Ok(())
}

// =================================================================
// Tests
// =================================================================
