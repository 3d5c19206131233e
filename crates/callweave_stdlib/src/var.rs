//! Variable access methods.

use std::sync::Arc;

use callweave_engine::{Engine, Method, MethodResult, Parameter, RuntimeContext};
use callweave_foundation::{Result, Value};

/// Collects the value to store: one value directly, several as an array.
fn stored_value(args: &[Parameter], ctx: &mut RuntimeContext<'_>) -> Option<Value> {
    match args.len() {
        2 => Some(args[1].value(ctx)),
        n if n > 2 => Some(Value::Array(
            args[1..].iter().map(|arg| arg.value(ctx)).collect(),
        )),
        _ => None,
    }
}

/// `returnvar(name)` reads a variable, abstaining when it is unset so the
/// span stays literal. `returnvar(name, values...)` stores and returns
/// the value instead; `returnpvar` does the same persistently.
pub struct ReturnVarMethod {
    persistent: bool,
}

impl Method for ReturnVarMethod {
    fn call(&self, args: &[Parameter], ctx: &mut RuntimeContext<'_>) -> MethodResult {
        let Some(name_arg) = args.first() else {
            return Ok(Some(Value::Null));
        };
        let name = name_arg.value(ctx).as_string();
        match stored_value(args, ctx) {
            Some(value) => {
                ctx.variables_mut()
                    .set_with_persistency(name, value.clone(), self.persistent);
                Ok(Some(value))
            }
            None => Ok(ctx.variables().get(&name).cloned()),
        }
    }
}

/// `setvar(name, values...)` stores and returns the value; with only a
/// name it stores an empty array. `setpvar` stores persistently.
pub struct SetVarMethod {
    persistent: bool,
}

impl Method for SetVarMethod {
    fn call(&self, args: &[Parameter], ctx: &mut RuntimeContext<'_>) -> MethodResult {
        let Some(name_arg) = args.first() else {
            return Ok(Some(Value::Null));
        };
        let name = name_arg.value(ctx).as_string();
        let value = stored_value(args, ctx)
            .unwrap_or_else(|| Value::from(Vec::<Value>::new()));
        ctx.variables_mut()
            .set_with_persistency(name, value.clone(), self.persistent);
        Ok(Some(value))
    }
}

/// `unsetvar(names...)`: removes each named variable, returning the empty
/// string.
pub struct UnsetVarMethod;

impl Method for UnsetVarMethod {
    fn call(&self, args: &[Parameter], ctx: &mut RuntimeContext<'_>) -> MethodResult {
        for arg in args {
            let name = arg.value(ctx).as_string();
            ctx.variables_mut().unset(&name);
        }
        Ok(Some(Value::from("")))
    }
}

/// Query and flag helpers over a single variable name.
enum VarProbe {
    IsSet,
    IsPersistent,
    MakePersistent,
    MakeTransient,
}

struct VarProbeMethod {
    probe: VarProbe,
}

impl Method for VarProbeMethod {
    fn call(&self, args: &[Parameter], ctx: &mut RuntimeContext<'_>) -> MethodResult {
        let Some(name_arg) = args.first() else {
            return Ok(None);
        };
        let name = name_arg.value(ctx).as_string();
        let result = match self.probe {
            VarProbe::IsSet => ctx.variables().is_set(&name),
            VarProbe::IsPersistent => ctx.variables().is_persistent(&name),
            VarProbe::MakePersistent => ctx.variables_mut().set_persistency(&name, true),
            VarProbe::MakeTransient => ctx.variables_mut().set_persistency(&name, false),
        };
        Ok(Some(Value::Bool(result)))
    }
}

/// Registers the variable methods under their default names.
///
/// # Errors
/// Returns an error if a registration fails name validation.
pub fn register(engine: &mut Engine) -> Result<()> {
    engine.register_method(
        "setvar",
        Arc::new(SetVarMethod { persistent: false }),
        &[-1],
    )?;
    engine.register_method(
        "setpvar",
        Arc::new(SetVarMethod { persistent: true }),
        &[-1],
    )?;
    engine.register_method(
        "returnvar",
        Arc::new(ReturnVarMethod { persistent: false }),
        &[-1],
    )?;
    engine.register_method(
        "returnpvar",
        Arc::new(ReturnVarMethod { persistent: true }),
        &[-1],
    )?;
    engine.register_method("unsetvar", Arc::new(UnsetVarMethod), &[-1])?;
    engine.register_method(
        "isvarset",
        Arc::new(VarProbeMethod {
            probe: VarProbe::IsSet,
        }),
        &[1],
    )?;
    engine.register_method(
        "isvarpersistent",
        Arc::new(VarProbeMethod {
            probe: VarProbe::IsPersistent,
        }),
        &[1],
    )?;
    engine.register_method(
        "setvarpersistent",
        Arc::new(VarProbeMethod {
            probe: VarProbe::MakePersistent,
        }),
        &[1],
    )?;
    engine.register_method(
        "setvartransient",
        Arc::new(VarProbeMethod {
            probe: VarProbe::MakeTransient,
        }),
        &[1],
    )?;
    Ok(())
}

// =================================================================
// Tests
// =================================================================
