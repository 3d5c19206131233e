//! Arithmetic methods.

use std::sync::Arc;

use callweave_engine::{Engine, Method, MethodResult, Parameter, RuntimeContext};
use callweave_foundation::{Result, Value};

use crate::coerce::{self, Number};

/// Running total that stays integral until a float joins in.
#[derive(Clone, Copy)]
struct Total {
    int_part: i64,
    float_part: f64,
    any_float: bool,
}

impl Total {
    const ZERO: Self = Self {
        int_part: 0,
        float_part: 0.0,
        any_float: false,
    };

    fn add(&mut self, n: Number) {
        match n {
            Number::Int(n) => self.int_part = self.int_part.wrapping_add(n),
            Number::Float(f) => {
                self.float_part += f;
                self.any_float = true;
            }
        }
    }

    fn sub(&mut self, n: Number) {
        match n {
            Number::Int(n) => self.int_part = self.int_part.wrapping_sub(n),
            Number::Float(f) => {
                self.float_part -= f;
                self.any_float = true;
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn into_value(self, ctx: &RuntimeContext<'_>) -> Value {
        if self.any_float {
            Value::Float(self.int_part as f64 + self.float_part, ctx.default_format())
        } else {
            Value::Int(self.int_part)
        }
    }
}

/// `add(args...)`: sum of the numeric arguments. Non-numeric arguments
/// are skipped. The result is an integer unless a float took part.
pub struct AddMethod;

impl Method for AddMethod {
    fn call(&self, args: &[Parameter], ctx: &mut RuntimeContext<'_>) -> MethodResult {
        let mut total = Total::ZERO;
        for arg in args {
            if let Some(n) = coerce::number_arg(arg, ctx) {
                total.add(n);
            }
        }
        Ok(Some(total.into_value(ctx)))
    }
}

/// `subtract(first, rest...)`: the first numeric argument minus the sum
/// of the remaining numeric arguments. Abstains when the first argument
/// is not a number.
pub struct SubtractMethod;

impl Method for SubtractMethod {
    fn call(&self, args: &[Parameter], ctx: &mut RuntimeContext<'_>) -> MethodResult {
        let Some((first, rest)) = args.split_first() else {
            return Ok(None);
        };
        let Some(first) = coerce::number_arg(first, ctx) else {
            return Ok(None);
        };
        let mut total = Total::ZERO;
        total.add(first);
        for arg in rest {
            if let Some(n) = coerce::number_arg(arg, ctx) {
                total.sub(n);
            }
        }
        Ok(Some(total.into_value(ctx)))
    }
}

/// `round(value)`: rounds a float to the nearest whole number, keeping
/// the float's display format. Integers pass through; anything else
/// abstains.
pub struct RoundMethod;

impl Method for RoundMethod {
    fn call(&self, args: &[Parameter], ctx: &mut RuntimeContext<'_>) -> MethodResult {
        if args.len() != 1 {
            return Ok(None);
        }
        match args[0].value(ctx) {
            Value::Int(n) => Ok(Some(Value::Int(n))),
            Value::Float(f, format) => Ok(Some(Value::Float(f.round(), format))),
            other => match coerce::to_number(&other) {
                Some(Number::Float(f)) => {
                    Ok(Some(Value::Float(f.round(), ctx.default_format())))
                }
                Some(Number::Int(n)) => Ok(Some(Value::Int(n))),
                None => Ok(None),
            },
        }
    }
}

/// Registers `add`, `subtract`, and `round`.
///
/// # Errors
/// Returns an error if a registration fails name validation.
pub fn register(engine: &mut Engine) -> Result<()> {
    engine.register_method("add", Arc::new(AddMethod), &[-1])?;
    engine.register_method("subtract", Arc::new(SubtractMethod), &[-1])?;
    engine.register_method("round", Arc::new(RoundMethod), &[1])?;
    Ok(())
}

// =================================================================
// Tests
// =================================================================
