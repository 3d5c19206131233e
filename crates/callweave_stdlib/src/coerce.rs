//! Lenient argument coercions.
//!
//! Value-level coercions are strict: a string never counts as a number at
//! the [`Value`] level. Method arguments, however, usually arrive as text
//! straight from the tokenizer, so the helpers here try the value kind
//! first and then fall back to parsing the display text.

use callweave_engine::{Parameter, RuntimeContext};
use callweave_foundation::{Error, Result, Value, ValueKind};

/// A number that remembers whether it was integral.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    /// Integral value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
}

impl Number {
    /// Widens to f64.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(n) => n as f64,
            Self::Float(f) => f,
        }
    }
}

/// Coerces a value to a number, parsing text leniently.
#[must_use]
pub fn to_number(value: &Value) -> Option<Number> {
    match value {
        Value::Int(n) => Some(Number::Int(*n)),
        Value::Float(f, _) => Some(Number::Float(*f)),
        Value::Array(items) if items.len() == 1 => to_number(&items[0]),
        _ => {
            let text = value.as_string();
            let text = text.trim();
            if let Ok(n) = text.parse::<i64>() {
                Some(Number::Int(n))
            } else {
                text.parse::<f64>().ok().map(Number::Float)
            }
        }
    }
}

/// Coerces a value to an integer. Floats do not truncate.
#[must_use]
pub fn to_int(value: &Value) -> Option<i64> {
    match to_number(value)? {
        Number::Int(n) => Some(n),
        Number::Float(_) => None,
    }
}

/// Coerces a value to a float. Integers widen.
#[must_use]
pub fn to_float(value: &Value) -> Option<f64> {
    to_number(value).map(Number::as_f64)
}

/// Coerces a value to a boolean, accepting `true`/`false` text in any
/// case.
#[must_use]
pub fn to_bool(value: &Value) -> Option<bool> {
    value.as_bool().or_else(|| {
        match value.as_string().trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    })
}

/// Resolves an argument and coerces it to a number.
pub fn number_arg(arg: &Parameter, ctx: &mut RuntimeContext<'_>) -> Option<Number> {
    to_number(&arg.value(ctx))
}

/// Resolves an argument and coerces it to an integer.
pub fn int_arg(arg: &Parameter, ctx: &mut RuntimeContext<'_>) -> Option<i64> {
    to_int(&arg.value(ctx))
}

/// Resolves an argument and coerces it to a float.
pub fn float_arg(arg: &Parameter, ctx: &mut RuntimeContext<'_>) -> Option<f64> {
    to_float(&arg.value(ctx))
}

/// Resolves an argument to an integer, faulting on input that does not
/// coerce. The fault surfaces at the call boundary, where it is logged
/// and the span left literal.
///
/// # Errors
/// Returns a type mismatch error when the argument is not integral.
pub fn require_int(arg: &Parameter, ctx: &mut RuntimeContext<'_>) -> Result<i64> {
    let value = arg.value(ctx);
    to_int(&value).ok_or_else(|| Error::type_mismatch(ValueKind::Int, value.kind()))
}

/// Resolves an argument to a float, faulting on input that does not
/// coerce.
///
/// # Errors
/// Returns a type mismatch error when the argument is not numeric.
pub fn require_float(arg: &Parameter, ctx: &mut RuntimeContext<'_>) -> Result<f64> {
    let value = arg.value(ctx);
    to_float(&value).ok_or_else(|| Error::type_mismatch(ValueKind::Float, value.kind()))
}
