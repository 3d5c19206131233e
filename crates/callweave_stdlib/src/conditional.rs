//! Conditional methods.
//!
//! Every method here shares one branch shape: some leading condition
//! arguments, then a `then` argument and an optional `else` argument.
//! Only the chosen branch is ever resolved, so side effects in the other
//! branch never run. A condition that cannot be decided (for example a
//! non-numeric operand of `ifgreater`) makes the method abstain and the
//! span stays literal.

use std::sync::Arc;

use callweave_engine::{Engine, Method, MethodResult, Parameter, RuntimeContext};
use callweave_foundation::{Result, Value};

use crate::coerce;

/// Evaluates the branch arguments after `pre` condition arguments.
///
/// `matched == None` abstains. With no `else` and no match, the result is
/// the empty string.
fn branch(
    args: &[Parameter],
    pre: usize,
    matched: Option<bool>,
    inverted: bool,
    ctx: &mut RuntimeContext<'_>,
) -> MethodResult {
    let Some(matched) = matched else {
        return Ok(None);
    };
    let take_then = matched != inverted;
    match args.len().checked_sub(pre) {
        Some(1) => {
            if take_then {
                Ok(Some(args[pre].value(ctx)))
            } else {
                Ok(Some(Value::from("")))
            }
        }
        Some(2) => {
            let chosen = if take_then { pre } else { pre + 1 };
            Ok(Some(args[chosen].value(ctx)))
        }
        _ => Ok(None),
    }
}

/// `ifequals` family: string comparison of the first two arguments.
pub struct IfCompare {
    ignore_case: bool,
    inverted: bool,
}

impl Method for IfCompare {
    fn call(&self, args: &[Parameter], ctx: &mut RuntimeContext<'_>) -> MethodResult {
        if args.len() < 2 {
            return Ok(None);
        }
        let left = args[0].value(ctx).as_string();
        let right = args[1].value(ctx).as_string();
        let matched = if self.ignore_case {
            left.eq_ignore_ascii_case(&right)
        } else {
            left == right
        };
        branch(args, 2, Some(matched), self.inverted, ctx)
    }
}

/// `ifset`/`ifnotset`: whether the first argument resolves to a value.
pub struct IfSet {
    inverted: bool,
}

impl Method for IfSet {
    fn call(&self, args: &[Parameter], ctx: &mut RuntimeContext<'_>) -> MethodResult {
        if args.is_empty() {
            return Ok(None);
        }
        let matched = args[0].inner_value(ctx).is_some();
        branch(args, 1, Some(matched), self.inverted, ctx)
    }
}

/// Numeric comparisons for the `ifgreater` family.
#[derive(Clone, Copy)]
enum NumericOp {
    Greater,
    GreaterEquals,
    Lower,
    LowerEquals,
}

/// `ifgreater` family: numeric comparison of the first two arguments,
/// abstaining when either is not a number.
pub struct IfNumeric {
    op: NumericOp,
}

impl Method for IfNumeric {
    fn call(&self, args: &[Parameter], ctx: &mut RuntimeContext<'_>) -> MethodResult {
        if args.len() < 2 {
            return Ok(None);
        }
        let left = coerce::float_arg(&args[0], ctx);
        let right = coerce::float_arg(&args[1], ctx);
        let matched = match (left, right) {
            (Some(left), Some(right)) => Some(match self.op {
                NumericOp::Greater => left > right,
                NumericOp::GreaterEquals => left >= right,
                NumericOp::Lower => left < right,
                NumericOp::LowerEquals => left <= right,
            }),
            _ => None,
        };
        branch(args, 2, matched, false, ctx)
    }
}

/// `caseequals(subject, pattern, result, ..., [default])`: returns the
/// result after the first pattern equal to the subject, or the trailing
/// default when the argument count is even, or abstains.
pub struct CaseEquals;

impl Method for CaseEquals {
    fn call(&self, args: &[Parameter], ctx: &mut RuntimeContext<'_>) -> MethodResult {
        if args.len() < 2 {
            return Ok(None);
        }
        let subject = args[0].value(ctx).as_string();
        for i in 0..(args.len() - 1) / 2 {
            let pattern = args[i * 2 + 1].value(ctx).as_string();
            if subject == pattern {
                return Ok(args[i * 2 + 2].inner_value(ctx));
            }
        }
        if args.len() % 2 == 0 {
            Ok(args[args.len() - 1].inner_value(ctx))
        } else {
            Ok(None)
        }
    }
}

/// Registers the conditional methods under their default names.
///
/// # Errors
/// Returns an error if a registration fails name validation.
pub fn register(engine: &mut Engine) -> Result<()> {
    let comparisons: [(&str, bool, bool); 4] = [
        ("ifequals", false, false),
        ("ifnotequals", false, true),
        ("ifequalsignorecase", true, false),
        ("ifnotequalsignorecase", true, true),
    ];
    for (name, ignore_case, inverted) in comparisons {
        engine.register_method(
            name,
            Arc::new(IfCompare {
                ignore_case,
                inverted,
            }),
            &[3, 4],
        )?;
    }

    engine.register_method("ifset", Arc::new(IfSet { inverted: false }), &[2, 3])?;
    engine.register_method("ifnotset", Arc::new(IfSet { inverted: true }), &[2, 3])?;

    let numeric: [(&str, NumericOp); 4] = [
        ("ifgreater", NumericOp::Greater),
        ("ifgreaterequals", NumericOp::GreaterEquals),
        ("iflower", NumericOp::Lower),
        ("iflowerequals", NumericOp::LowerEquals),
    ];
    for (name, op) in numeric {
        engine.register_method(name, Arc::new(IfNumeric { op }), &[3, 4])?;
    }

    engine.register_method("caseequals", Arc::new(CaseEquals), &[-2])?;
    Ok(())
}

// =================================================================
// Tests
// =================================================================
