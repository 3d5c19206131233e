//! Order-statistic methods over integer arguments.

use std::sync::Arc;

use callweave_engine::{Engine, Method, MethodResult, Parameter, RuntimeContext};
use callweave_foundation::{Result, Value};

use crate::coerce;

/// `max`/`min` pick the extreme of their integer arguments; `nmax`/`nmin`
/// take a leading rank and pick the n-th highest or lowest. Non-integer
/// arguments are skipped; the method abstains when fewer integers remain
/// than the rank requires.
pub struct MinMaxMethod {
    lowest: bool,
    ranked: bool,
}

impl MinMaxMethod {
    /// `max(args...)`.
    #[must_use]
    pub fn max() -> Self {
        Self {
            lowest: false,
            ranked: false,
        }
    }

    /// `min(args...)`.
    #[must_use]
    pub fn min() -> Self {
        Self {
            lowest: true,
            ranked: false,
        }
    }

    /// `nmax(rank, args...)`.
    #[must_use]
    pub fn nmax() -> Self {
        Self {
            lowest: false,
            ranked: true,
        }
    }

    /// `nmin(rank, args...)`.
    #[must_use]
    pub fn nmin() -> Self {
        Self {
            lowest: true,
            ranked: true,
        }
    }
}

impl Method for MinMaxMethod {
    fn call(&self, args: &[Parameter], ctx: &mut RuntimeContext<'_>) -> MethodResult {
        if args.is_empty() {
            return Ok(None);
        }
        let (rank, values_from) = if self.ranked {
            match coerce::int_arg(&args[0], ctx) {
                Some(rank) if rank >= 1 => (usize::try_from(rank).unwrap_or(usize::MAX), 1),
                _ => return Ok(None),
            }
        } else {
            (1, 0)
        };
        let mut values: Vec<i64> = args[values_from..]
            .iter()
            .filter_map(|arg| coerce::int_arg(arg, ctx))
            .collect();
        if values.len() < rank {
            return Ok(None);
        }
        if self.lowest {
            values.sort_unstable();
        } else {
            values.sort_unstable_by(|a, b| b.cmp(a));
        }
        Ok(Some(Value::Int(values[rank - 1])))
    }
}

/// Registers `max`, `min`, `nmax`, and `nmin`.
///
/// # Errors
/// Returns an error if a registration fails name validation.
pub fn register(engine: &mut Engine) -> Result<()> {
    engine.register_method("max", Arc::new(MinMaxMethod::max()), &[-1])?;
    engine.register_method("min", Arc::new(MinMaxMethod::min()), &[-1])?;
    engine.register_method("nmax", Arc::new(MinMaxMethod::nmax()), &[-2])?;
    engine.register_method("nmin", Arc::new(MinMaxMethod::nmin()), &[-2])?;
    Ok(())
}

// =================================================================
// Tests
// =================================================================
