//! Random argument selection.

use std::sync::Arc;

use callweave_engine::{Engine, Method, MethodResult, Parameter, RuntimeContext};
use callweave_foundation::Result;
use rand::Rng;

/// `random(args...)`: picks one argument uniformly at random and
/// returns its resolved value. Abstains with no arguments.
pub struct RandomMethod;

impl Method for RandomMethod {
    fn call(&self, args: &[Parameter], ctx: &mut RuntimeContext<'_>) -> MethodResult {
        if args.is_empty() {
            return Ok(None);
        }
        let index = rand::thread_rng().gen_range(0..args.len());
        Ok(args[index].inner_value(ctx))
    }
}

/// Registers `random`.
///
/// # Errors
/// Returns an error if the registration fails name validation.
pub fn register(engine: &mut Engine) -> Result<()> {
    engine.register_method("random", Arc::new(RandomMethod), &[-1])?;
    Ok(())
}

// =================================================================
// Tests
// =================================================================
