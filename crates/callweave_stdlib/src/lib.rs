//! Built-in methods for Callweave.
//!
//! This crate provides the default method library organized by category:
//! - Printing and constants (`call`, `print`, `null`, `sp`)
//! - Conditionals (`ifequals`, `ifset`, `ifgreater`, `caseequals`, ...)
//! - Math (`add`, `subtract`, `round`, `min`/`max`/`nmin`/`nmax`)
//! - Variables (`setvar`, `returnvar`, `unsetvar`, persistence helpers)
//! - Arrays and value factories (`array`, `create`)
//! - Text case conversion (`case`) and random selection (`random`)
//!
//! [`install`] registers the whole library on an engine; [`install_essential`]
//! registers only the `create` method and its value factories.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod array;
pub mod case;
pub mod coerce;
pub mod conditional;
pub mod math;
pub mod minmax;
pub mod print;
pub mod random;
pub mod var;

use callweave_engine::Engine;
use callweave_foundation::Result;

/// Registers the full default library on `engine`.
///
/// If the engine has a non-empty prefix, a zero-argument method named
/// after the prefix itself is registered as well, so `%%()` under prefix
/// `%` expands to a literal `%`.
///
/// # Errors
/// Returns an error only if a registration fails name validation, which
/// cannot happen for the built-in names.
pub fn install(engine: &mut Engine) -> Result<()> {
    print::register(engine)?;
    conditional::register(engine)?;
    math::register(engine)?;
    minmax::register(engine)?;
    var::register(engine)?;
    array::register(engine)?;
    case::register(engine)?;
    random::register(engine)?;
    install_essential(engine)?;
    Ok(())
}

/// Registers only the `create` method and the default value factories.
///
/// # Errors
/// Returns an error only if a registration fails name validation.
pub fn install_essential(engine: &mut Engine) -> Result<()> {
    array::register_create(engine)
}
