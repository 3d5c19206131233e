//! Letter-case transformations.

use std::sync::Arc;

use callweave_engine::{Engine, Method, MethodResult, Parameter, RuntimeContext};
use callweave_foundation::{Result, Value};

/// `case(mode, text)` rewrites `text` according to `mode`:
///
/// * `lower` and `upper` fold the whole string.
/// * `first` uppercases the first letter and leaves the rest alone.
/// * `camel` uppercases the first letter and every letter that follows
///   whitespace.
/// * `none` passes the text through unchanged.
///
/// The four-argument form `case(custom, triggers, receivers, text)`
/// uppercases each receiver character that follows a trigger character
/// (the start of the string counts as a trigger). Unknown modes
/// abstain.
pub struct CaseMethod;

impl Method for CaseMethod {
    fn call(&self, args: &[Parameter], ctx: &mut RuntimeContext<'_>) -> MethodResult {
        let mode = match args.first() {
            Some(arg) => arg.value(ctx).as_string().to_lowercase(),
            None => return Ok(None),
        };
        match (mode.as_str(), args.len()) {
            ("lower", 2) => {
                let text = args[1].value(ctx).as_string();
                Ok(Some(Value::from(text.to_lowercase())))
            }
            ("upper", 2) => {
                let text = args[1].value(ctx).as_string();
                Ok(Some(Value::from(text.to_uppercase())))
            }
            ("first", 2) => {
                let text = args[1].value(ctx).as_string();
                Ok(Some(Value::from(capitalize_first(&text))))
            }
            ("camel", 2) => {
                let text = args[1].value(ctx).as_string();
                Ok(Some(Value::from(camel_case(&text))))
            }
            ("none", 2) => Ok(Some(args[1].value(ctx))),
            ("custom", 4) => {
                let triggers = args[1].value(ctx).as_string();
                let receivers = args[2].value(ctx).as_string();
                let text = args[3].value(ctx).as_string();
                Ok(Some(Value::from(custom_case(&text, &triggers, &receivers))))
            }
            _ => Ok(None),
        }
    }
}

fn capitalize_first(text: &str) -> String {
    let mut done = false;
    text.chars()
        .map(|c| {
            if !done && c.is_alphabetic() {
                done = true;
                c.to_uppercase().next().unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

fn camel_case(text: &str) -> String {
    let mut make_upper = true;
    text.chars()
        .map(|c| {
            if c.is_whitespace() {
                make_upper = true;
                c
            } else if make_upper && c.is_alphabetic() {
                make_upper = false;
                c.to_uppercase().next().unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

fn custom_case(text: &str, triggers: &str, receivers: &str) -> String {
    let mut make_upper = true;
    text.chars()
        .map(|c| {
            if triggers.contains(c) {
                make_upper = true;
                c
            } else if make_upper && receivers.contains(c) {
                make_upper = false;
                c.to_uppercase().next().unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Registers `case`.
///
/// # Errors
/// Returns an error if the registration fails name validation.
pub fn register(engine: &mut Engine) -> Result<()> {
    engine.register_method("case", Arc::new(CaseMethod), &[2, 4])?;
    Ok(())
}

// =================================================================
// Tests
// =================================================================
