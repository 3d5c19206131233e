//! Name and arity dispatch through the Engine API

use std::sync::Arc;

use callweave_engine::{Engine, Method, MethodResult, Parameter, RuntimeContext, method_fn};
use callweave_foundation::Value;

fn constant(text: &'static str) -> Arc<dyn Method> {
    method_fn(
        move |_args: &[Parameter], _ctx: &mut RuntimeContext| -> MethodResult {
            Ok(Some(Value::from(text)))
        },
    )
}

fn argc_reporter() -> Arc<dyn Method> {
    method_fn(
        |args: &[Parameter], _ctx: &mut RuntimeContext| -> MethodResult {
            Ok(Some(Value::Int(args.len() as i64)))
        },
    )
}

// =============================================================================
// Arity resolution
// =============================================================================

#[test]
fn exact_arity_wins_over_open_arity() {
    let mut engine = Engine::new();
    engine.register_method("m", constant("open"), &[-1]).unwrap();
    engine.register_method("m", constant("two"), &[2]).unwrap();
    assert_eq!(engine.execute("m(a, b)"), "two");
    assert_eq!(engine.execute("m(a, b, c)"), "open");
}

#[test]
fn tightest_lower_bound_wins() {
    let mut engine = Engine::new();
    engine.register_method("m", constant("loose"), &[-1]).unwrap();
    engine.register_method("m", constant("tight"), &[-3]).unwrap();
    assert_eq!(engine.execute("m(a, b, c, d)"), "tight");
    assert_eq!(engine.execute("m(a)"), "loose");
}

#[test]
fn zero_arguments_require_an_explicit_zero_arity() {
    let mut engine = Engine::new();
    engine.register_method("m", constant("x"), &[-1]).unwrap();
    assert_eq!(engine.execute("m()"), "m()");
    engine.register_method("m", constant("none"), &[0]).unwrap();
    assert_eq!(engine.execute("m()"), "none");
}

#[test]
fn default_arities_cover_every_count() {
    let mut engine = Engine::new();
    engine.register_method("m", argc_reporter(), &[]).unwrap();
    assert_eq!(engine.execute("m()"), "0");
    assert_eq!(engine.execute("m(a, b, c, d, e)"), "5");
}

// =============================================================================
// Names and persistence
// =============================================================================

#[test]
fn method_names_are_case_sensitive() {
    let mut engine = Engine::new();
    engine.register_method("Upper", constant("x"), &[0]).unwrap();
    assert_eq!(engine.execute("upper()"), "upper()");
    assert_eq!(engine.execute("Upper()"), "x");
}

#[test]
fn invalid_names_are_rejected() {
    let mut engine = Engine::new();
    assert!(engine.register_method("", constant("x"), &[0]).is_err());
    assert!(engine.register_method("a b", constant("x"), &[0]).is_err());
    assert!(engine.register_method("a(b", constant("x"), &[0]).is_err());
}

#[test]
fn persistent_methods_survive_clear() {
    let mut engine = Engine::new();
    engine
        .register_persistent_method("pinned", constant("safe"), &[0])
        .unwrap();
    engine.register_method("loose", constant("gone"), &[0]).unwrap();
    engine.clear_methods();
    assert_eq!(engine.execute("pinned()"), "safe");
    assert_eq!(engine.execute("loose()"), "loose()");
}

#[test]
fn persistent_methods_resist_overwrite() {
    let mut engine = Engine::new();
    engine
        .register_persistent_method("pinned", constant("original"), &[0])
        .unwrap();
    let overwritten = engine
        .register_method("pinned", constant("usurper"), &[0])
        .unwrap();
    assert_eq!(overwritten, 0);
    assert_eq!(engine.execute("pinned()"), "original");
}

#[test]
fn unregister_removes_selected_arities() {
    let mut engine = Engine::new();
    engine.register_method("m", argc_reporter(), &[0, 1, 2]).unwrap();
    assert_eq!(engine.unregister_method("m", &[1]), 1);
    assert_eq!(engine.execute("m(a)"), "m(a)");
    assert_eq!(engine.execute("m(a, b)"), "2");
    assert_eq!(engine.unregister_method("m", &[]), 2);
    assert_eq!(engine.method_arities("m"), Vec::<i32>::new());
}

// =============================================================================
// Host-side invocation
// =============================================================================

#[test]
fn handlers_can_forward_synthesized_arguments() {
    let mut engine = Engine::new();
    engine
        .register_method(
            "shout",
            method_fn(
                |args: &[Parameter], ctx: &mut RuntimeContext| -> MethodResult {
                    Ok(Some(Value::from(
                        args[0].value(ctx).as_string().to_uppercase(),
                    )))
                },
            ),
            &[1],
        )
        .unwrap();
    engine
        .register_method(
            "greet",
            method_fn(
                |_args: &[Parameter], ctx: &mut RuntimeContext| -> MethodResult {
                    let target = ctx.resolve("shout", 1).expect("shout is registered");
                    let arg = Parameter::literal("hello");
                    Ok(ctx.call("shout", target.as_ref(), &[arg]))
                },
            ),
            &[0],
        )
        .unwrap();
    assert_eq!(engine.execute("greet()"), "HELLO");
}

// =============================================================================
// Errors demote to literal spans
// =============================================================================

#[test]
fn a_failing_handler_leaves_the_span_literal() {
    let mut engine = Engine::new();
    engine
        .register_method(
            "broken",
            method_fn(
                |_args: &[Parameter], _ctx: &mut RuntimeContext| -> MethodResult {
                    Err(callweave_foundation::Error::method_fault(
                        "broken",
                        "always fails",
                    ))
                },
            ),
            &[0],
        )
        .unwrap();
    assert_eq!(engine.execute("before broken() after"), "before broken() after");
}
