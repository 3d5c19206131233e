//! Expansion semantics: splicing, laziness, depth, prefix, and syntax

use std::cell::Cell;
use std::rc::Rc;

use callweave_engine::{
    Engine, MethodResult, Parameter, RuntimeContext, STOPPING_THRESHOLD, method_fn,
};
use callweave_foundation::{Value, ValueKind};

// =============================================================================
// Splicing
// =============================================================================

#[test]
fn results_splice_in_place() {
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
    assert_eq!(engine.execute("a shout(b) c shout(d) e"), "a B c D e");
}

#[test]
fn unresolved_calls_stay_verbatim() {
    let mut engine = Engine::new();
    assert_eq!(engine.execute("keep nothing(1, \"a,b\") here"), "keep nothing(1, \"a,b\") here");
}

#[test]
fn whole_line_call_returns_native_value() {
    let mut engine = Engine::new();
    engine
        .register_method(
            "pi",
            method_fn(
                |_args: &[Parameter], _ctx: &mut RuntimeContext| -> MethodResult {
                    Ok(Some(Value::float(3.14)))
                },
            ),
            &[0],
        )
        .unwrap();
    let compiled = engine.compile("pi()");
    assert_eq!(engine.evaluate(&compiled).kind(), ValueKind::Float);
    // The same call embedded in text renders through its format.
    assert_eq!(engine.execute("pi = pi()"), "pi = 3.14");
}

#[test]
fn compiled_lines_are_reusable() {
    let mut engine = Engine::new();
    engine
        .register_method(
            "n",
            method_fn(
                |_args: &[Parameter], ctx: &mut RuntimeContext| -> MethodResult {
                    let next = ctx
                        .variables()
                        .get("n")
                        .and_then(Value::as_int)
                        .unwrap_or(0)
                        + 1;
                    ctx.variables_mut().set("n", Value::Int(next));
                    Ok(Some(Value::Int(next)))
                },
            ),
            &[0],
        )
        .unwrap();
    engine.set_persistent_variable("n", Value::Int(0));
    let compiled = engine.compile("n()");
    assert_eq!(engine.evaluate(&compiled).as_string(), "1");
    assert_eq!(engine.evaluate(&compiled).as_string(), "2");
}

// =============================================================================
// Laziness and memoization
// =============================================================================

#[test]
fn unread_arguments_never_evaluate() {
    let hits = Rc::new(Cell::new(0));
    let mut engine = Engine::new();
    let counter = Rc::clone(&hits);
    engine
        .register_method(
            "tick",
            method_fn(
                move |_args: &[Parameter], _ctx: &mut RuntimeContext| -> MethodResult {
                    counter.set(counter.get() + 1);
                    Ok(Some(Value::from("ticked")))
                },
            ),
            &[0],
        )
        .unwrap();
    engine
        .register_method(
            "first",
            method_fn(
                |args: &[Parameter], ctx: &mut RuntimeContext| -> MethodResult {
                    Ok(Some(args[0].value(ctx)))
                },
            ),
            &[2],
        )
        .unwrap();
    assert_eq!(engine.execute("first(a, tick())"), "a");
    assert_eq!(hits.get(), 0);
}

#[test]
fn arguments_evaluate_at_most_once() {
    let hits = Rc::new(Cell::new(0));
    let mut engine = Engine::new();
    let counter = Rc::clone(&hits);
    engine
        .register_method(
            "tick",
            method_fn(
                move |_args: &[Parameter], _ctx: &mut RuntimeContext| -> MethodResult {
                    counter.set(counter.get() + 1);
                    Ok(Some(Value::from("t")))
                },
            ),
            &[0],
        )
        .unwrap();
    engine
        .register_method(
            "both",
            method_fn(
                |args: &[Parameter], ctx: &mut RuntimeContext| -> MethodResult {
                    let a = args[0].value(ctx).as_string();
                    let b = args[0].value(ctx).as_string();
                    Ok(Some(Value::from(format!("{a}{b}"))))
                },
            ),
            &[1],
        )
        .unwrap();
    assert_eq!(engine.execute("both(tick())"), "tt");
    assert_eq!(hits.get(), 1);
}

#[test]
fn argument_memos_do_not_outlive_an_evaluation() {
    let mut engine = Engine::new();
    engine
        .register_method(
            "get",
            method_fn(
                |_args: &[Parameter], ctx: &mut RuntimeContext| -> MethodResult {
                    Ok(ctx.variables().get("x").cloned())
                },
            ),
            &[0],
        )
        .unwrap();
    engine
        .register_method(
            "echo",
            method_fn(
                |args: &[Parameter], ctx: &mut RuntimeContext| -> MethodResult {
                    Ok(Some(args[0].value(ctx)))
                },
            ),
            &[1],
        )
        .unwrap();
    let compiled = engine.compile("x is echo(get())");
    engine.set_persistent_variable("x", Value::Int(1));
    assert_eq!(engine.evaluate(&compiled).as_string(), "x is 1");
    engine.set_persistent_variable("x", Value::Int(2));
    assert_eq!(engine.evaluate(&compiled).as_string(), "x is 2");
}

// =============================================================================
// Depth ceiling
// =============================================================================

#[test]
fn direct_recursion_is_cut_off() {
    let mut engine = Engine::new();
    engine.register_alias("loop", "x loop()", 0).unwrap();
    let out = engine.execute("loop()");
    assert_eq!(out.matches('x').count(), STOPPING_THRESHOLD);
    assert!(out.ends_with("loop()"));
}

// =============================================================================
// Prefix and syntax
// =============================================================================

#[test]
fn prefix_strips_before_lookup() {
    let mut engine = Engine::new();
    engine.set_prefix("$").unwrap();
    engine
        .register_method(
            "hi",
            method_fn(
                |_args: &[Parameter], _ctx: &mut RuntimeContext| -> MethodResult {
                    Ok(Some(Value::from("hello")))
                },
            ),
            &[0],
        )
        .unwrap();
    assert_eq!(engine.execute("$hi() hi()"), "hello hi()");
}

#[test]
fn comment_marker_can_be_configured() {
    let mut engine = Engine::new();
    engine.set_comment_marker(Some(';'));
    assert_eq!(engine.execute("keep ; drop"), "keep ");
    engine.set_comment_marker(None);
    assert_eq!(engine.execute("keep ; drop"), "keep ; drop");
}

#[test]
fn trim_quotes_can_be_disabled() {
    let mut engine = Engine::new();
    engine
        .register_method(
            "echo",
            method_fn(
                |args: &[Parameter], _ctx: &mut RuntimeContext| -> MethodResult {
                    Ok(Some(Value::from(args[0].text())))
                },
            ),
            &[1],
        )
        .unwrap();
    assert_eq!(engine.execute("echo(pre\"mid\"post)"), "mid");
    engine.set_trim_quotes(false);
    assert_eq!(engine.execute("echo(pre\"mid\"post)"), "premidpost");
}

// =============================================================================
// Properties
// =============================================================================

mod properties {
    use callweave_engine::Engine;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn execute_never_panics(line in "[ -~]{0,120}") {
            let mut engine = Engine::new();
            let _ = engine.execute(&line);
        }

        #[test]
        fn text_without_structure_passes_through(line in "[a-zA-Z0-9 .:;!?-]{0,80}") {
            let mut engine = Engine::new();
            prop_assert_eq!(engine.execute(&line), line);
        }

        #[test]
        fn unresolved_calls_pass_through(name in "[a-z]{1,10}", args in "[a-z0-9 ]{0,20}") {
            let mut engine = Engine::new();
            let line = format!("{name}({args})");
            prop_assert_eq!(engine.execute(&line), line);
        }
    }
}
