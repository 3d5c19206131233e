//! Recursive expansion and the depth ceiling

use callweave_engine::{Engine, STOPPING_THRESHOLD};

fn engine() -> Engine {
    let mut engine = Engine::new();
    callweave_stdlib::install(&mut engine).unwrap();
    engine
}

#[test]
fn call_re_expands_its_joined_result() {
    let mut engine = engine();
    // print leaves its arguments literal; call feeds the joined text back
    // through the expander.
    assert_eq!(engine.execute("print(add(1, 2))"), "add(1, 2)");
    assert_eq!(engine.execute("call(print(add(1, 2)))"), "3");
}

#[test]
fn aliases_may_call_aliases() {
    let mut engine = engine();
    engine.register_alias("double", "add($0;, $0;)", 1).unwrap();
    engine.register_alias("quad", "double(double($0;))", 1).unwrap();
    assert_eq!(engine.execute("quad(3)"), "12");
}

#[test]
fn alias_recursion_terminates_with_literal_tail() {
    let mut engine = engine();
    engine.register_alias("count", "i count()", 0).unwrap();
    let out = engine.execute("count()");
    assert_eq!(out.matches('i').count(), STOPPING_THRESHOLD);
    assert!(out.ends_with("count()"));
}

#[test]
fn self_referential_variable_expansion_is_bounded() {
    let mut engine = engine();
    // The stored text itself contains a call; call() keeps expanding it
    // until the ceiling stops the loop.
    engine.set_persistent_variable("loop", "x call(returnvar(loop))".into());
    let out = engine.execute("call(returnvar(loop))");
    assert!(out.contains('x'));
    assert!(out.len() < 10_000);
}

#[test]
fn deep_nesting_within_the_ceiling_works() {
    let mut engine = engine();
    let mut line = String::from("add(1, 1)");
    for _ in 0..40 {
        line = format!("add(1, {line})");
    }
    assert_eq!(engine.execute(&line), "42");
}
