//! Variable store behavior through the Engine API

use callweave_engine::{Engine, MethodResult, Parameter, RuntimeContext, method_fn};
use callweave_foundation::Value;

#[test]
fn variables_round_trip_through_the_engine() {
    let mut engine = Engine::new();
    engine.set_variable("name", Value::from("weaver"));
    assert_eq!(engine.variable("name"), Some(&Value::from("weaver")));
    assert!(engine.is_variable_set("name"));
    assert_eq!(engine.unset_variable("name"), Some(Value::from("weaver")));
    assert!(!engine.is_variable_set("name"));
}

#[test]
fn execute_sweeps_transients_only() {
    let mut engine = Engine::new();
    engine.set_variable("scratch", Value::Int(1));
    engine.set_persistent_variable("config", Value::Int(2));
    engine.execute("any line at all");
    assert!(!engine.is_variable_set("scratch"));
    assert_eq!(engine.variable("config"), Some(&Value::Int(2)));
}

#[test]
fn persistency_flag_can_be_toggled() {
    let mut engine = Engine::new();
    engine.set_variable("v", Value::Int(1));
    assert!(!engine.is_variable_persistent("v"));
    assert!(engine.set_variable_persistency("v", true));
    assert!(engine.is_variable_persistent("v"));
    engine.execute("line");
    assert!(engine.is_variable_set("v"));
    // Toggling a missing variable reports failure.
    assert!(!engine.set_variable_persistency("ghost", true));
}

#[test]
fn methods_see_variables_set_by_earlier_methods() {
    let mut engine = Engine::new();
    engine
        .register_method(
            "remember",
            method_fn(
                |args: &[Parameter], ctx: &mut RuntimeContext| -> MethodResult {
                    let value = args[0].value(ctx);
                    ctx.variables_mut().set("memo", value);
                    Ok(Some(Value::from("")))
                },
            ),
            &[1],
        )
        .unwrap();
    engine
        .register_method(
            "recall",
            method_fn(
                |_args: &[Parameter], ctx: &mut RuntimeContext| -> MethodResult {
                    Ok(ctx.variables().get("memo").cloned())
                },
            ),
            &[0],
        )
        .unwrap();
    // Segments evaluate left to right within one execution.
    assert_eq!(engine.execute("remember(42)recall()"), "42");
    // The transient memo did not survive into a fresh execution.
    assert_eq!(engine.execute("recall()"), "recall()");
}

#[test]
fn host_variables_are_visible_to_methods() {
    let mut engine = Engine::new();
    engine
        .register_method(
            "greet",
            method_fn(
                |_args: &[Parameter], ctx: &mut RuntimeContext| -> MethodResult {
                    let who = ctx
                        .variables()
                        .get("who")
                        .map_or_else(|| "nobody".to_string(), Value::as_string);
                    Ok(Some(Value::from(format!("hello {who}"))))
                },
            ),
            &[0],
        )
        .unwrap();
    engine.set_persistent_variable("who", Value::from("world"));
    assert_eq!(engine.execute("greet()"), "hello world");
}
