//! Integration tests for the Value type
//!
//! Tests construction, coercion, display, and the parsable round trip.

use callweave_foundation::{FloatFormat, Value, ValueKind};

// =============================================================================
// Construction and kinds
// =============================================================================

#[test]
fn value_kinds() {
    assert_eq!(Value::Null.kind(), ValueKind::Null);
    assert_eq!(Value::Bool(true).kind(), ValueKind::Bool);
    assert_eq!(Value::Int(1).kind(), ValueKind::Int);
    assert_eq!(Value::float(1.0).kind(), ValueKind::Float);
    assert_eq!(Value::from("x").kind(), ValueKind::String);
    assert_eq!(Value::from(vec![1i64]).kind(), ValueKind::Array);
}

#[test]
fn from_impls() {
    assert_eq!(Value::from(3i32), Value::Int(3));
    assert_eq!(Value::from(String::from("hi")), Value::from("hi"));
    assert_eq!(
        Value::from(vec!["a", "b"]),
        Value::from(vec![Value::from("a"), Value::from("b")])
    );
}

// =============================================================================
// Coercion
// =============================================================================

#[test]
fn int_widens_to_float_but_not_back() {
    assert_eq!(Value::Int(4).as_float(), Some(4.0));
    assert_eq!(Value::float(4.5).as_int(), None);
}

#[test]
fn strings_never_coerce_numerically() {
    let v = Value::from("17");
    assert_eq!(v.as_int(), None);
    assert_eq!(v.as_float(), None);
    assert_eq!(v.as_bool(), None);
}

#[test]
fn single_element_array_is_transparent() {
    let v = Value::from(vec![Value::from(vec![Value::Bool(true)])]);
    // Delegation recurses through nested single-element arrays.
    assert_eq!(v.as_bool(), Some(true));
}

#[test]
fn multi_element_array_is_opaque() {
    let v = Value::from(vec![1i64, 2]);
    assert_eq!(v.as_int(), None);
    assert_eq!(v.as_array().map(|items| items.len()), Some(2));
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn null_and_empty_string_display_identically() {
    assert_eq!(Value::Null.as_string(), "");
    assert_eq!(Value::from("").as_string(), "");
}

#[test]
fn float_display_follows_its_format() {
    assert_eq!(Value::Float(1.0, FloatFormat::DEFAULT).as_string(), "1");
    assert_eq!(Value::Float(1.0, FloatFormat::exact(2)).as_string(), "1.00");
    assert_eq!(Value::Float(1.257, FloatFormat::DEFAULT).as_string(), "1.26");
}

#[test]
fn nested_array_display() {
    let v = Value::from(vec![
        Value::from("a"),
        Value::from(vec![Value::Int(1), Value::Int(2)]),
    ]);
    assert_eq!(v.as_string(), "{\"a\", \"{\"1\", \"2\"}\"}");
}

// =============================================================================
// Parsable round trip
// =============================================================================

#[test]
fn parsable_forms() {
    assert_eq!(Value::Null.as_parsable_string("%"), "%null()");
    assert_eq!(Value::Int(7).as_parsable_string("%"), "7");
    assert_eq!(Value::from("a b").as_parsable_string("%"), "\"a b\"");
    assert_eq!(
        Value::from(vec![Value::Int(1), Value::Null]).as_parsable_string("%"),
        "%array(1, %null())"
    );
}

#[test]
fn parsable_string_escapes_delimiters() {
    let tricky = Value::from("quote \" backslash \\ comma ,");
    assert_eq!(
        tricky.as_parsable_string(""),
        "\"quote \\\" backslash \\\\ comma ,\""
    );
}

// =============================================================================
// Equality and hashing
// =============================================================================

#[test]
fn equality_is_structural_and_format_blind() {
    assert_eq!(
        Value::Float(2.5, FloatFormat::exact(1)),
        Value::Float(2.5, FloatFormat::exact(5))
    );
    assert_ne!(Value::Int(1), Value::float(1.0));
    assert_ne!(Value::from("1"), Value::Int(1));
}

#[test]
fn values_work_as_hash_keys() {
    use std::collections::HashMap;
    let mut map = HashMap::new();
    map.insert(Value::from("k"), 1);
    map.insert(Value::Int(2), 2);
    assert_eq!(map.get(&Value::from("k")), Some(&1));
    assert_eq!(map.get(&Value::Int(2)), Some(&2));
}
