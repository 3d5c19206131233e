//! Integration tests for FloatFormat
//!
//! Tests decimal rendering through the public API, including the
//! interaction with Value display.

use callweave_foundation::{FloatFormat, Value};

#[test]
fn default_format_caps_two_decimals() {
    let fmt = FloatFormat::DEFAULT;
    assert_eq!(fmt.format(3.14159), "3.14");
    assert_eq!(fmt.format(3.0), "3");
    assert_eq!(fmt.format(0.5), "0.5");
}

#[test]
fn exact_format_pads() {
    assert_eq!(FloatFormat::exact(4).format(1.5), "1.5000");
    assert_eq!(FloatFormat::exact(0).format(1.5), "2");
}

#[test]
fn mixed_bounds() {
    let fmt = FloatFormat::new(1, 3);
    assert_eq!(fmt.format(7.0), "7.0");
    assert_eq!(fmt.format(7.1234), "7.123");
}

#[test]
fn same_float_different_formats() {
    let loose = Value::Float(0.25, FloatFormat::DEFAULT);
    let tight = Value::Float(0.25, FloatFormat::exact(4));
    assert_eq!(loose.as_string(), "0.25");
    assert_eq!(tight.as_string(), "0.2500");
    // Equality never looks at the format.
    assert_eq!(loose, tight);
}

#[test]
fn special_values_render() {
    let fmt = FloatFormat::DEFAULT;
    assert_eq!(fmt.format(f64::INFINITY), "inf");
    assert_eq!(fmt.format(f64::NEG_INFINITY), "-inf");
    assert_eq!(fmt.format(f64::NAN), "NaN");
}
