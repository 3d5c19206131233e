//! Core value type flowing through method calls.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use im::Vector;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::format::FloatFormat;

/// Core value type flowing through method calls.
///
/// Values are immutable and cheaply cloneable (O(1) for most variants).
/// Every method call in an expansion produces (at most) one `Value`, and an
/// argument that resolves to a call carries the callee's value through
/// unchanged, so a whole-line call can hand a native array or number back
/// to the host instead of its display text.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// The null value. Displays as the empty string.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float together with its display format.
    Float(f64, FloatFormat),
    /// String value.
    String(Arc<str>),
    /// Ordered collection of values.
    Array(Vector<Value>),
}

/// Discriminant of a [`Value`], used in type mismatch reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// The null value.
    Null,
    /// Boolean value.
    Bool,
    /// Integer value.
    Int,
    /// Float value.
    Float,
    /// String value.
    String,
    /// Array value.
    Array,
}

impl Value {
    /// Creates a float with the default display format.
    #[must_use]
    pub fn float(value: f64) -> Self {
        Self::Float(value, FloatFormat::DEFAULT)
    }

    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(..) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::Array(_) => ValueKind::Array,
        }
    }

    /// Returns true if this value is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Attempts to extract a boolean value.
    ///
    /// A single-element array delegates to its element.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Array(items) if items.len() == 1 => items[0].as_bool(),
            _ => None,
        }
    }

    /// Attempts to extract an integer value.
    ///
    /// Floats do not truncate to integers; a single-element array
    /// delegates to its element.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Array(items) if items.len() == 1 => items[0].as_int(),
            _ => None,
        }
    }

    /// Attempts to extract a float value. Integers widen.
    ///
    /// Note: converting large i64 values to f64 may lose precision.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(n, _) => Some(*n),
            Self::Array(items) if items.len() == 1 => items[0].as_float(),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Array(items) if items.len() == 1 => items[0].as_str(),
            _ => None,
        }
    }

    /// Attempts to extract an array reference.
    #[must_use]
    pub const fn as_array(&self) -> Option<&Vector<Value>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the display form of this value.
    ///
    /// Null is the empty string; floats render through their attached
    /// format; array elements are individually double-quoted.
    #[must_use]
    pub fn as_string(&self) -> String {
        self.to_string()
    }

    /// Renders this value as call syntax that parses back to it.
    ///
    /// Strings are quoted and escaped so embedded delimiters survive a
    /// round trip through the tokenizer; null and arrays render as calls
    /// to the `null` and `array` methods under the given prefix.
    #[must_use]
    pub fn as_parsable_string(&self, prefix: &str) -> String {
        match self {
            Self::Null => format!("{prefix}null()"),
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Float(n, fmt) => fmt.format(*n),
            Self::String(s) => quote_escaped(s),
            Self::Array(items) => {
                let mut out = format!("{prefix}array(");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&item.as_parsable_string(prefix));
                }
                out.push(')');
                out
            }
        }
    }
}

/// Wraps `text` in quotes, backslash-escaping embedded quotes and
/// backslashes.
fn quote_escaped(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

// PartialEq is manual so float comparison uses bit equality (required for
// Eq and Hash consistency) and ignores the attached display format.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a, _), Self::Float(b, _)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Bool(b) => b.hash(state),
            Self::Int(n) => n.hash(state),
            Self::Float(n, _) => n.to_bits().hash(state),
            Self::String(s) => s.hash(state),
            Self::Array(items) => items.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n, format) => write!(f, "{}", format.format(*n)),
            Self::String(s) => write!(f, "{s}"),
            Self::Array(items) => {
                write!(f, "{{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{item}\"")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Array => "array",
        };
        write!(f, "{name}")
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Self::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Array(v.into_iter().map(Into::into).collect())
    }
}
