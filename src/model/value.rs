//! Resolved value type handed to generators.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a value could not be produced. Carried in place of the value so a
/// single bad chain never aborts the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unresolved {
    MissingVariable,
    CircularReference,
    NoValueForMode,
}

impl Unresolved {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unresolved::MissingVariable => "missing-variable",
            Unresolved::CircularReference => "circular-reference",
            Unresolved::NoValueForMode => "no-value-for-mode",
        }
    }
}

/// Concrete, type-normalized token value.
///
/// - Colors are `#rrggbb` or `rgba(r, g, b, a)` strings
/// - Floats are rounded to two decimals
/// - Strings and booleans pass through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Color(String),
    Float(f64),
    String(String),
    Bool(bool),
    Unresolved(Unresolved),
}

// ============================================================================
// Type checking
// ============================================================================

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Color(_) => "COLOR",
            Value::Float(_) => "FLOAT",
            Value::String(_) => "STRING",
            Value::Bool(_) => "BOOLEAN",
            Value::Unresolved(_) => "UNRESOLVED",
        }
    }

    pub fn is_resolved(&self) -> bool { !matches!(self, Value::Unresolved(_)) }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Color(s) => Some(s),
            _ => None,
        }
    }

    pub fn unresolved(&self) -> Option<Unresolved> {
        match self {
            Value::Unresolved(u) => Some(*u),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for Value { fn from(v: bool) -> Self { Value::Bool(v) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Float(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::String(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::String(v.to_owned()) } }
impl From<Unresolved> for Value { fn from(v: Unresolved) -> Self { Value::Unresolved(v) } }

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Color(c) => write!(f, "{c}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Unresolved(u) => write!(f, "<{}>", u.as_str()),
        }
    }
}
