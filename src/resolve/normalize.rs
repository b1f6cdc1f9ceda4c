//! Type normalization of terminal literals.

use crate::model::{Literal, Rgba, Value, VariableType};

/// Round to two decimals, folding `-0.0` into `0.0`.
pub fn round2(x: f64) -> f64 {
    let r = (x * 100.0).round() / 100.0;
    if r == 0.0 { 0.0 } else { r }
}

/// `#rrggbb` when opaque after rounding, otherwise `rgba(r, g, b, a)`.
pub fn color_string(c: &Rgba) -> String {
    let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    let (r, g, b) = (channel(c.r), channel(c.g), channel(c.b));
    let a = round2(c.a.clamp(0.0, 1.0));
    if a >= 1.0 {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("rgba({r}, {g}, {b}, {a})")
    }
}

/// Normalize a literal according to its declared variable type.
pub fn normalize(lit: &Literal, declared: VariableType) -> Value {
    match (lit, declared) {
        (Literal::Color(c), _) => Value::Color(color_string(c)),
        (Literal::String(s), VariableType::Color) => Value::Color(s.trim().to_ascii_lowercase()),
        (Literal::Number(n), _) => Value::Float(round2(*n)),
        (Literal::Bool(b), _) => Value::Bool(*b),
        (Literal::String(s), _) => Value::String(s.clone()),
    }
}
