//! Variables: the nodes of the alias graph.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{CollectionId, ModeId};

/// Opaque variable identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableId(pub String);

impl std::fmt::Display for VariableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VariableId {
    fn from(s: &str) -> Self { VariableId(s.to_owned()) }
}

/// Declared primitive type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariableType {
    Color,
    Float,
    String,
    Boolean,
}

/// RGBA color with channels in 0.0..=1.0, as the export carries them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 { 1.0 }

/// A literal held directly in a mode slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Color(Rgba),
    Bool(bool),
    Number(f64),
    String(String),
}

/// One mode slot: either a literal or a reference to another variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    Literal(Literal),
    Alias(VariableId),
}

impl RawValue {
    pub fn alias_target(&self) -> Option<&VariableId> {
        match self {
            RawValue::Alias(id) => Some(id),
            RawValue::Literal(_) => None,
        }
    }
}

/// A named, typed value with one raw entry per mode of its collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub id: VariableId,
    /// Slash-delimited hierarchical key, e.g. `Component/Button/labelLineHeight`.
    pub path: String,
    pub collection: CollectionId,
    pub var_type: VariableType,
    pub values: BTreeMap<ModeId, RawValue>,
}

impl Variable {
    /// Last path segment.
    pub fn leaf_name(&self) -> &str {
        leaf_of(&self.path)
    }

    pub fn entry(&self, mode: &ModeId) -> Option<&RawValue> {
        self.values.get(mode)
    }

    /// True when the path starts with the given scope prefix.
    pub fn is_scoped(&self, prefix: &str) -> bool {
        !prefix.is_empty() && self.path.starts_with(prefix)
    }
}

/// Last segment of a slash-delimited path.
pub fn leaf_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_name() {
        assert_eq!(leaf_of("Component/Button/labelFontSize"), "labelFontSize");
        assert_eq!(leaf_of("flat"), "flat");
    }

    #[test]
    fn test_literal_untagged() {
        let c: Literal = serde_json::from_str(r#"{"r":1,"g":0,"b":0}"#).unwrap();
        assert_eq!(c, Literal::Color(Rgba { r: 1.0, g: 0.0, b: 0.0, a: 1.0 }));
        let n: Literal = serde_json::from_str("16").unwrap();
        assert_eq!(n, Literal::Number(16.0));
        let b: Literal = serde_json::from_str("true").unwrap();
        assert_eq!(b, Literal::Bool(true));
        let s: Literal = serde_json::from_str(r#""Gotham""#).unwrap();
        assert_eq!(s, Literal::String("Gotham".into()));
    }
}
