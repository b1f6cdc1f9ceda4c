//! Resolved tokens and the endpoint metadata generators need to emit live
//! references instead of literals.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{AxisKey, CollectionKind, Value, VariableId, VariableType};

/// Alias chain, start first. Most chains are two or three hops.
pub type Chain = SmallVec<[VariableId; 4]>;

/// A chain terminal accepted as a stable symbolic reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    pub kind: CollectionKind,
    pub variable: VariableId,
    pub path: String,
    /// Last path segment; generators name the reference after it.
    pub leaf: String,
}

impl EndpointDescriptor {
    /// Endpoints a flattening pass must leave alone.
    pub fn is_symbolic_layer(&self) -> bool {
        matches!(self.kind, CollectionKind::Semantic(_) | CollectionKind::Density)
    }
}

/// How a lineHeight ratio was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioSource {
    /// Stage 2: shared source identity with a composite.
    Identity,
    /// Stage 3: sibling `…FontSize` token in the same file.
    NamePattern,
    /// Stage 4: unambiguous literal lineHeight match.
    ValuePattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineHeightRatio {
    pub ratio: f64,
    pub source: RatioSource,
}

/// A standalone token: one variable resolved under one axis cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedToken {
    pub path: String,
    pub variable: VariableId,
    pub var_type: VariableType,
    pub value: Value,
    /// Alias chain walked to produce `value`.
    pub chain: Chain,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<EndpointDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height_ratio: Option<LineHeightRatio>,
}

impl ResolvedToken {
    pub fn leaf_name(&self) -> &str {
        super::variable::leaf_of(&self.path)
    }
}

/// Tokens sharing one axis cell and one scope (a component, or `semantic`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenFile {
    pub key: AxisKey,
    pub scope: String,
    pub tokens: Vec<ResolvedToken>,
}

impl TokenFile {
    pub fn get(&self, path: &str) -> Option<&ResolvedToken> {
        self.tokens.iter().find(|t| t.path == path)
    }

    pub fn by_leaf(&self, leaf: &str) -> Option<&ResolvedToken> {
        self.tokens.iter().find(|t| t.leaf_name() == leaf)
    }
}
