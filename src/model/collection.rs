//! Collections, modes, and the closed set of collection kinds.

use serde::{Deserialize, Serialize};

/// Opaque collection identifier as minted by the upstream export.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(pub String);

impl std::fmt::Display for CollectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CollectionId {
    fn from(s: &str) -> Self { CollectionId(s.to_owned()) }
}

/// Opaque mode identifier. Only meaningful inside its own collection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeId(pub String);

impl std::fmt::Display for ModeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModeId {
    fn from(s: &str) -> Self { ModeId(s.to_owned()) }
}

/// One named variant within a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mode {
    pub id: ModeId,
    pub name: String,
}

/// An independent variation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Brand,
    Breakpoint,
    ColorMode,
    Density,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Brand => "brand",
            Axis::Breakpoint => "breakpoint",
            Axis::ColorMode => "color_mode",
            Axis::Density => "density",
        }
    }
}

/// What layer of the token architecture a collection is.
///
/// Attached once at ingestion so the resolver and the classifier switch over
/// a finite set instead of comparing opaque collection ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "axis", rename_all = "snake_case")]
pub enum CollectionKind {
    /// Raw palette / scale values. Always a stable endpoint.
    Primitive,
    /// Semantic layer varying along one axis (breakpoint or color mode).
    Semantic(Axis),
    /// Density layer (default / dense / spacious).
    Density,
    /// Per-brand indirection. Modes are named after brands.
    BrandMapping(Axis),
    /// Anything else: component-level collections.
    Component,
}

impl CollectionKind {
    /// Infer the kind from a collection's display name.
    ///
    /// Brand mappings are checked before the semantic axes since their names
    /// contain the same words ("BrandColorMapping" mentions color).
    pub fn infer(name: &str) -> Self {
        let norm: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if name.starts_with('_') || norm.contains("primitive") {
            CollectionKind::Primitive
        } else if norm.contains("brand") && norm.contains("color") {
            CollectionKind::BrandMapping(Axis::ColorMode)
        } else if norm.contains("brand") && (norm.contains("token") || norm.contains("mapping")) {
            CollectionKind::BrandMapping(Axis::Breakpoint)
        } else if norm.contains("colormode") {
            CollectionKind::Semantic(Axis::ColorMode)
        } else if norm.contains("breakpoint") {
            CollectionKind::Semantic(Axis::Breakpoint)
        } else if norm.contains("density") {
            CollectionKind::Density
        } else {
            CollectionKind::Component
        }
    }

    /// The axis whose mode id picks this collection's mode, if any.
    ///
    /// Brand mappings are deliberately absent: they select by mode *name*.
    pub fn mode_axis(&self) -> Option<Axis> {
        match self {
            CollectionKind::Semantic(axis) => Some(*axis),
            CollectionKind::Density => Some(Axis::Density),
            _ => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            CollectionKind::Primitive => "primitive".into(),
            CollectionKind::Semantic(axis) => format!("semantic:{}", axis.as_str()),
            CollectionKind::Density => "density".into(),
            CollectionKind::BrandMapping(axis) => format!("brand_mapping:{}", axis.as_str()),
            CollectionKind::Component => "component".into(),
        }
    }
}

/// A grouping of variables sharing one ordered set of modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
    pub kind: CollectionKind,
    /// Declaration order matters: the first mode is the default.
    pub modes: Vec<Mode>,
}

impl Collection {
    pub fn default_mode(&self) -> Option<&Mode> {
        self.modes.first()
    }

    pub fn mode_by_id(&self, id: &ModeId) -> Option<&Mode> {
        self.modes.iter().find(|m| &m.id == id)
    }

    pub fn mode_by_name(&self, name: &str) -> Option<&Mode> {
        self.modes.iter().find(|m| m.name == name)
    }

    pub fn has_mode(&self, id: &ModeId) -> bool {
        self.mode_by_id(id).is_some()
    }
}
