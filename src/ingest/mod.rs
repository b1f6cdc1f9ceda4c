//! Structural reader for the exported variable file.
//!
//! This is the input boundary, not the upstream exporter: it only knows the
//! JSON shapes and hands them to [`crate::graph::VariableGraph::build`],
//! which performs the presence checks.
//!
//! ```text
//! { "collections":  [{ id, name, modes: [{ modeId, name }] }],
//!   "variables":    [{ id, name, variableCollectionId, resolvedType,
//!                      valuesByMode: { <modeId>: literal | alias } }],
//!   "textStyles":   [...],
//!   "effectStyles": [...] }
//! ```

use std::collections::BTreeMap;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::model::{Literal, Rgba, VariableType};
use crate::Result;

// ============================================================================
// Top level
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExport {
    #[serde(default)]
    pub collections: Vec<RawCollection>,
    #[serde(default)]
    pub variables: Vec<RawVariable>,
    #[serde(default)]
    pub text_styles: Vec<RawTextStyle>,
    #[serde(default)]
    pub effect_styles: Vec<RawEffectStyle>,
}

impl RawExport {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

// ============================================================================
// Variables
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCollection {
    pub id: String,
    pub name: String,
    pub modes: Vec<RawMode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMode {
    pub mode_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVariable {
    pub id: String,
    pub name: String,
    pub variable_collection_id: String,
    pub resolved_type: VariableType,
    #[serde(default)]
    pub values_by_mode: BTreeMap<String, RawEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AliasTag {
    #[serde(rename = "VARIABLE_ALIAS")]
    VariableAlias,
}

/// `{ "type": "VARIABLE_ALIAS", "id": "VariableID:1:2" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRef {
    #[serde(rename = "type")]
    pub tag: AliasTag,
    pub id: String,
}

impl AliasRef {
    pub fn to(id: impl Into<String>) -> Self {
        Self { tag: AliasTag::VariableAlias, id: id.into() }
    }
}

/// A mode slot as it appears on the wire. Aliases are tried first: their
/// `type` tag is what tells them apart from color objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawEntry {
    Alias(AliasRef),
    Literal(Literal),
}

// ============================================================================
// Text styles
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontName {
    pub family: String,
    /// Combined style string, e.g. `"Bold Italic"`.
    pub style: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LengthUnit {
    Pixels,
    Percent,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawLength {
    pub unit: LengthUnit,
    #[serde(default)]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBindings {
    pub font_family: Option<AliasRef>,
    pub font_weight: Option<AliasRef>,
    pub font_style: Option<AliasRef>,
    pub font_size: Option<AliasRef>,
    pub line_height: Option<AliasRef>,
    pub letter_spacing: Option<AliasRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTextStyle {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub font_name: Option<FontName>,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub line_height: Option<RawLength>,
    #[serde(default)]
    pub letter_spacing: Option<RawLength>,
    #[serde(default)]
    pub text_case: Option<String>,
    #[serde(default)]
    pub text_decoration: Option<String>,
    #[serde(default)]
    pub bound_variables: TextBindings,
}

// ============================================================================
// Effect styles
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectType {
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectBindings {
    pub color: Option<AliasRef>,
    pub offset_x: Option<AliasRef>,
    pub offset_y: Option<AliasRef>,
    pub radius: Option<AliasRef>,
    pub spread: Option<AliasRef>,
}

fn visible() -> bool { true }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEffect {
    #[serde(rename = "type")]
    pub effect_type: EffectType,
    #[serde(default = "visible")]
    pub visible: bool,
    #[serde(default)]
    pub color: Option<Rgba>,
    #[serde(default)]
    pub offset: Offset,
    #[serde(default)]
    pub radius: f64,
    #[serde(default)]
    pub spread: f64,
    #[serde(default)]
    pub blend_mode: Option<String>,
    #[serde(default)]
    pub bound_variables: EffectBindings,
}

impl RawEffect {
    pub fn is_shadow(&self) -> bool {
        matches!(self.effect_type, EffectType::DropShadow | EffectType::InnerShadow)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEffectStyle {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub effects: Vec<RawEffect>,
}
