//! Axis configuration and run options.
//!
//! The axis configuration maps each logical key ("lg", "dark", "dense") to
//! the mode id used inside the graph. Brands are the exception: they are
//! listed by name only, since every brand-mapping collection mints its own
//! mode ids and the name is the one stable handle.

use serde::{Deserialize, Serialize};

use crate::diagnostics::ValidationPolicy;
use crate::endpoint::AcceptanceFlags;
use crate::enrich::EnrichOptions;
use crate::model::{AxisContext, AxisKey, CollectionKind, ModeId};
use crate::{Error, Result};

// ============================================================================
// Axis configuration
// ============================================================================

/// One brand. A brand with `colors_from` set has no palette of its own and
/// inherits color/effect output from that brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandConfig {
    pub name: String,
    #[serde(default)]
    pub colors_from: Option<String>,
}

impl BrandConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), colors_from: None }
    }

    pub fn inheriting(name: impl Into<String>, from: impl Into<String>) -> Self {
        Self { name: name.into(), colors_from: Some(from.into()) }
    }

    pub fn owns_palette(&self) -> bool {
        self.colors_from.is_none()
    }
}

/// Logical key → concrete mode id on one axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisMode {
    pub key: String,
    pub mode_id: ModeId,
}

impl AxisMode {
    pub fn new(key: impl Into<String>, mode_id: impl Into<ModeId>) -> Self {
        Self { key: key.into(), mode_id: mode_id.into() }
    }
}

/// Replace the inferred kind of a collection, matched by display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionOverride {
    pub name: String,
    pub kind: CollectionKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisConfig {
    pub brands: Vec<BrandConfig>,
    #[serde(default)]
    pub breakpoints: Vec<AxisMode>,
    #[serde(default)]
    pub color_modes: Vec<AxisMode>,
    #[serde(default)]
    pub densities: Vec<AxisMode>,
    #[serde(default)]
    pub collections: Vec<CollectionOverride>,
}

impl AxisConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Structural checks: unique keys per axis, and every `colors_from`
    /// pointing at a brand that owns its palette.
    pub fn validate(&self) -> Result<()> {
        let mut names: Vec<&str> = self.brands.iter().map(|b| b.name.as_str()).collect();
        names.sort_unstable();
        if let Some(w) = names.windows(2).find(|w| w[0] == w[1]) {
            return Err(Error::Config(format!("brand '{}' listed twice", w[0])));
        }
        for (axis, modes) in [
            ("breakpoint", &self.breakpoints),
            ("color mode", &self.color_modes),
            ("density", &self.densities),
        ] {
            let mut keys: Vec<&str> = modes.iter().map(|m| m.key.as_str()).collect();
            keys.sort_unstable();
            if let Some(w) = keys.windows(2).find(|w| w[0] == w[1]) {
                return Err(Error::Config(format!("{axis} key '{}' listed twice", w[0])));
            }
        }
        for brand in &self.brands {
            if let Some(from) = &brand.colors_from {
                match self.brand(from) {
                    Some(owner) if owner.owns_palette() => {}
                    Some(_) => {
                        return Err(Error::Config(format!(
                            "brand '{}' inherits colors from '{from}', which has no palette of its own",
                            brand.name
                        )));
                    }
                    None => {
                        return Err(Error::Config(format!(
                            "brand '{}' inherits colors from unknown brand '{from}'",
                            brand.name
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn brand(&self, name: &str) -> Option<&BrandConfig> {
        self.brands.iter().find(|b| b.name == name)
    }

    /// Brands that own a distinct palette, in declaration order.
    pub fn palette_owners(&self) -> impl Iterator<Item = &BrandConfig> {
        self.brands.iter().filter(|b| b.owns_palette())
    }

    /// Translate logical keys into a mode-id context.
    pub fn context(&self, key: &AxisKey) -> Result<AxisContext> {
        fn lookup(modes: &[AxisMode], axis: &str, key: &Option<String>) -> Result<Option<ModeId>> {
            match key {
                None => Ok(None),
                Some(k) => modes
                    .iter()
                    .find(|m| &m.key == k)
                    .map(|m| Some(m.mode_id.clone()))
                    .ok_or_else(|| Error::Config(format!("unknown {axis} key '{k}'"))),
            }
        }

        if let Some(brand) = &key.brand {
            if self.brand(brand).is_none() {
                return Err(Error::Config(format!("unknown brand '{brand}'")));
            }
        }
        Ok(AxisContext {
            brand_name: key.brand.clone(),
            breakpoint: lookup(&self.breakpoints, "breakpoint", &key.breakpoint)?,
            color_mode: lookup(&self.color_modes, "color mode", &key.color_mode)?,
            density: lookup(&self.densities, "density", &key.density)?,
        })
    }
}

// ============================================================================
// Run options
// ============================================================================

/// Knobs for one pipeline run. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineOptions {
    /// Path prefix marking component-scoped variables.
    pub component_prefix: String,
    /// Endpoint acceptance for typography composite properties.
    pub typography: AcceptanceFlags,
    /// Endpoint acceptance for effect composite properties.
    pub effects: AcceptanceFlags,
    /// Endpoint acceptance for standalone tokens.
    pub tokens: AcceptanceFlags,
    pub enrich: EnrichOptions,
    pub policy: ValidationPolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            component_prefix: "Component/".into(),
            typography: AcceptanceFlags {
                semantic: true,
                density: false,
                component_breakpoint: true,
            },
            effects: AcceptanceFlags {
                semantic: true,
                density: false,
                component_breakpoint: false,
            },
            tokens: AcceptanceFlags {
                semantic: true,
                density: true,
                component_breakpoint: false,
            },
            enrich: EnrichOptions::default(),
            policy: ValidationPolicy::default(),
        }
    }
}

impl PipelineOptions {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
