//! # Axis Matrix Builder
//!
//! Enumerates the axis combinations each token category varies over and
//! drives the resolver and classifier once per cell.
//!
//! | Category | Axes | Notes |
//! |----------|------|-------|
//! | Typography composites | Brand × Breakpoint | every brand |
//! | Effect composites | Brand × ColorMode | palette owners only |
//! | Density matrix | Breakpoint × Density (per brand) | tokens reaching the Density layer |
//! | Dimension token files | Brand × Breakpoint | per scope |
//! | Color token files | Brand × ColorMode | palette owners only |
//! | Primitive files | none | resolved once |
//!
//! Brands with `colorsFrom` set do not get their own color or effect output;
//! [`TokenSet::palette_inheritance`] records whom they inherit from.

pub mod font_weight;
mod typography;
mod effect;
mod simple;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{AxisConfig, PipelineOptions};
use crate::diagnostics::Diagnostics;
use crate::endpoint::{AcceptanceFlags, EndpointClassifier};
use crate::graph::VariableGraph;
use crate::ingest::AliasRef;
use crate::model::*;
use crate::resolve::ValueResolver;
use crate::Result;

pub use simple::{DensityCell, DensityToken};

// ============================================================================
// Output
// ============================================================================

/// Everything the builder produces for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenSet {
    pub files: Vec<TokenFile>,
    pub typography: Vec<TypographyToken>,
    pub effects: Vec<EffectToken>,
    pub density: Vec<DensityToken>,
    /// Dependent brand → palette owner.
    pub palette_inheritance: BTreeMap<String, String>,
}

impl TokenSet {
    pub fn files_for<'a>(&'a self, key: &AxisKey) -> impl Iterator<Item = &'a TokenFile> + use<'a> {
        let key = key.clone();
        self.files.iter().filter(move |f| f.key == key)
    }

    pub fn file(&self, key: &AxisKey, scope: &str) -> Option<&TokenFile> {
        self.files.iter().find(|f| &f.key == key && f.scope == scope)
    }

    pub fn typography_for<'a>(&'a self, key: &AxisKey) -> impl Iterator<Item = &'a TypographyToken> + use<'a> {
        let key = key.clone();
        self.typography.iter().filter(move |t| t.key == key)
    }

    pub fn typography_style(&self, key: &AxisKey, name: &str) -> Option<&TypographyToken> {
        self.typography.iter().find(|t| &t.key == key && t.name == name)
    }

    pub fn effect_style(&self, key: &AxisKey, name: &str) -> Option<&EffectToken> {
        self.effects.iter().find(|t| &t.key == key && t.name == name)
    }

    /// Every Brand × Breakpoint cell present in typography or token files,
    /// sorted.
    pub fn brand_breakpoint_keys(&self) -> Vec<AxisKey> {
        let mut keys: Vec<AxisKey> = self
            .typography
            .iter()
            .map(|t| &t.key)
            .chain(self.files.iter().map(|f| &f.key))
            .filter(|k| k.brand.is_some() && k.breakpoint.is_some() && k.color_mode.is_none())
            .cloned()
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Drives resolution and classification over every axis cell.
#[derive(Debug, Clone)]
pub struct MatrixBuilder<'g> {
    graph: &'g VariableGraph,
    config: &'g AxisConfig,
    options: &'g PipelineOptions,
    resolver: ValueResolver<'g>,
    classifier: EndpointClassifier<'g>,
}

impl<'g> MatrixBuilder<'g> {
    pub fn new(graph: &'g VariableGraph, config: &'g AxisConfig, options: &'g PipelineOptions) -> Self {
        Self {
            graph,
            config,
            options,
            resolver: ValueResolver::new(graph),
            classifier: EndpointClassifier::new(graph, options.component_prefix.clone()),
        }
    }

    /// Build every category.
    pub fn build(&self, diags: &mut Diagnostics) -> Result<TokenSet> {
        let files = self.token_files(diags)?;
        let typography = self.typography(diags)?;
        let effects = self.effects(diags)?;
        let density = self.density_matrix(diags)?;
        let palette_inheritance = self
            .config
            .brands
            .iter()
            .filter_map(|b| b.colors_from.as_ref().map(|from| (b.name.clone(), from.clone())))
            .collect();

        tracing::debug!(
            files = files.len(),
            typography = typography.len(),
            effects = effects.len(),
            density = density.len(),
            "matrix built"
        );

        Ok(TokenSet { files, typography, effects, density, palette_inheritance })
    }

    // ========================================================================
    // Cell enumeration
    // ========================================================================

    /// Brand × Breakpoint, config order.
    pub fn brand_breakpoint_cells(&self) -> Result<Vec<(AxisKey, AxisContext)>> {
        let mut cells = Vec::new();
        for brand in &self.config.brands {
            for bp in &self.config.breakpoints {
                let key = AxisKey::brand_breakpoint(&brand.name, &bp.key);
                let ctx = self.config.context(&key)?;
                cells.push((key, ctx));
            }
        }
        Ok(cells)
    }

    /// Palette-owning Brand × ColorMode, config order.
    pub fn brand_color_cells(&self) -> Result<Vec<(AxisKey, AxisContext)>> {
        let mut cells = Vec::new();
        for brand in self.config.palette_owners() {
            for cm in &self.config.color_modes {
                let key = AxisKey::brand_color_mode(&brand.name, &cm.key);
                let ctx = self.config.context(&key)?;
                cells.push((key, ctx));
            }
        }
        Ok(cells)
    }

    // ========================================================================
    // Shared binding resolution
    // ========================================================================

    /// Resolve a composite property binding: value via the resolver,
    /// endpoint via the classifier (the bound variable may itself be the
    /// endpoint).
    fn bind(
        &self,
        alias: &AliasRef,
        ctx: &AxisContext,
        flags: AcceptanceFlags,
        diags: &mut Diagnostics,
    ) -> (Value, Binding) {
        let id = VariableId(alias.id.clone());
        let value = self.resolver.value(&id, ctx, diags);
        let endpoint = self.classifier.classify_reference(&id, ctx, flags, diags);
        let path = self
            .graph
            .variable(&id)
            .map(|v| v.path.clone())
            .unwrap_or_else(|| id.to_string());
        (value, Binding { variable: id, path, endpoint })
    }

    fn bind_float(
        &self,
        alias: &AliasRef,
        ctx: &AxisContext,
        flags: AcceptanceFlags,
        diags: &mut Diagnostics,
    ) -> Property<f64> {
        let (value, binding) = self.bind(alias, ctx, flags, diags);
        Property::bound(value.as_float(), binding)
    }

    fn bind_string(
        &self,
        alias: &AliasRef,
        ctx: &AxisContext,
        flags: AcceptanceFlags,
        diags: &mut Diagnostics,
    ) -> Property<String> {
        let (value, binding) = self.bind(alias, ctx, flags, diags);
        let s = match value {
            Value::Float(f) => Some(f.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::String(s) | Value::Color(s) => Some(s),
            Value::Unresolved(_) => None,
        };
        Property::bound(s, binding)
    }

    /// Standalone token for one variable in one cell.
    fn resolve_token(&self, var: &Variable, ctx: &AxisContext, diags: &mut Diagnostics) -> ResolvedToken {
        let resolved = self.resolver.resolve(&var.id, ctx, diags);
        let endpoint = self.classifier.classify(&var.id, ctx, self.options.tokens, diags);
        ResolvedToken {
            path: var.path.clone(),
            variable: var.id.clone(),
            var_type: var.var_type,
            value: resolved.value,
            chain: resolved.chain,
            endpoint,
            line_height_ratio: None,
        }
    }

    /// `Component/<Name>/…` → `<Name>`, everything else → `semantic`.
    fn scope_of(&self, path: &str) -> String {
        let prefix = &self.options.component_prefix;
        if !prefix.is_empty() {
            if let Some(rest) = path.strip_prefix(prefix.as_str()) {
                if let Some((name, _)) = rest.split_once('/') {
                    return name.to_owned();
                }
            }
        }
        "semantic".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(key: AxisKey, scope: &str) -> TokenFile {
        TokenFile { key, scope: scope.into(), tokens: Vec::new() }
    }

    #[test]
    fn test_lookup_outlives_temporary_key() {
        let set = TokenSet {
            files: vec![
                file(AxisKey::default(), "_SizePrimitive"),
                file(AxisKey::brand_breakpoint("bild", "sm"), "semantic"),
                file(AxisKey::brand_breakpoint("bild", "sm"), "Button"),
            ],
            ..TokenSet::default()
        };
        let primitives: Vec<&str> = set.files_for(&AxisKey::default()).map(|f| f.scope.as_str()).collect();
        let cell: Vec<&str> = set
            .files_for(&AxisKey::brand_breakpoint("bild", "sm"))
            .map(|f| f.scope.as_str())
            .collect();
        assert_eq!(primitives, vec!["_SizePrimitive"]);
        assert_eq!(cell, vec!["semantic", "Button"]);
        assert_eq!(set.typography_for(&AxisKey::default()).count(), 0);
    }
}
