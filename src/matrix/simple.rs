//! Standalone token files and the Breakpoint × Density matrix.

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;
use crate::model::*;
use crate::Result;

use super::MatrixBuilder;

/// One Breakpoint × Density cell of a density-driven token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityCell {
    pub key: AxisKey,
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<EndpointDescriptor>,
}

/// A breakpoint-layer token whose chain runs through the Density layer,
/// resolved for every Breakpoint × Density pair of one brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityToken {
    pub brand: String,
    pub path: String,
    pub variable: VariableId,
    pub cells: Vec<DensityCell>,
}

impl DensityToken {
    pub fn cell(&self, breakpoint: &str, density: &str) -> Option<&DensityCell> {
        self.cells.iter().find(|c| {
            c.key.breakpoint.as_deref() == Some(breakpoint) && c.key.density.as_deref() == Some(density)
        })
    }
}

impl<'g> MatrixBuilder<'g> {
    /// Primitive files (once), dimension files per Brand × Breakpoint,
    /// color files per palette-owning Brand × ColorMode.
    pub fn token_files(&self, diags: &mut Diagnostics) -> Result<Vec<TokenFile>> {
        let mut files = Vec::new();

        let unscoped = AxisContext::new();
        for coll in self.graph.collections().filter(|c| c.kind == CollectionKind::Primitive) {
            let tokens = self
                .graph
                .variables_in(&coll.id)
                .map(|v| self.resolve_token(v, &unscoped, diags))
                .collect();
            files.push(TokenFile { key: AxisKey::default(), scope: coll.name.clone(), tokens });
        }

        for (key, ctx) in self.brand_breakpoint_cells()? {
            self.push_scoped(&mut files, &key, &ctx, diags, |kind, var| {
                matches!(kind, CollectionKind::Semantic(Axis::Breakpoint) | CollectionKind::Component)
                    && var.var_type != VariableType::Color
            });
        }

        for (key, ctx) in self.brand_color_cells()? {
            self.push_scoped(&mut files, &key, &ctx, diags, |kind, var| {
                matches!(kind, CollectionKind::Semantic(Axis::ColorMode) | CollectionKind::Component)
                    && var.var_type == VariableType::Color
            });
        }

        Ok(files)
    }

    /// Resolve every selected variable in one cell, grouped by scope in
    /// first-seen order.
    fn push_scoped(
        &self,
        files: &mut Vec<TokenFile>,
        key: &AxisKey,
        ctx: &AxisContext,
        diags: &mut Diagnostics,
        select: impl Fn(CollectionKind, &Variable) -> bool,
    ) {
        let first = files.len();
        for var in self.graph.variables() {
            let Some(kind) = self.graph.kind_of(var) else { continue };
            if !select(kind, var) {
                continue;
            }
            let scope = self.scope_of(&var.path);
            let token = self.resolve_token(var, ctx, diags);
            match files[first..].iter_mut().find(|f| f.scope == scope) {
                Some(file) => file.tokens.push(token),
                None => files.push(TokenFile { key: key.clone(), scope, tokens: vec![token] }),
            }
        }
    }

    /// Breakpoint-layer tokens that reach the Density layer in at least one
    /// breakpoint, expanded over Breakpoint × Density for each brand.
    pub fn density_matrix(&self, diags: &mut Diagnostics) -> Result<Vec<DensityToken>> {
        let mut out = Vec::new();
        if self.config.densities.is_empty() {
            return Ok(out);
        }

        for brand in &self.config.brands {
            let probes = self
                .config
                .breakpoints
                .iter()
                .map(|bp| self.config.context(&AxisKey::brand_breakpoint(&brand.name, &bp.key)))
                .collect::<Result<Vec<_>>>()?;

            for var in self.graph.variables() {
                if self.graph.kind_of(var) != Some(CollectionKind::Semantic(Axis::Breakpoint))
                    || var.var_type == VariableType::Color
                {
                    continue;
                }
                let reaches = probes
                    .iter()
                    .any(|ctx| self.classifier.references_density(&var.id, ctx, diags));
                if !reaches {
                    continue;
                }

                let mut cells = Vec::new();
                for bp in &self.config.breakpoints {
                    for density in &self.config.densities {
                        let key = AxisKey {
                            brand: Some(brand.name.clone()),
                            breakpoint: Some(bp.key.clone()),
                            density: Some(density.key.clone()),
                            ..AxisKey::default()
                        };
                        let ctx = self.config.context(&key)?;
                        let value = self.resolver.value(&var.id, &ctx, diags);
                        let endpoint = self.classifier.classify(&var.id, &ctx, self.options.tokens, diags);
                        cells.push(DensityCell { key, value, endpoint });
                    }
                }
                out.push(DensityToken {
                    brand: brand.name.clone(),
                    path: var.path.clone(),
                    variable: var.id.clone(),
                    cells,
                });
            }
        }
        Ok(out)
    }
}
