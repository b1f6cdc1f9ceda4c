//! Effect (shadow) composites over palette-owning Brand × ColorMode.

use crate::diagnostics::Diagnostics;
use crate::ingest::{AliasRef, EffectType, RawEffect, RawEffectStyle};
use crate::model::*;
use crate::resolve::{color_string, round2};
use crate::Result;

use super::MatrixBuilder;

impl<'g> MatrixBuilder<'g> {
    /// Every effect style in every palette-owning Brand × ColorMode cell.
    /// Dependent brands are not regenerated.
    pub fn effects(&self, diags: &mut Diagnostics) -> Result<Vec<EffectToken>> {
        let styles = self.graph.effect_styles();
        let mut out = Vec::new();
        for (key, ctx) in self.brand_color_cells()? {
            for style in styles {
                out.push(self.resolve_effect(style, &key, &ctx, diags));
            }
        }
        Ok(out)
    }

    pub fn resolve_effect(
        &self,
        style: &RawEffectStyle,
        key: &AxisKey,
        ctx: &AxisContext,
        diags: &mut Diagnostics,
    ) -> EffectToken {
        let layers = style
            .effects
            .iter()
            .filter(|e| e.visible && e.is_shadow())
            .map(|e| self.resolve_shadow(e, ctx, diags))
            .collect();
        EffectToken {
            key: key.clone(),
            style_id: style.id.clone(),
            name: style.name.clone(),
            layers,
        }
    }

    fn resolve_shadow(&self, effect: &RawEffect, ctx: &AxisContext, diags: &mut Diagnostics) -> ShadowLayer {
        let flags = self.options.effects;
        let bound = &effect.bound_variables;

        let color = match &bound.color {
            Some(alias) => self.bind_string(alias, ctx, flags, diags),
            None => Property { value: effect.color.as_ref().map(color_string), binding: None },
        };

        let mut dimension = |alias: &Option<AliasRef>, literal: f64| match alias {
            Some(alias) => self.bind_float(alias, ctx, flags, diags),
            None => Property::literal(round2(literal)),
        };

        ShadowLayer {
            kind: match effect.effect_type {
                EffectType::InnerShadow => ShadowKind::Inner,
                _ => ShadowKind::Drop,
            },
            color,
            offset_x: dimension(&bound.offset_x, effect.offset.x),
            offset_y: dimension(&bound.offset_y, effect.offset.y),
            radius: dimension(&bound.radius, effect.radius),
            spread: dimension(&bound.spread, effect.spread),
            blend_mode: effect.blend_mode.clone().unwrap_or_else(|| "NORMAL".to_owned()),
        }
    }
}
