//! Typography composites over Brand × Breakpoint.

use crate::diagnostics::Diagnostics;
use crate::endpoint::AcceptanceFlags;
use crate::ingest::{LengthUnit, RawLength, RawTextStyle};
use crate::model::*;
use crate::resolve::round2;
use crate::Result;

use super::font_weight::{is_weight_name, parse_style, weight_of};
use super::MatrixBuilder;

impl<'g> MatrixBuilder<'g> {
    /// Every text style resolved in every Brand × Breakpoint cell.
    pub fn typography(&self, diags: &mut Diagnostics) -> Result<Vec<TypographyToken>> {
        let styles = self.graph.text_styles();
        let mut out = Vec::new();
        for (key, ctx) in self.brand_breakpoint_cells()? {
            for style in styles {
                out.push(TypographyToken {
                    key: key.clone(),
                    style_id: style.id.clone(),
                    name: style.name.clone(),
                    typography: self.resolve_typography(style, &ctx, diags),
                });
            }
        }
        Ok(out)
    }

    /// Resolve one text style under one context.
    ///
    /// Per property: bound alias first, then the combined style string
    /// (weight / italic), then the style's own numeric fields. A binding whose
    /// chain breaks keeps its metadata but takes the literal value.
    pub fn resolve_typography(&self, style: &RawTextStyle, ctx: &AxisContext, diags: &mut Diagnostics) -> Typography {
        let sized = self.options.typography;
        let plain = AcceptanceFlags { component_breakpoint: false, ..sized };
        let bound = &style.bound_variables;
        let parsed = style.font_name.as_ref().map(|f| parse_style(&f.style));

        let literal_family = style.font_name.as_ref().map(|f| f.family.clone());
        let font_family = match &bound.font_family {
            Some(alias) => self.bind_string(alias, ctx, plain, diags).or(literal_family),
            None => Property { value: literal_family, binding: None },
        };

        let literal_weight = parsed.and_then(|p| p.weight);
        let font_weight = match &bound.font_weight {
            Some(alias) => {
                let (value, binding) = self.bind(alias, ctx, plain, diags);
                let weight = value.as_float().or_else(|| value.as_str().and_then(weight_of));
                Property::bound(weight, binding).or(literal_weight)
            }
            None => Property { value: literal_weight, binding: None },
        };

        let literal_style = parsed.map(|p| if p.italic { "italic" } else { "normal" }.to_owned());
        let font_style = match &bound.font_style {
            Some(alias) => self.bind_string(alias, ctx, plain, diags).or(literal_style),
            None => Property { value: literal_style, binding: None },
        };

        let literal_size = style.font_size.map(round2);
        let font_size = match &bound.font_size {
            Some(alias) => self.bind_float(alias, ctx, sized, diags).or(literal_size),
            None => Property { value: literal_size, binding: None },
        };

        let literal_lh = absolute_length(style.line_height, font_size.value);
        let line_height = match &bound.line_height {
            Some(alias) => self.bind_float(alias, ctx, sized, diags).or(literal_lh),
            None => Property { value: literal_lh, binding: None },
        };

        let literal_ls = absolute_length(style.letter_spacing, font_size.value);
        let letter_spacing = match &bound.letter_spacing {
            Some(alias) => self.bind_float(alias, ctx, plain, diags).or(literal_ls),
            None => Property { value: literal_ls, binding: None },
        };

        let mut typography = Typography {
            font_family,
            font_weight,
            font_size,
            line_height,
            letter_spacing,
            font_style,
            text_case: style.text_case.clone().map(Property::literal).unwrap_or_default(),
            text_decoration: style.text_decoration.clone().map(Property::literal).unwrap_or_default(),
        };
        correct_weight_in_style_slot(&mut typography, &style.name);
        typography
    }
}

/// Tri-state length to absolute px: PIXELS as-is, PERCENT of the resolved
/// font size, AUTO (or a percent without a font size) unset.
pub(crate) fn absolute_length(length: Option<RawLength>, font_size: Option<f64>) -> Option<f64> {
    let length = length?;
    match length.unit {
        LengthUnit::Pixels => length.value.map(round2),
        LengthUnit::Percent => {
            let pct = length.value?;
            font_size.map(|fs| round2(pct / 100.0 * fs))
        }
        LengthUnit::Auto => None,
    }
}

/// Upstream quirk: a textual weight ("Bold Italic", "700") sometimes arrives
/// bound to the fontStyle slot. Detected by the bound variable's name; the
/// italic qualifier stays in fontStyle, the weight and the binding move to
/// fontWeight.
fn correct_weight_in_style_slot(t: &mut Typography, style_name: &str) {
    let Some(binding) = t.font_style.binding.as_ref() else {
        return;
    };
    if !is_weight_name(&binding.path) {
        return;
    }

    let raw = t.font_style.value.clone().unwrap_or_default();
    let parsed = parse_style(&raw);
    let binding = t.font_style.binding.take();
    t.font_style = Property::literal(if parsed.italic { "italic" } else { "normal" }.to_owned());

    if t.font_weight.is_bound() {
        tracing::debug!(style = style_name, "weight bound twice; keeping fontWeight binding");
        if t.font_weight.value.is_none() {
            t.font_weight.value = parsed.weight;
        }
    } else {
        tracing::debug!(style = style_name, value = %raw, "moved weight from fontStyle to fontWeight");
        t.font_weight = Property { value: parsed.weight.or(t.font_weight.value), binding };
    }
}
