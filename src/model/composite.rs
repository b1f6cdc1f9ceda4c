//! Composite tokens: multi-property bundles whose properties are bound
//! independently.

use serde::{Deserialize, Serialize};

use super::{AxisKey, EndpointDescriptor, VariableId};

/// The variable a composite property is bound to, plus the endpoint its
/// chain was classified at (if any).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub variable: VariableId,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<EndpointDescriptor>,
}

/// One composite property: its concrete value and optional binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property<T> {
    pub value: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding: Option<Binding>,
}

impl<T> Default for Property<T> {
    fn default() -> Self {
        Self { value: None, binding: None }
    }
}

impl<T> Property<T> {
    pub fn literal(value: T) -> Self {
        Self { value: Some(value), binding: None }
    }

    pub fn bound(value: Option<T>, binding: Binding) -> Self {
        Self { value, binding: Some(binding) }
    }

    pub fn unset() -> Self { Self::default() }

    pub fn is_bound(&self) -> bool { self.binding.is_some() }

    /// Fill a missing value, keeping the binding.
    pub fn or(mut self, fallback: Option<T>) -> Self {
        if self.value.is_none() {
            self.value = fallback;
        }
        self
    }

    pub fn bound_variable(&self) -> Option<&VariableId> {
        self.binding.as_ref().map(|b| &b.variable)
    }
}

/// Typography composite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    pub font_family: Property<String>,
    pub font_weight: Property<f64>,
    /// Absolute size in px.
    pub font_size: Property<f64>,
    /// Absolute lineHeight in px; `None` means unset (AUTO).
    pub line_height: Property<f64>,
    pub letter_spacing: Property<f64>,
    /// `normal` or `italic`.
    pub font_style: Property<String>,
    pub text_case: Property<String>,
    pub text_decoration: Property<String>,
}

impl Typography {
    /// Unitless lineHeight / fontSize, rounded to three decimals.
    pub fn line_height_ratio(&self) -> Option<f64> {
        let fs = self.font_size.value?;
        let lh = self.line_height.value?;
        if fs <= 0.0 {
            return None;
        }
        Some(round_ratio(lh / fs))
    }
}

/// Rounding applied to every derived ratio so equal ratios compare equal.
pub fn round_ratio(r: f64) -> f64 {
    (r * 1000.0).round() / 1000.0
}

/// One typography style resolved for one Brand × Breakpoint cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypographyToken {
    pub key: AxisKey,
    pub style_id: String,
    /// Style name, slash-delimited like variable paths.
    pub name: String,
    pub typography: Typography,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadowKind {
    Drop,
    Inner,
}

/// One shadow layer of an effect composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowLayer {
    pub kind: ShadowKind,
    pub color: Property<String>,
    pub offset_x: Property<f64>,
    pub offset_y: Property<f64>,
    pub radius: Property<f64>,
    pub spread: Property<f64>,
    pub blend_mode: String,
}

impl ShadowLayer {
    pub fn inset(&self) -> bool { self.kind == ShadowKind::Inner }
}

/// One effect style resolved for one Brand × ColorMode cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectToken {
    pub key: AxisKey,
    pub style_id: String,
    pub name: String,
    /// Declaration order is paint order.
    pub layers: Vec<ShadowLayer>,
}
