//! Axis contexts: which mode to pick on each axis for one resolution pass.

use serde::{Deserialize, Serialize};

use super::{Axis, ModeId};

/// Partial mode selection across axes. Only the axes relevant to the
/// current resolution are populated.
///
/// Brand is carried by *name*: every brand-mapping collection mints its own
/// mode id per brand, so the only stable handle is the mode name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisContext {
    pub brand_name: Option<String>,
    pub breakpoint: Option<ModeId>,
    pub color_mode: Option<ModeId>,
    pub density: Option<ModeId>,
}

impl AxisContext {
    pub fn new() -> Self { Self::default() }

    pub fn with_brand(mut self, name: impl Into<String>) -> Self {
        self.brand_name = Some(name.into());
        self
    }

    pub fn with_breakpoint(mut self, mode: impl Into<ModeId>) -> Self {
        self.breakpoint = Some(mode.into());
        self
    }

    pub fn with_color_mode(mut self, mode: impl Into<ModeId>) -> Self {
        self.color_mode = Some(mode.into());
        self
    }

    pub fn with_density(mut self, mode: impl Into<ModeId>) -> Self {
        self.density = Some(mode.into());
        self
    }

    /// Mode id selected for an id-addressed axis.
    pub fn mode_for(&self, axis: Axis) -> Option<&ModeId> {
        match axis {
            Axis::Breakpoint => self.breakpoint.as_ref(),
            Axis::ColorMode => self.color_mode.as_ref(),
            Axis::Density => self.density.as_ref(),
            Axis::Brand => None,
        }
    }
}

/// Logical labels of one matrix cell (`brand = "bild"`, `breakpoint = "lg"`).
///
/// The twin of [`AxisContext`] that output is keyed by; generators never see
/// raw mode ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AxisKey {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density: Option<String>,
}

impl AxisKey {
    pub fn brand_breakpoint(brand: &str, breakpoint: &str) -> Self {
        Self {
            brand: Some(brand.to_owned()),
            breakpoint: Some(breakpoint.to_owned()),
            ..Self::default()
        }
    }

    pub fn brand_color_mode(brand: &str, color_mode: &str) -> Self {
        Self {
            brand: Some(brand.to_owned()),
            color_mode: Some(color_mode.to_owned()),
            ..Self::default()
        }
    }
}

impl std::fmt::Display for AxisKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<&str> = [&self.brand, &self.breakpoint, &self.color_mode, &self.density]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .collect();
        if parts.is_empty() {
            f.write_str("*")
        } else {
            f.write_str(&parts.join("/"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_for_axis() {
        let ctx = AxisContext::new().with_brand("bild").with_breakpoint("bp:lg");
        assert_eq!(ctx.mode_for(Axis::Breakpoint), Some(&ModeId::from("bp:lg")));
        assert_eq!(ctx.mode_for(Axis::ColorMode), None);
        assert_eq!(ctx.mode_for(Axis::Brand), None);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(AxisKey::brand_breakpoint("bild", "lg").to_string(), "bild/lg");
        assert_eq!(AxisKey::default().to_string(), "*");
    }
}
