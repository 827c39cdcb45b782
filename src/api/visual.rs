use serde::{Deserialize, Serialize};

use crate::error::{CircleError, CircleResult};
use crate::render::{Color, GlowEffect, LineStrokeStyle};

/// Purely visual render parameters. Never stored in a definition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualParams {
    /// Rings and symbols.
    #[serde(default = "default_primary_color")]
    pub primary_color: Color,
    /// Shapes, connecting lines and radial lines.
    #[serde(default = "default_secondary_color")]
    pub secondary_color: Color,
    #[serde(default)]
    pub glow_enabled: bool,
    #[serde(default = "default_glow_blur_px")]
    pub glow_blur_px: f64,
    #[serde(default)]
    pub line_style: LineStrokeStyle,
}

impl Default for VisualParams {
    fn default() -> Self {
        Self {
            primary_color: default_primary_color(),
            secondary_color: default_secondary_color(),
            glow_enabled: false,
            glow_blur_px: default_glow_blur_px(),
            line_style: LineStrokeStyle::default(),
        }
    }
}

impl VisualParams {
    #[must_use]
    pub fn with_colors(mut self, primary: Color, secondary: Color) -> Self {
        self.primary_color = primary;
        self.secondary_color = secondary;
        self
    }

    #[must_use]
    pub fn with_glow(mut self, enabled: bool, blur_px: f64) -> Self {
        self.glow_enabled = enabled;
        self.glow_blur_px = blur_px;
        self
    }

    #[must_use]
    pub fn with_line_style(mut self, line_style: LineStrokeStyle) -> Self {
        self.line_style = line_style;
        self
    }

    /// Glow halo for an element painted in `color`, if glow is enabled.
    #[must_use]
    pub fn glow_for(&self, color: Color) -> Option<GlowEffect> {
        self.glow_enabled.then_some(GlowEffect {
            color,
            blur_px: self.glow_blur_px,
        })
    }

    pub fn validate(&self) -> CircleResult<()> {
        self.primary_color.validate()?;
        self.secondary_color.validate()?;
        if !self.glow_blur_px.is_finite() || self.glow_blur_px <= 0.0 {
            return Err(CircleError::InvalidData(
                "glow blur must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> CircleResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            CircleError::InvalidData(format!("failed to serialize visual params: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> CircleResult<Self> {
        let params: Self = serde_json::from_str(input).map_err(|e| {
            CircleError::InvalidData(format!("failed to parse visual params: {e}"))
        })?;
        params.validate()?;
        Ok(params)
    }
}

fn default_primary_color() -> Color {
    Color::from_rgb8(0xb4, 0x8c, 0xff)
}

fn default_secondary_color() -> Color {
    Color::from_rgb8(0xc8, 0xc8, 0xc8).with_alpha(f64::from(0xb3_u8) / 255.0)
}

fn default_glow_blur_px() -> f64 {
    8.0
}
