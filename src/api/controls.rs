//! Boundary to the host's control widgets.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{ShapeSelector, StructuralInputs, SymbolTheme};
use crate::error::{CircleError, CircleResult};
use crate::render::{Color, LineStrokeStyle};

use super::VisualParams;

/// Current control values as raw widget state.
///
/// `None` means the control does not exist in the host; reading it is a
/// precondition failure, not a default.
pub trait ControlsProvider {
    fn ring_count(&self) -> Option<u32>;
    fn inner_shape(&self) -> Option<String>;
    fn symbol_theme(&self) -> Option<String>;
    fn symbol_count(&self) -> Option<u32>;
    fn primary_color(&self) -> Option<String>;
    fn secondary_color(&self) -> Option<String>;
    fn glow_enabled(&self) -> Option<bool>;
    fn line_style(&self) -> Option<String>;

    /// Optional control; hosts without a blur slider keep the current value.
    fn glow_blur_px(&self) -> Option<f64> {
        None
    }
}

/// In-memory controls snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlValues {
    pub ring_count: Option<u32>,
    pub inner_shape: Option<String>,
    pub symbol_theme: Option<String>,
    pub symbol_count: Option<u32>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub glow_enabled: Option<bool>,
    pub line_style: Option<String>,
    pub glow_blur_px: Option<f64>,
}

impl Default for ControlValues {
    fn default() -> Self {
        let structural = StructuralInputs::default();
        let visual = VisualParams::default();
        Self {
            ring_count: Some(structural.ring_count),
            inner_shape: Some(structural.shape.to_string()),
            symbol_theme: Some(structural.theme.key().to_owned()),
            symbol_count: Some(structural.symbol_count),
            primary_color: Some(visual.primary_color.to_string()),
            secondary_color: Some(visual.secondary_color.to_string()),
            glow_enabled: Some(visual.glow_enabled),
            line_style: Some(visual.line_style.key().to_owned()),
            glow_blur_px: None,
        }
    }
}

impl ControlValues {
    /// Snapshot with every control missing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            ring_count: None,
            inner_shape: None,
            symbol_theme: None,
            symbol_count: None,
            primary_color: None,
            secondary_color: None,
            glow_enabled: None,
            line_style: None,
            glow_blur_px: None,
        }
    }

    #[must_use]
    pub fn with_structure(
        mut self,
        ring_count: u32,
        inner_shape: &str,
        symbol_theme: &str,
        symbol_count: u32,
    ) -> Self {
        self.ring_count = Some(ring_count);
        self.inner_shape = Some(inner_shape.to_owned());
        self.symbol_theme = Some(symbol_theme.to_owned());
        self.symbol_count = Some(symbol_count);
        self
    }

    #[must_use]
    pub fn with_colors(mut self, primary: &str, secondary: &str) -> Self {
        self.primary_color = Some(primary.to_owned());
        self.secondary_color = Some(secondary.to_owned());
        self
    }

    #[must_use]
    pub fn with_glow(mut self, enabled: bool) -> Self {
        self.glow_enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn with_line_style(mut self, line_style: &str) -> Self {
        self.line_style = Some(line_style.to_owned());
        self
    }
}

impl ControlsProvider for ControlValues {
    fn ring_count(&self) -> Option<u32> {
        self.ring_count
    }

    fn inner_shape(&self) -> Option<String> {
        self.inner_shape.clone()
    }

    fn symbol_theme(&self) -> Option<String> {
        self.symbol_theme.clone()
    }

    fn symbol_count(&self) -> Option<u32> {
        self.symbol_count
    }

    fn primary_color(&self) -> Option<String> {
        self.primary_color.clone()
    }

    fn secondary_color(&self) -> Option<String> {
        self.secondary_color.clone()
    }

    fn glow_enabled(&self) -> Option<bool> {
        self.glow_enabled
    }

    fn line_style(&self) -> Option<String> {
        self.line_style.clone()
    }

    fn glow_blur_px(&self) -> Option<f64> {
        self.glow_blur_px
    }
}

fn required<T>(value: Option<T>, input: &'static str) -> CircleResult<T> {
    value.ok_or(CircleError::PreconditionNotMet { input })
}

impl StructuralInputs {
    /// Samples structural controls.
    ///
    /// Unknown theme keys fall back to the default theme; malformed shape
    /// tokens fall back to no shape. Missing controls fail.
    pub fn from_controls<P: ControlsProvider + ?Sized>(controls: &P) -> CircleResult<Self> {
        let ring_count = required(controls.ring_count(), "ring_count")?;
        let shape_token = required(controls.inner_shape(), "inner_shape")?;
        let theme_key = required(controls.symbol_theme(), "symbol_theme")?;
        let symbol_count = required(controls.symbol_count(), "symbol_count")?;

        let shape = shape_token.parse().unwrap_or_else(|err| {
            warn!(token = %shape_token, error = %err, "unrecognized inner shape, drawing none");
            ShapeSelector::None
        });

        Ok(Self {
            ring_count,
            shape,
            theme: SymbolTheme::resolve(&theme_key),
            symbol_count,
        })
    }
}

impl VisualParams {
    /// Samples visual controls on top of `current`.
    ///
    /// Malformed colors are errors; an unknown line style falls back to solid.
    pub fn from_controls<P: ControlsProvider + ?Sized>(
        controls: &P,
        current: &VisualParams,
    ) -> CircleResult<Self> {
        let primary_color: Color = required(controls.primary_color(), "primary_color")?.parse()?;
        let secondary_color: Color =
            required(controls.secondary_color(), "secondary_color")?.parse()?;
        let glow_enabled = required(controls.glow_enabled(), "glow_enabled")?;
        let line_style_key = required(controls.line_style(), "line_style")?;
        let line_style = line_style_key.parse().unwrap_or_else(|err| {
            warn!(key = %line_style_key, error = %err, "unrecognized line style, using solid");
            LineStrokeStyle::Solid
        });

        let params = Self {
            primary_color,
            secondary_color,
            glow_enabled,
            glow_blur_px: controls.glow_blur_px().unwrap_or(current.glow_blur_px),
            line_style,
        };
        params.validate()?;
        Ok(params)
    }
}
