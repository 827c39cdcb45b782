use serde::{Deserialize, Serialize};

use crate::core::SymbolTheme;
use crate::error::{CircleError, CircleResult};

pub const CIRCLE_DEFINITION_JSON_SCHEMA_V1: u32 = 1;

/// One concentric ring, centered on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub radius: f64,
    pub stroke_weight: f64,
}

/// Nested polygon or star, centered on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InnerShape {
    Polygon {
        sides: u32,
        radius: f64,
        rotation: f64,
        stroke_weight: f64,
    },
    Star {
        points: u32,
        outer_radius: f64,
        inner_radius: f64,
        rotation: f64,
        stroke_weight: f64,
    },
}

/// A glyph drawn centered at `(x, y)` with a pixel `size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolPlacement {
    pub glyph: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_weight: f64,
}

/// Declarative scene produced by the composer.
///
/// Holds geometry and glyphs only. Colors, glow and dash style are supplied at
/// render time, so one definition can be redrawn with any visual parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleDefinition {
    /// Outermost first.
    pub rings: Vec<Ring>,
    /// Primary shape first, optional nested shape second.
    pub inner_shapes: Vec<InnerShape>,
    pub vertex_symbols: Vec<SymbolPlacement>,
    pub ring_symbols: Vec<SymbolPlacement>,
    pub connecting_lines: Vec<LineSegment>,
    pub radial_lines: Vec<LineSegment>,
    pub symbol_theme: SymbolTheme,
}

/// Element counts of a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DefinitionSummary {
    pub rings: usize,
    pub inner_shapes: usize,
    pub vertex_symbols: usize,
    pub ring_symbols: usize,
    pub connecting_lines: usize,
    pub radial_lines: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleDefinitionJsonContractV1 {
    pub schema_version: u32,
    pub definition: CircleDefinition,
}

impl CircleDefinition {
    #[must_use]
    pub fn empty(symbol_theme: SymbolTheme) -> Self {
        Self {
            rings: Vec::new(),
            inner_shapes: Vec::new(),
            vertex_symbols: Vec::new(),
            ring_symbols: Vec::new(),
            connecting_lines: Vec::new(),
            radial_lines: Vec::new(),
            symbol_theme,
        }
    }

    /// The shape vertex symbols and connecting/radial lines are anchored to.
    #[must_use]
    pub fn primary_shape(&self) -> Option<&InnerShape> {
        self.inner_shapes.first()
    }

    #[must_use]
    pub fn outermost_ring(&self) -> Option<&Ring> {
        self.rings.first()
    }

    #[must_use]
    pub fn summary(&self) -> DefinitionSummary {
        DefinitionSummary {
            rings: self.rings.len(),
            inner_shapes: self.inner_shapes.len(),
            vertex_symbols: self.vertex_symbols.len(),
            ring_symbols: self.ring_symbols.len(),
            connecting_lines: self.connecting_lines.len(),
            radial_lines: self.radial_lines.len(),
        }
    }

    /// Returns a copy with every coordinate, radius and size multiplied by
    /// `factor`. Stroke weights are scaled too.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        let scale_line = |line: &LineSegment| LineSegment {
            x1: line.x1 * factor,
            y1: line.y1 * factor,
            x2: line.x2 * factor,
            y2: line.y2 * factor,
            stroke_weight: line.stroke_weight * factor,
        };
        let scale_symbol = |symbol: &SymbolPlacement| SymbolPlacement {
            glyph: symbol.glyph.clone(),
            x: symbol.x * factor,
            y: symbol.y * factor,
            size: symbol.size * factor,
        };

        Self {
            rings: self
                .rings
                .iter()
                .map(|ring| Ring {
                    radius: ring.radius * factor,
                    stroke_weight: ring.stroke_weight * factor,
                })
                .collect(),
            inner_shapes: self
                .inner_shapes
                .iter()
                .map(|shape| shape.scaled(factor))
                .collect(),
            vertex_symbols: self.vertex_symbols.iter().map(scale_symbol).collect(),
            ring_symbols: self.ring_symbols.iter().map(scale_symbol).collect(),
            connecting_lines: self.connecting_lines.iter().map(scale_line).collect(),
            radial_lines: self.radial_lines.iter().map(scale_line).collect(),
            symbol_theme: self.symbol_theme,
        }
    }

    /// Checks numeric invariants, both mutual-exclusivity rules and that every
    /// placed glyph belongs to `symbol_theme`.
    pub fn validate(&self) -> CircleResult<()> {
        let mut previous_radius = f64::INFINITY;
        for ring in &self.rings {
            ensure_positive(ring.radius, "ring radius")?;
            ensure_positive(ring.stroke_weight, "ring stroke weight")?;
            if ring.radius >= previous_radius {
                return Err(CircleError::InvalidData(
                    "ring radii must be strictly decreasing".to_owned(),
                ));
            }
            previous_radius = ring.radius;
        }

        if self.inner_shapes.len() > 2 {
            return Err(CircleError::InvalidData(format!(
                "at most two inner shapes are allowed, got {}",
                self.inner_shapes.len()
            )));
        }
        for shape in &self.inner_shapes {
            shape.validate()?;
        }

        if !self.vertex_symbols.is_empty() && !self.ring_symbols.is_empty() {
            return Err(CircleError::InvalidData(
                "vertex symbols and ring symbols are mutually exclusive".to_owned(),
            ));
        }
        if !self.connecting_lines.is_empty() && !self.radial_lines.is_empty() {
            return Err(CircleError::InvalidData(
                "connecting lines and radial lines are mutually exclusive".to_owned(),
            ));
        }

        for symbol in self.vertex_symbols.iter().chain(&self.ring_symbols) {
            if !symbol.x.is_finite() || !symbol.y.is_finite() {
                return Err(CircleError::InvalidData(
                    "symbol coordinates must be finite".to_owned(),
                ));
            }
            ensure_positive(symbol.size, "symbol size")?;
            if !self.symbol_theme.contains(&symbol.glyph) {
                return Err(CircleError::InvalidData(format!(
                    "glyph `{}` is not part of theme `{}`",
                    symbol.glyph, self.symbol_theme
                )));
            }
        }

        for line in self.connecting_lines.iter().chain(&self.radial_lines) {
            if ![line.x1, line.y1, line.x2, line.y2]
                .iter()
                .all(|value| value.is_finite())
            {
                return Err(CircleError::InvalidData(
                    "line coordinates must be finite".to_owned(),
                ));
            }
            ensure_positive(line.stroke_weight, "line stroke weight")?;
        }

        Ok(())
    }

    pub fn to_json_contract_v1_pretty(&self) -> CircleResult<String> {
        let payload = CircleDefinitionJsonContractV1 {
            schema_version: CIRCLE_DEFINITION_JSON_SCHEMA_V1,
            definition: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            CircleError::InvalidData(format!("failed to serialize definition contract v1: {e}"))
        })
    }

    /// Accepts either a bare definition or a versioned contract payload and
    /// validates the result.
    pub fn from_json_compat_str(input: &str) -> CircleResult<Self> {
        let definition = if let Ok(definition) = serde_json::from_str::<Self>(input) {
            definition
        } else {
            let payload: CircleDefinitionJsonContractV1 =
                serde_json::from_str(input).map_err(|e| {
                    CircleError::InvalidData(format!("failed to parse definition json payload: {e}"))
                })?;
            if payload.schema_version != CIRCLE_DEFINITION_JSON_SCHEMA_V1 {
                return Err(CircleError::InvalidData(format!(
                    "unsupported definition schema version: {}",
                    payload.schema_version
                )));
            }
            payload.definition
        };
        definition.validate()?;
        Ok(definition)
    }
}

pub(crate) fn ensure_positive(value: f64, field: &str) -> CircleResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CircleError::InvalidData(format!(
            "{field} must be finite and > 0"
        )));
    }
    Ok(())
}
