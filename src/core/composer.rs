//! Procedural layout of a magic circle.
//!
//! Composition runs in fixed stages. Each stage reads the geometric budget left
//! by the previous one and silently produces nothing when that budget is
//! degenerate:
//!
//! 1. concentric rings
//! 2. primary inner shape (polygon or star)
//! 3. nested star inside a polygon
//! 4. vertex symbols on the primary shape
//! 5. ring symbols, only when no vertex symbols were placed
//! 6. connecting lines from shape vertices to the outer ring
//! 7. radial spokes, only when no connecting lines were drawn

use std::f64::consts::TAU;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::geometry::{center_of, evenly_spaced_angles, max_radius, polar_point};
use crate::core::{
    CircleDefinition, ComposerConfig, InnerShape, LineSegment, Point, Ring, ShapeSelector,
    SymbolPlacement, SymbolTheme, Viewport,
};
use crate::error::CircleResult;

/// Structural control values sampled at compose time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralInputs {
    pub ring_count: u32,
    pub shape: ShapeSelector,
    pub theme: SymbolTheme,
    pub symbol_count: u32,
}

impl Default for StructuralInputs {
    fn default() -> Self {
        Self {
            ring_count: 3,
            shape: ShapeSelector::Random,
            theme: SymbolTheme::Geometric,
            symbol_count: 6,
        }
    }
}

impl StructuralInputs {
    #[must_use]
    pub fn new(
        ring_count: u32,
        shape: ShapeSelector,
        theme: SymbolTheme,
        symbol_count: u32,
    ) -> Self {
        Self {
            ring_count,
            shape,
            theme,
            symbol_count,
        }
    }
}

/// Canvas-derived measurements shared by every stage.
#[derive(Debug, Clone, Copy)]
struct Frame {
    center: Point,
    max_radius: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Composer {
    config: ComposerConfig,
}

impl Composer {
    pub fn new(config: ComposerConfig) -> CircleResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Builds a fresh definition. Deterministic for a given `rng` stream.
    pub fn compose<G: Rng + ?Sized>(
        &self,
        inputs: &StructuralInputs,
        viewport: Viewport,
        rng: &mut G,
    ) -> CircleDefinition {
        let frame = Frame {
            center: center_of(viewport),
            max_radius: max_radius(viewport, self.config.margin_px),
        };
        let mut definition = CircleDefinition::empty(inputs.theme);

        definition.rings = self.compose_rings(inputs.ring_count, frame);

        let available_radius = definition.rings.last().map_or(
            frame.max_radius * self.config.ringless_available_ratio,
            |ring| ring.radius,
        );
        if let Some(primary) = self.compose_primary_shape(inputs.shape, available_radius, rng) {
            definition.inner_shapes.push(primary);
            if let Some(nested) = self.compose_nested_star(&primary, rng) {
                definition.inner_shapes.push(nested);
            }
        }

        definition.vertex_symbols =
            self.compose_vertex_symbols(definition.primary_shape(), inputs.theme, frame, rng);
        if definition.vertex_symbols.is_empty() {
            definition.ring_symbols =
                self.compose_ring_symbols(inputs.symbol_count, inputs.theme, frame, rng);
        } else {
            trace!("skipping ring symbols: symbols were placed on vertices");
        }

        definition.connecting_lines = self.compose_connecting_lines(
            definition.primary_shape(),
            definition.outermost_ring(),
            frame,
            rng,
        );
        if definition.connecting_lines.is_empty() {
            definition.radial_lines = self.compose_radial_lines(
                definition.primary_shape(),
                !definition.rings.is_empty(),
                frame,
                rng,
            );
        }

        let summary = definition.summary();
        debug!(
            ring_count = inputs.ring_count,
            shape = %inputs.shape,
            theme = %inputs.theme,
            symbol_count = inputs.symbol_count,
            rings = summary.rings,
            inner_shapes = summary.inner_shapes,
            vertex_symbols = summary.vertex_symbols,
            ring_symbols = summary.ring_symbols,
            connecting_lines = summary.connecting_lines,
            radial_lines = summary.radial_lines,
            "composed circle definition"
        );
        definition
    }

    fn compose_rings(&self, requested: u32, frame: Frame) -> Vec<Ring> {
        let count = self.config.ring_count_range.clamp(requested);
        if count != requested {
            warn!(requested, clamped = count, "ring count outside slider range");
        }

        // Radii shrink inward, so the first non-positive one ends the sequence.
        let rings: Vec<Ring> = (0..count)
            .map(f64::from)
            .map(|i| Ring {
                radius: frame.max_radius * (1.0 - i * self.config.ring_spacing_factor),
                stroke_weight: (self.config.base_stroke_weight
                    - i * self.config.stroke_weight_decay)
                    .max(self.config.min_ring_stroke_weight),
            })
            .take_while(|ring| ring.radius > 0.0)
            .collect();
        if rings.len() < count as usize {
            trace!(
                requested = count,
                kept = rings.len(),
                "dropping rings with non-positive radius"
            );
        }
        rings
    }

    fn compose_primary_shape<G: Rng + ?Sized>(
        &self,
        selector: ShapeSelector,
        available_radius: f64,
        rng: &mut G,
    ) -> Option<InnerShape> {
        let config = &self.config;
        let (is_polygon, count) = match selector {
            ShapeSelector::None => {
                trace!("skipping inner shape: none selected");
                return None;
            }
            ShapeSelector::Random => {
                if rng.gen_bool(0.5) {
                    (true, config.random_polygon_sides.sample(rng))
                } else {
                    (false, config.random_star_points.sample(rng))
                }
            }
            ShapeSelector::Polygon(sides) => (true, sides),
            ShapeSelector::Star(points) => (false, points),
        };

        let min_count = if is_polygon { 3 } else { 2 };
        if count < min_count {
            trace!(count, "skipping inner shape: too few vertices");
            return None;
        }
        let count = if count > config.max_shape_vertices {
            warn!(
                requested = count,
                clamped = config.max_shape_vertices,
                "inner shape vertex count clamped"
            );
            config.max_shape_vertices
        } else {
            count
        };

        if available_radius <= config.min_available_radius_px {
            trace!(available_radius, "skipping inner shape: available radius too small");
            return None;
        }

        let rotation = rng.gen_range(0.0..TAU);
        if is_polygon {
            let radius = available_radius * config.polygon_radius_band.sample(rng);
            if radius <= config.min_shape_radius_px {
                trace!(radius, "skipping polygon: radius too small");
                return None;
            }
            Some(InnerShape::Polygon {
                sides: count,
                radius,
                rotation,
                stroke_weight: config.shape_stroke_weight,
            })
        } else {
            let outer_radius = available_radius * config.star_outer_radius_band.sample(rng);
            if outer_radius <= config.min_shape_radius_px {
                trace!(outer_radius, "skipping star: radius too small");
                return None;
            }
            Some(InnerShape::Star {
                points: count,
                outer_radius,
                inner_radius: outer_radius * config.star_inner_ratio_band.sample(rng),
                rotation,
                stroke_weight: config.shape_stroke_weight,
            })
        }
    }

    fn compose_nested_star<G: Rng + ?Sized>(
        &self,
        primary: &InnerShape,
        rng: &mut G,
    ) -> Option<InnerShape> {
        let InnerShape::Polygon {
            sides,
            radius,
            rotation,
            ..
        } = *primary
        else {
            return None;
        };

        let outer_radius = radius * self.config.nested_star_radius_ratio;
        if outer_radius <= self.config.min_shape_radius_px {
            trace!(outer_radius, "skipping nested star: residual radius too small");
            return None;
        }
        Some(InnerShape::Star {
            points: sides,
            outer_radius,
            inner_radius: outer_radius * self.config.star_inner_ratio_band.sample(rng),
            rotation: rotation + self.config.nested_rotation_offset,
            stroke_weight: self.config.nested_stroke_weight,
        })
    }

    fn compose_vertex_symbols<G: Rng + ?Sized>(
        &self,
        primary: Option<&InnerShape>,
        theme: SymbolTheme,
        frame: Frame,
        rng: &mut G,
    ) -> Vec<SymbolPlacement> {
        let Some(primary) = primary else {
            return Vec::new();
        };
        if !rng.gen_bool(self.config.vertex_symbol_probability) {
            trace!("skipping vertex symbols: probability roll failed");
            return Vec::new();
        }

        primary
            .outer_vertices(frame.center)
            .into_iter()
            .map(|vertex| self.place_symbol(theme, vertex, rng))
            .collect()
    }

    fn compose_ring_symbols<G: Rng + ?Sized>(
        &self,
        requested: u32,
        theme: SymbolTheme,
        frame: Frame,
        rng: &mut G,
    ) -> Vec<SymbolPlacement> {
        let count = requested.min(self.config.symbol_count_max);
        if count != requested {
            warn!(requested, clamped = count, "symbol count above maximum");
        }
        if count == 0 {
            return Vec::new();
        }

        let radius = frame.max_radius * self.config.symbol_ring_radius_band.sample(rng);
        if radius <= 0.0 {
            trace!(radius, "skipping ring symbols: radius too small");
            return Vec::new();
        }
        let start = rng.gen_range(0.0..TAU);
        evenly_spaced_angles(start, count as usize)
            .into_iter()
            .map(|angle| self.place_symbol(theme, polar_point(frame.center, radius, angle), rng))
            .collect()
    }

    fn place_symbol<G: Rng + ?Sized>(
        &self,
        theme: SymbolTheme,
        at: Point,
        rng: &mut G,
    ) -> SymbolPlacement {
        let glyphs = theme.glyphs();
        // Theme tables are never empty.
        let glyph = glyphs.choose(rng).copied().unwrap_or(glyphs[0]);
        SymbolPlacement {
            glyph: glyph.to_owned(),
            x: at.x,
            y: at.y,
            size: self.config.symbol_size_band_px.sample(rng),
        }
    }

    fn compose_connecting_lines<G: Rng + ?Sized>(
        &self,
        primary: Option<&InnerShape>,
        outermost: Option<&Ring>,
        frame: Frame,
        rng: &mut G,
    ) -> Vec<LineSegment> {
        let (Some(primary), Some(outermost)) = (primary, outermost) else {
            trace!("skipping connecting lines: needs a primary shape and a ring");
            return Vec::new();
        };
        if !rng.gen_bool(self.config.connecting_line_probability) {
            trace!("skipping connecting lines: probability roll failed");
            return Vec::new();
        }

        let start_radius = primary.outer_radius();
        primary
            .vertex_angles()
            .into_iter()
            .map(|angle| {
                segment(
                    polar_point(frame.center, start_radius, angle),
                    polar_point(frame.center, outermost.radius, angle),
                    self.config.connecting_line_weight,
                )
            })
            .collect()
    }

    fn compose_radial_lines<G: Rng + ?Sized>(
        &self,
        primary: Option<&InnerShape>,
        has_rings: bool,
        frame: Frame,
        rng: &mut G,
    ) -> Vec<LineSegment> {
        if !has_rings {
            trace!("skipping radial lines: no rings");
            return Vec::new();
        }
        let inner = frame.max_radius * self.config.radial_inner_radius_ratio;
        let outer = frame.max_radius;
        if inner >= outer {
            trace!(inner, outer, "skipping radial lines: empty radius band");
            return Vec::new();
        }

        let angles = match primary {
            Some(shape) => shape.vertex_angles(),
            None => {
                let spokes = self
                    .config
                    .fallback_spoke_counts
                    .choose(rng)
                    .copied()
                    .unwrap_or(6);
                evenly_spaced_angles(0.0, spokes as usize)
            }
        };
        angles
            .into_iter()
            .map(|angle| {
                segment(
                    polar_point(frame.center, inner, angle),
                    polar_point(frame.center, outer, angle),
                    self.config.radial_line_weight,
                )
            })
            .collect()
    }
}

/// Composes with the reference configuration.
pub fn compose<G: Rng + ?Sized>(
    inputs: &StructuralInputs,
    viewport: Viewport,
    rng: &mut G,
) -> CircleDefinition {
    Composer::default().compose(inputs, viewport, rng)
}

fn segment(from: Point, to: Point, stroke_weight: f64) -> LineSegment {
    LineSegment {
        x1: from.x,
        y1: from.y,
        x2: to.x,
        y2: to.y,
        stroke_weight,
    }
}
