use serde::Serialize;

use crate::core::{Point, Viewport};
use crate::error::{CircleError, CircleResult};
use crate::render::surface::validate_scale_factor;
use crate::render::{
    CirclePrimitive, DrawingSurface, EncodedImage, GlowEffect, ImageEncoder, LinePrimitive,
    PathPrimitive, StrokeStyle, TextPrimitive,
};

/// One recorded surface call, in device space (after the transform).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SurfaceCall {
    Clear { width: f64, height: f64 },
    Circle(CirclePrimitive),
    Path(PathPrimitive),
    Line(LinePrimitive),
    Text(TextPrimitive),
}

/// Ambient drawing state a canvas-like context would carry between calls.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContextState {
    pub dash: Vec<f64>,
    pub glow: Option<GlowEffect>,
}

impl ContextState {
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.dash.is_empty() && self.glow.is_none()
    }
}

/// Headless surface that records every call since the last clear.
///
/// Used by tests and hosts without a raster backend. Output equality of two
/// recordings stands in for pixel equality. Clearing wipes the log the same
/// way it wipes pixels, so the log always describes the latest frame.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    scale: f64,
    state: ContextState,
    calls: Vec<SurfaceCall>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            scale: 1.0,
            state: ContextState::default(),
            calls: Vec::new(),
        }
    }
}

impl RecordingSurface {
    #[must_use]
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// State left behind by the last call; neutral unless a primitive leaked.
    #[must_use]
    pub fn context_state(&self) -> &ContextState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.calls.clear();
        self.state = ContextState::default();
    }

    fn point(&self, point: Point) -> Point {
        Point::new(point.x * self.scale, point.y * self.scale)
    }

    fn stroke(&self, stroke: StrokeStyle) -> StrokeStyle {
        StrokeStyle {
            width: stroke.width * self.scale,
            glow: self.glow(stroke.glow),
            ..stroke
        }
    }

    fn glow(&self, glow: Option<GlowEffect>) -> Option<GlowEffect> {
        glow.map(|glow| GlowEffect {
            blur_px: glow.blur_px * self.scale,
            ..glow
        })
    }

    fn acquire(&mut self, dash: &[f64], glow: Option<GlowEffect>) {
        self.state.dash = dash.iter().map(|segment| segment * self.scale).collect();
        self.state.glow = glow;
    }

    fn release(&mut self) {
        self.state = ContextState::default();
    }

    fn record_stroked(&mut self, stroke: StrokeStyle, call: SurfaceCall) {
        self.acquire(stroke.dash.dash_pattern(), stroke.glow);
        self.calls.push(call);
        self.release();
    }
}

impl DrawingSurface for RecordingSurface {
    fn set_transform_scale(&mut self, factor: f64) -> CircleResult<()> {
        validate_scale_factor(factor)?;
        self.scale = factor;
        Ok(())
    }

    fn clear(&mut self, viewport: Viewport) -> CircleResult<()> {
        self.calls.clear();
        self.calls.push(SurfaceCall::Clear {
            width: f64::from(viewport.width) * self.scale,
            height: f64::from(viewport.height) * self.scale,
        });
        Ok(())
    }

    fn stroke_circle(&mut self, circle: &CirclePrimitive) -> CircleResult<()> {
        let recorded = CirclePrimitive {
            center: self.point(circle.center),
            radius: circle.radius * self.scale,
            stroke: self.stroke(circle.stroke),
        };
        self.record_stroked(recorded.stroke, SurfaceCall::Circle(recorded));
        Ok(())
    }

    fn stroke_path(&mut self, path: &PathPrimitive) -> CircleResult<()> {
        let recorded = PathPrimitive {
            points: path.points.iter().map(|point| self.point(*point)).collect(),
            stroke: self.stroke(path.stroke),
        };
        let stroke = recorded.stroke;
        self.record_stroked(stroke, SurfaceCall::Path(recorded));
        Ok(())
    }

    fn stroke_line(&mut self, line: &LinePrimitive) -> CircleResult<()> {
        let start = self.point(Point::new(line.x1, line.y1));
        let end = self.point(Point::new(line.x2, line.y2));
        let recorded = LinePrimitive::new(start.x, start.y, end.x, end.y, self.stroke(line.stroke));
        self.record_stroked(recorded.stroke, SurfaceCall::Line(recorded));
        Ok(())
    }

    fn fill_text(&mut self, text: &TextPrimitive) -> CircleResult<()> {
        let anchor = self.point(Point::new(text.x, text.y));
        let recorded = TextPrimitive {
            text: text.text.clone(),
            x: anchor.x,
            y: anchor.y,
            font_size_px: text.font_size_px * self.scale,
            color: text.color,
            glow: self.glow(text.glow),
        };
        self.acquire(&[], recorded.glow);
        self.calls.push(SurfaceCall::Text(recorded));
        self.release();
        Ok(())
    }
}

impl ImageEncoder for RecordingSurface {
    /// Serializes the call log as JSON.
    fn encode_image(&self) -> CircleResult<EncodedImage> {
        let bytes = serde_json::to_vec(&self.calls).map_err(|e| {
            CircleError::Backend(format!("failed to serialize recorded calls: {e}"))
        })?;
        Ok(EncodedImage {
            bytes,
            mime_type: "application/json",
            extension: "json",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Color, LineStrokeStyle};

    #[test]
    fn scale_applies_to_geometry_and_stroke() {
        let mut surface = RecordingSurface::default();
        surface.set_transform_scale(2.0).expect("scale");
        let stroke = StrokeStyle::solid(Color::rgb(1.0, 0.0, 0.0), 1.5)
            .with_dash(LineStrokeStyle::Dashed);
        surface
            .stroke_line(&LinePrimitive::new(1.0, 2.0, 3.0, 4.0, stroke))
            .expect("line");

        let SurfaceCall::Line(line) = &surface.calls()[0] else {
            panic!("expected a line call");
        };
        assert_eq!((line.x1, line.y1, line.x2, line.y2), (2.0, 4.0, 6.0, 8.0));
        assert_eq!(line.stroke.width, 3.0);
        assert!(surface.context_state().is_neutral());
    }

    #[test]
    fn clear_discards_previous_frame() {
        let mut surface = RecordingSurface::default();
        let viewport = Viewport::new(40, 30);
        let stroke = StrokeStyle::solid(Color::rgb(0.0, 0.0, 1.0), 1.0);
        surface.clear(viewport).expect("clear");
        surface
            .stroke_line(&LinePrimitive::new(0.0, 0.0, 5.0, 5.0, stroke))
            .expect("line");
        surface.clear(viewport).expect("clear again");

        assert_eq!(
            surface.calls(),
            &[SurfaceCall::Clear {
                width: 40.0,
                height: 30.0
            }]
        );
    }

    #[test]
    fn rejects_non_positive_scale() {
        let mut surface = RecordingSurface::default();
        assert!(surface.set_transform_scale(0.0).is_err());
        assert!(surface.set_transform_scale(f64::NAN).is_err());
    }
}
