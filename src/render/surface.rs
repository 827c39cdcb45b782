use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{CircleError, CircleResult};
use crate::render::{
    CirclePrimitive, DrawCommand, LinePrimitive, PathPrimitive, RenderFrame, TextPrimitive,
};

/// Contract implemented by any 2D drawing backend.
///
/// Every primitive carries its complete stroke state (color, width, dash,
/// glow). Implementations apply that state for the one primitive only and
/// leave the surface neutral (solid, no glow) when the call returns.
pub trait DrawingSurface {
    /// Replaces the user-space to device-space transform with a uniform scale.
    fn set_transform_scale(&mut self, factor: f64) -> CircleResult<()>;

    /// Clears the logical rectangle `(0, 0, width, height)`.
    fn clear(&mut self, viewport: Viewport) -> CircleResult<()>;

    fn stroke_circle(&mut self, circle: &CirclePrimitive) -> CircleResult<()>;

    /// Strokes the closed polygon through `path.points`.
    fn stroke_path(&mut self, path: &PathPrimitive) -> CircleResult<()>;

    fn stroke_line(&mut self, line: &LinePrimitive) -> CircleResult<()>;

    /// Draws `text` centered on its anchor point.
    fn fill_text(&mut self, text: &TextPrimitive) -> CircleResult<()>;
}

/// Encoded surface contents handed to an export sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub extension: &'static str,
}

/// Surfaces whose contents can be serialized to a byte stream.
pub trait ImageEncoder {
    fn encode_image(&self) -> CircleResult<EncodedImage>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaintStats {
    pub circles_drawn: usize,
    pub paths_drawn: usize,
    pub lines_drawn: usize,
    pub texts_drawn: usize,
}

impl PaintStats {
    #[must_use]
    pub fn total(self) -> usize {
        self.circles_drawn + self.paths_drawn + self.lines_drawn + self.texts_drawn
    }
}

/// Validates `frame`, clears its viewport and issues every command in order.
pub fn paint_frame<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    frame: &RenderFrame,
) -> CircleResult<PaintStats> {
    frame.validate()?;
    surface.clear(frame.viewport)?;

    let mut stats = PaintStats::default();
    for command in frame.commands() {
        match command {
            DrawCommand::Circle(circle) => {
                surface.stroke_circle(circle)?;
                stats.circles_drawn += 1;
            }
            DrawCommand::Path(path) => {
                surface.stroke_path(path)?;
                stats.paths_drawn += 1;
            }
            DrawCommand::Line(line) => {
                surface.stroke_line(line)?;
                stats.lines_drawn += 1;
            }
            DrawCommand::Text(text) => {
                surface.fill_text(text)?;
                stats.texts_drawn += 1;
            }
        }
    }
    Ok(stats)
}

pub(crate) fn validate_scale_factor(factor: f64) -> CircleResult<()> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(CircleError::InvalidData(
            "surface scale factor must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}
