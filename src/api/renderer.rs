use tracing::trace;

use crate::core::{CircleDefinition, Viewport};
use crate::error::CircleResult;
use crate::render::{DrawingSurface, PaintStats, paint_frame};

use super::{VisualParams, build_render_frame};

/// Paints `definition` onto `surface` using the logical `viewport`.
///
/// The definition is only borrowed and no randomness is consulted, so the
/// same inputs always produce the same surface calls. Resolution changes are
/// the caller's business: set a transform on the surface and pass the
/// original logical viewport.
pub fn render<S: DrawingSurface + ?Sized>(
    definition: &CircleDefinition,
    visual: &VisualParams,
    surface: &mut S,
    viewport: Viewport,
) -> CircleResult<PaintStats> {
    let frame = build_render_frame(definition, visual, viewport)?;
    let stats = paint_frame(surface, &frame)?;
    trace!(
        circles = stats.circles_drawn,
        paths = stats.paths_drawn,
        lines = stats.lines_drawn,
        texts = stats.texts_drawn,
        "rendered circle frame"
    );
    Ok(stats)
}
