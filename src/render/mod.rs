mod frame;
mod layer_stack;
mod primitives;
mod recording_surface;
mod surface;

pub use frame::{DrawCommand, LayerPrimitives, RenderFrame};
pub use layer_stack::CircleLayerKind;
pub use primitives::{
    CirclePrimitive, Color, GlowEffect, LinePrimitive, LineStrokeStyle, PathPrimitive,
    StrokeStyle, TextPrimitive,
};
pub use recording_surface::{ContextState, RecordingSurface, SurfaceCall};
pub use surface::{DrawingSurface, EncodedImage, ImageEncoder, PaintStats, paint_frame};

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::CairoSurface;
