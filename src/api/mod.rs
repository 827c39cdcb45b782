mod controls;
mod export;
mod frame_builder;
mod renderer;
mod studio;
mod visual;

pub use controls::{ControlValues, ControlsProvider};
pub use export::{
    DEFAULT_EXPORT_SCALE, DEFAULT_FILE_STEM, ExportReport, ExportRequest, ExportSink,
    MemoryExportSink, export_image, suggested_filename,
};
pub use frame_builder::build_render_frame;
pub use renderer::render;
pub use studio::{CircleStudio, StudioConfig};
pub use visual::VisualParams;
