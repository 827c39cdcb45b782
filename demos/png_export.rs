use std::fs;
use std::path::PathBuf;

use magic_circle::api::{CircleStudio, ControlValues, ExportRequest, ExportSink, StudioConfig};
use magic_circle::core::Viewport;
use magic_circle::render::{CairoSurface, EncodedImage};
use magic_circle::{CircleError, CircleResult};

/// Writes exported images into a directory.
struct DirectorySink {
    directory: PathBuf,
}

impl ExportSink for DirectorySink {
    fn deliver(&mut self, image: EncodedImage, filename: &str) -> CircleResult<()> {
        let path = self.directory.join(filename);
        fs::write(&path, &image.bytes).map_err(|err| {
            CircleError::Export(format!("failed to write {}: {err}", path.display()))
        })?;
        println!("wrote {} ({} bytes)", path.display(), image.bytes.len());
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = magic_circle::telemetry::init_default_tracing();

    let viewport = Viewport::new(500, 500);
    let mut studio = CircleStudio::new(StudioConfig::new(viewport))?
        .with_surface(CairoSurface::for_viewport(viewport)?);

    let controls = ControlValues::default()
        .with_structure(4, "random", "all", 12)
        .with_glow(true)
        .with_line_style("dashed");
    studio.regenerate(&controls)?;
    studio.apply_visual_controls(&controls)?;

    let mut sink = DirectorySink {
        directory: std::env::current_dir()?,
    };
    let report = studio.export(&ExportRequest::default(), CairoSurface::for_viewport, &mut sink)?;
    println!(
        "exported {}x{} px as {}",
        report.pixel_size.width, report.pixel_size.height, report.filename
    );

    Ok(())
}
