//! High-resolution export through a surface transform.
//!
//! Export never recomposes: it re-renders the current definition onto a
//! fresh surface whose pixel size is `scale` times the logical viewport,
//! with a uniform transform so every coordinate lands in the same relative
//! place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{CircleDefinition, Viewport};
use crate::error::{CircleError, CircleResult};
use crate::render::{DrawingSurface, EncodedImage, ImageEncoder, PaintStats};

use super::{VisualParams, render};

pub const DEFAULT_EXPORT_SCALE: u32 = 2;
pub const DEFAULT_FILE_STEM: &str = "magic-circle";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    #[serde(default = "default_export_scale")]
    pub scale: u32,
    #[serde(default = "default_file_stem")]
    pub file_stem: String,
    /// Stamp for the filename; `None` uses the current time.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Default for ExportRequest {
    fn default() -> Self {
        Self {
            scale: default_export_scale(),
            file_stem: default_file_stem(),
            timestamp: None,
        }
    }
}

impl ExportRequest {
    #[must_use]
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn validate(&self) -> CircleResult<()> {
        if self.scale < 1 {
            return Err(CircleError::InvalidData(
                "export scale must be >= 1".to_owned(),
            ));
        }
        if self.file_stem.trim().is_empty() {
            return Err(CircleError::InvalidData(
                "export file stem must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Destination of an encoded export (download prompt, file, buffer).
pub trait ExportSink {
    fn deliver(&mut self, image: EncodedImage, filename: &str) -> CircleResult<()>;
}

/// Keeps delivered images in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryExportSink {
    delivered: Vec<(String, EncodedImage)>,
}

impl MemoryExportSink {
    #[must_use]
    pub fn delivered(&self) -> &[(String, EncodedImage)] {
        &self.delivered
    }

    #[must_use]
    pub fn last(&self) -> Option<&(String, EncodedImage)> {
        self.delivered.last()
    }
}

impl ExportSink for MemoryExportSink {
    fn deliver(&mut self, image: EncodedImage, filename: &str) -> CircleResult<()> {
        self.delivered.push((filename.to_owned(), image));
        Ok(())
    }
}

/// `"{stem}-YYYYMMDD-HHMMSS.{extension}"`.
#[must_use]
pub fn suggested_filename(stem: &str, timestamp: DateTime<Utc>, extension: &str) -> String {
    format!("{stem}-{}.{extension}", timestamp.format("%Y%m%d-%H%M%S"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub filename: String,
    /// Device pixel size of the exported image.
    pub pixel_size: Viewport,
    pub byte_len: usize,
    pub stats: PaintStats,
}

/// Renders `definition` at `request.scale` times `viewport` and hands the
/// encoded image to `sink`.
///
/// Fails with [`CircleError::MissingDefinition`] before any surface is
/// created when nothing has been composed yet.
pub fn export_image<S, F, K>(
    definition: Option<&CircleDefinition>,
    visual: &VisualParams,
    viewport: Viewport,
    request: &ExportRequest,
    make_surface: F,
    sink: &mut K,
) -> CircleResult<ExportReport>
where
    S: DrawingSurface + ImageEncoder,
    F: FnOnce(Viewport) -> CircleResult<S>,
    K: ExportSink + ?Sized,
{
    let Some(definition) = definition else {
        warn!("export requested before any circle was composed");
        return Err(CircleError::MissingDefinition);
    };
    request.validate()?;
    if !viewport.is_valid() {
        return Err(CircleError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    let pixel_size = viewport.scaled(request.scale);
    let mut surface = make_surface(pixel_size)?;
    surface.set_transform_scale(f64::from(request.scale))?;
    let stats = render(definition, visual, &mut surface, viewport)?;

    let image = surface.encode_image()?;
    let byte_len = image.bytes.len();
    let filename = suggested_filename(
        &request.file_stem,
        request.timestamp.unwrap_or_else(Utc::now),
        image.extension,
    );
    sink.deliver(image, &filename).map_err(|err| match err {
        CircleError::Export(_) => err,
        other => CircleError::Export(format!("failed to deliver {filename}: {other}")),
    })?;

    debug!(
        filename = %filename,
        width = pixel_size.width,
        height = pixel_size.height,
        bytes = byte_len,
        "exported circle image"
    );
    Ok(ExportReport {
        filename,
        pixel_size,
        byte_len,
        stats,
    })
}

fn default_export_scale() -> u32 {
    DEFAULT_EXPORT_SCALE
}

fn default_file_stem() -> String {
    DEFAULT_FILE_STEM.to_owned()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn filename_uses_compact_timestamp() {
        let stamp = Utc
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 1)
            .single()
            .expect("valid timestamp");
        assert_eq!(
            suggested_filename("magic-circle", stamp, "png"),
            "magic-circle-20240309-070501.png"
        );
    }

    #[test]
    fn request_json_keeps_timestamp() {
        let stamp = Utc
            .with_ymd_and_hms(2023, 11, 5, 18, 30, 0)
            .single()
            .expect("valid timestamp");
        let request = ExportRequest::default().with_timestamp(stamp);
        let json = serde_json::to_string(&request).expect("serialize");
        let restored: ExportRequest = serde_json::from_str(&json).expect("parse");
        assert_eq!(restored, request);

        let defaults: ExportRequest = serde_json::from_str("{}").expect("parse defaults");
        assert_eq!(defaults, ExportRequest::default());
    }

    #[test]
    fn zero_scale_is_rejected() {
        let request = ExportRequest::default().with_scale(0);
        assert!(request.validate().is_err());
    }
}
