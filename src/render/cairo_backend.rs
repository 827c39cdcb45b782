use std::f64::consts::TAU;
use std::fmt;

use cairo::{Context, Format, ImageSurface, Operator};
use pango::FontDescription;

use crate::core::Viewport;
use crate::error::{CircleError, CircleResult};
use crate::render::surface::validate_scale_factor;
use crate::render::{
    CirclePrimitive, Color, DrawingSurface, EncodedImage, GlowEffect, ImageEncoder,
    LinePrimitive, PathPrimitive, StrokeStyle, TextPrimitive,
};

/// Concentric halo passes used to approximate a blur glow.
const GLOW_PASSES: u32 = 4;

/// Cairo + Pango raster surface backed by an offscreen ARGB image.
///
/// Glow is emulated by stroking progressively wider, fainter copies of the
/// primitive underneath it. Every primitive runs inside `save`/`restore`, so
/// dash and glow never outlive the call.
pub struct CairoSurface {
    surface: ImageSurface,
    context: Context,
    clear_color: Color,
}

impl fmt::Debug for CairoSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CairoSurface")
            .field("width", &self.surface.width())
            .field("height", &self.surface.height())
            .field("clear_color", &self.clear_color)
            .finish_non_exhaustive()
    }
}

impl CairoSurface {
    pub fn new(width: i32, height: i32) -> CircleResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(CircleError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        Ok(Self {
            surface,
            context,
            clear_color: Color::TRANSPARENT,
        })
    }

    /// Offscreen surface with the pixel size of `viewport`.
    pub fn for_viewport(viewport: Viewport) -> CircleResult<Self> {
        let to_i32 = |value: u32| {
            i32::try_from(value).map_err(|_| CircleError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            })
        };
        Self::new(to_i32(viewport.width)?, to_i32(viewport.height)?)
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> CircleResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    fn scoped<F>(&self, stroke: StrokeStyle, mut append_path: F) -> CircleResult<()>
    where
        F: FnMut(&Context),
    {
        let context = &self.context;
        context
            .save()
            .map_err(|err| map_backend_error("failed to save context", err))?;
        context.set_dash(stroke.dash.dash_pattern(), 0.0);

        let result = (|| -> CircleResult<()> {
            if let Some(glow) = stroke.glow {
                for pass in (1..=GLOW_PASSES).rev() {
                    let spread = glow.blur_px * f64::from(pass) / f64::from(GLOW_PASSES);
                    append_path(context);
                    apply_color(context, glow_pass_color(glow, pass));
                    context.set_line_width(stroke.width + spread * 2.0);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke glow", err))?;
                }
            }
            append_path(context);
            apply_color(context, stroke.color);
            context.set_line_width(stroke.width);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke primitive", err))
        })();

        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context", err))?;
        result
    }
}

impl DrawingSurface for CairoSurface {
    fn set_transform_scale(&mut self, factor: f64) -> CircleResult<()> {
        validate_scale_factor(factor)?;
        self.context.identity_matrix();
        self.context.scale(factor, factor);
        Ok(())
    }

    fn clear(&mut self, viewport: Viewport) -> CircleResult<()> {
        self.clear_color.validate()?;
        let context = &self.context;
        context
            .save()
            .map_err(|err| map_backend_error("failed to save context", err))?;
        context.set_operator(Operator::Source);
        apply_color(context, self.clear_color);
        context.rectangle(
            0.0,
            0.0,
            f64::from(viewport.width),
            f64::from(viewport.height),
        );
        let filled = context
            .fill()
            .map_err(|err| map_backend_error("failed to clear surface", err));
        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context", err))?;
        filled
    }

    fn stroke_circle(&mut self, circle: &CirclePrimitive) -> CircleResult<()> {
        self.scoped(circle.stroke, |context| {
            context.new_path();
            context.arc(circle.center.x, circle.center.y, circle.radius, 0.0, TAU);
        })
    }

    fn stroke_path(&mut self, path: &PathPrimitive) -> CircleResult<()> {
        self.scoped(path.stroke, |context| {
            context.new_path();
            let mut points = path.points.iter();
            if let Some(first) = points.next() {
                context.move_to(first.x, first.y);
                for point in points {
                    context.line_to(point.x, point.y);
                }
                context.close_path();
            }
        })
    }

    fn stroke_line(&mut self, line: &LinePrimitive) -> CircleResult<()> {
        self.scoped(line.stroke, |context| {
            context.new_path();
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
        })
    }

    fn fill_text(&mut self, text: &TextPrimitive) -> CircleResult<()> {
        let context = &self.context;
        context
            .save()
            .map_err(|err| map_backend_error("failed to save context", err))?;

        // Sizes stay fractional in user space so the transform scales text
        // exactly like geometry.
        let layout = pangocairo::functions::create_layout(context);
        let mut font_description = FontDescription::new();
        font_description.set_family("Sans");
        font_description.set_absolute_size(text.font_size_px * f64::from(pango::SCALE));
        layout.set_font_description(Some(&font_description));
        layout.set_text(&text.text);

        let (_, logical) = layout.extents();
        let pango_units = f64::from(pango::SCALE);
        let x = text.x - f64::from(logical.width()) / pango_units / 2.0;
        let y = text.y - f64::from(logical.height()) / pango_units / 2.0;

        let result = (|| -> CircleResult<()> {
            if let Some(glow) = text.glow {
                for pass in (1..=GLOW_PASSES).rev() {
                    let spread = glow.blur_px * f64::from(pass) / f64::from(GLOW_PASSES);
                    context.new_path();
                    context.move_to(x, y);
                    pangocairo::functions::layout_path(context, &layout);
                    apply_color(context, glow_pass_color(glow, pass));
                    context.set_line_width(spread * 2.0);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke text glow", err))?;
                }
            }
            context.new_path();
            apply_color(context, text.color);
            context.move_to(x, y);
            pangocairo::functions::show_layout(context, &layout);
            Ok(())
        })();

        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context", err))?;
        result
    }
}

impl ImageEncoder for CairoSurface {
    fn encode_image(&self) -> CircleResult<EncodedImage> {
        self.surface.flush();
        let mut bytes = Vec::new();
        self.surface
            .write_to_png(&mut bytes)
            .map_err(|err| CircleError::Backend(format!("failed to encode png: {err}")))?;
        Ok(EncodedImage {
            bytes,
            mime_type: "image/png",
            extension: "png",
        })
    }
}

fn glow_pass_color(glow: GlowEffect, pass: u32) -> Color {
    // outer passes are the faintest
    glow.color.with_alpha(glow.color.alpha * 0.35 / f64::from(pass))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> CircleError {
    CircleError::Backend(format!("{prefix}: {err}"))
}
