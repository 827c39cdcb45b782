use crate::core::geometry::center_of;
use crate::core::{CircleDefinition, InnerShape, LineSegment, SymbolPlacement, Viewport};
use crate::error::{CircleError, CircleResult};
use crate::render::{
    CircleLayerKind, CirclePrimitive, Color, DrawCommand, LinePrimitive, PathPrimitive,
    RenderFrame, StrokeStyle, TextPrimitive,
};

use super::VisualParams;

/// Materializes `definition` + `visual` into a validated frame.
///
/// Pure: reads both inputs, never mutates them and never draws randomness, so
/// two calls with equal arguments yield equal frames.
pub fn build_render_frame(
    definition: &CircleDefinition,
    visual: &VisualParams,
    viewport: Viewport,
) -> CircleResult<RenderFrame> {
    if !viewport.is_valid() {
        return Err(CircleError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    visual.validate()?;

    let center = center_of(viewport);
    let primary = visual.primary_color;
    let mut frame = RenderFrame::new(viewport);

    for ring in &definition.rings {
        frame.push(
            CircleLayerKind::Rings,
            DrawCommand::Circle(CirclePrimitive {
                center,
                radius: ring.radius,
                stroke: StrokeStyle::solid(primary, ring.stroke_weight)
                    .with_glow(visual.glow_for(primary)),
            }),
        );
    }

    for shape in &definition.inner_shapes {
        frame.push(
            CircleLayerKind::Shapes,
            DrawCommand::Path(PathPrimitive {
                points: shape.outline(center),
                stroke: shape_stroke(shape, visual),
            }),
        );
    }

    for line in &definition.connecting_lines {
        let kind = CircleLayerKind::ConnectingLines;
        frame.push(kind, line_command(kind, line, visual));
    }
    for symbol in &definition.vertex_symbols {
        frame.push(
            CircleLayerKind::VertexSymbols,
            text_command(symbol, primary, visual),
        );
    }
    for symbol in &definition.ring_symbols {
        frame.push(
            CircleLayerKind::RingSymbols,
            text_command(symbol, primary, visual),
        );
    }
    for line in &definition.radial_lines {
        let kind = CircleLayerKind::RadialLines;
        frame.push(kind, line_command(kind, line, visual));
    }

    frame.validate()?;
    Ok(frame)
}

fn shape_stroke(shape: &InnerShape, visual: &VisualParams) -> StrokeStyle {
    let color = visual.secondary_color;
    StrokeStyle::solid(color, shape.stroke_weight()).with_glow(visual.glow_for(color))
}

fn line_command(kind: CircleLayerKind, line: &LineSegment, visual: &VisualParams) -> DrawCommand {
    let color = visual.secondary_color;
    let mut stroke =
        StrokeStyle::solid(color, line.stroke_weight).with_glow(visual.glow_for(color));
    if kind.uses_line_style() {
        stroke = stroke.with_dash(visual.line_style);
    }
    DrawCommand::Line(LinePrimitive::new(line.x1, line.y1, line.x2, line.y2, stroke))
}

fn text_command(symbol: &SymbolPlacement, color: Color, visual: &VisualParams) -> DrawCommand {
    DrawCommand::Text(TextPrimitive {
        text: symbol.glyph.clone(),
        x: symbol.x,
        y: symbol.y,
        font_size_px: symbol.size,
        color,
        glow: visual.glow_for(color),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Ring, SymbolTheme};
    use crate::render::LineStrokeStyle;

    fn definition_with_lines() -> CircleDefinition {
        let mut definition = CircleDefinition::empty(SymbolTheme::Geometric);
        definition.rings.push(Ring {
            radius: 100.0,
            stroke_weight: 1.5,
        });
        definition.inner_shapes.push(InnerShape::Polygon {
            sides: 4,
            radius: 50.0,
            rotation: 0.0,
            stroke_weight: 1.5,
        });
        definition.radial_lines.push(LineSegment {
            x1: 120.0,
            y1: 100.0,
            x2: 200.0,
            y2: 100.0,
            stroke_weight: 1.0,
        });
        definition
    }

    #[test]
    fn line_style_applies_to_lines_only() {
        let visual = VisualParams::default().with_line_style(LineStrokeStyle::Dotted);
        let frame = build_render_frame(&definition_with_lines(), &visual, Viewport::new(240, 200))
            .expect("frame");

        for command in frame.commands() {
            match command {
                DrawCommand::Line(line) => assert_eq!(line.stroke.dash, LineStrokeStyle::Dotted),
                DrawCommand::Circle(circle) => {
                    assert_eq!(circle.stroke.dash, LineStrokeStyle::Solid);
                }
                DrawCommand::Path(path) => assert_eq!(path.stroke.dash, LineStrokeStyle::Solid),
                DrawCommand::Text(_) => {}
            }
        }
    }

    #[test]
    fn glow_uses_each_element_color() {
        let visual = VisualParams::default().with_glow(true, 6.0);
        let frame = build_render_frame(&definition_with_lines(), &visual, Viewport::new(240, 200))
            .expect("frame");
        let rings = frame.layer(CircleLayerKind::Rings).expect("rings layer");
        let DrawCommand::Circle(ring) = &rings.commands[0] else {
            panic!("expected circle");
        };
        let glow = ring.stroke.glow.expect("glow");
        assert_eq!(glow.color, visual.primary_color);
        assert_eq!(glow.blur_px, 6.0);
    }

    #[test]
    fn zero_viewport_is_rejected() {
        let err = build_render_frame(
            &definition_with_lines(),
            &VisualParams::default(),
            Viewport::new(0, 10),
        )
        .expect_err("zero width");
        assert!(matches!(err, CircleError::InvalidViewport { .. }));
    }
}
