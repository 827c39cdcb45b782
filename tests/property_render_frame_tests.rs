use magic_circle::api::{VisualParams, build_render_frame, render};
use magic_circle::core::{ShapeSelector, StructuralInputs, SymbolTheme, Viewport, compose};
use magic_circle::render::{
    CircleLayerKind, Color, DrawCommand, LineStrokeStyle, RecordingSurface, SurfaceCall,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn line_style_strategy() -> impl Strategy<Value = LineStrokeStyle> {
    prop_oneof![
        Just(LineStrokeStyle::Solid),
        Just(LineStrokeStyle::Dashed),
        Just(LineStrokeStyle::Dotted),
    ]
}

proptest! {
    #[test]
    fn render_is_pure_and_repeatable(
        ring_count in 0u32..=8,
        sides in 3u32..=9,
        symbol_count in 0u32..=16,
        seed in any::<u64>(),
        glow in any::<bool>(),
        line_style in line_style_strategy(),
        hue in 0.0f64..360.0,
    ) {
        let viewport = Viewport::new(640, 480);
        let inputs = StructuralInputs::new(ring_count, ShapeSelector::Polygon(sides), SymbolTheme::All, symbol_count);
        let definition = compose(&inputs, viewport, &mut StdRng::seed_from_u64(seed));
        let snapshot = definition.clone();
        let visual = VisualParams::default()
            .with_colors(Color::from_hsl(hue, 0.7, 0.6), Color::from_hsl(hue + 180.0, 0.5, 0.5))
            .with_glow(glow, 10.0)
            .with_line_style(line_style);

        let mut first = RecordingSurface::default();
        let mut second = RecordingSurface::default();
        let first_stats = render(&definition, &visual, &mut first, viewport).expect("first render");
        let second_stats = render(&definition, &visual, &mut second, viewport).expect("second render");

        prop_assert_eq!(first.calls(), second.calls());
        prop_assert_eq!(first_stats, second_stats);
        prop_assert_eq!(&definition, &snapshot);
        prop_assert!(first.context_state().is_neutral());
        let starts_with_clear = matches!(first.calls().first(), Some(SurfaceCall::Clear { .. }));
        prop_assert!(starts_with_clear);
        prop_assert_eq!(first_stats.total() + 1, first.calls().len());
    }

    #[test]
    fn frame_layers_follow_draw_order_and_color_roles(
        ring_count in 1u32..=6,
        seed in any::<u64>(),
        line_style in line_style_strategy(),
    ) {
        let viewport = Viewport::new(700, 700);
        let inputs = StructuralInputs::new(ring_count, ShapeSelector::Random, SymbolTheme::Geometric, 6);
        let definition = compose(&inputs, viewport, &mut StdRng::seed_from_u64(seed));
        let visual = VisualParams::default().with_line_style(line_style);

        let frame = build_render_frame(&definition, &visual, viewport).expect("frame");
        let kinds: Vec<CircleLayerKind> = frame.layers.iter().map(|layer| layer.kind).collect();
        prop_assert_eq!(kinds, CircleLayerKind::CANONICAL_ORDER.to_vec());

        for command in frame.commands() {
            match command {
                DrawCommand::Circle(circle) => {
                    prop_assert_eq!(circle.stroke.color, visual.primary_color);
                    prop_assert_eq!(circle.stroke.dash, LineStrokeStyle::Solid);
                }
                DrawCommand::Path(path) => {
                    prop_assert_eq!(path.stroke.color, visual.secondary_color);
                    prop_assert_eq!(path.stroke.dash, LineStrokeStyle::Solid);
                }
                DrawCommand::Line(line) => {
                    prop_assert_eq!(line.stroke.color, visual.secondary_color);
                    prop_assert_eq!(line.stroke.dash, line_style);
                }
                DrawCommand::Text(text) => prop_assert_eq!(text.color, visual.primary_color),
            }
        }
    }
}
