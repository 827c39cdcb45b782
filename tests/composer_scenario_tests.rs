use magic_circle::core::{
    Composer, ComposerConfig, InnerShape, ShapeSelector, StructuralInputs, SymbolTheme, Viewport,
    compose,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

const VIEWPORT: Viewport = Viewport {
    width: 600,
    height: 600,
};

fn max_radius() -> f64 {
    300.0 - 15.0
}

#[test]
fn polygon_five_places_either_vertex_or_ring_symbols() {
    let inputs = StructuralInputs::new(3, ShapeSelector::Polygon(5), SymbolTheme::Geometric, 6);

    for seed in 0..64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let definition = compose(&inputs, VIEWPORT, &mut rng);

        assert_eq!(definition.rings.len(), 3);
        assert!(
            definition
                .rings
                .windows(2)
                .all(|pair| pair[0].radius > pair[1].radius)
        );

        let polygons: Vec<&InnerShape> = definition
            .inner_shapes
            .iter()
            .filter(|shape| matches!(shape, InnerShape::Polygon { .. }))
            .collect();
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].vertex_count(), 5);

        let vertex = definition.vertex_symbols.len();
        let ring = definition.ring_symbols.len();
        assert!(
            (vertex == 5 && ring == 0) || (vertex == 0 && ring == 6),
            "seed {seed}: vertex={vertex} ring={ring}"
        );
        definition.validate().expect("valid definition");
    }
}

#[test]
fn no_shape_uses_ring_symbols_and_fallback_spokes() {
    let inputs = StructuralInputs::new(2, ShapeSelector::None, SymbolTheme::Runes, 8);

    for seed in 0..32 {
        let mut rng = StdRng::seed_from_u64(seed);
        let definition = compose(&inputs, VIEWPORT, &mut rng);

        assert!(definition.inner_shapes.is_empty());
        assert!(definition.vertex_symbols.is_empty());
        assert_eq!(definition.ring_symbols.len(), 8);
        assert!(definition.connecting_lines.is_empty());
        assert!(matches!(definition.radial_lines.len(), 6 | 9));
        assert!(
            definition
                .ring_symbols
                .iter()
                .all(|symbol| SymbolTheme::Runes.contains(&symbol.glyph))
        );
    }
}

#[test]
fn ringless_circle_has_no_lines_but_still_gets_a_shape() {
    let inputs = StructuralInputs::new(0, ShapeSelector::Random, SymbolTheme::Alchemy, 4);
    let fallback_available = max_radius() * 0.5;
    let mut shapes_seen = 0;

    for seed in 0..32 {
        let mut rng = StdRng::seed_from_u64(seed);
        let definition = compose(&inputs, VIEWPORT, &mut rng);

        assert!(definition.rings.is_empty());
        assert!(definition.connecting_lines.is_empty());
        assert!(definition.radial_lines.is_empty());
        if let Some(shape) = definition.primary_shape() {
            shapes_seen += 1;
            assert!(shape.outer_radius() <= fallback_available * 0.9);
        }
    }
    assert_eq!(shapes_seen, 32);
}

#[test]
fn radial_spokes_follow_shape_vertices_when_lines_are_suppressed() {
    let config = ComposerConfig::default().with_connecting_line_probability(0.0);
    let composer = Composer::new(config).expect("composer");
    let inputs = StructuralInputs::new(2, ShapeSelector::Star(6), SymbolTheme::Astrology, 0);
    let mut rng = StdRng::seed_from_u64(5);

    let definition = composer.compose(&inputs, VIEWPORT, &mut rng);

    assert!(definition.connecting_lines.is_empty());
    assert_eq!(definition.radial_lines.len(), 6);
    let spoke = definition.radial_lines[0];
    let inner = (spoke.x1 - 300.0).hypot(spoke.y1 - 300.0);
    let outer = (spoke.x2 - 300.0).hypot(spoke.y2 - 300.0);
    approx::assert_relative_eq!(inner, max_radius() * 0.2, epsilon = 1e-9);
    approx::assert_relative_eq!(outer, max_radius(), epsilon = 1e-9);
}

#[test]
fn connecting_lines_end_on_outermost_ring() {
    let config = ComposerConfig::default().with_connecting_line_probability(1.0);
    let composer = Composer::new(config).expect("composer");
    let inputs = StructuralInputs::new(4, ShapeSelector::Polygon(4), SymbolTheme::Geometric, 3);
    let mut rng = StdRng::seed_from_u64(9);

    let definition = composer.compose(&inputs, VIEWPORT, &mut rng);

    assert_eq!(definition.connecting_lines.len(), 4);
    assert!(definition.radial_lines.is_empty());
    let outer = definition.outermost_ring().expect("ring").radius;
    for line in &definition.connecting_lines {
        let reach = (line.x2 - 300.0).hypot(line.y2 - 300.0);
        approx::assert_relative_eq!(reach, outer, epsilon = 1e-9);
    }
}

#[test]
fn tiny_viewport_degrades_to_empty_layout() {
    let inputs = StructuralInputs::new(5, ShapeSelector::Random, SymbolTheme::All, 6);
    let mut rng = StdRng::seed_from_u64(1);

    let definition = compose(&inputs, Viewport::new(20, 20), &mut rng);

    assert!(definition.rings.is_empty());
    assert!(definition.inner_shapes.is_empty());
    assert!(definition.vertex_symbols.is_empty());
    assert!(definition.ring_symbols.is_empty());
    definition.validate().expect("empty definition is valid");
}

#[test]
fn tiny_viewport_with_many_rings_stays_valid() {
    let inputs = StructuralInputs::new(9, ShapeSelector::None, SymbolTheme::Geometric, 0);

    for size in [1, 10, 20, 29] {
        let definition = compose(
            &inputs,
            Viewport::new(size, size),
            &mut StdRng::seed_from_u64(u64::from(size)),
        );
        assert!(definition.rings.is_empty(), "{size}px canvas produced rings");
        definition.validate().expect("valid definition");
    }
}

#[test]
fn same_seed_reproduces_same_definition() {
    let inputs = StructuralInputs::default();
    let first = compose(&inputs, VIEWPORT, &mut StdRng::seed_from_u64(77));
    let second = compose(&inputs, VIEWPORT, &mut StdRng::seed_from_u64(77));
    assert_eq!(first, second);
}
