use magic_circle::api::VisualParams;
use magic_circle::core::{
    CIRCLE_DEFINITION_JSON_SCHEMA_V1, CircleDefinition, ComposerConfig, InnerShape, LineSegment,
    Ring, ShapeSelector, StructuralInputs, SymbolPlacement, SymbolTheme, Viewport, compose,
};
use magic_circle::render::{Color, LineStrokeStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn hand_built_definition() -> CircleDefinition {
    let mut definition = CircleDefinition::empty(SymbolTheme::Astrology);
    definition.rings = vec![
        Ring {
            radius: 200.0,
            stroke_weight: 1.5,
        },
        Ring {
            radius: 170.0,
            stroke_weight: 1.25,
        },
    ];
    definition.inner_shapes = vec![InnerShape::Star {
        points: 5,
        outer_radius: 120.0,
        inner_radius: 60.0,
        rotation: 0.5,
        stroke_weight: 1.5,
    }];
    definition.ring_symbols = vec![SymbolPlacement {
        glyph: "♃".to_owned(),
        x: 250.0,
        y: 100.0,
        size: 20.0,
    }];
    definition.radial_lines = vec![LineSegment {
        x1: 240.0,
        y1: 200.0,
        x2: 400.0,
        y2: 200.0,
        stroke_weight: 1.0,
    }];
    definition
}

#[test]
fn definition_contract_v1_carries_schema_version() {
    let json = hand_built_definition()
        .to_json_contract_v1_pretty()
        .expect("serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("json");

    assert_eq!(value["schema_version"], CIRCLE_DEFINITION_JSON_SCHEMA_V1);
    assert_eq!(value["definition"]["symbol_theme"], "astrology");
    assert_eq!(value["definition"]["inner_shapes"][0]["kind"], "star");

    let restored = CircleDefinition::from_json_compat_str(&json).expect("restore");
    assert_eq!(restored, hand_built_definition());
}

#[test]
fn bare_definition_json_is_accepted() {
    let bare = serde_json::to_string(&hand_built_definition()).expect("serialize");
    let restored = CircleDefinition::from_json_compat_str(&bare).expect("restore");
    assert_eq!(restored, hand_built_definition());
}

#[test]
fn unknown_schema_version_is_rejected() {
    let json = hand_built_definition()
        .to_json_contract_v1_pretty()
        .expect("serialize")
        .replacen("\"schema_version\": 1", "\"schema_version\": 9", 1);
    assert!(CircleDefinition::from_json_compat_str(&json).is_err());
}

#[test]
fn imported_definition_must_respect_exclusivity() {
    let mut definition = hand_built_definition();
    definition.connecting_lines = definition.radial_lines.clone();
    let json = definition.to_json_contract_v1_pretty().expect("serialize");
    assert!(CircleDefinition::from_json_compat_str(&json).is_err());
}

#[test]
fn imported_star_with_huge_point_count_is_rejected() {
    let mut definition = hand_built_definition();
    definition.inner_shapes = vec![InnerShape::Star {
        points: 2_147_483_648,
        outer_radius: 120.0,
        inner_radius: 60.0,
        rotation: 0.5,
        stroke_weight: 1.5,
    }];
    let json = definition.to_json_contract_v1_pretty().expect("serialize");
    let err = CircleDefinition::from_json_compat_str(&json).expect_err("must reject");
    assert!(err.to_string().contains("star points"), "{err}");
}

#[test]
fn composed_definition_survives_contract_roundtrip() {
    let inputs = StructuralInputs::new(5, ShapeSelector::Polygon(7), SymbolTheme::All, 10);
    let definition = compose(
        &inputs,
        Viewport::new(900, 700),
        &mut StdRng::seed_from_u64(21),
    );
    let json = definition.to_json_contract_v1_pretty().expect("serialize");
    let restored = CircleDefinition::from_json_compat_str(&json).expect("restore");

    assert_eq!(restored.summary(), definition.summary());
    let glyphs = |d: &CircleDefinition| -> Vec<String> {
        d.vertex_symbols
            .iter()
            .chain(&d.ring_symbols)
            .map(|symbol| symbol.glyph.clone())
            .collect()
    };
    assert_eq!(glyphs(&restored), glyphs(&definition));
}

#[test]
fn visual_params_json_uses_color_strings() {
    let visual = VisualParams::default()
        .with_colors(Color::from_rgb8(0xff, 0xd7, 0x00), Color::from_rgb8(0, 0, 0))
        .with_line_style(LineStrokeStyle::Dashed);
    let json = visual.to_json_pretty().expect("serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("json");

    assert_eq!(value["primary_color"], "#ffd700");
    assert_eq!(value["secondary_color"], "#000000");
    assert_eq!(value["line_style"], "dashed");
    assert_eq!(VisualParams::from_json_str(&json).expect("restore"), visual);
}

#[test]
fn visual_params_defaults_fill_missing_fields() {
    let visual = VisualParams::from_json_str(r#"{ "glow_enabled": true }"#).expect("parse");
    assert!(visual.glow_enabled);
    assert_eq!(visual.primary_color, VisualParams::default().primary_color);
    assert_eq!(visual.line_style, LineStrokeStyle::Solid);
}

#[test]
fn composer_config_partial_json_keeps_reference_constants() {
    let config = ComposerConfig::from_json_str(r#"{ "margin_px": 30.0 }"#).expect("parse");
    assert_eq!(config.margin_px, 30.0);
    assert_eq!(config.ring_spacing_factor, 0.15);
    assert_eq!(config.fallback_spoke_counts, vec![6, 9]);
}

#[test]
fn structural_inputs_serialize_shape_tokens() {
    let inputs = StructuralInputs::new(3, ShapeSelector::Star(6), SymbolTheme::Runes, 4);
    let value = serde_json::to_value(inputs).expect("serialize");
    assert_eq!(value["shape"], "star_6");
    assert_eq!(value["theme"], "runes");
}
