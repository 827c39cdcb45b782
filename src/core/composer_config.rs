use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::MAX_SHAPE_VERTICES;
use crate::error::{CircleError, CircleResult};

/// Half-open `[min, max)` sampling band for continuous parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Uniform sample; a collapsed band always yields `min`.
    pub fn sample<G: Rng + ?Sized>(self, rng: &mut G) -> f64 {
        if self.max > self.min {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        }
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && (value < self.max || (self.min == self.max && value == self.min))
    }

    fn validate(self, field: &str) -> CircleResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(CircleError::InvalidData(format!(
                "{field} must be a finite band with min <= max"
            )));
        }
        Ok(())
    }
}

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn clamp(self, value: u32) -> u32 {
        value.clamp(self.min, self.max)
    }

    pub fn sample<G: Rng + ?Sized>(self, rng: &mut G) -> u32 {
        rng.gen_range(self.min..=self.max)
    }

    fn validate(self, field: &str) -> CircleResult<()> {
        if self.min > self.max {
            return Err(CircleError::InvalidData(format!(
                "{field} must satisfy min <= max"
            )));
        }
        Ok(())
    }
}

/// Every constant the composer uses.
///
/// Serializable so hosts can persist/load tuning without inventing their own
/// format. Missing fields fall back to the reference values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposerConfig {
    #[serde(default = "default_ring_count_range")]
    pub ring_count_range: CountRange,
    #[serde(default = "default_symbol_count_max")]
    pub symbol_count_max: u32,
    #[serde(default = "default_max_shape_vertices")]
    pub max_shape_vertices: u32,
    #[serde(default = "default_margin_px")]
    pub margin_px: f64,
    #[serde(default = "default_ring_spacing_factor")]
    pub ring_spacing_factor: f64,
    #[serde(default = "default_base_stroke_weight")]
    pub base_stroke_weight: f64,
    #[serde(default = "default_stroke_weight_decay")]
    pub stroke_weight_decay: f64,
    #[serde(default = "default_min_ring_stroke_weight")]
    pub min_ring_stroke_weight: f64,
    #[serde(default = "default_min_available_radius_px")]
    pub min_available_radius_px: f64,
    #[serde(default = "default_min_shape_radius_px")]
    pub min_shape_radius_px: f64,
    /// Available radius used for the inner shape when no rings exist, as a
    /// fraction of the max radius.
    #[serde(default = "default_ringless_available_ratio")]
    pub ringless_available_ratio: f64,
    #[serde(default = "default_polygon_radius_band")]
    pub polygon_radius_band: Band,
    #[serde(default = "default_star_outer_radius_band")]
    pub star_outer_radius_band: Band,
    #[serde(default = "default_star_inner_ratio_band")]
    pub star_inner_ratio_band: Band,
    #[serde(default = "default_random_polygon_sides")]
    pub random_polygon_sides: CountRange,
    #[serde(default = "default_random_star_points")]
    pub random_star_points: CountRange,
    #[serde(default = "default_shape_stroke_weight")]
    pub shape_stroke_weight: f64,
    #[serde(default = "default_nested_star_radius_ratio")]
    pub nested_star_radius_ratio: f64,
    #[serde(default = "default_nested_rotation_offset")]
    pub nested_rotation_offset: f64,
    #[serde(default = "default_nested_stroke_weight")]
    pub nested_stroke_weight: f64,
    #[serde(default = "default_vertex_symbol_probability")]
    pub vertex_symbol_probability: f64,
    #[serde(default = "default_symbol_size_band_px")]
    pub symbol_size_band_px: Band,
    #[serde(default = "default_symbol_ring_radius_band")]
    pub symbol_ring_radius_band: Band,
    #[serde(default = "default_connecting_line_probability")]
    pub connecting_line_probability: f64,
    #[serde(default = "default_connecting_line_weight")]
    pub connecting_line_weight: f64,
    #[serde(default = "default_radial_inner_radius_ratio")]
    pub radial_inner_radius_ratio: f64,
    #[serde(default = "default_radial_line_weight")]
    pub radial_line_weight: f64,
    #[serde(default = "default_fallback_spoke_counts")]
    pub fallback_spoke_counts: Vec<u32>,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            ring_count_range: default_ring_count_range(),
            symbol_count_max: default_symbol_count_max(),
            max_shape_vertices: default_max_shape_vertices(),
            margin_px: default_margin_px(),
            ring_spacing_factor: default_ring_spacing_factor(),
            base_stroke_weight: default_base_stroke_weight(),
            stroke_weight_decay: default_stroke_weight_decay(),
            min_ring_stroke_weight: default_min_ring_stroke_weight(),
            min_available_radius_px: default_min_available_radius_px(),
            min_shape_radius_px: default_min_shape_radius_px(),
            ringless_available_ratio: default_ringless_available_ratio(),
            polygon_radius_band: default_polygon_radius_band(),
            star_outer_radius_band: default_star_outer_radius_band(),
            star_inner_ratio_band: default_star_inner_ratio_band(),
            random_polygon_sides: default_random_polygon_sides(),
            random_star_points: default_random_star_points(),
            shape_stroke_weight: default_shape_stroke_weight(),
            nested_star_radius_ratio: default_nested_star_radius_ratio(),
            nested_rotation_offset: default_nested_rotation_offset(),
            nested_stroke_weight: default_nested_stroke_weight(),
            vertex_symbol_probability: default_vertex_symbol_probability(),
            symbol_size_band_px: default_symbol_size_band_px(),
            symbol_ring_radius_band: default_symbol_ring_radius_band(),
            connecting_line_probability: default_connecting_line_probability(),
            connecting_line_weight: default_connecting_line_weight(),
            radial_inner_radius_ratio: default_radial_inner_radius_ratio(),
            radial_line_weight: default_radial_line_weight(),
            fallback_spoke_counts: default_fallback_spoke_counts(),
        }
    }
}

impl ComposerConfig {
    /// Sets the accepted ring-count slider range.
    #[must_use]
    pub fn with_ring_count_range(mut self, min: u32, max: u32) -> Self {
        self.ring_count_range = CountRange::new(min, max);
        self
    }

    /// Sets the probability of placing symbols on the primary shape vertices.
    #[must_use]
    pub fn with_vertex_symbol_probability(mut self, probability: f64) -> Self {
        self.vertex_symbol_probability = probability;
        self
    }

    /// Sets the probability of anchoring lines from shape vertices to the outer ring.
    #[must_use]
    pub fn with_connecting_line_probability(mut self, probability: f64) -> Self {
        self.connecting_line_probability = probability;
        self
    }

    #[must_use]
    pub fn with_margin_px(mut self, margin_px: f64) -> Self {
        self.margin_px = margin_px;
        self
    }

    pub fn validate(&self) -> CircleResult<()> {
        self.ring_count_range.validate("ring count range")?;
        self.random_polygon_sides.validate("random polygon sides")?;
        self.random_star_points.validate("random star points")?;
        if self.random_polygon_sides.min < 3 {
            return Err(CircleError::InvalidData(
                "random polygon sides must start at 3 or more".to_owned(),
            ));
        }
        if self.random_star_points.min < 2 {
            return Err(CircleError::InvalidData(
                "random star points must start at 2 or more".to_owned(),
            ));
        }
        if !(3..=MAX_SHAPE_VERTICES).contains(&self.max_shape_vertices) {
            return Err(CircleError::InvalidData(format!(
                "max shape vertices must be in [3, {MAX_SHAPE_VERTICES}]"
            )));
        }

        for (field, value) in [
            ("vertex symbol probability", self.vertex_symbol_probability),
            ("connecting line probability", self.connecting_line_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CircleError::InvalidData(format!(
                    "{field} must be in [0, 1]"
                )));
            }
        }

        for (field, value) in [
            ("ring spacing factor", self.ring_spacing_factor),
            ("base stroke weight", self.base_stroke_weight),
            ("min ring stroke weight", self.min_ring_stroke_weight),
            ("shape stroke weight", self.shape_stroke_weight),
            ("nested stroke weight", self.nested_stroke_weight),
            ("connecting line weight", self.connecting_line_weight),
            ("radial line weight", self.radial_line_weight),
            ("ringless available ratio", self.ringless_available_ratio),
            ("nested star radius ratio", self.nested_star_radius_ratio),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CircleError::InvalidData(format!(
                    "{field} must be finite and > 0"
                )));
            }
        }

        for (field, value) in [
            ("margin", self.margin_px),
            ("stroke weight decay", self.stroke_weight_decay),
            ("min available radius", self.min_available_radius_px),
            ("min shape radius", self.min_shape_radius_px),
            ("nested rotation offset", self.nested_rotation_offset.abs()),
            ("radial inner radius ratio", self.radial_inner_radius_ratio),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CircleError::InvalidData(format!(
                    "{field} must be finite and >= 0"
                )));
            }
        }
        if self.radial_inner_radius_ratio >= 1.0 {
            return Err(CircleError::InvalidData(
                "radial inner radius ratio must be < 1".to_owned(),
            ));
        }

        self.polygon_radius_band.validate("polygon radius band")?;
        self.star_outer_radius_band.validate("star outer radius band")?;
        self.star_inner_ratio_band.validate("star inner ratio band")?;
        self.symbol_size_band_px.validate("symbol size band")?;
        self.symbol_ring_radius_band.validate("symbol ring radius band")?;
        if self.symbol_size_band_px.min <= 0.0 {
            return Err(CircleError::InvalidData(
                "symbol size band must be > 0".to_owned(),
            ));
        }
        if self.star_inner_ratio_band.min < 0.0 {
            return Err(CircleError::InvalidData(
                "star inner ratio band must be >= 0".to_owned(),
            ));
        }

        if self.fallback_spoke_counts.is_empty() || self.fallback_spoke_counts.contains(&0) {
            return Err(CircleError::InvalidData(
                "fallback spoke counts must be non-empty and > 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> CircleResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CircleError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> CircleResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| CircleError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_ring_count_range() -> CountRange {
    CountRange::new(0, 10)
}

fn default_symbol_count_max() -> u32 {
    64
}

fn default_max_shape_vertices() -> u32 {
    36
}

fn default_margin_px() -> f64 {
    15.0
}

fn default_ring_spacing_factor() -> f64 {
    0.15
}

fn default_base_stroke_weight() -> f64 {
    1.5
}

fn default_stroke_weight_decay() -> f64 {
    0.2
}

fn default_min_ring_stroke_weight() -> f64 {
    1.0
}

fn default_min_available_radius_px() -> f64 {
    10.0
}

fn default_min_shape_radius_px() -> f64 {
    5.0
}

fn default_ringless_available_ratio() -> f64 {
    0.5
}

fn default_polygon_radius_band() -> Band {
    Band::new(0.4, 0.8)
}

fn default_star_outer_radius_band() -> Band {
    Band::new(0.5, 0.9)
}

fn default_star_inner_ratio_band() -> Band {
    Band::new(0.4, 0.6)
}

fn default_random_polygon_sides() -> CountRange {
    CountRange::new(3, 6)
}

fn default_random_star_points() -> CountRange {
    CountRange::new(4, 7)
}

fn default_shape_stroke_weight() -> f64 {
    1.5
}

fn default_nested_star_radius_ratio() -> f64 {
    0.5
}

fn default_nested_rotation_offset() -> f64 {
    PI / 12.0
}

fn default_nested_stroke_weight() -> f64 {
    1.0
}

fn default_vertex_symbol_probability() -> f64 {
    0.7
}

fn default_symbol_size_band_px() -> Band {
    Band::new(18.0, 26.0)
}

fn default_symbol_ring_radius_band() -> Band {
    Band::new(0.6, 0.85)
}

fn default_connecting_line_probability() -> f64 {
    0.6
}

fn default_connecting_line_weight() -> f64 {
    0.75
}

fn default_radial_inner_radius_ratio() -> f64 {
    0.2
}

fn default_radial_line_weight() -> f64 {
    1.0
}

fn default_fallback_spoke_counts() -> Vec<u32> {
    vec![6, 9]
}

#[cfg(test)]
mod tests {
    use super::{Band, ComposerConfig};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn default_config_is_valid_and_round_trips() {
        let config = ComposerConfig::default();
        config.validate().expect("default config");
        let json = config.to_json_pretty().expect("serialize");
        let parsed = ComposerConfig::from_json_str(&json).expect("parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed = ComposerConfig::from_json_str(r#"{ "margin_px": 30.0 }"#).expect("parse");
        assert_eq!(parsed.margin_px, 30.0);
        assert_eq!(parsed.fallback_spoke_counts, vec![6, 9]);
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let config = ComposerConfig::default().with_vertex_symbol_probability(1.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn vertex_ceiling_above_hard_bound_is_rejected() {
        let parsed = ComposerConfig::from_json_str(r#"{ "max_shape_vertices": 4294967295 }"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn band_samples_stay_inside() {
        let mut rng = StdRng::seed_from_u64(9);
        let band = Band::new(0.4, 0.8);
        for _ in 0..256 {
            assert!(band.contains(band.sample(&mut rng)));
        }
        assert_eq!(Band::new(2.0, 2.0).sample(&mut rng), 2.0);
    }
}
