use std::f64::consts::PI;

use smallvec::SmallVec;

use crate::core::definition::ensure_positive;
use crate::core::geometry::{AngleList, evenly_spaced_angles, polar_point};
use crate::core::{InnerShape, Point};
use crate::error::{CircleError, CircleResult};

pub type VertexList = SmallVec<[Point; 12]>;

/// Upper bound on polygon sides and star points accepted anywhere.
pub const MAX_SHAPE_VERTICES: u32 = 64;

impl InnerShape {
    /// Polygon sides, or star tips.
    #[must_use]
    pub fn vertex_count(&self) -> u32 {
        match *self {
            Self::Polygon { sides, .. } => sides,
            Self::Star { points, .. } => points,
        }
    }

    /// Radius of the anchoring vertices (polygon corners, star tips).
    #[must_use]
    pub fn outer_radius(&self) -> f64 {
        match *self {
            Self::Polygon { radius, .. } => radius,
            Self::Star { outer_radius, .. } => outer_radius,
        }
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        match *self {
            Self::Polygon { rotation, .. } | Self::Star { rotation, .. } => rotation,
        }
    }

    #[must_use]
    pub fn stroke_weight(&self) -> f64 {
        match *self {
            Self::Polygon { stroke_weight, .. } | Self::Star { stroke_weight, .. } => stroke_weight,
        }
    }

    /// Angles of the anchoring vertices.
    ///
    /// Polygon vertex `i` sits at `rotation + i * 2π / sides`; star tip `i` at
    /// `rotation + 2i * π / points`, which is the same spacing.
    #[must_use]
    pub fn vertex_angles(&self) -> AngleList {
        match *self {
            Self::Polygon {
                sides, rotation, ..
            } => evenly_spaced_angles(rotation, sides as usize),
            Self::Star {
                points, rotation, ..
            } => (0..points)
                .map(|i| rotation + 2.0 * f64::from(i) * (PI / f64::from(points)))
                .collect(),
        }
    }

    #[must_use]
    pub fn outer_vertices(&self, center: Point) -> VertexList {
        let radius = self.outer_radius();
        self.vertex_angles()
            .into_iter()
            .map(|angle| polar_point(center, radius, angle))
            .collect()
    }

    /// Closed outline: polygon corners, or star tips alternating with valleys.
    #[must_use]
    pub fn outline(&self, center: Point) -> Vec<Point> {
        match *self {
            Self::Polygon { .. } => self.outer_vertices(center).into_vec(),
            Self::Star {
                points,
                outer_radius,
                inner_radius,
                rotation,
                ..
            } => {
                let step = PI / f64::from(points);
                (0..points)
                    .map(|i| rotation + 2.0 * f64::from(i) * step)
                    .flat_map(|tip| {
                        [
                            polar_point(center, outer_radius, tip),
                            polar_point(center, inner_radius, tip + step),
                        ]
                    })
                    .collect()
            }
        }
    }

    #[must_use]
    pub(crate) fn scaled(&self, factor: f64) -> Self {
        match *self {
            Self::Polygon {
                sides,
                radius,
                rotation,
                stroke_weight,
            } => Self::Polygon {
                sides,
                radius: radius * factor,
                rotation,
                stroke_weight: stroke_weight * factor,
            },
            Self::Star {
                points,
                outer_radius,
                inner_radius,
                rotation,
                stroke_weight,
            } => Self::Star {
                points,
                outer_radius: outer_radius * factor,
                inner_radius: inner_radius * factor,
                rotation,
                stroke_weight: stroke_weight * factor,
            },
        }
    }

    pub fn validate(&self) -> CircleResult<()> {
        match *self {
            Self::Polygon {
                sides,
                radius,
                rotation,
                stroke_weight,
            } => {
                if !(3..=MAX_SHAPE_VERTICES).contains(&sides) {
                    return Err(CircleError::InvalidData(format!(
                        "polygon sides must be in [3, {MAX_SHAPE_VERTICES}], got {sides}"
                    )));
                }
                ensure_positive(radius, "polygon radius")?;
                ensure_finite(rotation, "polygon rotation")?;
                ensure_positive(stroke_weight, "polygon stroke weight")
            }
            Self::Star {
                points,
                outer_radius,
                inner_radius,
                rotation,
                stroke_weight,
            } => {
                if !(2..=MAX_SHAPE_VERTICES).contains(&points) {
                    return Err(CircleError::InvalidData(format!(
                        "star points must be in [2, {MAX_SHAPE_VERTICES}], got {points}"
                    )));
                }
                ensure_positive(outer_radius, "star outer radius")?;
                if !inner_radius.is_finite() || inner_radius < 0.0 {
                    return Err(CircleError::InvalidData(
                        "star inner radius must be finite and >= 0".to_owned(),
                    ));
                }
                ensure_finite(rotation, "star rotation")?;
                ensure_positive(stroke_weight, "star stroke weight")
            }
        }
    }
}

fn ensure_finite(value: f64, field: &str) -> CircleResult<()> {
    if !value.is_finite() {
        return Err(CircleError::InvalidData(format!("{field} must be finite")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn star_outline_alternates_outer_and_inner_radius() {
        let star = InnerShape::Star {
            points: 5,
            outer_radius: 100.0,
            inner_radius: 40.0,
            rotation: 0.3,
            stroke_weight: 1.5,
        };
        let center = Point::new(0.0, 0.0);
        let outline = star.outline(center);
        assert_eq!(outline.len(), 10);
        for (i, point) in outline.iter().enumerate() {
            let expected = if i % 2 == 0 { 100.0 } else { 40.0 };
            assert_abs_diff_eq!(point.distance_to(center), expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn star_tips_match_even_outline_points() {
        let star = InnerShape::Star {
            points: 6,
            outer_radius: 80.0,
            inner_radius: 30.0,
            rotation: 1.1,
            stroke_weight: 1.0,
        };
        let center = Point::new(50.0, 50.0);
        let tips = star.outer_vertices(center);
        let outline = star.outline(center);
        for (i, tip) in tips.iter().enumerate() {
            assert_abs_diff_eq!(tip.x, outline[2 * i].x, epsilon = 1e-9);
            assert_abs_diff_eq!(tip.y, outline[2 * i].y, epsilon = 1e-9);
        }
    }

    #[test]
    fn polygon_first_vertex_follows_rotation() {
        let polygon = InnerShape::Polygon {
            sides: 4,
            radius: 10.0,
            rotation: 0.0,
            stroke_weight: 1.0,
        };
        let vertices = polygon.outer_vertices(Point::new(0.0, 0.0));
        assert_eq!(vertices.len(), 4);
        assert_abs_diff_eq!(vertices[0].x, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(vertices[1].y, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_shapes_fail_validation() {
        let polygon = InnerShape::Polygon {
            sides: 2,
            radius: 10.0,
            rotation: 0.0,
            stroke_weight: 1.0,
        };
        assert!(polygon.validate().is_err());
        let star = InnerShape::Star {
            points: 4,
            outer_radius: 10.0,
            inner_radius: -1.0,
            rotation: 0.0,
            stroke_weight: 1.0,
        };
        assert!(star.validate().is_err());
    }

    #[test]
    fn oversized_vertex_counts_fail_validation() {
        let star = InnerShape::Star {
            points: 1 << 31,
            outer_radius: 10.0,
            inner_radius: 4.0,
            rotation: 0.0,
            stroke_weight: 1.0,
        };
        assert!(star.validate().is_err());
        let polygon = InnerShape::Polygon {
            sides: MAX_SHAPE_VERTICES + 1,
            radius: 10.0,
            rotation: 0.0,
            stroke_weight: 1.0,
        };
        assert!(polygon.validate().is_err());
        let largest = InnerShape::Star {
            points: MAX_SHAPE_VERTICES,
            outer_radius: 10.0,
            inner_radius: 4.0,
            rotation: 0.0,
            stroke_weight: 1.0,
        };
        largest.validate().expect("bound is inclusive");
        assert_eq!(largest.outline(Point::new(0.0, 0.0)).len(), 128);
    }
}
