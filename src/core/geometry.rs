//! Polar helpers shared by the composer and the frame builder.

use std::f64::consts::TAU;

use smallvec::SmallVec;

use crate::core::{Point, Viewport};

/// Angle buffer sized for the common vertex/spoke counts without allocating.
pub type AngleList = SmallVec<[f64; 12]>;

#[must_use]
pub fn center_of(viewport: Viewport) -> Point {
    Point::new(
        f64::from(viewport.width) / 2.0,
        f64::from(viewport.height) / 2.0,
    )
}

/// Largest usable radius: half the shorter side minus `margin`.
///
/// May be zero or negative for tiny canvases; callers skip stages instead of
/// clamping.
#[must_use]
pub fn max_radius(viewport: Viewport, margin: f64) -> f64 {
    f64::from(viewport.width.min(viewport.height)) / 2.0 - margin
}

#[must_use]
pub fn polar_point(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// `count` angles starting at `start`, spaced `TAU / count` apart.
#[must_use]
pub fn evenly_spaced_angles(start: f64, count: usize) -> AngleList {
    if count == 0 {
        return AngleList::new();
    }
    let step = TAU / count as f64;
    (0..count).map(|i| start + step * i as f64).collect()
}
