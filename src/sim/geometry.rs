//! Segment and polygon geometry
//!
//! The closest-point query here is shared by flipper and border collision,
//! so its clamping and degenerate handling matter for the whole collision layer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A line segment from `a` to `b`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub a: Vec2,
    pub b: Vec2,
}

impl LineSegment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    /// Vector from `a` to `b`
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.b - self.a
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.direction().length()
    }

    /// Closest point on this segment to `point`
    #[inline]
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        closest_point_on_segment(point, self)
    }
}

/// Find the point on `segment` nearest to `point`
///
/// Projects onto the line through a→b and clamps the parameter to [0, 1].
/// A zero-length segment returns `a`.
pub fn closest_point_on_segment(point: Vec2, segment: &LineSegment) -> Vec2 {
    let ab = segment.direction();
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return segment.a;
    }

    let t = ((point - segment.a).dot(ab) / len_sq).clamp(0.0, 1.0);
    segment.a + ab * t
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Signed area of a closed polygon (shoelace formula)
///
/// Positive for counter-clockwise vertex order in a y-up frame.
pub fn signed_area(vertices: &[Vec2]) -> f32 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f32 = (0..n)
        .map(|i| {
            let p = vertices[i];
            let q = vertices[(i + 1) % n];
            p.x * q.y - q.x * p.y
        })
        .sum();
    twice * 0.5
}

/// Whether the polygon winds counter-clockwise
#[inline]
pub fn is_counter_clockwise(vertices: &[Vec2]) -> bool {
    signed_area(vertices) > 0.0
}
