//! Collision detection and response
//!
//! Three independent routines, one per obstacle kind. Each resolves at most
//! one contact: push the ball out of penetration, then correct its velocity.
//! Zero distances are guarded rather than normalized.

use glam::Vec2;

use super::flipper::Flipper;
use super::geometry::{closest_point_on_segment, reflect};
use super::state::{Ball, Border, Bouncer};
use crate::perpendicular;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit direction the ball was pushed along
    pub normal: Vec2,
    /// Penetration depth that was corrected
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }

    fn hit(normal: Vec2, penetration: f32) -> Self {
        Self {
            hit: true,
            normal,
            penetration,
        }
    }
}

/// Replace the ball's velocity component along `dir` with `target`
#[inline]
fn set_velocity_along(ball: &mut Ball, dir: Vec2, target: f32) {
    let current = ball.velocity.dot(dir);
    ball.velocity += dir * (target - current);
}

/// Ball against a bouncer
///
/// On contact the ball leaves with exactly `push_strength` along the
/// bouncer-to-ball direction, whatever it came in with.
pub fn ball_bouncer_collision(ball: &mut Ball, bouncer: &Bouncer) -> CollisionResult {
    let dir = ball.position - bouncer.position;
    let dist = dir.length();
    let reach = ball.radius + bouncer.radius;

    // Touching exactly is not a contact
    if dist == 0.0 || dist >= reach {
        return CollisionResult::miss();
    }

    let dir = dir / dist;
    let penetration = reach - dist;
    ball.position += dir * penetration;
    set_velocity_along(ball, dir, bouncer.push_strength);

    CollisionResult::hit(dir, penetration)
}

/// Ball against a flipper arm
///
/// The arm is a capsule around pivot -> tip. Velocity along the contact
/// normal is replaced by the arm's surface velocity there, which is what
/// transfers the swing into the ball.
pub fn ball_flipper_collision(ball: &mut Ball, flipper: &Flipper) -> CollisionResult {
    let closest = closest_point_on_segment(ball.position, &flipper.segment());
    let dir = ball.position - closest;
    let dist = dir.length();
    let reach = ball.radius + flipper.radius;

    if dist == 0.0 || dist > reach {
        return CollisionResult::miss();
    }

    let dir = dir / dist;
    let penetration = reach - dist;
    ball.position += dir * penetration;

    let surface_vel = flipper.surface_velocity(closest + dir * flipper.radius);
    set_velocity_along(ball, dir, surface_vel.dot(dir));

    CollisionResult::hit(dir, penetration)
}

/// Ball against the border polygon
///
/// Only the nearest edge is resolved (first one wins ties). A ball found on
/// the outer side of that edge is pushed fully back inside.
pub fn ball_border_collision(ball: &mut Ball, border: &Border) -> CollisionResult {
    if !border.is_closed() {
        return CollisionResult::miss();
    }

    let mut nearest: Option<(f32, Vec2, Vec2)> = None; // (dist², closest, edge)
    for edge in border.edges() {
        let closest = closest_point_on_segment(ball.position, &edge);
        let dist_sq = ball.position.distance_squared(closest);
        if nearest.is_none_or(|(best, _, _)| dist_sq < best) {
            nearest = Some((dist_sq, closest, edge.direction()));
        }
    }
    let Some((_, closest, edge_dir)) = nearest else {
        return CollisionResult::miss();
    };

    let Some(normal) = perpendicular(edge_dir).try_normalize() else {
        // Repeated vertex: zero-length edge has no normal
        return CollisionResult::miss();
    };

    let mut dir = ball.position - closest;
    let mut dist = dir.length();
    if dist <= f32::EPSILON {
        dir = normal;
        dist = normal.length();
    } else {
        dir /= dist;
    }

    let penetration = if dir.dot(normal) >= 0.0 {
        if dist > ball.radius {
            return CollisionResult::miss();
        }
        let depth = ball.radius - dist;
        ball.position += dir * depth;
        depth
    } else {
        let depth = dist + ball.radius;
        ball.position -= dir * depth;
        depth
    };

    // Every border contact costs energy
    ball.velocity = reflect(ball.velocity, normal) * ball.restitution;

    CollisionResult::hit(normal, penetration)
}
