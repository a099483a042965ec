//! Flipper kinematics
//!
//! Each flipper swings between its rest angle (rotation 0) and its active
//! angle (rotation = active_range) at a fixed angular rate. The left and
//! right arms are mirror images, distinguished by `FlipperSide::sign`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::LineSegment;
use crate::from_angle;

/// Which side of the table a flipper sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipperSide {
    /// Swings counter-clockwise when pressed
    Left,
    /// Swings clockwise when pressed
    Right,
}

impl FlipperSide {
    /// Rotation direction: +1 for left, -1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            FlipperSide::Left => 1.0,
            FlipperSide::Right => -1.0,
        }
    }
}

/// A pivoting flipper arm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flipper {
    pub pivot: Vec2,
    /// Thickness of the arm (capsule radius)
    pub radius: f32,
    /// Pivot-to-tip distance
    pub length: f32,
    /// Angle of the arm at rotation 0 (radians)
    pub rest_angle: f32,
    /// Maximum rotation away from rest (radians, >= 0)
    pub active_range: f32,
    pub side: FlipperSide,
    /// Swing speed (radians/s)
    pub angular_rate: f32,
    /// Current rotation away from rest, within [0, active_range]
    pub rotation: f32,
    /// Signed angular velocity from the last update (radians/s)
    pub angular_velocity: f32,
}

impl Flipper {
    pub fn new(
        pivot: Vec2,
        radius: f32,
        length: f32,
        rest_angle: f32,
        active_range: f32,
        side: FlipperSide,
        angular_rate: f32,
    ) -> Self {
        Self {
            pivot,
            radius,
            length,
            rest_angle,
            active_range,
            side,
            angular_rate,
            rotation: 0.0,
            angular_velocity: 0.0,
        }
    }

    #[inline]
    pub fn sign(&self) -> f32 {
        self.side.sign()
    }

    /// Advance rotation toward the pressed/released target
    pub fn update(&mut self, pressed: bool, dt: f32) {
        let previous = self.rotation;
        let delta = self.angular_rate * dt;

        self.rotation = if pressed {
            (self.rotation + delta).min(self.active_range)
        } else {
            (self.rotation - delta).max(0.0)
        };

        self.angular_velocity = if dt > 0.0 {
            self.sign() * (self.rotation - previous) / dt
        } else {
            0.0
        };
    }

    /// Current world angle of the arm
    #[inline]
    pub fn angle(&self) -> f32 {
        self.rest_angle + self.sign() * self.rotation
    }

    /// Current tip position
    pub fn tip(&self) -> Vec2 {
        self.pivot + from_angle(self.angle()) * self.length
    }

    /// The arm's centerline as a segment (pivot -> tip)
    pub fn segment(&self) -> LineSegment {
        LineSegment::new(self.pivot, self.tip())
    }

    /// Velocity of a point rigidly attached to the arm
    pub fn surface_velocity(&self, point: Vec2) -> Vec2 {
        crate::perpendicular(point - self.pivot) * self.angular_velocity
    }

    /// Whether the flipper is fully raised
    pub fn is_raised(&self) -> bool {
        self.rotation >= self.active_range
    }
}
