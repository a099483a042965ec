//! Pinball Sim - physics core for a 2D pinball table
//!
//! Core modules:
//! - `sim`: Ball integration, flipper kinematics, collision response
//! - `config`: Data-driven table layout (JSON)
//! - `error`: Scene construction and config loading errors

pub mod config;
pub mod error;
pub mod sim;

pub use config::SceneConfig;
pub use error::{ConfigError, SceneError};
pub use sim::{ContactEvent, Scene, StepInput, StepResult, initialize_scene, step};

use glam::Vec2;

/// Simulation constants
pub mod consts {
    /// Largest step the orchestrator will integrate (stall protection)
    pub const MAX_DT: f32 = 1.0 / 60.0;
    /// Default gravity (units/s², applied to velocity.y)
    pub const GRAVITY: f32 = -3.0;

    /// Default ball restitution against the border
    pub const BALL_RESTITUTION: f32 = 0.8;
    pub const BALL_RADIUS: f32 = 0.03;

    /// Flipper defaults (shared by both arms, mirrored by side)
    pub const FLIPPER_RADIUS: f32 = 0.03;
    pub const FLIPPER_LENGTH: f32 = 0.2;
    pub const FLIPPER_REST_ANGLE: f32 = 0.5;
    pub const FLIPPER_ACTIVE_RANGE: f32 = 1.0;
    pub const FLIPPER_ANGULAR_RATE: f32 = 10.0;

    /// Outward speed a bouncer imposes on contact
    pub const BOUNCER_PUSH: f32 = 2.0;
}

/// Rotate a vector 90° counter-clockwise: (x, y) -> (-y, x)
#[inline]
pub fn perpendicular(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Unit vector at the given angle (radians, CCW from +x)
#[inline]
pub fn from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}
