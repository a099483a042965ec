//! Table configuration
//!
//! A `SceneConfig` describes one table layout: ball start, bouncers, the two
//! flippers, the border polygon and the physics constants. It loads from
//! JSON so layouts can be tuned without rebuilding; missing fields fall back
//! to the built-in table.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, SceneError};
use crate::sim::flipper::{Flipper, FlipperSide};
use crate::sim::geometry::signed_area;
use crate::sim::state::{Ball, Bouncer};

/// Ball starting state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub restitution: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            position: Vec2::new(0.92, 0.5),
            velocity: Vec2::new(-0.2, 3.5),
            radius: BALL_RADIUS,
            restitution: BALL_RESTITUTION,
        }
    }
}

impl BallConfig {
    pub fn build(&self) -> Ball {
        Ball::new(self.position, self.velocity, self.radius, self.restitution)
    }
}

/// One bouncer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BouncerConfig {
    pub position: Vec2,
    pub radius: f32,
    #[serde(default = "default_push")]
    pub push_strength: f32,
}

fn default_push() -> f32 {
    BOUNCER_PUSH
}

impl BouncerConfig {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            radius,
            push_strength: BOUNCER_PUSH,
        }
    }

    pub fn build(&self) -> Bouncer {
        Bouncer::new(self.position, self.radius, self.push_strength)
    }
}

/// One flipper arm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlipperConfig {
    pub pivot: Vec2,
    pub side: FlipperSide,
    #[serde(default = "default_flipper_radius")]
    pub radius: f32,
    #[serde(default = "default_flipper_length")]
    pub length: f32,
    pub rest_angle: f32,
    #[serde(default = "default_active_range")]
    pub active_range: f32,
    #[serde(default = "default_angular_rate")]
    pub angular_rate: f32,
}

fn default_flipper_radius() -> f32 {
    FLIPPER_RADIUS
}

fn default_flipper_length() -> f32 {
    FLIPPER_LENGTH
}

fn default_active_range() -> f32 {
    FLIPPER_ACTIVE_RANGE
}

fn default_angular_rate() -> f32 {
    FLIPPER_ANGULAR_RATE
}

impl FlipperConfig {
    /// Left arm pointing down-right from its pivot
    pub fn left(pivot: Vec2) -> Self {
        Self {
            pivot,
            side: FlipperSide::Left,
            radius: FLIPPER_RADIUS,
            length: FLIPPER_LENGTH,
            rest_angle: -FLIPPER_REST_ANGLE,
            active_range: FLIPPER_ACTIVE_RANGE,
            angular_rate: FLIPPER_ANGULAR_RATE,
        }
    }

    /// Right arm, mirror image of `left`
    pub fn right(pivot: Vec2) -> Self {
        Self {
            side: FlipperSide::Right,
            rest_angle: std::f32::consts::PI + FLIPPER_REST_ANGLE,
            ..Self::left(pivot)
        }
    }

    pub fn build(&self) -> Flipper {
        Flipper::new(
            self.pivot,
            self.radius,
            self.length,
            self.rest_angle,
            self.active_range,
            self.side,
            self.angular_rate,
        )
    }
}

/// Complete table description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub ball: BallConfig,
    pub bouncers: Vec<BouncerConfig>,
    pub left_flipper: FlipperConfig,
    pub right_flipper: FlipperConfig,
    /// Border polygon; either winding is accepted
    pub border: Vec<Vec2>,
    pub gravity: f32,
    pub max_dt: f32,
}

impl Default for SceneConfig {
    /// The standard table: a 1 x 1.7 cavity with a funnel down to the flippers
    fn default() -> Self {
        let offset = 0.02;
        let height = 1.7;
        Self {
            ball: BallConfig::default(),
            bouncers: vec![
                BouncerConfig::new(Vec2::new(0.25, 0.6), 0.1),
                BouncerConfig::new(Vec2::new(0.75, 0.5), 0.12),
                BouncerConfig::new(Vec2::new(0.7, 1.0), 0.1),
                BouncerConfig::new(Vec2::new(0.2, 1.2), 0.1),
            ],
            left_flipper: FlipperConfig::left(Vec2::new(0.26, 0.22)),
            right_flipper: FlipperConfig::right(Vec2::new(0.74, 0.22)),
            border: vec![
                Vec2::new(0.74, 0.25),
                Vec2::new(1.0 - offset, 0.4),
                Vec2::new(1.0 - offset, height - offset),
                Vec2::new(offset, height - offset),
                Vec2::new(offset, 0.4),
                Vec2::new(0.26, 0.25),
                Vec2::new(0.26, 0.0),
                Vec2::new(0.74, 0.0),
            ],
            gravity: GRAVITY,
            max_dt: MAX_DT,
        }
    }
}

fn finite(what: &'static str, value: f32) -> Result<(), SceneError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SceneError::NonFinite { what })
    }
}

fn finite_vec(what: &'static str, value: Vec2) -> Result<(), SceneError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SceneError::NonFinite { what })
    }
}

fn positive(what: &'static str, value: f32) -> Result<(), SceneError> {
    finite(what, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(SceneError::NonPositive { what, value })
    }
}

impl FlipperConfig {
    fn validate(&self) -> Result<(), SceneError> {
        finite_vec("flipper.pivot", self.pivot)?;
        finite("flipper.rest_angle", self.rest_angle)?;
        positive("flipper.radius", self.radius)?;
        positive("flipper.length", self.length)?;
        positive("flipper.angular_rate", self.angular_rate)?;
        finite("flipper.active_range", self.active_range)?;
        if self.active_range < 0.0 {
            return Err(SceneError::OutOfRange {
                what: "flipper.active_range",
                value: self.active_range,
                range: "[0, inf)",
            });
        }
        Ok(())
    }
}

impl SceneConfig {
    /// Reject layouts the physics core cannot run
    ///
    /// A border with fewer than three vertices is allowed; the scene simply
    /// runs without border collision.
    pub fn validate(&self) -> Result<(), SceneError> {
        finite_vec("ball.position", self.ball.position)?;
        finite_vec("ball.velocity", self.ball.velocity)?;
        positive("ball.radius", self.ball.radius)?;
        finite("ball.restitution", self.ball.restitution)?;
        if !(0.0..=1.0).contains(&self.ball.restitution) {
            return Err(SceneError::OutOfRange {
                what: "ball.restitution",
                value: self.ball.restitution,
                range: "[0, 1]",
            });
        }

        for bouncer in &self.bouncers {
            finite_vec("bouncer.position", bouncer.position)?;
            positive("bouncer.radius", bouncer.radius)?;
            positive("bouncer.push_strength", bouncer.push_strength)?;
        }

        self.left_flipper.validate()?;
        self.right_flipper.validate()?;

        for &vertex in &self.border {
            finite_vec("border vertex", vertex)?;
        }
        if self.border.len() >= 3 {
            let area = signed_area(&self.border);
            if area.abs() <= f32::EPSILON {
                return Err(SceneError::DegenerateBorder { area });
            }
        }

        finite("gravity", self.gravity)?;
        positive("max_dt", self.max_dt)?;
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded scene config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(SceneConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_border_is_counter_clockwise() {
        assert!(signed_area(&SceneConfig::default().border) > 0.0);
    }

    #[test]
    fn test_json_round_trip() {
        let config = SceneConfig::default();
        let json = config.to_json().unwrap();
        let parsed = SceneConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "gravity": -9.8, "ball": { "radius": 0.05 } }"#;
        let config = SceneConfig::from_json_str(json).unwrap();
        assert_eq!(config.gravity, -9.8);
        assert_eq!(config.ball.radius, 0.05);
        assert_eq!(config.ball.restitution, BALL_RESTITUTION);
        assert_eq!(config.bouncers.len(), 4);
    }

    #[test]
    fn test_bouncer_push_defaults() {
        let json = r#"{ "bouncers": [ { "position": [0.5, 0.5], "radius": 0.1 } ] }"#;
        let config = SceneConfig::from_json_str(json).unwrap();
        assert_eq!(config.bouncers[0].push_strength, BOUNCER_PUSH);
    }

    #[test]
    fn test_rejects_negative_radius() {
        let mut config = SceneConfig::default();
        config.bouncers[1].radius = -0.1;
        assert!(matches!(
            config.validate(),
            Err(SceneError::NonPositive {
                what: "bouncer.radius",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_restitution_out_of_range() {
        let mut config = SceneConfig::default();
        config.ball.restitution = 1.5;
        assert!(matches!(
            config.validate(),
            Err(SceneError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_rejects_nan() {
        let mut config = SceneConfig::default();
        config.gravity = f32::NAN;
        assert_eq!(
            config.validate(),
            Err(SceneError::NonFinite { what: "gravity" })
        );
    }

    #[test]
    fn test_rejects_collinear_border() {
        let mut config = SceneConfig::default();
        config.border = vec![Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)];
        assert!(matches!(
            config.validate(),
            Err(SceneError::DegenerateBorder { .. })
        ));
    }

    #[test]
    fn test_accepts_open_border() {
        let mut config = SceneConfig::default();
        config.border = vec![Vec2::ZERO, Vec2::X];
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(matches!(
            SceneConfig::from_json_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            SceneConfig::load("/nonexistent/table.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
