//! Scene state and core simulation types
//!
//! Everything the step function mutates lives in `Scene`; there is no
//! ambient state anywhere else in the crate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::flipper::Flipper;
use super::geometry::{LineSegment, is_counter_clockwise, signed_area};
use crate::config::SceneConfig;
use crate::consts::*;
use crate::error::SceneError;

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    /// Fraction of speed kept on a border bounce, in [0, 1]
    pub restitution: f32,
}

impl Ball {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, restitution: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            restitution,
        }
    }

    /// Semi-implicit Euler: velocity first, then position
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        self.velocity.y += gravity * dt;
        self.position += self.velocity * dt;
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new(Vec2::ZERO, Vec2::ZERO, BALL_RADIUS, BALL_RESTITUTION)
    }
}

/// A static circular obstacle that repels the ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bouncer {
    pub position: Vec2,
    pub radius: f32,
    /// Outward speed imposed on the ball at contact
    pub push_strength: f32,
}

impl Bouncer {
    pub fn new(position: Vec2, radius: f32, push_strength: f32) -> Self {
        Self {
            position,
            radius,
            push_strength,
        }
    }
}

/// Closed polygon bounding the playfield
///
/// Vertices are stored counter-clockwise (y-up), so the 90° CCW
/// perpendicular of every edge points into the playfield.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Border {
    vertices: Vec<Vec2>,
}

impl Border {
    /// Build a border, reversing clockwise input so normals face inward
    pub fn new(mut vertices: Vec<Vec2>) -> Self {
        if vertices.len() >= 3 && !is_counter_clockwise(&vertices) {
            log::warn!(
                "Border of {} vertices is wound clockwise, reversing",
                vertices.len()
            );
            vertices.reverse();
        }
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether the border encloses anything (collision runs only if so)
    pub fn is_closed(&self) -> bool {
        self.vertices.len() >= 3
    }

    /// Edge `i` joins vertex `i` to vertex `(i + 1) mod N`; `None` when empty
    pub fn edge(&self, i: usize) -> Option<LineSegment> {
        let n = self.vertices.len();
        if n == 0 {
            return None;
        }
        Some(LineSegment::new(
            self.vertices[i % n],
            self.vertices[(i + 1) % n],
        ))
    }

    pub fn edges(&self) -> impl Iterator<Item = LineSegment> + '_ {
        (0..self.vertices.len()).filter_map(move |i| self.edge(i))
    }

    pub fn area(&self) -> f32 {
        signed_area(&self.vertices)
    }
}

/// Contact notifications for the scoring/audio/trail layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactEvent {
    /// Ball touched the bouncer at this index
    BouncerHit(usize),
    /// Ball touched the flipper at this index (0 = left, 1 = right)
    FlipperHit(usize),
    /// Ball was corrected against the border
    BorderHit,
}

/// Index of the left flipper in `Scene::flippers`
pub const LEFT_FLIPPER: usize = 0;
/// Index of the right flipper in `Scene::flippers`
pub const RIGHT_FLIPPER: usize = 1;

/// Complete simulation state (serializable for snapshots)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub ball: Ball,
    pub bouncers: Vec<Bouncer>,
    /// Left then right
    pub flippers: [Flipper; 2],
    pub border: Border,
    /// Vertical acceleration (negative pulls down)
    pub gravity: f32,
    /// Step size ceiling
    pub max_dt: f32,
    /// Steps advanced so far
    pub step_count: u64,
    /// Simulated seconds advanced so far
    pub elapsed: f64,
}

impl Scene {
    /// Build a scene from a validated configuration
    pub fn new(config: &SceneConfig) -> Result<Self, SceneError> {
        config.validate()?;

        let border = Border::new(config.border.clone());
        if !border.is_closed() {
            log::warn!(
                "Border has {} vertices, border collision disabled",
                border.len()
            );
        }

        let scene = Self {
            ball: config.ball.build(),
            bouncers: config.bouncers.iter().map(|b| b.build()).collect(),
            flippers: [config.left_flipper.build(), config.right_flipper.build()],
            border,
            gravity: config.gravity,
            max_dt: config.max_dt,
            step_count: 0,
            elapsed: 0.0,
        };

        log::info!(
            "Scene initialized: {} bouncers, {} border vertices, gravity {}",
            scene.bouncers.len(),
            scene.border.len(),
            scene.gravity
        );

        Ok(scene)
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn bouncers(&self) -> &[Bouncer] {
        &self.bouncers
    }

    pub fn flippers(&self) -> &[Flipper; 2] {
        &self.flippers
    }

    pub fn left_flipper(&self) -> &Flipper {
        &self.flippers[LEFT_FLIPPER]
    }

    pub fn right_flipper(&self) -> &Flipper {
        &self.flippers[RIGHT_FLIPPER]
    }

    pub fn border(&self) -> &Border {
        &self.border
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

/// Build the scene described by `config`
pub fn initialize_scene(config: &SceneConfig) -> Result<Scene, SceneError> {
    Scene::new(config)
}
