//! Pinball simulation core
//!
//! All physics lives here. This module has no rendering or platform
//! dependencies:
//! - Caller-supplied timestep, clamped to a maximum
//! - One owned `Scene`, mutated only by `step`
//! - Fixed resolution order: bouncers, flippers, border

pub mod collision;
pub mod flipper;
pub mod geometry;
pub mod state;
pub mod step;

pub use collision::{
    CollisionResult, ball_border_collision, ball_bouncer_collision, ball_flipper_collision,
};
pub use flipper::{Flipper, FlipperSide};
pub use geometry::{LineSegment, closest_point_on_segment, reflect, signed_area};
pub use state::{
    Ball, Border, Bouncer, ContactEvent, LEFT_FLIPPER, RIGHT_FLIPPER, Scene, initialize_scene,
};
pub use step::{StepInput, StepResult, step};
