//! Simulation step
//!
//! Advances the scene by one externally timed frame: flippers, ball
//! integration, then bouncers, flippers and border in that order. The border
//! runs last so it has the final say on where the ball ends up.

use super::collision::{ball_border_collision, ball_bouncer_collision, ball_flipper_collision};
use super::state::{ContactEvent, LEFT_FLIPPER, RIGHT_FLIPPER, Scene};

/// Input for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepInput {
    pub left_pressed: bool,
    pub right_pressed: bool,
}

impl StepInput {
    pub fn new(left_pressed: bool, right_pressed: bool) -> Self {
        Self {
            left_pressed,
            right_pressed,
        }
    }

    /// Pressed flag for the flipper at `index` in `Scene::flippers`
    #[inline]
    pub fn pressed(&self, index: usize) -> bool {
        debug_assert!(index <= RIGHT_FLIPPER, "no flipper at index {}", index);
        match index {
            LEFT_FLIPPER => self.left_pressed,
            _ => self.right_pressed,
        }
    }
}

/// Outcome of one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepResult {
    /// Time actually integrated after clamping
    pub dt: f32,
    /// Contacts in resolution order
    pub events: Vec<ContactEvent>,
}

impl StepResult {
    pub fn bouncer_hits(&self) -> impl Iterator<Item = usize> + '_ {
        self.events.iter().filter_map(|e| match e {
            ContactEvent::BouncerHit(i) => Some(*i),
            _ => None,
        })
    }
}

/// Clamp a frame delta into [0, max_dt]; non-finite deltas become 0
#[inline]
fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if dt.is_finite() { dt.clamp(0.0, max_dt) } else { 0.0 }
}

/// Advance the scene by one step
pub fn step(scene: &mut Scene, input: &StepInput, dt: f32) -> StepResult {
    let dt = clamp_dt(dt, scene.max_dt);
    let mut events = Vec::new();

    for (i, flipper) in scene.flippers.iter_mut().enumerate() {
        flipper.update(input.pressed(i), dt);
    }

    scene.ball.integrate(scene.gravity, dt);

    for (i, bouncer) in scene.bouncers.iter().enumerate() {
        if ball_bouncer_collision(&mut scene.ball, bouncer).hit {
            log::debug!("Bouncer {} hit at {:?}", i, scene.ball.position);
            events.push(ContactEvent::BouncerHit(i));
        }
    }

    for (i, flipper) in scene.flippers.iter().enumerate() {
        if ball_flipper_collision(&mut scene.ball, flipper).hit {
            log::debug!(
                "Flipper {} hit, angular velocity {:.2}",
                i,
                flipper.angular_velocity
            );
            events.push(ContactEvent::FlipperHit(i));
        }
    }

    let border = ball_border_collision(&mut scene.ball, &scene.border);
    if border.hit {
        log::debug!("Border hit, penetration {:.4}", border.penetration);
        events.push(ContactEvent::BorderHit);
    }

    scene.step_count += 1;
    scene.elapsed += f64::from(dt);
    log::trace!(
        "Step {}: pos={:?} vel={:?}",
        scene.step_count,
        scene.ball.position,
        scene.ball.velocity
    );

    StepResult { dt, events }
}
