//! Property tests for the physics core

use glam::Vec2;
use proptest::prelude::*;

use pinball_sim::config::{BallConfig, FlipperConfig, SceneConfig};
use pinball_sim::sim::{
    Ball, Border, LineSegment, Scene, StepInput, ball_border_collision, closest_point_on_segment,
    step,
};

const BOX_W: f32 = 1.0;
const BOX_H: f32 = 2.0;
const EPS: f32 = 1e-4;

fn box_vertices() -> Vec<Vec2> {
    vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(BOX_W, 0.0),
        Vec2::new(BOX_W, BOX_H),
        Vec2::new(0.0, BOX_H),
    ]
}

fn box_scene(position: Vec2, velocity: Vec2, clockwise: bool) -> Scene {
    let mut border = box_vertices();
    if clockwise {
        border.reverse();
    }
    let config = SceneConfig {
        ball: BallConfig {
            position,
            velocity,
            radius: 0.05,
            restitution: 0.8,
        },
        left_flipper: FlipperConfig::left(Vec2::new(0.3, 0.3)),
        right_flipper: FlipperConfig::right(Vec2::new(0.7, 0.3)),
        border,
        ..SceneConfig::default()
    };
    Scene::new(&config).unwrap()
}

fn inputs() -> impl Strategy<Value = Vec<(f32, bool, bool)>> {
    prop::collection::vec((0.0f32..0.03, any::<bool>(), any::<bool>()), 1..200)
}

proptest! {
    #[test]
    fn ball_stays_inside_box(
        x in 0.1f32..0.9,
        y in 0.5f32..1.8,
        vx in -3.0f32..3.0,
        vy in -3.0f32..3.0,
        clockwise in any::<bool>(),
        steps in inputs(),
    ) {
        let mut scene = box_scene(Vec2::new(x, y), Vec2::new(vx, vy), clockwise);
        for (dt, left, right) in steps {
            step(&mut scene, &StepInput::new(left, right), dt);
            let p = scene.ball().position;
            prop_assert!(p.is_finite());
            prop_assert!(p.x >= -EPS && p.x <= BOX_W + EPS, "x escaped: {:?}", p);
            prop_assert!(p.y >= -EPS && p.y <= BOX_H + EPS, "y escaped: {:?}", p);
        }
    }

    #[test]
    fn flipper_rotation_stays_in_range(
        steps in prop::collection::vec((-1.0f32..1.0, any::<bool>(), any::<bool>()), 1..300),
    ) {
        let mut scene = Scene::new(&SceneConfig::default()).unwrap();
        for (dt, left, right) in steps {
            step(&mut scene, &StepInput::new(left, right), dt);
            for flipper in scene.flippers() {
                prop_assert!(flipper.rotation >= 0.0);
                prop_assert!(flipper.rotation <= flipper.active_range);
                prop_assert!(flipper.angular_velocity.is_finite());
            }
        }
    }

    #[test]
    fn gravity_only_matches_closed_form(n in 1usize..200, dt in 0.001f32..0.016) {
        let config = SceneConfig {
            ball: BallConfig {
                position: Vec2::ZERO,
                velocity: Vec2::ZERO,
                radius: 0.03,
                restitution: 0.8,
            },
            bouncers: Vec::new(),
            left_flipper: FlipperConfig::left(Vec2::new(-50.0, -50.0)),
            right_flipper: FlipperConfig::right(Vec2::new(50.0, -50.0)),
            border: vec![
                Vec2::new(-100.0, -100.0),
                Vec2::new(100.0, -100.0),
                Vec2::new(100.0, 100.0),
                Vec2::new(-100.0, 100.0),
            ],
            gravity: -3.0,
            ..SceneConfig::default()
        };
        let mut scene = Scene::new(&config).unwrap();
        for _ in 0..n {
            let result = step(&mut scene, &StepInput::default(), dt);
            prop_assert!(result.events.is_empty());
        }

        let g = scene.gravity();
        let steps = n as f32;
        let expected_vy = g * steps * dt;
        let expected_y = g * dt * dt * steps * (steps + 1.0) / 2.0;
        let ball = scene.ball();
        prop_assert!((ball.velocity.y - expected_vy).abs() <= 1e-4 * (1.0 + expected_vy.abs()));
        prop_assert!((ball.position.y - expected_y).abs() <= 1e-4 * (1.0 + expected_y.abs()));
        prop_assert_eq!(ball.velocity.x, 0.0);
        prop_assert_eq!(ball.position.x, 0.0);
    }

    #[test]
    fn border_straight_on_rebound_keeps_restitution(speed in 0.1f32..5.0, depth in 0.0f32..0.04) {
        let border = Border::new(box_vertices());
        let mut ball = Ball::new(Vec2::new(0.5, 0.05 - depth), Vec2::new(0.0, -speed), 0.05, 0.8);
        let result = ball_border_collision(&mut ball, &border);
        prop_assert!(result.hit);
        prop_assert!((ball.velocity.y - 0.8 * speed).abs() < 1e-4 * (1.0 + speed));
        prop_assert!(ball.velocity.x.abs() < 1e-6);
    }

    #[test]
    fn closest_point_on_degenerate_segment_is_that_point(
        px in -10.0f32..10.0, py in -10.0f32..10.0,
        sx in -10.0f32..10.0, sy in -10.0f32..10.0,
    ) {
        let s = Vec2::new(sx, sy);
        let c = closest_point_on_segment(Vec2::new(px, py), &LineSegment::new(s, s));
        prop_assert_eq!(c, s);
    }

    #[test]
    fn closest_point_is_no_farther_than_endpoints(
        px in -10.0f32..10.0, py in -10.0f32..10.0,
        ax in -10.0f32..10.0, ay in -10.0f32..10.0,
        bx in -10.0f32..10.0, by in -10.0f32..10.0,
    ) {
        let p = Vec2::new(px, py);
        let seg = LineSegment::new(Vec2::new(ax, ay), Vec2::new(bx, by));
        let c = closest_point_on_segment(p, &seg);
        prop_assert!(c.is_finite());
        let d = p.distance(c);
        prop_assert!(d <= p.distance(seg.a) + 1e-3);
        prop_assert!(d <= p.distance(seg.b) + 1e-3);
    }
}
