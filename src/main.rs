//! Pinball Sim headless runner
//!
//! Loads a table (JSON or the built-in default), drives it with a seeded
//! autoplay player at a jittery frame rate and logs what happened.
//!
//! Usage: pinball-sim [CONFIG.json] [--seconds N] [--seed N] [--dump]

use std::process::ExitCode;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use pinball_sim::consts::MAX_DT;
use pinball_sim::sim::{ContactEvent, Scene, StepInput, step};
use pinball_sim::{SceneConfig, initialize_scene};

/// Points for a bouncer hit are this divided by the bouncer radius
const SCORE_SCALE: f32 = 10.0;
/// Height below which the autoplay player starts flipping
const FLIP_ZONE: f32 = 0.45;

#[derive(Debug)]
struct Args {
    config: Option<String>,
    seconds: f32,
    seed: u64,
    dump: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config: None,
        seconds: 30.0,
        seed: 1,
        dump: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seconds" => {
                let value = iter.next().ok_or("--seconds needs a value")?;
                args.seconds = value
                    .parse()
                    .map_err(|_| format!("invalid --seconds value: {}", value))?;
            }
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                args.seed = value
                    .parse()
                    .map_err(|_| format!("invalid --seed value: {}", value))?;
            }
            "--dump" => args.dump = true,
            other if other.starts_with("--") => return Err(format!("unknown flag: {}", other)),
            path => args.config = Some(path.to_string()),
        }
    }
    Ok(args)
}

/// Seeded player: flips the arm on the ball's side when it drops into range
struct Autoplay {
    rng: Pcg32,
}

impl Autoplay {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn input(&mut self, scene: &Scene) -> StepInput {
        let ball = scene.ball();
        let falling = ball.velocity.y < 0.0;
        let low = ball.position.y < FLIP_ZONE;
        let mid_x = (scene.left_flipper().pivot.x + scene.right_flipper().pivot.x) * 0.5;

        // Occasionally hesitate so runs differ between seeds
        if !(falling && low) || self.rng.random_bool(0.1) {
            return StepInput::default();
        }

        if ball.position.x < mid_x {
            StepInput::new(true, false)
        } else {
            StepInput::new(false, true)
        }
    }

    /// Frame time with display jitter, occasionally stalling
    fn frame_dt(&mut self) -> f32 {
        if self.rng.random_bool(0.01) {
            return 0.1;
        }
        MAX_DT * self.rng.random_range(0.5_f32..1.5)
    }
}

#[derive(Debug, Default)]
struct Tally {
    score: u64,
    bouncer_hits: u32,
    flipper_hits: u32,
    border_hits: u32,
    max_speed: f32,
}

impl Tally {
    fn record(&mut self, scene: &Scene, events: &[ContactEvent]) {
        for event in events {
            match *event {
                ContactEvent::BouncerHit(i) => {
                    self.bouncer_hits += 1;
                    let radius = scene.bouncers()[i].radius;
                    self.score += (SCORE_SCALE / radius).round() as u64;
                }
                ContactEvent::FlipperHit(_) => self.flipper_hits += 1,
                ContactEvent::BorderHit => self.border_hits += 1,
            }
        }
        self.max_speed = self.max_speed.max(scene.ball().speed());
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    let mut scene = initialize_scene(&config)?;
    let mut player = Autoplay::new(args.seed);
    let mut tally = Tally::default();

    log::info!(
        "Running {:.1}s of simulation with seed {}",
        args.seconds,
        args.seed
    );

    let mut wall_clock = 0.0_f32;
    while wall_clock < args.seconds {
        let frame_dt = player.frame_dt();
        wall_clock += frame_dt;

        let input = player.input(&scene);
        let result = step(&mut scene, &input, frame_dt);
        tally.record(&scene, &result.events);
    }

    log::info!(
        "Done: {} steps, {:.2}s simulated, score {}",
        scene.step_count(),
        scene.elapsed(),
        tally.score
    );
    log::info!(
        "Contacts: {} bouncer, {} flipper, {} border; max speed {:.2}",
        tally.bouncer_hits,
        tally.flipper_hits,
        tally.border_hits,
        tally.max_speed
    );

    if args.dump {
        println!("{}", serde_json::to_string_pretty(&scene)?);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("usage: pinball-sim [CONFIG.json] [--seconds N] [--seed N] [--dump]");
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
