//! Headless walker: drives the avatar through a scripted timeline over the test arena.
//!
//! Usage:
//!   walker_client [preset | config.ron]
//! Presets: rigid-body, capsule (default), sphere, sphere-fixed-axis.
//! An argument ending in `.ron` is read as a full config file instead of a preset.

use std::f32::consts::FRAC_PI_4;

use anyhow::{Context, Result, bail};
use log::info;
use walker_client::{FixedClock, FrameClock, FrameDriver, FrameOutput, Renderer, level};
use walker_shared::{DegeneratePolicy, Intent, LocomotionConfig, Preset};

const FRAME_HZ: f32 = 60.0;
const RUN_SECONDS: f32 = 12.0;

/// Simulated time at which the level "finishes loading".
const LEVEL_ARRIVAL_S: f32 = 0.25;

#[derive(Clone, Copy, Debug)]
enum Cue {
    Down(&'static str),
    Up(&'static str),
    Orbit(f32),
    /// Focus loss: every held key is dropped.
    ReleaseAll,
}

/// (time in seconds, cue), sorted by time.
const TIMELINE: &[(f32, Cue)] = &[
    (2.0, Cue::Down("KeyW")),
    (3.5, Cue::Down("Space")),
    (3.6, Cue::Up("Space")),
    (4.5, Cue::Orbit(FRAC_PI_4)),
    (5.0, Cue::Down("KeyD")),
    (6.5, Cue::Up("KeyD")),
    (7.0, Cue::Up("KeyW")),
    (7.5, Cue::Down("KeyA")),
    (8.0, Cue::Down("Space")),
    (8.1, Cue::Up("Space")),
    (9.0, Cue::Up("KeyA")),
    (9.5, Cue::Down("ArrowUp")),
    (10.5, Cue::ReleaseAll),
];

/// Logs the avatar once per simulated second.
struct LogRenderer {
    frame: u64,
    every: u64,
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &FrameOutput) {
        self.frame += 1;
        if frame.respawned {
            info!("respawned at {:?}", frame.position);
        }
        if self.frame % self.every == 0 {
            let p = frame.position;
            let v = frame.velocity;
            info!(
                "t={:>5.2}s pos=({:.2}, {:.2}, {:.2}) vel=({:.2}, {:.2}, {:.2}) on_floor={}",
                self.frame as f32 / FRAME_HZ,
                p.x,
                p.y,
                p.z,
                v.x,
                v.y,
                v.z,
                frame.on_floor
            );
        }
    }
}

fn config_from_args(args: &[String]) -> Result<LocomotionConfig> {
    let arg = match args {
        [] => "capsule",
        [arg] => arg.as_str(),
        _ => bail!("expected one preset name or config.ron path, got {}", args.len()),
    };

    if arg.ends_with(".ron") {
        let text = std::fs::read_to_string(arg).with_context(|| format!("read config '{arg}'"))?;
        let config =
            LocomotionConfig::from_ron_str(&text).with_context(|| format!("load config '{arg}'"))?;
        info!("using config from {arg}");
        return Ok(config);
    }

    let preset: Preset = arg.parse().context("parse preset")?;
    info!("using preset {preset:?}");
    Ok(preset.config())
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = config_from_args(&args)?;
    let mut driver = FrameDriver::new(config);
    driver.bindings_mut().bind("ArrowUp", Intent::Forward);
    let mut clock = FixedClock::from_hz(FRAME_HZ);
    let mut renderer = LogRenderer {
        frame: 0,
        every: FRAME_HZ as u64,
    };

    let arena = level::arena();
    let mut level_loaded = false;
    let mut cues = TIMELINE.iter().peekable();
    let mut t = 0.0f32;

    while t < RUN_SECONDS {
        if !level_loaded && t >= LEVEL_ARRIVAL_S {
            driver
                .load_level_nodes(&arena, DegeneratePolicy::Reject)
                .context("build arena")?;
            level_loaded = true;
        }

        while let Some(&&(at, cue)) = cues.peek() {
            if at > t {
                break;
            }
            match cue {
                Cue::Down(code) => {
                    driver.key_down(code);
                }
                Cue::Up(code) => {
                    driver.key_up(code);
                }
                Cue::Orbit(yaw) => driver.camera_mut().orbit(yaw),
                Cue::ReleaseAll => driver.release_all(),
            }
            info!("t={t:.2}s {cue:?}");
            cues.next();
        }

        let elapsed = clock.delta();
        driver.frame(elapsed, &mut renderer);
        t += elapsed;
    }

    let body = driver.body();
    info!(
        "done after {} frames: pos={:?} on_floor={}",
        driver.frames(),
        body.position,
        driver.controller().is_on_floor()
    );
    Ok(())
}
