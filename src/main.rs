//! Trampoline Breaker entry point
//!
//! Runs the game headlessly: the autopilot supplies input, frames go to a
//! counting canvas, and the final ranking is printed as JSON.
//!
//! Usage: `trampoline-breaker [--unpaced] [settings.json]`

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use trampoline_breaker::platform::{AutoPilot, InputSource, LogCanvas};
use trampoline_breaker::renderer::draw_frame;
use trampoline_breaker::sim::{GameEvent, GameState, tick};
use trampoline_breaker::{FrameRateLimiter, Settings};

struct Args {
    unpaced: bool,
    settings: Option<PathBuf>,
}

fn parse_args() -> Args {
    let mut args = Args {
        unpaced: false,
        settings: None,
    };
    for arg in std::env::args().skip(1) {
        if arg == "--unpaced" {
            args.unpaced = true;
        } else {
            args.settings = Some(PathBuf::from(arg));
        }
    }
    args
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Trampoline Breaker (headless) starting...");

    let args = parse_args();
    let settings = match &args.settings {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    let mut limiter = match FrameRateLimiter::new(settings.target_fps) {
        Ok(limiter) => limiter,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let dt = limiter.dt();
    let seed = settings.seed.unwrap_or_else(time_seed);
    let frames = settings.demo_frames;
    log::info!("Seed {}, {} frames at dt {:.5}s", seed, frames, dt);

    let mut state = match GameState::with_settings(settings, seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut pilot = AutoPilot::new();
    let mut canvas = LogCanvas::new();

    for _ in 0..frames {
        let input = pilot.poll(&state);
        tick(&mut state, &input, dt);
        for event in &state.events {
            if let GameEvent::BlockHit { kind, points } = event {
                log::trace!("{} +{}", kind.as_str(), points);
            }
        }
        draw_frame(&state, input.cursor, &mut canvas);
        if !args.unpaced {
            limiter.post_present();
        }
    }

    log::info!(
        "Finished after {} frames ({} simulated), score {}, {} draw calls last frame",
        canvas.frames,
        state.frame,
        state.score,
        canvas.calls()
    );

    match serde_json::to_string_pretty(&state.ranking) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize ranking: {}", e);
            ExitCode::FAILURE
        }
    }
}
