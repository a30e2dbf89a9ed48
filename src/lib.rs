//! Trampoline Breaker - a walled-arena bounce game
//!
//! Core modules:
//! - `sim`: Simulation (geometry, collisions, reflection, spawning, game state)
//! - `renderer`: Draw-call boundary and scene composition
//! - `platform`: Input boundary and headless implementations
//! - `pacing`: Frame-rate limiter
//! - `settings`: Tunable values loaded from JSON

pub mod error;
pub mod highscores;
pub mod pacing;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, ConfigResult};
pub use highscores::Ranking;
pub use pacing::FrameRateLimiter;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena walls (screen coordinates, y grows downward)
    pub const ARENA_LEFT: f32 = 300.0;
    pub const ARENA_RIGHT: f32 = 800.0;
    pub const ARENA_TOP: f32 = 0.0;
    pub const ARENA_BOTTOM: f32 = 800.0;
    /// Dead line sits a few pixels above the bottom edge
    pub const DEAD_LINE_Y: f32 = 795.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_SPEED: f32 = 200.0;
    pub const BALL_START_X: f32 = 400.0;
    pub const BALL_START_Y: f32 = 400.0;

    /// Reflection scale; tied to the ball radius
    pub const REFLECTION_SCALE: f32 = 20.0;

    /// Seconds the walls stay inert after a wall bounce
    pub const WALL_COOLDOWN: f32 = 0.02;

    /// Block defaults
    pub const BLOCK_DESCENT_SPEED: f32 = 25.0;
    pub const BLOCK_LANES: usize = 5;
    pub const LANE_SPACING: f32 = 100.0;
    pub const SPAWN_Y: f32 = -50.0;
    pub const SPAWN_PERIOD: f32 = 3.0;
    pub const SPAWN_SKIP_PROBABILITY: f64 = 0.5;

    /// Scoring: every block pays the base, triangles and ellipses add a bonus
    pub const BLOCK_BASE_SCORE: u64 = 10;
    pub const TRIANGLE_BONUS: u64 = 20;
    pub const ELLIPSE_BONUS: u64 = 10;

    /// Trampolines shorter than this are dropped on release
    pub const MIN_TRAMPOLINE_LENGTH: f32 = 1.0;

    /// Frame pacing
    pub const TARGET_FPS: i32 = 180;
}

/// X coordinate of a spawn lane's anchor
#[inline]
pub fn lane_x(lane: usize) -> f32 {
    consts::ARENA_LEFT + lane as f32 * consts::LANE_SPACING
}

/// Unit heading from an angle in degrees (screen coordinates)
#[inline]
pub fn heading_from_degrees(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}
