//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in [`GameState`], owned by the
//! caller and passed by `&mut` into [`super::tick`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::geometry::{Circle, Segment};
use super::registry::{BlockRegistry, TrampolineRegistry};
use super::shape::{ShapeDescriptor, ShapeKind};
use super::spawn::Countdown;
use crate::consts::*;
use crate::error::ConfigResult;
use crate::highscores::Ranking;
use crate::settings::Settings;
use crate::{heading_from_degrees, lane_x};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Scene is set up, waiting for start input
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended; waiting for restart input
    GameOver,
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    /// Direction of travel. Renormalized every frame before moving, but left
    /// as-is by the reflection step.
    pub heading: Vec2,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BALL_START_X, BALL_START_Y),
            heading: heading_from_degrees(45.0),
        }
    }
}

impl Ball {
    /// Collision circle at the current position
    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, BALL_RADIUS)
    }
}

/// Things that happened during a tick (for logging and presentation)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started,
    BlockHit { kind: ShapeKind, points: u64 },
    TrampolinePlaced,
    TrampolineRejected,
    TrampolineConsumed,
    WallBounce,
    BlocksSpawned { count: usize },
    GameOver { score: u64, rank: usize },
}

/// Left wall, top wall, right wall (tested in this order)
pub const WALLS: [Segment; 3] = [
    Segment::new(Vec2::new(ARENA_LEFT, ARENA_TOP), Vec2::new(ARENA_LEFT, ARENA_BOTTOM)),
    Segment::new(Vec2::new(ARENA_LEFT, ARENA_TOP), Vec2::new(ARENA_RIGHT, ARENA_TOP)),
    Segment::new(Vec2::new(ARENA_RIGHT, ARENA_TOP), Vec2::new(ARENA_RIGHT, ARENA_BOTTOM)),
];

/// Touching this ends the run
pub const DEAD_LINE: Segment = Segment::new(
    Vec2::new(ARENA_LEFT, DEAD_LINE_Y),
    Vec2::new(ARENA_RIGHT, DEAD_LINE_Y),
);

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub settings: Settings,
    pub phase: GamePhase,
    pub ball: Ball,
    pub score: u64,
    pub blocks: BlockRegistry,
    pub trampolines: TrampolineRegistry,
    /// Where the current trampoline drag started
    pub drag_origin: Option<Vec2>,
    pub spawn_timer: Countdown,
    /// Seconds left before walls reflect again
    pub wall_cooldown: f32,
    pub ranking: Ranking,
    /// Frames simulated while playing (across runs)
    pub frame: u64,
    /// Contact points found this frame (debug markers)
    pub contact_markers: Vec<Vec2>,
    /// Events raised this frame
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with default settings
    pub fn new(seed: u64) -> Self {
        Self::build(Settings::default(), seed)
    }

    /// Create a new game state, rejecting settings the simulation can't run with
    pub fn with_settings(settings: Settings, seed: u64) -> ConfigResult<Self> {
        settings.validate()?;
        Ok(Self::build(settings, seed))
    }

    fn build(settings: Settings, seed: u64) -> Self {
        let spawn_timer = Countdown::new(settings.spawn_period);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            settings,
            phase: GamePhase::Idle,
            ball: Ball::default(),
            score: 0,
            blocks: BlockRegistry::new(),
            trampolines: TrampolineRegistry::new(),
            drag_origin: None,
            spawn_timer,
            wall_cooldown: 0.0,
            ranking: Ranking::new(),
            frame: 0,
            contact_markers: Vec::new(),
            events: Vec::new(),
        };
        state.seed_initial_blocks();
        state
    }

    /// One rectangle per lane along the top edge
    fn seed_initial_blocks(&mut self) {
        self.blocks.clear();
        for lane in 0..BLOCK_LANES {
            self.blocks.push(ShapeDescriptor::new(
                ShapeKind::Rectangle,
                Vec2::new(lane_x(lane), 0.0),
            ));
        }
    }

    /// Put the board back to its starting layout. The ranking survives.
    pub fn reset(&mut self) {
        self.trampolines.clear();
        self.drag_origin = None;
        self.score = 0;
        self.seed_initial_blocks();
        self.ball = Ball::default();
        self.spawn_timer = Countdown::new(self.settings.spawn_period);
        self.wall_cooldown = 0.0;
        self.contact_markers.clear();
    }

    /// Full reset, then start playing
    pub fn restart(&mut self) {
        self.reset();
        self.phase = GamePhase::Playing;
        log::info!("Run restarted");
    }

    /// Record the score and stop the run
    pub fn end_run(&mut self) {
        let rank = self.ranking.record(self.score);
        self.phase = GamePhase::GameOver;
        self.drag_origin = None;
        self.events.push(GameEvent::GameOver {
            score: self.score,
            rank,
        });
        log::info!("Game over: score {} (rank {})", self.score, rank);
    }
}
