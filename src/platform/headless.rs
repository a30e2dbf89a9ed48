//! Headless input and output
//!
//! [`AutoPilot`] plays the game by itself: it presses start whenever a run
//! is not in progress and drags a trampoline under the ball as it falls.
//! [`LogCanvas`] swallows draw calls and reports per-frame counts at trace
//! level.

use glam::Vec2;

use super::InputSource;
use crate::consts::{ARENA_LEFT, ARENA_RIGHT, BALL_RADIUS};
use crate::renderer::{Canvas, Color};
use crate::sim::{GamePhase, GameState, Segment, Shape, TickInput};

/// Height the autopilot places its trampolines at
const CATCH_Y: f32 = 720.0;
/// Ball height below which the autopilot reacts
const REACT_Y: f32 = 560.0;
const HALF_WIDTH: f32 = 60.0;

#[derive(Debug, Default)]
pub struct AutoPilot {
    /// Release point of a drag started last frame
    pending_release: Option<Vec2>,
}

impl AutoPilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where the ball will cross `CATCH_Y`, kept inside the arena
    fn landing_x(state: &GameState) -> f32 {
        let ball = &state.ball;
        let x = if ball.heading.y > f32::EPSILON {
            ball.pos.x + ball.heading.x / ball.heading.y * (CATCH_Y - ball.pos.y)
        } else {
            ball.pos.x
        };
        x.clamp(ARENA_LEFT + HALF_WIDTH, ARENA_RIGHT - HALF_WIDTH)
    }
}

impl InputSource for AutoPilot {
    fn poll(&mut self, state: &GameState) -> TickInput {
        if state.phase != GamePhase::Playing {
            self.pending_release = None;
            return TickInput {
                start: true,
                ..Default::default()
            };
        }

        if let Some(release) = self.pending_release.take() {
            return TickInput {
                drag_end: true,
                cursor: release,
                ..Default::default()
            };
        }

        let ball = &state.ball;
        let falling = ball.heading.y > 0.0 && ball.pos.y > REACT_Y;
        let clear_below = ball.pos.y + BALL_RADIUS < CATCH_Y - 4.0;
        if falling && clear_below && state.trampolines.is_empty() {
            let x = Self::landing_x(state);
            self.pending_release = Some(Vec2::new(x + HALF_WIDTH, CATCH_Y));
            return TickInput {
                drag_start: true,
                cursor: Vec2::new(x - HALF_WIDTH, CATCH_Y),
                ..Default::default()
            };
        }

        TickInput::default()
    }
}

/// Canvas that only counts what would have been drawn
#[derive(Debug, Default)]
pub struct LogCanvas {
    pub frames: u64,
    pub shapes: usize,
    pub circles: usize,
    pub segments: usize,
    pub texts: usize,
}

impl LogCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls in the current frame
    pub fn calls(&self) -> usize {
        self.shapes + self.circles + self.segments + self.texts
    }
}

impl Canvas for LogCanvas {
    fn clear(&mut self, _color: Color) {
        if self.frames > 0 {
            log::trace!(
                "frame {}: {} shapes, {} circles, {} segments, {} texts",
                self.frames,
                self.shapes,
                self.circles,
                self.segments,
                self.texts
            );
        }
        self.frames += 1;
        self.shapes = 0;
        self.circles = 0;
        self.segments = 0;
        self.texts = 0;
    }

    fn draw_shape(&mut self, _shape: &Shape, _color: Color) {
        self.shapes += 1;
    }

    fn draw_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {
        self.circles += 1;
    }

    fn draw_segment(&mut self, _segment: &Segment, _width: f32, _color: Color) {
        self.segments += 1;
    }

    fn draw_text(&mut self, _pos: Vec2, text: &str, _size: f32, _color: Color) {
        log::trace!("text: {}", text);
        self.texts += 1;
    }
}
