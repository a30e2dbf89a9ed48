//! Frame tick
//!
//! Advances the game by one rendered frame: trampoline placement, ball
//! movement, collision passes, block descent and spawning, walls, then the
//! dead-line check.

use glam::Vec2;

use super::collision::{collide_blocks, collide_trampolines, collide_walls, touches_dead_line};
use super::geometry::{Circle, Segment};
use super::spawn::{descend, spawn_wave};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::MIN_TRAMPOLINE_LENGTH;

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Start / restart pressed this frame
    pub start: bool,
    /// Trampoline drag began this frame
    pub drag_start: bool,
    /// Trampoline drag released this frame
    pub drag_end: bool,
    /// Cursor position (arena coordinates)
    pub cursor: Vec2,
}

/// Unit heading; a vanished heading falls back to +x
#[inline]
fn normalize_heading(heading: Vec2) -> Vec2 {
    heading.try_normalize().unwrap_or(Vec2::X)
}

/// Start or finish a trampoline drag. A trampoline that would touch the
/// ball on release is discarded.
fn handle_drag(state: &mut GameState, input: &TickInput, circle: &Circle) {
    if input.drag_start {
        state.drag_origin = Some(input.cursor);
    }
    if !input.drag_end {
        return;
    }
    let Some(origin) = state.drag_origin.take() else {
        return;
    };

    let segment = Segment::new(origin, input.cursor);
    if segment.length() < MIN_TRAMPOLINE_LENGTH || circle.intersects_segment(&segment) {
        state.events.push(GameEvent::TrampolineRejected);
        log::debug!("Trampoline rejected: {:?} -> {:?}", segment.a, segment.b);
    } else {
        state.trampolines.push(segment);
        state.events.push(GameEvent::TrampolinePlaced);
        log::debug!("Trampoline placed ({} total)", state.trampolines.len());
    }
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();
    state.contact_markers.clear();

    match state.phase {
        GamePhase::Idle => {
            if input.start {
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::Started);
                log::info!("Run started (seed {})", state.seed);
            }
            return;
        }
        GamePhase::GameOver => {
            if input.start {
                state.restart();
                state.events.push(GameEvent::Started);
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.frame += 1;

    // Hit tests this frame use the ball as it was before moving
    let circle = state.ball.circle();

    handle_drag(state, input, &circle);

    state.ball.heading = normalize_heading(state.ball.heading);
    state.ball.pos += state.ball.heading * dt * state.settings.ball_speed;

    collide_blocks(state, &circle, dt);
    collide_trampolines(state, &circle, dt);

    descend(&mut state.blocks, dt, state.settings.block_speed);

    state.spawn_timer.advance(dt);
    if state.spawn_timer.has_elapsed() {
        state.spawn_timer.restart();
        let count = spawn_wave(
            &mut state.blocks,
            &mut state.rng,
            &state.settings.spawn_kinds,
            state.settings.spawn_skip_probability,
        );
        state.events.push(GameEvent::BlocksSpawned { count });
        log::debug!("Spawned {} blocks ({} on board)", count, state.blocks.len());
    }

    collide_walls(state, &circle, dt);

    if touches_dead_line(state, &circle) {
        state.end_run();
    }
}
