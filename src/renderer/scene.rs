//! Scene composition: turns a [`GameState`] into canvas draw calls

use glam::Vec2;

use super::{Canvas, LINE_WIDTH, MARKER_RADIUS, palette};
use crate::consts::{ARENA_LEFT, BALL_RADIUS};
use crate::sim::{DEAD_LINE, GamePhase, GameState, Rect, Segment, Shape, ShapeKind, WALLS};

const TEXT_SIZE: f32 = 20.0;
const LINE_HEIGHT: f32 = 24.0;

fn block_color(kind: ShapeKind) -> super::Color {
    match kind {
        ShapeKind::Rectangle => palette::RECT_BLOCK,
        ShapeKind::Triangle => palette::TRIANGLE_BLOCK,
        ShapeKind::Ellipse => palette::ELLIPSE_BLOCK,
    }
}

/// Score and ranking in the side panel
fn draw_panel<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C) {
    let panel = Rect::new(Vec2::ZERO, Vec2::new(ARENA_LEFT, 1000.0));
    canvas.draw_shape(&Shape::Rect(panel), palette::PANEL);

    let mut y = 10.0;
    canvas.draw_text(Vec2::new(10.0, y), &format!("score: {}", state.score), TEXT_SIZE, palette::TEXT);
    y += LINE_HEIGHT * 1.5;
    for line in state.ranking.lines() {
        canvas.draw_text(Vec2::new(10.0, y), &line, TEXT_SIZE, palette::TEXT);
        y += LINE_HEIGHT;
    }
}

fn draw_prompt<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C) {
    let at = Vec2::new(ARENA_LEFT + 150.0, 450.0);
    match state.phase {
        GamePhase::Idle => canvas.draw_text(at, "press space to start", TEXT_SIZE, palette::TEXT),
        GamePhase::GameOver => {
            canvas.draw_text(at, "game over", TEXT_SIZE * 2.0, palette::DEAD_LINE);
            canvas.draw_text(
                at + Vec2::new(0.0, LINE_HEIGHT * 2.0),
                "press space to restart",
                TEXT_SIZE,
                palette::TEXT,
            );
        }
        GamePhase::Playing => {}
    }
}

/// Draw one complete frame. `cursor` is used for the trampoline drag preview.
pub fn draw_frame<C: Canvas + ?Sized>(state: &GameState, cursor: Vec2, canvas: &mut C) {
    canvas.clear(palette::BACKGROUND);

    for block in &state.blocks {
        canvas.draw_shape(&block.shape(), block_color(block.kind));
    }
    canvas.draw_circle(state.ball.pos, BALL_RADIUS, palette::BALL);

    for trampoline in &state.trampolines {
        canvas.draw_segment(trampoline, LINE_WIDTH, palette::TRAMPOLINE);
    }
    if let Some(origin) = state.drag_origin {
        canvas.draw_segment(&Segment::new(origin, cursor), 1.0, palette::DRAG_PREVIEW);
    }

    for wall in &WALLS {
        canvas.draw_segment(wall, LINE_WIDTH, palette::WALL);
    }
    canvas.draw_segment(&DEAD_LINE, LINE_WIDTH, palette::DEAD_LINE);

    for &marker in &state.contact_markers {
        canvas.draw_circle(marker, MARKER_RADIUS, palette::CONTACT_MARKER);
    }

    draw_panel(state, canvas);
    draw_prompt(state, canvas);
}
