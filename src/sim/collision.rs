//! Per-frame collision passes
//!
//! The ball is tested against a circle snapshot taken at the start of the
//! frame. Hits are handled in registry order and each reflection updates
//! the ball immediately, so a second hit in the same frame bounces off the
//! heading produced by the first. Removals are deferred to one batch per
//! registry after its scan.

use super::geometry::{Circle, ContactSet};
use super::reflect::reflect;
use super::state::{DEAD_LINE, GameEvent, GameState, WALLS};

fn bounce(state: &mut GameState, circle: &Circle, contacts: &ContactSet, dt: f32) {
    state.contact_markers.extend_from_slice(contacts.points());
    state.ball = reflect(
        &state.ball,
        circle.center,
        contacts,
        dt,
        state.settings.ball_speed,
    );
}

/// Score, bounce off and remove every block the ball touches.
/// Returns the number of blocks hit.
pub fn collide_blocks(state: &mut GameState, circle: &Circle, dt: f32) -> usize {
    let mut hits = 0;
    for index in 0..state.blocks.len() {
        let Some(descriptor) = state.blocks.get(index).copied() else {
            continue;
        };
        let shape = descriptor.shape();
        let Some(contacts) = shape.contacts(circle) else {
            continue;
        };

        let points = descriptor.kind.score();
        state.score += points;
        state.blocks.mark(index);
        bounce(state, circle, &contacts, dt);
        state.events.push(GameEvent::BlockHit {
            kind: descriptor.kind,
            points,
        });
        log::debug!(
            "Hit {} block #{} (+{}, score {})",
            descriptor.kind.as_str(),
            index,
            points,
            state.score
        );
        hits += 1;
    }
    state.blocks.remove_marked();
    hits
}

/// Bounce off and consume every trampoline the ball touches.
/// Returns the number consumed.
pub fn collide_trampolines(state: &mut GameState, circle: &Circle, dt: f32) -> usize {
    let mut hits = 0;
    for index in 0..state.trampolines.len() {
        let Some(segment) = state.trampolines.get(index).copied() else {
            continue;
        };
        let Some(contacts) = circle.segment_contacts(&segment) else {
            continue;
        };

        state.trampolines.mark(index);
        bounce(state, circle, &contacts, dt);
        state.events.push(GameEvent::TrampolineConsumed);
        log::debug!("Trampoline #{} consumed", index);
        hits += 1;
    }
    state.trampolines.remove_marked();
    hits
}

/// Tick the wall cooldown and bounce off the first wall in contact.
/// Returns true if the ball was reflected.
pub fn collide_walls(state: &mut GameState, circle: &Circle, dt: f32) -> bool {
    state.wall_cooldown = (state.wall_cooldown - dt).max(0.0);

    let Some(contacts) = WALLS.iter().find_map(|w| circle.segment_contacts(w)) else {
        return false;
    };
    if state.wall_cooldown > 0.0 {
        return false;
    }

    bounce(state, circle, &contacts, dt);
    state.wall_cooldown = state.settings.wall_cooldown;
    state.events.push(GameEvent::WallBounce);
    true
}

/// True if the ball or any block touches the dead line
pub fn touches_dead_line(state: &GameState, circle: &Circle) -> bool {
    circle.intersects_segment(&DEAD_LINE)
        || state
            .blocks
            .iter()
            .any(|b| b.shape().intersects_segment(&DEAD_LINE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Segment;
    use crate::sim::reflect::{contact_vector, reflect_heading};
    use crate::sim::shape::{ShapeDescriptor, ShapeKind};
    use crate::sim::state::Ball;
    use glam::Vec2;

    const DT: f32 = 1.0 / 180.0;

    /// Playing state with no blocks
    fn empty_state() -> GameState {
        let mut state = GameState::new(5);
        state.restart();
        state.blocks.clear();
        state
    }

    fn ball_at(state: &mut GameState, pos: Vec2, heading: Vec2) -> Circle {
        state.ball = Ball { pos, heading };
        state.ball.circle()
    }

    #[test]
    fn test_rect_hit_scores_ten_and_reflects() {
        let mut state = empty_state();
        state.blocks.push(ShapeDescriptor::new(ShapeKind::Rectangle, Vec2::new(300.0, 300.0)));
        // Rect spans (310..390, 310..340); ball just below, moving up
        let circle = ball_at(&mut state, Vec2::new(350.0, 358.0), Vec2::new(0.0, -1.0));

        assert_eq!(collide_blocks(&mut state, &circle, DT), 1);
        assert_eq!(state.score, 10);
        assert!(state.blocks.is_empty());
        assert!(state.ball.heading.y > 0.0, "ball should now head down");
        assert_eq!(state.contact_markers.len(), 2);
        assert_eq!(
            state.events,
            vec![GameEvent::BlockHit {
                kind: ShapeKind::Rectangle,
                points: 10
            }]
        );
    }

    #[test]
    fn test_kind_scores_in_pass() {
        for (kind, expected) in [
            (ShapeKind::Rectangle, 10),
            (ShapeKind::Triangle, 30),
            (ShapeKind::Ellipse, 20),
        ] {
            let mut state = empty_state();
            let d = ShapeDescriptor::new(kind, Vec2::new(300.0, 300.0));
            state.blocks.push(d);
            // Ball centered on the shape's anchor-relative middle always overlaps
            let circle = ball_at(&mut state, Vec2::new(350.0, 320.0), Vec2::new(1.0, 0.0));
            assert_eq!(collide_blocks(&mut state, &circle, DT), 1);
            assert_eq!(state.score, expected, "{:?}", kind);
        }
    }

    #[test]
    fn test_miss_leaves_everything() {
        let mut state = empty_state();
        state.blocks.push(ShapeDescriptor::new(ShapeKind::Triangle, Vec2::new(600.0, 0.0)));
        let heading = Vec2::new(0.6, 0.8);
        let circle = ball_at(&mut state, Vec2::new(400.0, 400.0), heading);

        assert_eq!(collide_blocks(&mut state, &circle, DT), 0);
        assert_eq!(state.blocks.len(), 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.ball.heading, heading);
        assert!(state.contact_markers.is_empty());
    }

    #[test]
    fn test_two_hits_same_frame_removed_in_one_batch() {
        let mut state = empty_state();
        // Far block, a hit block, an untouched block, another hit block
        state.blocks.push(ShapeDescriptor::new(ShapeKind::Rectangle, Vec2::new(600.0, 0.0)));
        state.blocks.push(ShapeDescriptor::new(ShapeKind::Rectangle, Vec2::new(300.0, 300.0)));
        state.blocks.push(ShapeDescriptor::new(ShapeKind::Ellipse, Vec2::new(600.0, 600.0)));
        state.blocks.push(ShapeDescriptor::new(ShapeKind::Rectangle, Vec2::new(300.0, 360.0)));
        // Ball sits in the gap between the two stacked rects, touching both
        let circle = ball_at(&mut state, Vec2::new(350.0, 355.0), Vec2::new(0.0, 1.0));

        assert_eq!(collide_blocks(&mut state, &circle, DT), 2);
        assert_eq!(state.score, 20);
        let remaining: Vec<Vec2> = state.blocks.iter().map(|b| b.anchor).collect();
        assert_eq!(remaining, vec![Vec2::new(600.0, 0.0), Vec2::new(600.0, 600.0)]);
    }

    #[test]
    fn test_second_hit_reflects_first_bounce() {
        let mut state = empty_state();
        let first = ShapeDescriptor::new(ShapeKind::Rectangle, Vec2::new(300.0, 300.0));
        let second = ShapeDescriptor::new(ShapeKind::Rectangle, Vec2::new(300.0, 360.0));
        state.blocks.push(first);
        state.blocks.push(second);
        let h0 = Vec2::new(0.6, 0.8);
        let circle = ball_at(&mut state, Vec2::new(350.0, 355.0), h0);

        let c1 = contact_vector(&first.shape().contacts(&circle).unwrap(), circle.center);
        let c2 = contact_vector(&second.shape().contacts(&circle).unwrap(), circle.center);
        let expected = reflect_heading(reflect_heading(h0, c1), c2);

        assert_eq!(collide_blocks(&mut state, &circle, DT), 2);
        assert!((state.ball.heading - expected).length() < 1e-6);
        // Differs from bouncing off either block alone
        assert!((state.ball.heading - reflect_heading(h0, c2)).length() > 1e-3);
    }

    #[test]
    fn test_trampoline_consumed() {
        let mut state = empty_state();
        state.trampolines.push(Segment::new(Vec2::new(300.0, 100.0), Vec2::new(400.0, 100.0)));
        state.trampolines.push(Segment::new(Vec2::new(350.0, 418.0), Vec2::new(450.0, 418.0)));
        let circle = ball_at(&mut state, Vec2::new(400.0, 400.0), Vec2::new(0.0, 1.0));

        assert_eq!(collide_trampolines(&mut state, &circle, DT), 1);
        assert_eq!(state.trampolines.len(), 1);
        assert_eq!(state.trampolines.get(0).unwrap().a, Vec2::new(300.0, 100.0));
        assert!(state.ball.heading.y < 0.0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_wall_bounce_and_cooldown() {
        let mut state = empty_state();
        // Just touching the left wall, moving left
        let circle = ball_at(&mut state, Vec2::new(319.5, 400.0), Vec2::new(-1.0, 0.0));

        assert!(collide_walls(&mut state, &circle, DT));
        assert!(state.ball.heading.x > 0.0);
        assert_eq!(state.wall_cooldown, 0.02);

        // Still overlapping next frame: ignored while cooling down
        let circle = ball_at(&mut state, Vec2::new(319.5, 400.0), Vec2::new(-1.0, 0.0));
        assert!(!collide_walls(&mut state, &circle, DT));
        assert_eq!(state.ball.heading, Vec2::new(-1.0, 0.0));

        // Cooldown runs out after enough frames
        for _ in 0..4 {
            collide_walls(&mut state, &Circle::new(Vec2::new(500.0, 400.0), 20.0), DT);
        }
        assert_eq!(state.wall_cooldown, 0.0);
        assert!(collide_walls(&mut state, &circle, DT));
    }

    #[test]
    fn test_corner_uses_left_wall_first() {
        let mut state = empty_state();
        // Touching both the left and the top wall
        let circle = ball_at(&mut state, Vec2::new(310.0, 10.0), Vec2::new(-0.6, -0.8));
        assert!(collide_walls(&mut state, &circle, DT));
        assert!(!state.contact_markers.is_empty());
        assert!(state.contact_markers.iter().all(|p| (p.x - 300.0).abs() < 1e-4));
    }

    #[test]
    fn test_top_wall() {
        let mut state = empty_state();
        let circle = ball_at(&mut state, Vec2::new(500.0, 15.0), Vec2::new(0.0, -1.0));
        assert!(collide_walls(&mut state, &circle, DT));
        assert!(state.ball.heading.y > 0.0);
    }

    #[test]
    fn test_dead_line() {
        let mut state = empty_state();
        assert!(!touches_dead_line(&state, &Circle::new(Vec2::new(500.0, 400.0), 20.0)));
        assert!(touches_dead_line(&state, &Circle::new(Vec2::new(500.0, 780.0), 20.0)));

        // Block whose rect bottom reaches the line
        state.blocks.push(ShapeDescriptor::new(ShapeKind::Rectangle, Vec2::new(400.0, 755.0)));
        assert!(touches_dead_line(&state, &Circle::new(Vec2::new(500.0, 400.0), 20.0)));
    }

    #[test]
    fn test_dead_line_ellipse_block() {
        let mut state = empty_state();
        // Ellipse bottom at anchor.y + 40
        state.blocks.push(ShapeDescriptor::new(ShapeKind::Ellipse, Vec2::new(400.0, 750.0)));
        let away = Circle::new(Vec2::new(500.0, 400.0), 20.0);
        assert!(!touches_dead_line(&state, &away));
        state.blocks.iter_mut().for_each(|b| b.anchor.y = 756.0);
        assert!(touches_dead_line(&state, &away));
    }
}
