//! Ball reflection from contact points
//!
//! This is an approximation of specular reflection. The contact vector
//! `C = centroid - center` stands in for the surface normal, scaled by the
//! ball radius instead of being normalized:
//!
//! ```text
//! cos_theta = C · heading / 20
//! heading'  = heading - 2 · C · cos_theta / 20
//! ```
//!
//! When `|C|` equals the radius (a tangent touch) this is exactly
//! `v - 2(v·n)n`. Deeper overlaps give a shorter `C` and a softer bounce.

use glam::Vec2;

use super::geometry::ContactSet;
use super::state::Ball;
use crate::consts::REFLECTION_SCALE;

/// Vector from the ball center to the centroid of the contacts
#[inline]
pub fn contact_vector(contacts: &ContactSet, center: Vec2) -> Vec2 {
    contacts.centroid() - center
}

/// Heading after bouncing off the contacts
pub fn reflect_heading(heading: Vec2, contact: Vec2) -> Vec2 {
    let cos_theta = contact.dot(heading) / REFLECTION_SCALE;
    heading - 2.0 * contact * cos_theta / REFLECTION_SCALE
}

/// Reflect the ball off `contacts` and push it clear along the new heading.
///
/// `center` is the ball circle used for the hit test (taken at the start of
/// the frame), which can differ from `ball.pos` after this frame's move.
pub fn reflect(ball: &Ball, center: Vec2, contacts: &ContactSet, dt: f32, ball_speed: f32) -> Ball {
    let c = contact_vector(contacts, center);
    let heading = reflect_heading(ball.heading, c);
    Ball {
        pos: ball.pos + 2.0 * heading * dt * ball_speed,
        heading,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 180.0;

    #[test]
    fn test_single_contact_vector() {
        let contacts = ContactSet::single(Vec2::new(420.0, 400.0));
        let c = contact_vector(&contacts, Vec2::new(400.0, 400.0));
        assert_eq!(c, Vec2::new(20.0, 0.0));
    }

    #[test]
    fn test_two_contact_vector_is_midpoint() {
        let contacts =
            ContactSet::new(vec![Vec2::new(410.0, 390.0), Vec2::new(410.0, 410.0)]).unwrap();
        let c = contact_vector(&contacts, Vec2::new(400.0, 400.0));
        assert_eq!(c, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_tangent_contact_is_true_reflection() {
        // Ball moving right into a wall touching its rightmost point
        let heading = Vec2::new(1.0, 0.0);
        let out = reflect_heading(heading, Vec2::new(20.0, 0.0));
        assert!((out - Vec2::new(-1.0, 0.0)).length() < 1e-6);

        // 45 degrees onto the floor
        let h = Vec2::new(1.0, 1.0).normalize();
        let out = reflect_heading(h, Vec2::new(0.0, 20.0));
        assert!((out - Vec2::new(h.x, -h.y)).length() < 1e-6);
    }

    #[test]
    fn test_shallow_overlap_softens_bounce() {
        // Contact vector only half a radius long
        let out = reflect_heading(Vec2::new(0.0, 1.0), Vec2::new(0.0, 10.0));
        assert!((out - Vec2::new(0.0, 0.5)).length() < 1e-6);
    }

    #[test]
    fn test_reflect_advances_position() {
        let ball = Ball {
            pos: Vec2::new(400.0, 400.0),
            heading: Vec2::new(1.0, 0.0),
        };
        let contacts = ContactSet::single(Vec2::new(420.0, 400.0));
        let out = reflect(&ball, ball.pos, &contacts, DT, 200.0);
        assert!((out.heading - Vec2::new(-1.0, 0.0)).length() < 1e-6);
        let expected = Vec2::new(400.0 - 2.0 * DT * 200.0, 400.0);
        assert!((out.pos - expected).length() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_tangent_reflection_preserves_speed(
            angle in 0.0f32..std::f32::consts::TAU,
            normal_angle in 0.0f32..std::f32::consts::TAU,
        ) {
            let heading = Vec2::new(angle.cos(), angle.sin());
            let c = Vec2::new(normal_angle.cos(), normal_angle.sin()) * REFLECTION_SCALE;
            let out = reflect_heading(heading, c);
            prop_assert!((out.length() - 1.0).abs() < 1e-4);
        }

        #[test]
        fn prop_single_point_vector(px in -100.0f32..100.0, py in -100.0f32..100.0) {
            let center = Vec2::new(3.0, -7.0);
            let p = Vec2::new(px, py);
            let c = contact_vector(&ContactSet::single(p), center);
            prop_assert!((c - (p - center)).length() < 1e-4);
        }
    }
}
