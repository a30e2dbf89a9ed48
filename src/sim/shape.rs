//! Block shapes
//!
//! A block is stored as a small descriptor (kind + anchor). The concrete
//! geometry is rebuilt from it whenever it is needed, at fixed per-kind
//! offsets from the anchor.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Circle, ContactSet, Ellipse, Rect, Segment, Triangle};
use crate::consts::{BLOCK_BASE_SCORE, ELLIPSE_BONUS, TRIANGLE_BONUS};

/// Block kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[serde(alias = "rect")]
    Rectangle,
    Triangle,
    Ellipse,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Rectangle, ShapeKind::Triangle, ShapeKind::Ellipse];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rect",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Ellipse => "ellipse",
        }
    }

    /// Points for hitting a block of this kind (base + kind bonus)
    pub fn score(&self) -> u64 {
        match self {
            ShapeKind::Rectangle => BLOCK_BASE_SCORE,
            ShapeKind::Triangle => BLOCK_BASE_SCORE + TRIANGLE_BONUS,
            ShapeKind::Ellipse => BLOCK_BASE_SCORE + ELLIPSE_BONUS,
        }
    }
}

/// What the block registry stores per block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    pub kind: ShapeKind,
    pub anchor: Vec2,
}

impl ShapeDescriptor {
    pub fn new(kind: ShapeKind, anchor: Vec2) -> Self {
        Self { kind, anchor }
    }

    pub fn shape(&self) -> Shape {
        build_shape(self)
    }
}

/// Concrete block geometry; only the active primitive exists
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect(Rect),
    Triangle(Triangle),
    Ellipse(Ellipse),
}

/// Build the concrete shape for a descriptor
pub fn build_shape(descriptor: &ShapeDescriptor) -> Shape {
    let a = descriptor.anchor;
    match descriptor.kind {
        ShapeKind::Rectangle => Shape::Rect(Rect::new(a + Vec2::new(10.0, 10.0), Vec2::new(80.0, 30.0))),
        ShapeKind::Triangle => Shape::Triangle(Triangle::new(
            a + Vec2::new(10.0, 10.0),
            a + Vec2::new(90.0, 10.0),
            a + Vec2::new(50.0, 40.0),
        )),
        ShapeKind::Ellipse => {
            Shape::Ellipse(Ellipse::new(a + Vec2::new(50.0, 25.0), Vec2::new(40.0, 15.0)))
        }
    }
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rect(_) => ShapeKind::Rectangle,
            Shape::Triangle(_) => ShapeKind::Triangle,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
        }
    }

    pub fn intersects_circle(&self, circle: &Circle) -> bool {
        match self {
            Shape::Rect(r) => r.intersects_circle(circle),
            Shape::Triangle(t) => t.intersects_circle(circle),
            Shape::Ellipse(e) => e.intersects_circle(circle),
        }
    }

    pub fn intersects_segment(&self, segment: &Segment) -> bool {
        match self {
            Shape::Rect(r) => r.intersects_segment(segment),
            Shape::Triangle(t) => t.intersects_segment(segment),
            Shape::Ellipse(e) => e.intersects_segment(segment),
        }
    }

    /// Points where the circle boundary crosses the shape boundary
    pub fn boundary_crossings(&self, circle: &Circle) -> Vec<Vec2> {
        match self {
            Shape::Rect(r) => r.contact_points(circle),
            Shape::Triangle(t) => t.contact_points(circle),
            Shape::Ellipse(e) => e.contact_points(circle),
        }
    }

    pub fn closest_boundary_point(&self, p: Vec2) -> Vec2 {
        match self {
            Shape::Rect(r) => r.closest_boundary_point(p),
            Shape::Triangle(t) => t.closest_boundary_point(p),
            Shape::Ellipse(e) => e.closest_boundary_point(p),
        }
    }

    /// Contacts with the ball, or `None` if they don't touch.
    ///
    /// Overlap without any boundary crossing (one shape inside the other)
    /// falls back to the closest boundary point as a single contact.
    pub fn contacts(&self, circle: &Circle) -> Option<ContactSet> {
        if !self.intersects_circle(circle) {
            return None;
        }
        Some(ContactSet::from_crossings_or(
            self.boundary_crossings(circle),
            || self.closest_boundary_point(circle.center),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_build_rect() {
        let d = ShapeDescriptor::new(ShapeKind::Rectangle, Vec2::new(300.0, 0.0));
        match build_shape(&d) {
            Shape::Rect(r) => {
                assert_eq!(r.pos, Vec2::new(310.0, 10.0));
                assert_eq!(r.size, Vec2::new(80.0, 30.0));
            }
            other => panic!("expected rect, got {:?}", other),
        }
    }

    #[test]
    fn test_build_triangle() {
        let d = ShapeDescriptor::new(ShapeKind::Triangle, Vec2::new(0.0, 0.0));
        let Shape::Triangle(t) = build_shape(&d) else {
            panic!("expected triangle");
        };
        assert_eq!(t.p0, Vec2::new(10.0, 10.0));
        assert_eq!(t.p1, Vec2::new(90.0, 10.0));
        assert_eq!(t.p2, Vec2::new(50.0, 40.0));
    }

    #[test]
    fn test_build_ellipse() {
        let d = ShapeDescriptor::new(ShapeKind::Ellipse, Vec2::new(100.0, 100.0));
        let Shape::Ellipse(e) = build_shape(&d) else {
            panic!("expected ellipse");
        };
        assert_eq!(e.center, Vec2::new(150.0, 125.0));
        assert_eq!(e.radii, Vec2::new(40.0, 15.0));
    }

    #[test]
    fn test_kind_scores() {
        assert_eq!(ShapeKind::Rectangle.score(), 10);
        assert_eq!(ShapeKind::Triangle.score(), 30);
        assert_eq!(ShapeKind::Ellipse.score(), 20);
    }

    #[test]
    fn test_kind_json_names() {
        let kinds: Vec<ShapeKind> =
            serde_json::from_str(r#"["rect", "rectangle", "triangle", "ellipse"]"#).unwrap();
        assert_eq!(
            kinds,
            vec![
                ShapeKind::Rectangle,
                ShapeKind::Rectangle,
                ShapeKind::Triangle,
                ShapeKind::Ellipse
            ]
        );
        assert!(serde_json::from_str::<ShapeKind>(r#""hexagon""#).is_err());
    }

    #[test]
    fn test_contacts_fallback_when_ball_inside_ellipse() {
        // Tiny ball fully inside the ellipse: overlap, but no boundary crossing
        let d = ShapeDescriptor::new(ShapeKind::Ellipse, Vec2::new(0.0, 0.0));
        let shape = build_shape(&d);
        let ball = Circle::new(Vec2::new(50.0, 25.0), 2.0);
        let contacts = shape.contacts(&ball).expect("overlapping");
        assert_eq!(contacts.len(), 1);
        // Nearest boundary point is straight up or down (minor axis)
        let p = contacts.points()[0];
        assert!((p.x - 50.0).abs() < 0.1);
        assert!(((p.y - 25.0).abs() - 15.0).abs() < 0.1);
    }

    #[test]
    fn test_contacts_none_when_apart() {
        let d = ShapeDescriptor::new(ShapeKind::Triangle, Vec2::new(300.0, 0.0));
        let ball = Circle::new(Vec2::new(400.0, 400.0), 20.0);
        assert!(d.shape().contacts(&ball).is_none());
    }

    fn any_kind() -> impl Strategy<Value = ShapeKind> {
        prop_oneof![
            Just(ShapeKind::Rectangle),
            Just(ShapeKind::Triangle),
            Just(ShapeKind::Ellipse),
        ]
    }

    proptest! {
        #[test]
        fn prop_build_shape_is_pure(kind in any_kind(), x in -1000.0f32..1000.0, y in -1000.0f32..1000.0) {
            let d = ShapeDescriptor::new(kind, Vec2::new(x, y));
            prop_assert_eq!(build_shape(&d), build_shape(&d));
            prop_assert_eq!(build_shape(&d).kind(), kind);
        }

        #[test]
        fn prop_contacts_nonempty_iff_intersecting(
            kind in any_kind(),
            bx in 250.0f32..450.0,
            by in -50.0f32..100.0,
        ) {
            let shape = ShapeDescriptor::new(kind, Vec2::new(300.0, 0.0)).shape();
            let ball = Circle::new(Vec2::new(bx, by), 20.0);
            match shape.contacts(&ball) {
                Some(set) => {
                    prop_assert!(shape.intersects_circle(&ball));
                    prop_assert!(!set.points().is_empty());
                }
                None => prop_assert!(!shape.intersects_circle(&ball)),
            }
        }
    }
}
