//! 2D primitives and the ball-facing intersection queries
//!
//! Every query here is total: degenerate inputs (zero-length segments,
//! zero radii) report "no contact" instead of dividing by zero.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

const EPSILON: f32 = 1e-6;
/// Points closer than this are treated as the same contact (shared corners)
const MERGE_DIST: f32 = 1e-3;
/// Parametric samples around an ellipse boundary
const ELLIPSE_SAMPLES: usize = 64;
const REFINE_ITERATIONS: usize = 24;

/// Non-empty set of contact points between the ball and something else
#[derive(Debug, Clone, PartialEq)]
pub struct ContactSet {
    points: Vec<Vec2>,
}

impl ContactSet {
    /// Returns `None` for an empty point list
    pub fn new(points: Vec<Vec2>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self { points })
        }
    }

    pub fn single(point: Vec2) -> Self {
        Self {
            points: vec![point],
        }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when there are no points (never the case for a constructed set)
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Average of all points (the point itself for a single contact)
    pub fn centroid(&self) -> Vec2 {
        let sum: Vec2 = self.points.iter().copied().sum();
        sum / self.points.len() as f32
    }

    /// Boundary crossings if there are any, otherwise the given fallback point
    pub fn from_crossings_or(points: Vec<Vec2>, fallback: impl FnOnce() -> Vec2) -> Self {
        Self::new(points).unwrap_or_else(|| Self::single(fallback()))
    }
}

/// Push `p` unless an equivalent point is already present
fn push_unique(points: &mut Vec<Vec2>, p: Vec2) {
    if !points.iter().any(|q| q.distance_squared(p) < MERGE_DIST * MERGE_DIST) {
        points.push(p);
    }
}

/// Signed area test: >0 when `r` is left of `p -> q`
#[inline]
fn orient(p: Vec2, q: Vec2, r: Vec2) -> f32 {
    (q - p).perp_dot(r - p)
}

#[inline]
fn within_bounds(p: Vec2, q: Vec2, r: Vec2) -> bool {
    r.x >= p.x.min(q.x) - EPSILON
        && r.x <= p.x.max(q.x) + EPSILON
        && r.y >= p.y.min(q.y) - EPSILON
        && r.y <= p.y.max(q.y) + EPSILON
}

/// A line segment (walls, dead line, trampolines)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub const fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f32 {
        (self.b - self.a).length()
    }

    pub fn is_degenerate(&self) -> bool {
        (self.b - self.a).length_squared() < EPSILON
    }

    /// Closest point on the segment to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        let d = self.b - self.a;
        let len_sq = d.length_squared();
        if len_sq < EPSILON {
            return self.a;
        }
        let t = ((p - self.a).dot(d) / len_sq).clamp(0.0, 1.0);
        self.a + d * t
    }

    pub fn distance_to(&self, p: Vec2) -> f32 {
        (p - self.closest_point(p)).length()
    }

    /// True if the two segments touch or cross (collinear overlap included)
    pub fn intersects(&self, other: &Segment) -> bool {
        let (p1, p2, p3, p4) = (self.a, self.b, other.a, other.b);
        let d1 = orient(p3, p4, p1);
        let d2 = orient(p3, p4, p2);
        let d3 = orient(p1, p2, p3);
        let d4 = orient(p1, p2, p4);

        if ((d1 > EPSILON && d2 < -EPSILON) || (d1 < -EPSILON && d2 > EPSILON))
            && ((d3 > EPSILON && d4 < -EPSILON) || (d3 < -EPSILON && d4 > EPSILON))
        {
            return true;
        }

        (d1.abs() <= EPSILON && within_bounds(p3, p4, p1))
            || (d2.abs() <= EPSILON && within_bounds(p3, p4, p2))
            || (d3.abs() <= EPSILON && within_bounds(p1, p2, p3))
            || (d4.abs() <= EPSILON && within_bounds(p1, p2, p4))
    }
}

/// Closest point to `p` over a closed polyline's edges
fn closest_on_edges(edges: &[Segment], p: Vec2) -> Vec2 {
    let mut best = edges[0].closest_point(p);
    let mut best_dist = best.distance_squared(p);
    for edge in &edges[1..] {
        let q = edge.closest_point(p);
        let d = q.distance_squared(p);
        if d < best_dist {
            best = q;
            best_dist = d;
        }
    }
    best
}

/// Circle boundary crossings over a set of edges, corners merged
fn edge_crossings(edges: &[Segment], circle: &Circle) -> Vec<Vec2> {
    let mut points = Vec::new();
    for edge in edges {
        for p in circle.segment_crossings(edge) {
            push_unique(&mut points, p);
        }
    }
    points
}

/// The ball's collision shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.center.distance_squared(p) <= self.radius * self.radius
    }

    pub fn intersects_segment(&self, segment: &Segment) -> bool {
        segment.distance_to(self.center) <= self.radius
    }

    /// Points where the circle boundary crosses the segment (0, 1 or 2)
    pub fn segment_crossings(&self, segment: &Segment) -> Vec<Vec2> {
        let d = segment.b - segment.a;
        let a = d.length_squared();
        if a < EPSILON {
            return Vec::new();
        }
        let f = segment.a - self.center;
        let b = 2.0 * f.dot(d);
        let c = f.length_squared() - self.radius * self.radius;
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return Vec::new();
        }

        let sq = disc.sqrt();
        let mut points = Vec::with_capacity(2);
        for t in [(-b - sq) / (2.0 * a), (-b + sq) / (2.0 * a)] {
            if (0.0..=1.0).contains(&t) {
                push_unique(&mut points, segment.a + d * t);
            }
        }
        points
    }

    /// Contacts with a segment, or `None` if they don't touch.
    ///
    /// A segment lying entirely inside the circle has no boundary crossing;
    /// its closest point stands in as the single contact.
    pub fn segment_contacts(&self, segment: &Segment) -> Option<ContactSet> {
        if !self.intersects_segment(segment) {
            return None;
        }
        Some(ContactSet::from_crossings_or(
            self.segment_crossings(segment),
            || segment.closest_point(self.center),
        ))
    }
}

/// Axis-aligned rectangle (top-left + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn min(&self) -> Vec2 {
        self.pos
    }

    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn contains(&self, p: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }

    pub fn edges(&self) -> [Segment; 4] {
        let (min, max) = (self.min(), self.max());
        let tl = min;
        let tr = Vec2::new(max.x, min.y);
        let br = max;
        let bl = Vec2::new(min.x, max.y);
        [
            Segment::new(tl, tr),
            Segment::new(tr, br),
            Segment::new(br, bl),
            Segment::new(bl, tl),
        ]
    }

    pub fn intersects_circle(&self, circle: &Circle) -> bool {
        let closest = circle.center.clamp(self.min(), self.max());
        circle.contains(closest)
    }

    pub fn intersects_segment(&self, segment: &Segment) -> bool {
        self.contains(segment.a)
            || self.contains(segment.b)
            || self.edges().iter().any(|e| e.intersects(segment))
    }

    pub fn contact_points(&self, circle: &Circle) -> Vec<Vec2> {
        edge_crossings(&self.edges(), circle)
    }

    pub fn closest_boundary_point(&self, p: Vec2) -> Vec2 {
        closest_on_edges(&self.edges(), p)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
}

impl Triangle {
    pub const fn new(p0: Vec2, p1: Vec2, p2: Vec2) -> Self {
        Self { p0, p1, p2 }
    }

    pub fn centroid(&self) -> Vec2 {
        (self.p0 + self.p1 + self.p2) / 3.0
    }

    pub fn edges(&self) -> [Segment; 3] {
        [
            Segment::new(self.p0, self.p1),
            Segment::new(self.p1, self.p2),
            Segment::new(self.p2, self.p0),
        ]
    }

    /// Works for either winding
    pub fn contains(&self, p: Vec2) -> bool {
        let d0 = orient(self.p0, self.p1, p);
        let d1 = orient(self.p1, self.p2, p);
        let d2 = orient(self.p2, self.p0, p);
        let has_neg = d0 < -EPSILON || d1 < -EPSILON || d2 < -EPSILON;
        let has_pos = d0 > EPSILON || d1 > EPSILON || d2 > EPSILON;
        !(has_neg && has_pos)
    }

    pub fn intersects_circle(&self, circle: &Circle) -> bool {
        self.contains(circle.center)
            || self
                .edges()
                .iter()
                .any(|e| circle.intersects_segment(e))
    }

    pub fn intersects_segment(&self, segment: &Segment) -> bool {
        self.contains(segment.a)
            || self.contains(segment.b)
            || self.edges().iter().any(|e| e.intersects(segment))
    }

    pub fn contact_points(&self, circle: &Circle) -> Vec<Vec2> {
        edge_crossings(&self.edges(), circle)
    }

    pub fn closest_boundary_point(&self, p: Vec2) -> Vec2 {
        closest_on_edges(&self.edges(), p)
    }
}

/// Axis-aligned ellipse (center + semi-axes)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub center: Vec2,
    pub radii: Vec2,
}

impl Ellipse {
    pub const fn new(center: Vec2, radii: Vec2) -> Self {
        Self { center, radii }
    }

    fn is_degenerate(&self) -> bool {
        self.radii.x.abs() < EPSILON || self.radii.y.abs() < EPSILON
    }

    /// Boundary point at parameter `theta`
    pub fn point_at(&self, theta: f32) -> Vec2 {
        self.center + Vec2::new(self.radii.x * theta.cos(), self.radii.y * theta.sin())
    }

    /// Map into the space where this ellipse is the unit circle
    fn to_unit(&self, p: Vec2) -> Vec2 {
        (p - self.center) / self.radii
    }

    pub fn contains(&self, p: Vec2) -> bool {
        !self.is_degenerate() && self.to_unit(p).length_squared() <= 1.0
    }

    /// Exact: the affine map to unit space preserves segments
    pub fn intersects_segment(&self, segment: &Segment) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let unit = Segment::new(self.to_unit(segment.a), self.to_unit(segment.b));
        unit.distance_to(Vec2::ZERO) <= 1.0
    }

    /// Closest boundary point: coarse sampling, then golden-section refinement
    pub fn closest_boundary_point(&self, p: Vec2) -> Vec2 {
        let step = TAU / ELLIPSE_SAMPLES as f32;
        let dist = |theta: f32| self.point_at(theta).distance_squared(p);

        let mut best_theta = 0.0;
        let mut best = f32::MAX;
        for i in 0..ELLIPSE_SAMPLES {
            let theta = i as f32 * step;
            let d = dist(theta);
            if d < best {
                best = d;
                best_theta = theta;
            }
        }

        let ratio = (5.0_f32.sqrt() - 1.0) / 2.0;
        let (mut lo, mut hi) = (best_theta - step, best_theta + step);
        for _ in 0..REFINE_ITERATIONS {
            let m1 = hi - ratio * (hi - lo);
            let m2 = lo + ratio * (hi - lo);
            if dist(m1) < dist(m2) {
                hi = m2;
            } else {
                lo = m1;
            }
        }
        self.point_at((lo + hi) * 0.5)
    }

    pub fn intersects_circle(&self, circle: &Circle) -> bool {
        if self.is_degenerate() {
            return false;
        }
        self.contains(circle.center)
            || circle.contains(self.center)
            || circle.contains(self.closest_boundary_point(circle.center))
    }

    /// Circle boundary crossings, found as sign changes of the squared
    /// distance along the ellipse and refined by bisection
    pub fn contact_points(&self, circle: &Circle) -> Vec<Vec2> {
        if self.is_degenerate() {
            return Vec::new();
        }
        let r_sq = circle.radius * circle.radius;
        let f = |theta: f32| self.point_at(theta).distance_squared(circle.center) - r_sq;
        let step = TAU / ELLIPSE_SAMPLES as f32;

        let mut points = Vec::new();
        for i in 0..ELLIPSE_SAMPLES {
            let (mut lo, mut hi) = (i as f32 * step, (i + 1) as f32 * step);
            let (mut f_lo, f_hi) = (f(lo), f(hi));
            if f_lo == 0.0 {
                push_unique(&mut points, self.point_at(lo));
                continue;
            }
            if f_lo * f_hi > 0.0 || f_hi == 0.0 {
                continue;
            }
            for _ in 0..REFINE_ITERATIONS {
                let mid = (lo + hi) * 0.5;
                let f_mid = f(mid);
                if f_lo * f_mid <= 0.0 {
                    hi = mid;
                } else {
                    lo = mid;
                    f_lo = f_mid;
                }
            }
            push_unique(&mut points, self.point_at((lo + hi) * 0.5));
        }
        points
    }
}
