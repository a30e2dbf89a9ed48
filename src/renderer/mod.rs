//! Rendering boundary
//!
//! The game never talks to a graphics API directly. A frame is described as
//! a sequence of primitive draw calls on a [`Canvas`]; [`scene::draw_frame`]
//! composes those calls from the game state.

pub mod scene;

use glam::Vec2;

use crate::sim::{Segment, Shape};

pub use scene::draw_frame;

/// Linear RGBA, 0..1 per channel
pub type Color = [f32; 4];

/// Convert 8-bit RGBA to a [`Color`]
pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Color {
    [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ]
}

/// Scene palette
pub mod palette {
    use super::{Color, rgba8};

    pub const BACKGROUND: Color = rgba8(0, 0, 0, 255);
    pub const PANEL: Color = rgba8(30, 30, 30, 255);
    pub const BALL: Color = rgba8(255, 161, 0, 255);
    pub const RECT_BLOCK: Color = rgba8(255, 20, 20, 128);
    pub const TRIANGLE_BLOCK: Color = rgba8(20, 255, 20, 128);
    pub const ELLIPSE_BLOCK: Color = rgba8(20, 20, 255, 128);
    pub const TRAMPOLINE: Color = rgba8(255, 203, 0, 255);
    pub const WALL: Color = rgba8(102, 191, 255, 255);
    pub const DEAD_LINE: Color = rgba8(230, 41, 55, 255);
    pub const DRAG_PREVIEW: Color = rgba8(130, 130, 130, 255);
    pub const CONTACT_MARKER: Color = rgba8(130, 130, 130, 255);
    pub const TEXT: Color = rgba8(245, 245, 245, 255);
}

/// Line width for walls, trampolines and the dead line
pub const LINE_WIDTH: f32 = 2.0;
/// Radius of the contact-point debug markers
pub const MARKER_RADIUS: f32 = 4.0;

/// Primitive drawing surface
pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn draw_shape(&mut self, shape: &Shape, color: Color);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn draw_segment(&mut self, segment: &Segment, width: f32, color: Color);
    fn draw_text(&mut self, pos: Vec2, text: &str, size: f32, color: Color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8() {
        assert_eq!(rgba8(255, 0, 0, 255), [1.0, 0.0, 0.0, 1.0]);
        let c = rgba8(20, 20, 255, 128);
        assert!((c[3] - 128.0 / 255.0).abs() < 1e-6);
    }
}
