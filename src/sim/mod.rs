//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied dt only
//! - Seeded RNG only
//! - Stable iteration order (registry insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod reflect;
pub mod registry;
pub mod shape;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{collide_blocks, collide_trampolines, collide_walls, touches_dead_line};
pub use geometry::{Circle, ContactSet, Ellipse, Rect, Segment, Triangle};
pub use reflect::{contact_vector, reflect, reflect_heading};
pub use registry::{BlockRegistry, Registry, TrampolineRegistry};
pub use shape::{Shape, ShapeDescriptor, ShapeKind, build_shape};
pub use spawn::{Countdown, descend, spawn_wave};
pub use state::{Ball, DEAD_LINE, GameEvent, GamePhase, GameState, WALLS};
pub use tick::{TickInput, tick};
