//! Platform abstraction layer
//!
//! Input arrives through [`InputSource`] and frames leave through
//! [`crate::renderer::Canvas`]. The headless implementations drive the game
//! without a window.

pub mod headless;

use crate::sim::{GameState, TickInput};

pub use headless::{AutoPilot, LogCanvas};

/// Supplies one frame of input
pub trait InputSource {
    fn poll(&mut self, state: &GameState) -> TickInput;
}
