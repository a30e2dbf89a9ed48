//! Block spawning and descent
//!
//! A countdown in simulation time triggers spawn attempts; between them,
//! every block drifts down at a constant speed.

use glam::Vec2;
use rand::Rng;

use super::registry::BlockRegistry;
use super::shape::{ShapeDescriptor, ShapeKind};
use crate::consts::{BLOCK_LANES, SPAWN_Y};
use crate::lane_x;

/// Restartable countdown driven by simulation dt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    period: f32,
    remaining: f32,
}

impl Countdown {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            remaining: period,
        }
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn advance(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    pub fn has_elapsed(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn restart(&mut self) {
        self.remaining = self.period;
    }
}

/// Move every block down by `dt * speed`
pub fn descend(blocks: &mut BlockRegistry, dt: f32, speed: f32) {
    let offset = Vec2::new(0.0, dt * speed);
    for block in blocks.iter_mut() {
        block.anchor += offset;
    }
}

/// One spawn attempt per lane: skip with `skip_probability`, otherwise add a
/// block of a uniformly chosen kind above the arena. Returns how many spawned.
pub fn spawn_wave<R: Rng + ?Sized>(
    blocks: &mut BlockRegistry,
    rng: &mut R,
    kinds: &[ShapeKind],
    skip_probability: f64,
) -> usize {
    if kinds.is_empty() {
        return 0;
    }
    let mut spawned = 0;
    for lane in 0..BLOCK_LANES {
        if rng.random_bool(skip_probability) {
            continue;
        }
        let kind = kinds[rng.random_range(0..kinds.len())];
        blocks.push(ShapeDescriptor::new(kind, Vec2::new(lane_x(lane), SPAWN_Y)));
        spawned += 1;
    }
    spawned
}
