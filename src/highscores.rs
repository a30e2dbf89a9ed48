//! Score ranking
//!
//! Lives in memory for the lifetime of the process; every finished run is
//! appended and the list is kept in descending order.

use serde::{Deserialize, Serialize};

/// Past scores, best first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ranking {
    pub entries: Vec<u64>,
}

impl Ranking {
    /// Create empty ranking
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The rank a score would get if recorded now (1-indexed).
    /// Ties rank below existing equal scores.
    pub fn potential_rank(&self, score: u64) -> usize {
        self.entries
            .iter()
            .position(|&e| score > e)
            .unwrap_or(self.entries.len())
            + 1
    }

    /// Record a finished run and return its rank (1-indexed)
    pub fn record(&mut self, score: u64) -> usize {
        let rank = self.potential_rank(score);
        self.entries.insert(rank - 1, score);
        rank
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().copied()
    }

    /// "1: 120" style lines for display
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, score)| format!("{}: {}", i + 1, score))
    }
}
