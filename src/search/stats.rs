//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

use super::tree::SearchTree;

/// Statistics collected during one search run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Games cloned.
    pub clones: usize,

    /// Terminal branches finalized.
    pub terminals: usize,

    /// Branches or outcomes merged into an equivalent one.
    pub merged: usize,

    /// Unique outcomes returned.
    pub unique: usize,

    /// Breadth-first levels processed (0 for other strategies).
    pub levels: usize,

    /// Deepest clone.
    pub max_depth: u32,

    /// Wall-clock time (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Read the counters of a finished run.
    #[must_use]
    pub fn from_tree(tree: &SearchTree, unique: usize, time_us: u64) -> Self {
        Self {
            clones: tree.clones(),
            terminals: tree.finalized(),
            merged: tree.merged(),
            unique,
            levels: tree.levels(),
            max_depth: tree.max_depth(),
            time_us,
        }
    }

    /// Calculate clones per second.
    #[must_use]
    pub fn clones_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.clones as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Fraction of terminals that collapsed into another outcome.
    #[must_use]
    pub fn dedup_ratio(&self) -> f64 {
        if self.terminals == 0 {
            0.0
        } else {
            1.0 - self.unique as f64 / self.terminals as f64
        }
    }
}
