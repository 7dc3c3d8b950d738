//! Search configuration parameters.

use serde::{Deserialize, Serialize};

use crate::fuzzy::EquivalenceMode;

/// Traversal strategy selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Collect everything, deduplicate pairwise at the end.
    Naive,
    /// Fold terminals into the result map as they appear.
    DepthFirst,
    /// Synchronous levels with a deduplicated frontier.
    #[default]
    BreadthFirst,
}

/// Search configuration parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Traversal strategy.
    pub strategy: StrategyKind,

    /// How strictly outcomes must match to be merged.
    pub equivalence: EquivalenceMode,

    /// Clone and explore the outcomes of one choice point concurrently.
    pub parallel_clones: bool,

    /// Partition large breadth-first frontiers across workers.
    pub parallel_levels: bool,

    /// Smallest frontier that is partitioned.
    pub min_parallel_frontier: usize,

    /// Worker threads (0 = one per available core).
    pub workers: usize,

    /// Keep a record of every branch in the search tree.
    pub track_tree: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            equivalence: EquivalenceMode::default(),
            parallel_clones: false,
            parallel_levels: false,
            min_parallel_frontier: 64,
            workers: 0,
            track_tree: false,
        }
    }
}

impl SearchConfig {
    /// Select the traversal strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Select the equivalence mode.
    #[must_use]
    pub fn with_equivalence(mut self, mode: EquivalenceMode) -> Self {
        self.equivalence = mode;
        self
    }

    /// Enable or disable concurrent clone expansion.
    #[must_use]
    pub fn with_parallel_clones(mut self, enabled: bool) -> Self {
        self.parallel_clones = enabled;
        self
    }

    /// Enable or disable partitioned levels.
    #[must_use]
    pub fn with_parallel_levels(mut self, enabled: bool) -> Self {
        self.parallel_levels = enabled;
        self
    }

    /// Set the smallest frontier that is partitioned.
    #[must_use]
    pub fn with_min_parallel_frontier(mut self, size: usize) -> Self {
        self.min_parallel_frontier = size;
        self
    }

    /// Set the worker count.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Enable or disable node tracking.
    #[must_use]
    pub fn with_tree_tracking(mut self, enabled: bool) -> Self {
        self.track_tree = enabled;
        self
    }

    /// True when any form of parallelism is on.
    #[must_use]
    pub fn is_parallel(&self) -> bool {
        self.parallel_clones || self.parallel_levels
    }

    /// Resolved worker count.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get().max(1)
        } else {
            self.workers
        }
    }
}
