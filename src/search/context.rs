//! Per-run search context.

use rayon::{ThreadPool, ThreadPoolBuilder};

use super::config::SearchConfig;
use super::tree::SearchTree;
use crate::core::SimResult;

/// Everything a strategy reads during one run: configuration, the tree
/// counters and the worker pool.
#[derive(Debug)]
pub struct SearchContext {
    pub config: SearchConfig,
    pub tree: SearchTree,
    pool: Option<ThreadPool>,
}

impl SearchContext {
    /// Build a context. A bounded pool is created only when some form of
    /// parallelism is enabled.
    pub fn new(config: SearchConfig) -> SimResult<Self> {
        let pool = if config.is_parallel() {
            Some(
                ThreadPoolBuilder::new()
                    .num_threads(config.worker_count())
                    .thread_name(|i| format!("outcome-search-{i}"))
                    .build()?,
            )
        } else {
            None
        };
        Ok(Self {
            tree: SearchTree::new(config.track_tree),
            config,
            pool,
        })
    }

    /// Run `op` inside the worker pool, or inline without one.
    pub fn install<R, F>(&self, op: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// Worker count used to partition frontiers.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.pool
            .as_ref()
            .map_or(1, |pool| pool.current_num_threads().max(1))
    }

    /// Consume the context, keeping the tree.
    #[must_use]
    pub fn into_tree(self) -> SearchTree {
        self.tree
    }
}
