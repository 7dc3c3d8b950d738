//! Breadth-first traversal.
//!
//! Expansion runs in synchronous levels. Within a level every frontier
//! branch runs until one of:
//!
//! - an instruction changes its state hash: it is finalized if its queue
//!   is done, otherwise filed into the next frontier under its branch key
//! - a choice point: its children are filed into the next frontier
//! - its queue drains or pauses without a change: it is finalized
//!
//! Filing merges equivalent branches by summing probability, so work that
//! converges is only done once. Frontiers of at least
//! `min_parallel_frontier` branches are split across the worker pool; each
//! partition fills a local collector, and all of them are merged at the
//! level boundary.

use log::debug;
use rayon::prelude::*;

use super::{finalize, TraversalStrategy};
use crate::core::SimResult;
use crate::fuzzy::branch_key;
use crate::queue::Tick;
use crate::search::branch::Branch;
use crate::search::collector::Collector;
use crate::search::context::SearchContext;
use crate::search::expand::{fork, gather};
use crate::search::results::UniqueResults;

#[derive(Clone, Copy, Debug, Default)]
pub struct BreadthFirstStrategy;

impl BreadthFirstStrategy {
    /// Run one branch until it leaves the current level.
    fn advance(&self, mut branch: Branch, collector: &mut Collector, ctx: &SearchContext) -> SimResult<()> {
        loop {
            let before = branch.game.state_hash();
            match branch.game.process_one()? {
                Tick::Idle => return self.visit(branch, collector, ctx),
                Tick::Intercepted(point) => {
                    for mut child in fork(&branch, &point, ctx)? {
                        let key = branch_key(&mut child.game);
                        if !collector.add_frontier(key, child) {
                            ctx.tree.record_merged(1);
                        }
                    }
                    return Ok(());
                }
                Tick::Executed | Tick::Cancelled => {
                    if branch.game.state_hash() != before {
                        match self.post_action(branch, collector, ctx)? {
                            Some(kept) => branch = kept,
                            None => return Ok(()),
                        }
                    }
                }
            }
        }
    }

    fn run_level(&self, frontier: Vec<Branch>, collector: &mut Collector, ctx: &SearchContext) -> SimResult<()> {
        let workers = ctx.workers();
        if ctx.config.parallel_levels && workers > 1 && frontier.len() >= ctx.config.min_parallel_frontier {
            let mut partitions: Vec<Vec<Branch>> = (0..workers).map(|_| Vec::new()).collect();
            for (i, branch) in frontier.into_iter().enumerate() {
                partitions[i % workers].push(branch);
            }
            let mode = collector.mode();
            let partials: Vec<SimResult<Collector>> = partitions
                .into_par_iter()
                .map(|partition| -> SimResult<Collector> {
                    let mut local = Collector::new(mode);
                    for branch in partition {
                        self.advance(branch, &mut local, ctx)?;
                    }
                    Ok(local)
                })
                .collect();
            gather(collector, partials, ctx)
        } else {
            frontier
                .into_iter()
                .try_for_each(|branch| self.advance(branch, collector, ctx))
        }
    }
}

impl TraversalStrategy for BreadthFirstStrategy {
    fn name(&self) -> &'static str {
        "breadth-first"
    }

    fn visit(&self, branch: Branch, collector: &mut Collector, ctx: &SearchContext) -> SimResult<()> {
        finalize(branch, collector, ctx);
        Ok(())
    }

    fn post_action(
        &self,
        mut branch: Branch,
        collector: &mut Collector,
        ctx: &SearchContext,
    ) -> SimResult<Option<Branch>> {
        if branch.game.is_terminal() {
            finalize(branch, collector, ctx);
        } else {
            let key = branch_key(&mut branch.game);
            if !collector.add_frontier(key, branch) {
                ctx.tree.record_merged(1);
            }
        }
        Ok(None)
    }

    fn post_process(&self, root: Branch, ctx: &SearchContext) -> SimResult<Collector> {
        let mut collector = Collector::new(ctx.config.equivalence);
        let mut frontier = vec![root];
        while !frontier.is_empty() {
            ctx.tree.record_level();
            debug!(
                "breadth-first: level {} with {} branches",
                ctx.tree.levels(),
                frontier.len()
            );
            self.run_level(frontier, &mut collector, ctx)?;
            frontier = collector.frontier.take();
        }
        debug!(
            "breadth-first: {} levels, {} unique",
            ctx.tree.levels(),
            collector.results.len()
        );
        Ok(collector)
    }

    fn unique_results(&self, collected: Collector, _ctx: &SearchContext) -> UniqueResults {
        UniqueResults::new(collected.results.into_items())
    }
}
