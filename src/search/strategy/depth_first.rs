//! Depth-first traversal.
//!
//! Each line runs to completion before its siblings; terminals are folded
//! into the hash-keyed result set as soon as they appear, so memory holds
//! one pending branch per open choice plus the unique results.

use log::debug;

use super::{finalize, TraversalStrategy};
use crate::core::SimResult;
use crate::search::branch::Branch;
use crate::search::collector::Collector;
use crate::search::context::SearchContext;
use crate::search::expand::drive;
use crate::search::results::UniqueResults;

#[derive(Clone, Copy, Debug, Default)]
pub struct DepthFirstStrategy;

impl TraversalStrategy for DepthFirstStrategy {
    fn name(&self) -> &'static str {
        "depth-first"
    }

    fn visit(&self, branch: Branch, collector: &mut Collector, ctx: &SearchContext) -> SimResult<()> {
        finalize(branch, collector, ctx);
        Ok(())
    }

    fn post_process(&self, root: Branch, ctx: &SearchContext) -> SimResult<Collector> {
        let mut collector = Collector::new(ctx.config.equivalence);
        drive(self, root, &mut collector, ctx)?;
        debug!(
            "depth-first: {} terminals, {} unique",
            ctx.tree.finalized(),
            collector.results.len()
        );
        Ok(collector)
    }

    fn unique_results(&self, collected: Collector, _ctx: &SearchContext) -> UniqueResults {
        UniqueResults::new(collected.results.into_items())
    }
}
