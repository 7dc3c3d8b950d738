//! Traversal strategies.
//!
//! A strategy decides how branches are scheduled and when terminals are
//! deduplicated. All three produce the same distribution for the same root;
//! they differ in memory use, parallelism and how early duplicates merge.
//!
//! | Strategy | Dedup | Parallelism |
//! |----------|-------|-------------|
//! | [`NaiveStrategy`] | pairwise, after the run | clone-level |
//! | [`DepthFirstStrategy`] | on every terminal | clone-level |
//! | [`BreadthFirstStrategy`] | frontier and terminals, per level | clone-level and level partitions |

pub mod breadth_first;
pub mod depth_first;
pub mod naive;

pub use breadth_first::BreadthFirstStrategy;
pub use depth_first::DepthFirstStrategy;
pub use naive::NaiveStrategy;

use super::branch::Branch;
use super::collector::Collector;
use super::config::StrategyKind;
use super::context::SearchContext;
use super::results::UniqueResults;
use crate::core::SimResult;

/// Common contract of the traversal strategies.
pub trait TraversalStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// A branch stopped: its queue drained or paused.
    fn visit(&self, branch: Branch, collector: &mut Collector, ctx: &SearchContext) -> SimResult<()>;

    /// An instruction changed the branch's state hash. Return the branch to
    /// keep running it, or `None` once it has been filed elsewhere.
    fn post_action(
        &self,
        branch: Branch,
        _collector: &mut Collector,
        _ctx: &SearchContext,
    ) -> SimResult<Option<Branch>> {
        Ok(Some(branch))
    }

    /// Expand everything reachable from `root`.
    fn post_process(&self, root: Branch, ctx: &SearchContext) -> SimResult<Collector>;

    /// Turn what `post_process` collected into the final result set.
    fn unique_results(&self, collected: Collector, ctx: &SearchContext) -> UniqueResults;
}

/// Instantiate the strategy selected by `kind`.
#[must_use]
pub fn for_kind(kind: StrategyKind) -> Box<dyn TraversalStrategy> {
    match kind {
        StrategyKind::Naive => Box::new(NaiveStrategy),
        StrategyKind::DepthFirst => Box::new(DepthFirstStrategy),
        StrategyKind::BreadthFirst => Box::new(BreadthFirstStrategy),
    }
}

/// Fold a terminal branch into the deduplicated results.
pub(crate) fn finalize(branch: Branch, collector: &mut Collector, ctx: &SearchContext) {
    ctx.tree.mark_terminal(branch.node);
    ctx.tree.record_finalized();
    if !collector.add_result(super::results::Outcome::from_branch(branch)) {
        ctx.tree.record_merged(1);
    }
}
