//! Expansion shared by all strategies.
//!
//! [`fork`] turns a choice point into one child branch per outcome, each
//! with `Fixed(outcome)` waiting at the front of its queue. [`drive`] runs a
//! branch to completion for strategies that only care about terminals,
//! forking at every choice point and handing finished branches to
//! `TraversalStrategy::visit`.

use log::trace;
use rayon::prelude::*;

use super::branch::Branch;
use super::collector::Collector;
use super::context::SearchContext;
use super::strategy::TraversalStrategy;
use crate::core::SimResult;
use crate::queue::{ChoicePoint, Instruction, RunStatus};

/// One child per outcome of `point`, each with weight `1 / outcomes`.
pub fn fork(branch: &Branch, point: &ChoicePoint, ctx: &SearchContext) -> SimResult<Vec<Branch>> {
    let outcomes = point.space.outcomes()?;
    let weights = vec![1.0 / outcomes.len() as f64; outcomes.len()];
    let mut children = branch.branch_many(&weights, &ctx.tree, ctx.config.parallel_clones)?;
    for (child, outcome) in children.iter_mut().zip(outcomes) {
        child.game.enqueue_front(point.source, Instruction::Fixed(outcome));
    }
    trace!(
        "game {}: forked {} children at depth {}",
        branch.game.id(),
        children.len(),
        branch.game.depth()
    );
    Ok(children)
}

/// Run `root` and everything forked from it until every line is terminal.
pub fn drive(
    strategy: &dyn TraversalStrategy,
    root: Branch,
    collector: &mut Collector,
    ctx: &SearchContext,
) -> SimResult<()> {
    let mut pending = vec![root];
    while let Some(mut branch) = pending.pop() {
        match branch.game.process_all()? {
            RunStatus::Drained | RunStatus::Paused => strategy.visit(branch, collector, ctx)?,
            RunStatus::Intercepted(point) => {
                let children = fork(&branch, &point, ctx)?;
                if ctx.config.parallel_clones && children.len() > 1 {
                    let mode = collector.mode();
                    let partials: Vec<_> = children
                        .into_par_iter()
                        .map(|child| {
                            let mut local = Collector::new(mode);
                            drive(strategy, child, &mut local, ctx).map(|()| local)
                        })
                        .collect();
                    gather(collector, partials, ctx)?;
                } else {
                    pending.extend(children.into_iter().rev());
                }
            }
        }
    }
    Ok(())
}

/// Merge every successful partial into `collector`, then report the first
/// failure, if any.
pub fn gather(
    collector: &mut Collector,
    partials: Vec<SimResult<Collector>>,
    ctx: &SearchContext,
) -> SimResult<()> {
    let mut failure = None;
    for partial in partials {
        match partial {
            Ok(local) => ctx.tree.record_merged(collector.merge(local)),
            Err(err) if failure.is_none() => failure = Some(err),
            Err(_) => {}
        }
    }
    failure.map_or(Ok(()), Err)
}
