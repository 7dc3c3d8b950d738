//! Naive traversal.
//!
//! Keeps every terminal and only deduplicates once the run is over, by
//! comparing each outcome's multiset of weighted entity hashes against every
//! unique outcome found so far. Quadratic, and the baseline the other
//! strategies are checked against.

use log::debug;

use super::TraversalStrategy;
use crate::core::SimResult;
use crate::fuzzy::{board_weight, entity_hash, EquivalenceMode, Snapshot};
use crate::search::branch::Branch;
use crate::search::collector::Collector;
use crate::search::context::SearchContext;
use crate::search::expand::drive;
use crate::search::results::{Outcome, UniqueResults};
use crate::state::Game;

#[derive(Clone, Copy, Debug, Default)]
pub struct NaiveStrategy;

#[derive(PartialEq, Eq)]
enum EntitySet {
    Hashes(Vec<u64>),
    Exact(Snapshot),
}

impl EntitySet {
    fn of(game: &Game, mode: EquivalenceMode) -> Self {
        match mode {
            EquivalenceMode::HashOnly => {
                let config = game.config();
                let mut hashes: Vec<_> = game
                    .entities()
                    .map(|e| {
                        entity_hash(e, &config.ignored_tags)
                            .wrapping_mul(board_weight(e, config.board_capacity))
                    })
                    .collect();
                hashes.sort_unstable();
                EntitySet::Hashes(hashes)
            }
            EquivalenceMode::Exact => EntitySet::Exact(Snapshot::of(game)),
        }
    }
}

impl TraversalStrategy for NaiveStrategy {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn visit(&self, branch: Branch, collector: &mut Collector, ctx: &SearchContext) -> SimResult<()> {
        ctx.tree.mark_terminal(branch.node);
        ctx.tree.record_finalized();
        collector.raw.push(Outcome::from_branch(branch));
        Ok(())
    }

    fn post_process(&self, root: Branch, ctx: &SearchContext) -> SimResult<Collector> {
        let mut collector = Collector::new(ctx.config.equivalence);
        drive(self, root, &mut collector, ctx)?;
        debug!("naive: {} raw terminals", collector.raw.len());
        Ok(collector)
    }

    fn unique_results(&self, collected: Collector, ctx: &SearchContext) -> UniqueResults {
        let mode = ctx.config.equivalence;
        let mut unique: Vec<(EntitySet, Outcome)> = Vec::new();
        for outcome in collected.raw {
            let set = EntitySet::of(&outcome.game, mode);
            match unique.iter_mut().find(|(seen, _)| *seen == set) {
                Some((_, kept)) => {
                    kept.absorb(outcome);
                    ctx.tree.record_merged(1);
                }
                None => unique.push((set, outcome)),
            }
        }
        UniqueResults::new(unique.into_iter().map(|(_, outcome)| outcome).collect())
    }
}
