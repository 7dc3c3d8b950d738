//! Outcome search driver.
//!
//! `OutcomeSearch` turns on choice interception in the root game, builds
//! the per-run context (tree counters, worker pool), and runs the selected
//! strategy through its phases:
//!
//! `Idle` → `Expanding` (`post_process`) → `Finalizing` (`unique_results`) → `Done`

use std::time::Instant;

use log::info;

use super::branch::Branch;
use super::config::SearchConfig;
use super::context::SearchContext;
use super::results::UniqueResults;
use super::stats::SearchStats;
use super::strategy::{self, TraversalStrategy};
use super::tree::SearchTree;
use crate::core::{EntityId, SimResult};
use crate::queue::{ChoiceKind, ChoicePolicy, Instruction};
use crate::state::Game;

/// Where the current or last run is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchPhase {
    #[default]
    Idle,
    Expanding,
    Finalizing,
    Done,
}

/// Enumerates every distinct outcome of a root game's pending work.
///
/// ```
/// use ccg_outcomes::games::minions;
/// use ccg_outcomes::search::{OutcomeSearch, SearchConfig};
///
/// let (root, sprite) = minions::deathrattle_scenario().unwrap();
/// let mut search = OutcomeSearch::new(SearchConfig::default());
/// let results = search.run_action(root, sprite, minions::destroy(sprite)).unwrap();
///
/// assert_eq!(results.len(), 5);
/// assert!((results.total_probability() - 1.0).abs() < 1e-7);
/// ```
pub struct OutcomeSearch {
    config: SearchConfig,
    strategy: Box<dyn TraversalStrategy>,
    phase: SearchPhase,
    stats: SearchStats,
    tree: Option<SearchTree>,
}

impl OutcomeSearch {
    /// Create a search using the strategy named in `config`.
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self {
            strategy: strategy::for_kind(config.strategy),
            config,
            phase: SearchPhase::Idle,
            stats: SearchStats::default(),
            tree: None,
        }
    }

    /// Use a custom strategy instead of the configured one.
    #[must_use]
    pub fn with_strategy<S: TraversalStrategy + 'static>(mut self, strategy: S) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    /// Expand everything pending in `root`.
    pub fn run(&mut self, mut root: Game) -> SimResult<UniqueResults> {
        let start = Instant::now();
        let ctx = SearchContext::new(self.config.clone())?;

        root.replace_choice(ChoiceKind::Entity, ChoicePolicy::Intercept);
        root.replace_choice(ChoiceKind::Number, ChoicePolicy::Intercept);

        info!(
            "{:<24}{:<16}{} pending",
            "search starting",
            self.strategy.name(),
            root.queue().len()
        );

        self.phase = SearchPhase::Expanding;
        let strategy = self.strategy.as_ref();
        let root = Branch::root(root, &ctx.tree);
        let collected = match ctx.install(|| strategy.post_process(root, &ctx)) {
            Ok(collected) => collected,
            Err(err) => {
                self.phase = SearchPhase::Idle;
                return Err(err);
            }
        };

        self.phase = SearchPhase::Finalizing;
        let results = self.strategy.unique_results(collected, &ctx);

        let elapsed = start.elapsed().as_micros() as u64;
        self.stats = SearchStats::from_tree(&ctx.tree, results.len(), elapsed);
        self.tree = Some(ctx.into_tree());
        self.phase = SearchPhase::Done;

        info!(
            "{:<24}{:<16}{} unique of {} terminals, {} clones, {}us",
            "search finished",
            self.strategy.name(),
            self.stats.unique,
            self.stats.terminals,
            self.stats.clones,
            self.stats.time_us
        );
        Ok(results)
    }

    /// Queue `instruction` on `root` from `source`, then run.
    pub fn run_action(
        &mut self,
        mut root: Game,
        source: EntityId,
        instruction: Instruction,
    ) -> SimResult<UniqueResults> {
        root.enqueue(source, instruction);
        self.run(root)
    }

    #[must_use]
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Statistics of the last completed run.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Tree of the last completed run.
    #[must_use]
    pub fn tree(&self) -> Option<&SearchTree> {
        self.tree.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }
}
