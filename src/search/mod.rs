//! Outcome enumeration.
//!
//! ## Overview
//!
//! The search intercepts every choice point in a root game, clones the game
//! once per possible outcome (weight `1/N`), and keeps going until every
//! line of play is terminal. Equivalent terminals merge by summing
//! probability; the result is the exact distribution over distinct
//! outcomes.
//!
//! ## Usage
//!
//! ```ignore
//! let mut search = OutcomeSearch::new(
//!     SearchConfig::default()
//!         .with_strategy(StrategyKind::BreadthFirst)
//!         .with_parallel_levels(true),
//! );
//! let results = search.run_action(root, source, instruction)?;
//! for outcome in results.iter() {
//!     println!("{:.4} {:x}", outcome.probability, outcome.hash);
//! }
//! ```

pub mod branch;
pub mod collector;
pub mod config;
pub mod context;
pub mod expand;
pub mod orchestrator;
pub mod results;
pub mod stats;
pub mod strategy;
pub mod tree;

pub use branch::Branch;
pub use collector::{Collector, KeyedSet, Weighted};
pub use config::{SearchConfig, StrategyKind};
pub use context::SearchContext;
pub use orchestrator::{OutcomeSearch, SearchPhase};
pub use results::{Outcome, UniqueResults};
pub use stats::SearchStats;
pub use strategy::{BreadthFirstStrategy, DepthFirstStrategy, NaiveStrategy, TraversalStrategy};
pub use tree::{BranchNode, NodeId, SearchTree};
