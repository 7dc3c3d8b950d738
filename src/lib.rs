//! # ccg-outcomes
//!
//! Exact outcome enumeration for card-game simulations.
//!
//! Given a game state and a pending action, the engine explores every
//! random or player choice the action can hit and returns the distribution
//! over distinct resulting states.
//!
//! ## Design Principles
//!
//! 1. **Cheap Clones**: Entity attribute records are shared between clones
//!    and copied on first write. Instruction queues use `im-rs` vectors.
//!
//! 2. **Interceptable Choices**: Every choice goes through the instruction
//!    queue. A game either resolves it with its own RNG or hands it back to
//!    the caller as a choice point.
//!
//! 3. **Fuzzy Equivalence**: States are compared by an order-independent
//!    structural hash that ignores entity IDs and bookkeeping tags, so lines
//!    of play that end in the same position merge.
//!
//! ## Architecture
//!
//! - **Strategies**: Naive (collect then compare), depth-first (merge at
//!   terminals) and breadth-first (merge after every state change).
//!
//! - **Parallelism**: Children of a choice point or chunks of a frontier run
//!   on a bounded `rayon` pool; per-worker collectors are merged at the end.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, players, tags, RNG, configuration, errors
//! - `cards`: Card templates
//! - `state`: Copy-on-write entities and the `Game` state
//! - `queue`: Instruction queue, observers and the tick loop
//! - `fuzzy`: Structural hashing and state equivalence
//! - `search`: Branching, collectors, strategies and the search driver
//! - `games`: Reference games

pub mod cards;
pub mod core;
pub mod fuzzy;
pub mod games;
pub mod queue;
pub mod search;
pub mod state;

// Re-export commonly used types
pub use crate::core::{
    EntityId, GameConfig, GameRng, PlayerId, PlayerMap, SimError, SimResult, Tag, Zone,
};

pub use crate::cards::{CardDefinition, CardId};

pub use crate::state::{Delta, Entity, Game, Record};

pub use crate::queue::{
    Action, ChoiceKind, ChoicePoint, ChoicePolicy, ChoiceSpace, Flow, Instruction,
    InstructionQueue, QueueObserver, RunStatus, Tick, TickInfo, Value,
};

pub use crate::fuzzy::{branch_key, equivalent, game_hash, EquivalenceMode, Snapshot};

pub use crate::search::{
    Branch, BreadthFirstStrategy, Collector, DepthFirstStrategy, NaiveStrategy, Outcome,
    OutcomeSearch, SearchConfig, SearchPhase, SearchStats, SearchTree, StrategyKind,
    TraversalStrategy, UniqueResults,
};
