//! Fuzzy state equivalence: structural hashing and exact snapshots.

pub mod equivalence;
pub mod hash;

pub use equivalence::{equivalent, EntitySignature, EquivalenceMode, Snapshot};
pub use hash::{board_weight, branch_key, entity_hash, game_hash, mix};
