//! Error type shared by the queue, the state container and the search.
//!
//! Every variant is a programming error in the caller's instruction set or
//! set-up. None of them are retried: a search that hits one stops and hands
//! the error back.

use thiserror::Error;

use super::entity::EntityId;

/// Errors raised while simulating or searching.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("{instruction} needs {needed} arguments but the result stack holds {available}")]
    StackUnderflow {
        instruction: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("{instruction} expected {expected}, found {found}")]
    ArgumentType {
        instruction: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("unknown entity: {0}")]
    UnknownEntity(EntityId),

    #[error("game {0} cannot be cloned while an instruction is executing")]
    CloneMidTick(u64),

    #[error("invalid choice range [{min}, {max}]")]
    InvalidRange { min: i64, max: i64 },

    #[error("action {name} failed: {reason}")]
    Action { name: &'static str, reason: String },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result alias used throughout the crate.
pub type SimResult<T> = Result<T, SimError>;
