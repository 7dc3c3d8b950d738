//! Queue observers.
//!
//! Observers run in registration order. `before` and `after` may cancel the
//! current tick by returning [`Flow::Cancel`]; the first cancel wins and
//! later observers are not consulted for that hook.

use std::fmt;

use super::instruction::PendingInstruction;
use super::value::Value;
use crate::core::{EntityId, SimResult};
use crate::state::Game;

/// Observer verdict for one hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Cancel,
}

/// What an executed instruction did, handed to `after` hooks.
#[derive(Clone, Debug)]
pub struct TickInfo {
    pub source: EntityId,
    pub name: &'static str,
    /// Value about to be pushed onto the result stack.
    pub result: Option<Value>,
    /// Length of the game's delta history before the instruction ran.
    /// Deltas from this index on were written by it.
    pub history_start: usize,
}

/// Hooks around instruction processing.
pub trait QueueObserver: fmt::Debug + Send + Sync {
    /// An instruction was appended with `enqueue`. Front insertions are silent.
    fn queued(&self, _pending: &PendingInstruction) {}

    /// About to execute. Arguments are already bound.
    fn before(&self, _game: &Game, _pending: &PendingInstruction) -> Flow {
        Flow::Continue
    }

    /// Executed. Cancelling drops the result instead of pushing it.
    fn after(&self, _game: &mut Game, _tick: &TickInfo) -> SimResult<Flow> {
        Ok(Flow::Continue)
    }

    /// Every block has drained.
    fn queue_emptied(&self, _game: &mut Game) -> SimResult<()> {
        Ok(())
    }
}
