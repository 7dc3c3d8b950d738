//! Instructions and pending queue entries.
//!
//! The instruction set is closed: game-specific work is an opaque
//! [`Action`], and the two nondeterministic kinds are first-class variants
//! the search can intercept. `Fixed` is the pre-chosen outcome the search
//! inserts at the front of a clone's queue in place of a choice.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::value::Value;
use crate::core::{EntityId, SimResult};
use crate::state::Game;

/// Caller-supplied instruction body.
///
/// `execute` receives its arguments in call order: the value pushed first
/// by earlier instructions is `args[0]`.
pub trait Action: fmt::Debug + Send + Sync {
    /// Stable name, used in logs and errors.
    fn name(&self) -> &'static str;

    /// Number of values popped off the result stack before execution.
    fn arity(&self) -> usize {
        0
    }

    /// Run against the game. `Some(value)` is pushed onto the result stack.
    fn execute(&self, game: &mut Game, source: EntityId, args: &[Value]) -> SimResult<Option<Value>>;

    /// Feed everything that distinguishes this action into `state`.
    /// Actions carrying parameters must include them.
    fn fingerprint(&self, state: &mut dyn Hasher) {
        state.write(self.name().as_bytes());
    }
}

/// The two interceptable choice kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChoiceKind {
    /// Pick one entity out of a candidate list.
    Entity,
    /// Pick an integer uniformly from an inclusive range.
    Number,
}

impl ChoiceKind {
    pub(crate) const fn index(self) -> usize {
        match self {
            ChoiceKind::Entity => 0,
            ChoiceKind::Number => 1,
        }
    }
}

/// How the queue treats a choice kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChoicePolicy {
    /// Draw the outcome from the game RNG and continue.
    #[default]
    Resolve,
    /// Consume the instruction without a result and hand the choice back
    /// to the caller.
    Intercept,
}

/// One step of work.
#[derive(Clone, Debug)]
pub enum Instruction {
    Action(Arc<dyn Action>),
    /// Pops an entity list and yields one of its members.
    ChooseEntity,
    /// Yields an integer in `[min, max]`.
    ChooseNumber { min: i64, max: i64 },
    /// Yields a predetermined value.
    Fixed(Value),
}

impl Instruction {
    /// Wrap an action.
    pub fn action(action: impl Action + 'static) -> Self {
        Instruction::Action(Arc::new(action))
    }

    /// Uniform integer choice.
    #[must_use]
    pub const fn choose_number(min: i64, max: i64) -> Self {
        Instruction::ChooseNumber { min, max }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Instruction::Action(action) => action.name(),
            Instruction::ChooseEntity => "ChooseEntity",
            Instruction::ChooseNumber { .. } => "ChooseNumber",
            Instruction::Fixed(_) => "Fixed",
        }
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Instruction::Action(action) => action.arity(),
            Instruction::ChooseEntity => 1,
            Instruction::ChooseNumber { .. } | Instruction::Fixed(_) => 0,
        }
    }

    /// Which choice kind this is, if any.
    #[must_use]
    pub fn choice_kind(&self) -> Option<ChoiceKind> {
        match self {
            Instruction::ChooseEntity => Some(ChoiceKind::Entity),
            Instruction::ChooseNumber { .. } => Some(ChoiceKind::Number),
            _ => None,
        }
    }

    pub fn fingerprint(&self, mut state: &mut dyn Hasher) {
        match self {
            Instruction::Action(action) => {
                state.write_u8(0);
                action.fingerprint(state);
            }
            Instruction::ChooseEntity => state.write_u8(1),
            Instruction::ChooseNumber { min, max } => {
                state.write_u8(2);
                state.write_i64(*min);
                state.write_i64(*max);
            }
            Instruction::Fixed(value) => {
                state.write_u8(3);
                value.hash(&mut state);
            }
        }
    }
}

/// An instruction waiting in a block, with the entity that queued it.
#[derive(Clone, Debug)]
pub struct PendingInstruction {
    pub source: EntityId,
    pub instruction: Instruction,
    /// Bound when the instruction is popped.
    pub args: SmallVec<[Value; 2]>,
    pub cancelled: bool,
}

impl PendingInstruction {
    #[must_use]
    pub fn new(source: EntityId, instruction: Instruction) -> Self {
        Self {
            source,
            instruction,
            args: SmallVec::new(),
            cancelled: false,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.instruction.name()
    }

    pub(crate) fn fingerprint(&self, state: &mut dyn Hasher) {
        state.write_u32(self.source.raw());
        self.instruction.fingerprint(state);
    }
}
