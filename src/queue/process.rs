//! The interpreter loop.
//!
//! One tick pops the front instruction of the innermost block, binds its
//! arguments off the result stack, consults `before` observers, executes,
//! consults `after` observers and pushes the result. Drained nested blocks
//! are then closed (firing their callbacks) and, once nothing is left
//! anywhere, observers get `queue_emptied`.

use std::sync::Arc;

use log::trace;

use super::instruction::{ChoiceKind, ChoicePolicy, Instruction, PendingInstruction};
use super::observer::{Flow, QueueObserver, TickInfo};
use super::value::Value;
use crate::core::{EntityId, SimError, SimResult};
use crate::state::Game;

/// Outcomes a choice point can take.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChoiceSpace {
    Entities(Vec<EntityId>),
    Range { min: i64, max: i64 },
}

impl ChoiceSpace {
    /// Every outcome, each equally likely. An empty candidate list has the
    /// single outcome `Nothing`.
    pub fn outcomes(&self) -> SimResult<Vec<Value>> {
        match self {
            ChoiceSpace::Entities(ids) if ids.is_empty() => Ok(vec![Value::Nothing]),
            ChoiceSpace::Entities(ids) => Ok(ids.iter().copied().map(Value::Entity).collect()),
            ChoiceSpace::Range { min, max } if min > max => Err(SimError::InvalidRange {
                min: *min,
                max: *max,
            }),
            ChoiceSpace::Range { min, max } => Ok((*min..=*max).map(Value::Int).collect()),
        }
    }
}

/// An intercepted choice handed back to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoicePoint {
    pub source: EntityId,
    pub space: ChoiceSpace,
}

impl ChoicePoint {
    #[must_use]
    pub fn kind(&self) -> ChoiceKind {
        match self.space {
            ChoiceSpace::Entities(_) => ChoiceKind::Entity,
            ChoiceSpace::Range { .. } => ChoiceKind::Number,
        }
    }
}

/// Result of a single tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    /// An instruction ran and its result, if any, was pushed.
    Executed,
    /// An observer cancelled the tick.
    Cancelled,
    /// A choice was consumed and handed back.
    Intercepted(ChoicePoint),
    /// Nothing to do: drained or paused.
    Idle,
}

/// Why `process_all` stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunStatus {
    Drained,
    Paused,
    Intercepted(ChoicePoint),
}

enum Step {
    Done(Option<Value>),
    Intercepted(ChoicePoint),
}

impl Game {
    /// Run one instruction.
    pub fn process_one(&mut self) -> SimResult<Tick> {
        self.settle_blocks()?;
        if self.queue.is_paused() {
            return Ok(Tick::Idle);
        }
        let Some(mut pending) = self.queue.pop_front() else {
            return Ok(Tick::Idle);
        };

        let name = pending.name();
        pending.args = self.queue.take_args(name, pending.instruction.arity())?;

        let observers = self.queue.observers();
        if observers.iter().any(|o| o.before(self, &pending) == Flow::Cancel) {
            pending.cancelled = true;
            trace!("game {}: {} cancelled before execution", self.id(), name);
            self.finish_tick(&observers)?;
            return Ok(Tick::Cancelled);
        }

        let history_start = self.history.len();
        self.ticking = true;
        let step = self.execute(&pending);
        self.ticking = false;

        let result = match step? {
            Step::Done(result) => result,
            Step::Intercepted(point) => {
                trace!("game {}: {} intercepted", self.id(), name);
                return Ok(Tick::Intercepted(point));
            }
        };

        let tick = TickInfo {
            source: pending.source,
            name,
            result,
            history_start,
        };
        let mut flow = Flow::Continue;
        for observer in observers.iter() {
            if observer.after(self, &tick)? == Flow::Cancel {
                flow = Flow::Cancel;
                break;
            }
        }

        match (flow, tick.result) {
            (Flow::Continue, Some(value)) => self.queue.push_result(value),
            (Flow::Cancel, _) => trace!("game {}: {} result dropped", self.id(), name),
            _ => {}
        }

        self.finish_tick(&observers)?;

        trace!("game {}: ran {}", self.id(), name);
        Ok(if flow == Flow::Cancel {
            Tick::Cancelled
        } else {
            Tick::Executed
        })
    }

    /// Run until drained, paused or intercepted.
    pub fn process_all(&mut self) -> SimResult<RunStatus> {
        loop {
            match self.process_one()? {
                Tick::Intercepted(point) => return Ok(RunStatus::Intercepted(point)),
                Tick::Idle if self.queue.is_paused() => return Ok(RunStatus::Paused),
                Tick::Idle => return Ok(RunStatus::Drained),
                Tick::Executed | Tick::Cancelled => {}
            }
        }
    }

    fn execute(&mut self, pending: &PendingInstruction) -> SimResult<Step> {
        match &pending.instruction {
            Instruction::Action(action) => action
                .execute(self, pending.source, &pending.args)
                .map(Step::Done),
            Instruction::Fixed(value) => Ok(Step::Done(Some(value.clone()))),
            Instruction::ChooseEntity => {
                let candidates = match pending.args.first() {
                    Some(value) => value.as_entities("ChooseEntity")?.to_vec(),
                    None => Vec::new(),
                };
                match self.queue.policy(ChoiceKind::Entity) {
                    ChoicePolicy::Intercept => Ok(Step::Intercepted(ChoicePoint {
                        source: pending.source,
                        space: ChoiceSpace::Entities(candidates),
                    })),
                    ChoicePolicy::Resolve => {
                        let picked = self
                            .rng
                            .gen_index(candidates.len())
                            .map_or(Value::Nothing, |i| Value::Entity(candidates[i]));
                        Ok(Step::Done(Some(picked)))
                    }
                }
            }
            Instruction::ChooseNumber { min, max } => {
                if min > max {
                    return Err(SimError::InvalidRange {
                        min: *min,
                        max: *max,
                    });
                }
                match self.queue.policy(ChoiceKind::Number) {
                    ChoicePolicy::Intercept => Ok(Step::Intercepted(ChoicePoint {
                        source: pending.source,
                        space: ChoiceSpace::Range {
                            min: *min,
                            max: *max,
                        },
                    })),
                    ChoicePolicy::Resolve => {
                        let n = self.rng.gen_inclusive(*min, *max);
                        Ok(Step::Done(Some(Value::Int(n))))
                    }
                }
            }
        }
    }

    /// Settle blocks after a tick and report a fully drained queue.
    fn finish_tick(&mut self, observers: &[Arc<dyn QueueObserver>]) -> SimResult<()> {
        self.settle_blocks()?;
        if self.queue.is_empty() {
            for observer in observers {
                observer.queue_emptied(self)?;
            }
            self.settle_blocks()?;
        }
        Ok(())
    }

    /// Close drained nested blocks, innermost first.
    fn settle_blocks(&mut self) -> SimResult<()> {
        while let Some(block) = self.queue.pop_drained_block() {
            if let Some(on_empty) = block.on_empty {
                on_empty(self)?;
            }
        }
        Ok(())
    }
}
