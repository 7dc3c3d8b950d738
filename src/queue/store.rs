//! Instruction queue storage.
//!
//! A stack of blocks over a shared result stack. The root block is always
//! present; nested blocks are pushed on top and run to completion before
//! the block below them resumes. Blocks are `im::Vector`s so cloning a game
//! mid-run shares the pending work structurally.
//!
//! Execution lives in [`Game::process_one`](crate::state::Game::process_one);
//! this type only stores and orders work.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use im::Vector;
use smallvec::SmallVec;

use super::instruction::{ChoiceKind, ChoicePolicy, PendingInstruction};
use super::observer::QueueObserver;
use super::value::Value;
use crate::core::{SimError, SimResult};
use crate::state::Game;

/// Callback fired when a nested block drains.
pub type BlockCallback = Arc<dyn Fn(&mut Game) -> SimResult<()> + Send + Sync>;

#[derive(Clone, Default)]
pub(crate) struct Block {
    pending: Vector<PendingInstruction>,
    pub(crate) on_empty: Option<BlockCallback>,
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("pending", &self.pending.len())
            .field("on_empty", &self.on_empty.is_some())
            .finish()
    }
}

/// Pending work, results and interception settings for one game.
#[derive(Clone, Debug)]
pub struct InstructionQueue {
    blocks: Vec<Block>,
    stack: Vec<Value>,
    paused: bool,
    policies: [ChoicePolicy; 2],
    observers: Arc<Vec<Arc<dyn QueueObserver>>>,
}

impl Default for InstructionQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InstructionQueue {
    /// Empty queue with only the root block.
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::default()],
            stack: Vec::new(),
            paused: false,
            policies: [ChoicePolicy::Resolve; 2],
            observers: Arc::new(Vec::new()),
        }
    }

    // === Pending work ===

    /// Append to the current block and notify observers.
    pub fn enqueue(&mut self, pending: PendingInstruction) {
        for observer in self.observers.iter() {
            observer.queued(&pending);
        }
        self.top_mut().pending.push_back(pending);
    }

    /// Insert at the front of the current block. No notifications.
    pub fn enqueue_front(&mut self, pending: PendingInstruction) {
        self.top_mut().pending.push_front(pending);
    }

    /// Open a nested block holding `pending`.
    pub fn push_block(&mut self, pending: Vec<PendingInstruction>, on_empty: Option<BlockCallback>) {
        self.blocks.push(Block {
            pending: pending.into_iter().collect(),
            on_empty,
        });
    }

    pub(crate) fn pop_front(&mut self) -> Option<PendingInstruction> {
        self.top_mut().pending.pop_front()
    }

    /// Remove the top block if it is nested and drained.
    pub(crate) fn pop_drained_block(&mut self) -> Option<Block> {
        if self.blocks.len() > 1 && self.blocks.last().is_some_and(|b| b.pending.is_empty()) {
            self.blocks.pop()
        } else {
            None
        }
    }

    fn top_mut(&mut self) -> &mut Block {
        if self.blocks.is_empty() {
            self.blocks.push(Block::default());
        }
        let last = self.blocks.len() - 1;
        &mut self.blocks[last]
    }

    /// True when no block holds pending work.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|b| b.pending.is_empty())
    }

    /// Pending instructions across all blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.iter().map(|b| b.pending.len()).sum()
    }

    /// Number of open blocks, including the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.blocks.len()
    }

    /// Next instruction to run, if any.
    #[must_use]
    pub fn peek(&self) -> Option<&PendingInstruction> {
        self.blocks.iter().rev().find_map(|b| b.pending.front())
    }

    // === Result stack ===

    pub fn push_result(&mut self, value: Value) {
        self.stack.push(value);
    }

    pub fn pop_result(&mut self) -> Option<Value> {
        self.stack.pop()
    }

    /// Current result stack, bottom first.
    #[must_use]
    pub fn results(&self) -> &[Value] {
        &self.stack
    }

    /// Pop `count` values in call order.
    pub(crate) fn take_args(
        &mut self,
        instruction: &'static str,
        count: usize,
    ) -> SimResult<SmallVec<[Value; 2]>> {
        let available = self.stack.len();
        if count > available {
            return Err(SimError::StackUnderflow {
                instruction,
                needed: count,
                available,
            });
        }
        Ok(self.stack.drain(available - count..).collect())
    }

    // === Control ===

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Set how a choice kind is handled.
    pub fn replace_choice(&mut self, kind: ChoiceKind, policy: ChoicePolicy) {
        self.policies[kind.index()] = policy;
    }

    #[must_use]
    pub fn policy(&self, kind: ChoiceKind) -> ChoicePolicy {
        self.policies[kind.index()]
    }

    /// Register an observer after the existing ones.
    pub fn add_observer(&mut self, observer: Arc<dyn QueueObserver>) {
        Arc::make_mut(&mut self.observers).push(observer);
    }

    /// Registered observers, in order.
    #[must_use]
    pub fn observers(&self) -> Arc<Vec<Arc<dyn QueueObserver>>> {
        Arc::clone(&self.observers)
    }

    /// Feed the remaining work and the result stack into `state`.
    ///
    /// Block callbacks are opaque, so they enter by identity: clones of one
    /// block match, separately created callbacks never do.
    pub fn fingerprint(&self, mut state: &mut dyn Hasher) {
        state.write_usize(self.blocks.len());
        for block in &self.blocks {
            let callback = block
                .on_empty
                .as_ref()
                .map_or(0, |cb| Arc::as_ptr(cb).cast::<()>() as usize);
            state.write_usize(callback);
            state.write_usize(block.pending.len());
            for pending in &block.pending {
                pending.fingerprint(state);
            }
        }
        self.stack.hash(&mut state);
        state.write_u8(u8::from(self.paused));
    }
}
