//! Resumable instruction queue.
//!
//! ## Model
//!
//! - Work is a stack of blocks of [`PendingInstruction`]s; nested blocks
//!   finish before their parent resumes.
//! - Instructions pop their arguments off a shared result stack and may push
//!   one result back.
//! - [`QueueObserver`]s see every tick and may cancel it.
//! - The two choice kinds are resolved with the game RNG or, under
//!   [`ChoicePolicy::Intercept`], handed back to the caller as a
//!   [`ChoicePoint`]. The search clones at that point and feeds each clone a
//!   [`Instruction::Fixed`] outcome.

pub mod instruction;
pub mod observer;
pub mod process;
pub mod store;
pub mod value;

pub use instruction::{Action, ChoiceKind, ChoicePolicy, Instruction, PendingInstruction};
pub use observer::{Flow, QueueObserver, TickInfo};
pub use process::{ChoicePoint, ChoiceSpace, RunStatus, Tick};
pub use store::{BlockCallback, InstructionQueue};
pub use value::Value;
