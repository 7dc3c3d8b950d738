//! Copy-on-write game state.
//!
//! - [`Record`]: shared attribute payload
//! - [`Entity`]: per-game proxy over a record
//! - [`Game`]: entity table, queue, change tracking and cloning

pub mod entity;
pub mod game;
pub mod record;

pub use entity::Entity;
pub use game::{Delta, Game};
pub use record::Record;
