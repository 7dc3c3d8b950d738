//! Core engine types: identifiers, tags, RNG, configuration, errors.
//!
//! These are shared by the state model, the instruction queue and the search.

pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;
pub mod tag;

pub use config::GameConfig;
pub use entity::EntityId;
pub use error::{SimError, SimResult};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use tag::{Tag, Zone};
