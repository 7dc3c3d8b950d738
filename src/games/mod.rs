//! Reference games built on the engine.

pub mod minions;
