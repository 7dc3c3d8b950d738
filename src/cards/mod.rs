//! Card templates.
//!
//! A `CardDefinition` is the immutable part of an entity. Loading card data
//! is left to the caller; this module only defines the template type.

pub mod definition;

pub use definition::{CardDefinition, CardId};
