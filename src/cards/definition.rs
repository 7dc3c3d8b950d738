//! Card definitions - static card data.
//!
//! `CardDefinition` is the immutable template an entity is created from.
//! Records keep an `Arc` to it, so every clone of every entity built from
//! the same card shares one definition.

use serde::{Deserialize, Serialize};

use crate::core::Tag;

/// Identifier for a card definition (the "type" of card, not an instance).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Template used for player entities.
    pub const PLAYER: CardId = CardId(0);

    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Static card definition.
///
/// `base` holds the attribute values copied into a fresh record when an
/// entity is created from this card.
///
/// ```
/// use ccg_outcomes::cards::{CardDefinition, CardId};
/// use ccg_outcomes::core::Tag;
///
/// let raptor = CardDefinition::new(CardId::new(3), "Bloodfen Raptor")
///     .with_tag(Tag::Attack, 3)
///     .with_tag(Tag::Health, 2);
///
/// assert_eq!(raptor.base_value(Tag::Health), 2);
/// assert_eq!(raptor.base_value(Tag::Cost), 0);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name (for display/debugging).
    pub name: String,

    /// Starting attribute values.
    pub base: Vec<(Tag, i64)>,
}

impl CardDefinition {
    /// Create a new card definition.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            base: Vec::new(),
        }
    }

    /// Template for player entities.
    #[must_use]
    pub fn player() -> Self {
        Self::new(CardId::PLAYER, "Player").with_tag(Tag::Health, 30)
    }

    /// Set a starting attribute (builder pattern).
    #[must_use]
    pub fn with_tag(mut self, tag: Tag, value: i64) -> Self {
        match self.base.iter_mut().find(|(t, _)| *t == tag) {
            Some(entry) => entry.1 = value,
            None => self.base.push((tag, value)),
        }
        self
    }

    /// Starting value of a tag, `0` if unset.
    #[must_use]
    pub fn base_value(&self, tag: Tag) -> i64 {
        self.base
            .iter()
            .find(|(t, _)| *t == tag)
            .map_or(0, |(_, v)| *v)
    }
}
