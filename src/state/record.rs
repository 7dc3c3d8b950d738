//! Shared attribute records.
//!
//! A `Record` is the payload behind an entity: its identifier, its card
//! template and its mutable attributes. Records are shared between clones
//! through an `Arc`; the strong count is the number of live proxies, and a
//! write through a shared handle privatizes a copy first (`Arc::make_mut`).

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::cards::CardDefinition;
use crate::core::{EntityId, Tag};

/// Immutable-until-written entity payload.
#[derive(Clone, Debug)]
pub struct Record {
    id: EntityId,
    card: Arc<CardDefinition>,
    tags: FxHashMap<Tag, i64>,
}

impl Record {
    /// Create a record with the card's base attributes.
    #[must_use]
    pub fn new(id: EntityId, card: Arc<CardDefinition>) -> Self {
        let tags = card.base.iter().copied().collect();
        Self { id, card, tags }
    }

    /// Entity identifier this record belongs to.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Card template.
    #[must_use]
    pub fn card(&self) -> &Arc<CardDefinition> {
        &self.card
    }

    /// Attribute value, `0` if unset.
    #[must_use]
    pub fn get(&self, tag: Tag) -> i64 {
        self.tags.get(&tag).copied().unwrap_or(0)
    }

    /// All stored attributes, in no particular order.
    pub fn tags(&self) -> impl Iterator<Item = (Tag, i64)> + '_ {
        self.tags.iter().map(|(t, v)| (*t, *v))
    }

    /// Store a value, returning the previous one.
    pub(crate) fn put(&mut self, tag: Tag, value: i64) -> i64 {
        self.tags.insert(tag, value).unwrap_or(0)
    }
}
