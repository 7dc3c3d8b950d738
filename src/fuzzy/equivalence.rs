//! Equivalence between games.
//!
//! `HashOnly` compares structural hashes and accepts the rare false merge a
//! collision causes. `Exact` additionally compares canonical snapshots,
//! which list every entity by board slot, card and hashed attributes.

use serde::{Deserialize, Serialize};

use super::hash::hashed_tags;
use crate::cards::CardId;
use crate::core::{PlayerId, Tag};
use crate::state::{Entity, Game};

/// How strictly two games must match to be merged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquivalenceMode {
    /// Equal structural hashes.
    #[default]
    HashOnly,
    /// Equal structural hashes and equal snapshots.
    Exact,
}

/// Identity-free description of one entity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntitySignature {
    /// `(controller, position)` on the battlefield.
    pub slot: Option<(PlayerId, i64)>,
    pub card: CardId,
    /// Hashed attributes, sorted.
    pub tags: Vec<(Tag, i64)>,
}

impl EntitySignature {
    #[must_use]
    pub fn of(entity: &Entity, ignored: &[Tag]) -> Self {
        let mut tags: Vec<_> = hashed_tags(entity, ignored).collect();
        tags.sort_unstable();
        Self {
            slot: entity
                .is_on_board()
                .then(|| (entity.controller(), entity.position())),
            card: entity.card().id,
            tags,
        }
    }
}

/// Canonical, order-free description of a game.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Snapshot(Vec<EntitySignature>);

impl Snapshot {
    #[must_use]
    pub fn of(game: &Game) -> Self {
        let ignored = &game.config().ignored_tags;
        let mut signatures: Vec<_> = game
            .entities()
            .map(|e| EntitySignature::of(e, ignored))
            .collect();
        signatures.sort_unstable();
        Self(signatures)
    }

    #[must_use]
    pub fn signatures(&self) -> &[EntitySignature] {
        &self.0
    }
}

/// Whether `a` and `b` describe the same outcome under `mode`.
pub fn equivalent(a: &mut Game, b: &mut Game, mode: EquivalenceMode) -> bool {
    if a.state_hash() != b.state_hash() {
        return false;
    }
    match mode {
        EquivalenceMode::HashOnly => true,
        EquivalenceMode::Exact => Snapshot::of(a) == Snapshot::of(b),
    }
}
