//! Card pool of the reference game.

use crate::cards::{CardDefinition, CardId};
use crate::core::Tag;

pub const WISP: CardId = CardId(1);
pub const STONEHIDE: CardId = CardId(2);
pub const VOLATILE_SPRITE: CardId = CardId(3);

fn minion(id: CardId, name: &str, attack: i64, health: i64) -> CardDefinition {
    CardDefinition::new(id, name)
        .with_tag(Tag::Attack, attack)
        .with_tag(Tag::Health, health)
}

/// 1/1 filler.
#[must_use]
pub fn wisp() -> CardDefinition {
    minion(WISP, "Wisp", 1, 1)
}

/// 2/3 filler.
#[must_use]
pub fn stonehide() -> CardDefinition {
    minion(STONEHIDE, "Stonehide", 2, 3)
}

/// 1/1. Deathrattle: deal 1-4 damage to a random enemy minion.
#[must_use]
pub fn volatile_sprite() -> CardDefinition {
    minion(VOLATILE_SPRITE, "Volatile Sprite", 1, 1).with_tag(Tag::Deathrattle, 1)
}
