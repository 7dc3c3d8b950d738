//! Structural ("fuzzy") hashing.
//!
//! ## Entity Hash
//!
//! Seeded with the mixed card id, then every hashed `(tag, value)` pair is
//! mixed and added with wrapping arithmetic, so attribute iteration order
//! never matters. Zero values are skipped: an attribute set to `0` hashes
//! like one that was never written.
//!
//! Not hashed:
//! - `LastAffectedBy`
//! - `ZonePosition` while the entity is off the battlefield
//! - anything in `GameConfig::ignored_tags`
//!
//! ## Game Hash
//!
//! Wrapping sum of entity hashes. Battlefield entities are first multiplied
//! by their slot weight `controller * capacity + position + 1`, which makes
//! board order significant while everything else stays order-free.
//!
//! Entity ids never enter either hash, so siblings that allocated the same
//! ids for different entities still compare structurally.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::core::{Tag, Zone};
use crate::state::{Entity, Game};

/// 64-bit finalizer (splitmix64).
#[inline]
#[must_use]
pub fn mix(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// True when `tag` contributes to the hash of `entity`.
#[must_use]
pub fn is_hashed(tag: Tag, entity: &Entity, ignored: &[Tag]) -> bool {
    match tag {
        Tag::LastAffectedBy => false,
        Tag::ZonePosition if entity.zone() != Zone::Play => false,
        _ => !ignored.contains(&tag),
    }
}

/// Attributes of `entity` that take part in structural comparison.
pub fn hashed_tags<'a>(
    entity: &'a Entity,
    ignored: &'a [Tag],
) -> impl Iterator<Item = (Tag, i64)> + 'a {
    entity
        .tags()
        .filter(move |(tag, value)| *value != 0 && is_hashed(*tag, entity, ignored))
}

/// Order-independent hash of one entity.
#[must_use]
pub fn entity_hash(entity: &Entity, ignored: &[Tag]) -> u64 {
    hashed_tags(entity, ignored).fold(mix(u64::from(entity.card().id.raw())), |acc, (tag, value)| {
        let mut hasher = FxHasher::default();
        tag.code().hash(&mut hasher);
        value.hash(&mut hasher);
        acc.wrapping_add(mix(hasher.finish()))
    })
}

/// Multiplier applied to an entity's hash. `1` off the battlefield.
#[must_use]
pub fn board_weight(entity: &Entity, capacity: usize) -> u64 {
    if entity.is_on_board() {
        let controller = entity.controller().index() as u64;
        controller * capacity as u64 + entity.position().max(0) as u64 + 1
    } else {
        1
    }
}

/// Structural hash of a whole game. Uncached; see [`Game::state_hash`].
#[must_use]
pub fn game_hash(game: &Game) -> u64 {
    let config = game.config();
    game.entities().fold(0u64, |acc, entity| {
        let weight = board_weight(entity, config.board_capacity);
        acc.wrapping_add(entity_hash(entity, &config.ignored_tags).wrapping_mul(weight))
    })
}

/// Key identifying a branch: its state plus its remaining work.
///
/// Two branches with equal state but different pending instructions (for
/// example different pre-chosen outcomes) get different keys.
pub fn branch_key(game: &mut Game) -> u64 {
    let mut hasher = FxHasher::default();
    game.state_hash().hash(&mut hasher);
    game.queue().fingerprint(&mut hasher);
    hasher.finish()
}
