//! Entity attribute tags and zones.
//!
//! Every mutable entity property is a numeric attribute keyed by a `Tag`.
//! Absent tags read as `0`, so writing `0` and never writing are
//! indistinguishable to the fuzzy hash.
//!
//! ## State Values (i64 only)
//!
//! - Booleans: 0/1
//! - Entity references: `EntityId.0 as i64`
//! - Enums: see [`Zone::value`]

use serde::{Deserialize, Serialize};

/// Key for an entity attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tag {
    /// Current zone, encoded with [`Zone::value`].
    Zone,
    /// Position inside the zone. Only meaningful on the battlefield.
    ZonePosition,
    /// Index of the controlling player.
    Controller,
    /// Maximum health.
    Health,
    /// Damage taken.
    Damage,
    /// Attack value.
    Attack,
    /// Mana cost.
    Cost,
    /// Already attacked or otherwise spent this turn.
    Exhausted,
    /// Marked for the next death sweep.
    ToBeDestroyed,
    /// Entity that last touched this one. Cosmetic.
    LastAffectedBy,
    /// Has a deathrattle.
    Deathrattle,
    /// Game-defined attribute.
    Custom(u16),
}

impl Tag {
    /// Stable numeric code used when hashing.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Tag::Zone => 1,
            Tag::ZonePosition => 2,
            Tag::Controller => 3,
            Tag::Health => 4,
            Tag::Damage => 5,
            Tag::Attack => 6,
            Tag::Cost => 7,
            Tag::Exhausted => 8,
            Tag::ToBeDestroyed => 9,
            Tag::LastAffectedBy => 10,
            Tag::Deathrattle => 11,
            Tag::Custom(n) => 1000 + n as u32,
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tag::Custom(n) => write!(f, "Custom({})", n),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Zone an entity lives in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// No zone (players, set-up entities).
    #[default]
    Invalid,
    /// The shared battlefield. Position here is significant.
    Play,
    Deck,
    Hand,
    Graveyard,
    SetAside,
}

impl Zone {
    /// Encode as an attribute value.
    #[must_use]
    pub const fn value(self) -> i64 {
        match self {
            Zone::Invalid => 0,
            Zone::Play => 1,
            Zone::Deck => 2,
            Zone::Hand => 3,
            Zone::Graveyard => 4,
            Zone::SetAside => 5,
        }
    }

    /// Decode an attribute value. Unknown values map to `Invalid`.
    #[must_use]
    pub const fn from_value(value: i64) -> Self {
        match value {
            1 => Zone::Play,
            2 => Zone::Deck,
            3 => Zone::Hand,
            4 => Zone::Graveyard,
            5 => Zone::SetAside,
            _ => Zone::Invalid,
        }
    }
}
