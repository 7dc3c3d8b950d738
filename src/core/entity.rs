//! Entity identification.
//!
//! Every object in a simulated game (player, minion, spell) has an `EntityId`.
//!
//! ## ID Layout
//!
//! - `0..player_count`: reserved for players
//! - `player_count..`: allocated in order by the owning `Game`
//!
//! IDs are stable within one lineage of clones. Two sibling branches that
//! each create a new entity from the same counter value hand out the same
//! ID for unrelated entities, so IDs must never be compared across branches.
//!
//! ```
//! use ccg_outcomes::core::EntityId;
//!
//! let player_count = 2;
//! assert!(EntityId::player_id(1).is_player(player_count));
//! assert!(!EntityId(5).is_player(player_count));
//! ```

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Unique identifier for a game entity within one lineage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Entity ID of the player with the given index.
    #[must_use]
    pub const fn player_id(index: u8) -> Self {
        Self(index as u32)
    }

    /// Entity ID of a player.
    #[must_use]
    pub const fn player(id: PlayerId) -> Self {
        Self(id.0 as u32)
    }

    /// First ID available for non-player entities.
    #[must_use]
    pub const fn first_non_player(player_count: usize) -> u32 {
        player_count as u32
    }

    /// Check if this ID refers to a player.
    #[must_use]
    pub const fn is_player(self, player_count: usize) -> bool {
        self.0 < player_count as u32
    }

    /// Convert to a `PlayerId` if this is a player entity.
    ///
    /// ```
    /// use ccg_outcomes::core::{EntityId, PlayerId};
    ///
    /// assert_eq!(EntityId(1).as_player(2), Some(PlayerId::new(1)));
    /// assert_eq!(EntityId(2).as_player(2), None);
    /// ```
    #[must_use]
    pub fn as_player(self, player_count: usize) -> Option<PlayerId> {
        if self.is_player(player_count) {
            Some(PlayerId::new(self.0 as u8))
        } else {
            None
        }
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_ids() {
        assert_eq!(EntityId::player_id(0).0, 0);
        assert_eq!(EntityId::player_id(3).0, 3);
        assert_eq!(EntityId::player(PlayerId::new(2)).0, 2);
    }

    #[test]
    fn test_is_player() {
        assert!(EntityId(0).is_player(2));
        assert!(EntityId(1).is_player(2));
        assert!(!EntityId(2).is_player(2));
        assert!(!EntityId(100).is_player(2));
    }

    #[test]
    fn test_first_non_player() {
        assert_eq!(EntityId::first_non_player(2), 2);
        assert_eq!(EntityId::first_non_player(4), 4);
    }

    #[test]
    fn test_ordering() {
        let mut ids = vec![EntityId(7), EntityId(2), EntityId(5)];
        ids.sort();
        assert_eq!(ids, vec![EntityId(2), EntityId(5), EntityId(7)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EntityId(42)), "Entity(42)");
    }

    #[test]
    fn test_serialization() {
        let id = EntityId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
