//! Per-game configuration.
//!
//! A `GameConfig` is fixed when a root `Game` is built and shared by every
//! clone in its lineage. Separate roots may use different configurations
//! and run concurrently without interfering.

use serde::{Deserialize, Serialize};

use super::tag::Tag;

/// Configuration threaded through a game and all of its clones.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of players (1-255).
    pub player_count: usize,

    /// Battlefield slots per player. Used to weight board positions
    /// in the structural hash.
    pub board_capacity: usize,

    /// Share attribute records between clones until first write.
    /// When false every clone deep-copies every record.
    pub copy_on_write: bool,

    /// Cache the structural hash until the next attribute write.
    pub cache_hash: bool,

    /// Extra tags left out of the structural hash.
    pub ignored_tags: Vec<Tag>,

    /// Seed for resolving choice points that are not intercepted.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            board_capacity: 7,
            copy_on_write: true,
            cache_hash: true,
            ignored_tags: Vec::new(),
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Set the number of players.
    #[must_use]
    pub fn with_players(mut self, player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");
        self.player_count = player_count;
        self
    }

    /// Set the number of battlefield slots per player.
    #[must_use]
    pub fn with_board_capacity(mut self, capacity: usize) -> Self {
        self.board_capacity = capacity;
        self
    }

    /// Enable or disable copy-on-write records.
    #[must_use]
    pub fn with_copy_on_write(mut self, enabled: bool) -> Self {
        self.copy_on_write = enabled;
        self
    }

    /// Enable or disable structural hash caching.
    #[must_use]
    pub fn with_hash_cache(mut self, enabled: bool) -> Self {
        self.cache_hash = enabled;
        self
    }

    /// Leave an additional tag out of the structural hash.
    #[must_use]
    pub fn ignoring(mut self, tag: Tag) -> Self {
        if !self.ignored_tags.contains(&tag) {
            self.ignored_tags.push(tag);
        }
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
