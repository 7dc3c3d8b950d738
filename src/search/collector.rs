//! Accumulation of results and frontiers.
//!
//! Each worker fills its own `Collector`; collectors are merged at join
//! points by summing probabilities of equivalent entries. The merge is
//! commutative and associative, so the order in which workers finish never
//! changes the final distribution.

use rustc_hash::FxHashMap;

use super::branch::Branch;
use super::results::Outcome;
use crate::fuzzy::{EquivalenceMode, Snapshot};

/// An entry that can absorb the probability mass of an equivalent one.
pub trait Weighted {
    fn probability(&self) -> f64;
    fn absorb(&mut self, other: Self);
}

impl Weighted for Outcome {
    fn probability(&self) -> f64 {
        self.probability
    }

    fn absorb(&mut self, other: Self) {
        Outcome::absorb(self, other);
    }
}

impl Weighted for Branch {
    fn probability(&self) -> f64 {
        self.probability
    }

    fn absorb(&mut self, other: Self) {
        Branch::absorb(self, other);
    }
}

#[derive(Debug)]
struct Slot<T> {
    snapshot: Option<Snapshot>,
    item: T,
}

/// Set of weighted entries keyed by hash, optionally verified by snapshot.
#[derive(Debug)]
pub struct KeyedSet<T> {
    mode: EquivalenceMode,
    buckets: FxHashMap<u64, Vec<Slot<T>>>,
    len: usize,
}

impl<T: Weighted> KeyedSet<T> {
    #[must_use]
    pub fn new(mode: EquivalenceMode) -> Self {
        Self {
            mode,
            buckets: FxHashMap::default(),
            len: 0,
        }
    }

    #[must_use]
    pub fn mode(&self) -> EquivalenceMode {
        self.mode
    }

    /// Insert `item`, or fold it into an equivalent entry.
    ///
    /// `snapshot` is consulted only in `Exact` mode. Returns `true` when the
    /// item was new.
    pub fn insert(&mut self, key: u64, snapshot: Option<Snapshot>, item: T) -> bool {
        let bucket = self.buckets.entry(key).or_default();
        let existing = match self.mode {
            EquivalenceMode::HashOnly => bucket.first_mut(),
            EquivalenceMode::Exact => bucket.iter_mut().find(|slot| slot.snapshot == snapshot),
        };
        match existing {
            Some(slot) => {
                slot.item.absorb(item);
                false
            }
            None => {
                bucket.push(Slot { snapshot, item });
                self.len += 1;
                true
            }
        }
    }

    /// Fold every entry of `other` in. Returns how many were absorbed.
    pub fn merge(&mut self, other: KeyedSet<T>) -> usize {
        let mut absorbed = 0;
        for (key, bucket) in other.buckets {
            for slot in bucket {
                if !self.insert(key, slot.snapshot, slot.item) {
                    absorbed += 1;
                }
            }
        }
        absorbed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buckets.values().flatten().map(|slot| &slot.item)
    }

    #[must_use]
    pub fn total_probability(&self) -> f64 {
        self.iter().map(Weighted::probability).sum()
    }

    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.buckets
            .into_values()
            .flatten()
            .map(|slot| slot.item)
            .collect()
    }

    /// Remove and return every entry, keeping the mode.
    pub fn take(&mut self) -> Vec<T> {
        let mode = self.mode;
        std::mem::replace(self, Self::new(mode)).into_items()
    }
}

/// Per-worker accumulation state.
#[derive(Debug)]
pub struct Collector {
    /// Deduplicated terminal outcomes.
    pub results: KeyedSet<Outcome>,
    /// Branches waiting for the next breadth-first level.
    pub frontier: KeyedSet<Branch>,
    /// Terminal outcomes kept without deduplication.
    pub raw: Vec<Outcome>,
}

impl Collector {
    #[must_use]
    pub fn new(mode: EquivalenceMode) -> Self {
        Self {
            results: KeyedSet::new(mode),
            frontier: KeyedSet::new(mode),
            raw: Vec::new(),
        }
    }

    #[must_use]
    pub fn mode(&self) -> EquivalenceMode {
        self.results.mode()
    }

    /// Fold `outcome` into the results. Returns `true` when it was new.
    pub fn add_result(&mut self, mut outcome: Outcome) -> bool {
        let snapshot = self.snapshot_of(&outcome.game);
        outcome.hash = outcome.game.state_hash();
        self.results.insert(outcome.hash, snapshot, outcome)
    }

    /// Queue `branch` for the next level under `key`. Returns `true` when
    /// it was new.
    pub fn add_frontier(&mut self, key: u64, branch: Branch) -> bool {
        let snapshot = self.snapshot_of(&branch.game);
        self.frontier.insert(key, snapshot, branch)
    }

    fn snapshot_of(&self, game: &crate::state::Game) -> Option<Snapshot> {
        match self.mode() {
            EquivalenceMode::HashOnly => None,
            EquivalenceMode::Exact => Some(Snapshot::of(game)),
        }
    }

    /// Fold another collector in. Returns how many entries were absorbed.
    pub fn merge(&mut self, other: Collector) -> usize {
        self.raw.extend(other.raw);
        self.results.merge(other.results) + self.frontier.merge(other.frontier)
    }

    /// Probability mass held in results, frontier and raw outcomes.
    #[must_use]
    pub fn total_probability(&self) -> f64 {
        self.results.total_probability()
            + self.frontier.total_probability()
            + self.raw.iter().map(|o| o.probability).sum::<f64>()
    }
}
