//! The game container.
//!
//! A `Game` owns every entity of one simulated world plus its pending
//! instruction queue. Clones are cheap: entity proxies are reallocated but
//! their records are shared until written, and the queue and delta history
//! are persistent structures.
//!
//! ## Write Path
//!
//! [`Game::set`] clamps to non-negative, skips unchanged values, marks the
//! game dirty and drops the cached hash, privatizes the record if shared,
//! writes, then appends a [`Delta`] to the history.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::cards::CardDefinition;
use crate::core::{EntityId, GameConfig, GameRng, PlayerId, PlayerMap, SimError, SimResult, Tag, Zone};
use crate::queue::{
    BlockCallback, ChoiceKind, ChoicePolicy, Instruction, InstructionQueue, PendingInstruction,
    QueueObserver,
};

static NEXT_GAME_ID: AtomicU64 = AtomicU64::new(1);

fn next_game_id() -> u64 {
    NEXT_GAME_ID.fetch_add(1, Ordering::Relaxed)
}

/// One attribute write, as recorded by the post-write notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    pub entity: EntityId,
    pub tag: Tag,
    pub old: i64,
    pub new: i64,
}

/// One simulated world.
#[derive(Debug)]
pub struct Game {
    id: u64,
    depth: u32,
    config: Arc<GameConfig>,
    entities: FxHashMap<EntityId, Entity>,
    changed: bool,
    cached_hash: Option<u64>,
    next_entity_id: u32,
    pub(crate) queue: InstructionQueue,
    pub(crate) history: Vector<Delta>,
    pub(crate) rng: GameRng,
    pub(crate) ticking: bool,
}

impl Game {
    /// Create a game with one entity per player and an empty queue.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let player_count = config.player_count;
        let mut game = Self {
            id: next_game_id(),
            depth: 0,
            rng: GameRng::new(config.seed),
            config: Arc::new(config),
            entities: FxHashMap::default(),
            changed: true,
            cached_hash: None,
            next_entity_id: 0,
            queue: InstructionQueue::new(),
            history: Vector::new(),
            ticking: false,
        };

        let template = Arc::new(CardDefinition::player());
        for player in PlayerId::all(player_count) {
            game.add_entity(Arc::clone(&template), player);
        }
        debug_assert_eq!(
            game.next_entity_id,
            EntityId::first_non_player(player_count)
        );
        game
    }

    /// Clone for branching.
    ///
    /// Every entity gets a fresh proxy; records are shared unless
    /// copy-on-write is disabled. Fails while an instruction is executing.
    pub fn try_clone(&self) -> SimResult<Game> {
        if self.ticking {
            return Err(SimError::CloneMidTick(self.id));
        }

        let entities = if self.config.copy_on_write {
            self.entities.iter().map(|(id, e)| (*id, e.share())).collect()
        } else {
            self.entities.iter().map(|(id, e)| (*id, e.detach())).collect()
        };

        Ok(Game {
            id: next_game_id(),
            depth: self.depth + 1,
            config: Arc::clone(&self.config),
            entities,
            changed: self.changed,
            cached_hash: self.cached_hash,
            next_entity_id: self.next_entity_id,
            queue: self.queue.clone(),
            history: self.history.clone(),
            rng: self.rng.clone(),
            ticking: false,
        })
    }

    // === Identity ===

    /// Process-unique identifier. Clones never share it.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Number of clones between this game and its root.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    // === Entities ===

    /// Create an entity from `card` under `controller`.
    pub fn add_entity(&mut self, card: Arc<CardDefinition>, controller: PlayerId) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;

        let mut entity = Entity::new(id, card);
        entity.write(Tag::Controller, i64::from(controller.0));
        self.entities.insert(id, entity);
        self.mark_changed();
        id
    }

    /// Next identifier `add_entity` will hand out.
    #[must_use]
    pub fn next_entity_id(&self) -> EntityId {
        EntityId(self.next_entity_id)
    }

    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// All entities, in no particular order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Entity identifiers in ascending order.
    #[must_use]
    pub fn entity_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<_> = self.entities.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Read an attribute.
    pub fn get(&self, id: EntityId, tag: Tag) -> SimResult<i64> {
        self.entities
            .get(&id)
            .map(|e| e.get(tag))
            .ok_or(SimError::UnknownEntity(id))
    }

    /// Write an attribute. Negative values clamp to `0`.
    pub fn set(&mut self, id: EntityId, tag: Tag, value: i64) -> SimResult<()> {
        let value = value.max(0);
        let old = self.get(id, tag)?;
        if old == value {
            return Ok(());
        }

        self.mark_changed();
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(SimError::UnknownEntity(id))?;
        entity.write(tag, value);
        self.history.push_back(Delta {
            entity: id,
            tag,
            old,
            new: value,
        });
        Ok(())
    }

    /// Add `amount` to an attribute.
    pub fn modify(&mut self, id: EntityId, tag: Tag, amount: i64) -> SimResult<()> {
        let current = self.get(id, tag)?;
        self.set(id, tag, current.saturating_add(amount))
    }

    /// Battlefield entities controlled by `player`, by position.
    #[must_use]
    pub fn board(&self, player: PlayerId) -> Vec<EntityId> {
        let mut board: Vec<_> = self
            .entities
            .values()
            .filter(|e| e.is_on_board() && e.controller() == player)
            .map(|e| (e.position(), e.id()))
            .collect();
        board.sort_unstable();
        board.into_iter().map(|(_, id)| id).collect()
    }

    /// Every player's battlefield.
    #[must_use]
    pub fn boards(&self) -> PlayerMap<Vec<EntityId>> {
        PlayerMap::new(self.player_count(), |player| self.board(player))
    }

    /// Entities in `zone`, in ascending id order.
    #[must_use]
    pub fn in_zone(&self, zone: Zone) -> Vec<EntityId> {
        let mut ids: Vec<_> = self
            .entities
            .values()
            .filter(|e| e.zone() == zone)
            .map(Entity::id)
            .collect();
        ids.sort_unstable();
        ids
    }

    // === Change tracking ===

    fn mark_changed(&mut self) {
        self.changed = true;
        self.cached_hash = None;
    }

    /// True when an attribute changed since the hash was last computed.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Structural hash, cached until the next write.
    pub fn state_hash(&mut self) -> u64 {
        if let Some(hash) = self.cached_hash {
            if !self.changed {
                return hash;
            }
        }
        let hash = crate::fuzzy::game_hash(self);
        if self.config.cache_hash {
            self.cached_hash = Some(hash);
        }
        self.changed = false;
        hash
    }

    /// Attribute writes since the root was built, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<Delta> {
        &self.history
    }

    /// Writes recorded at or after `start`.
    pub fn deltas_since(&self, start: usize) -> impl Iterator<Item = &Delta> {
        self.history.iter().skip(start)
    }

    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    // === Queue ===

    #[must_use]
    pub fn queue(&self) -> &InstructionQueue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut InstructionQueue {
        &mut self.queue
    }

    /// Append an instruction to the current block.
    pub fn enqueue(&mut self, source: EntityId, instruction: Instruction) {
        self.queue.enqueue(PendingInstruction::new(source, instruction));
    }

    /// Run an instruction before anything else in the current block.
    pub fn enqueue_front(&mut self, source: EntityId, instruction: Instruction) {
        self.queue.enqueue_front(PendingInstruction::new(source, instruction));
    }

    /// Open a nested block that runs before the rest of the current one.
    pub fn push_block(
        &mut self,
        source: EntityId,
        instructions: impl IntoIterator<Item = Instruction>,
        on_empty: Option<BlockCallback>,
    ) {
        let pending = instructions
            .into_iter()
            .map(|i| PendingInstruction::new(source, i))
            .collect();
        self.queue.push_block(pending, on_empty);
    }

    pub fn replace_choice(&mut self, kind: ChoiceKind, policy: ChoicePolicy) {
        self.queue.replace_choice(kind, policy);
    }

    pub fn add_observer(&mut self, observer: Arc<dyn QueueObserver>) {
        self.queue.add_observer(observer);
    }

    pub fn pause(&mut self) {
        self.queue.pause();
    }

    pub fn resume(&mut self) {
        self.queue.resume();
    }

    /// Drained, or paused awaiting outside input.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.queue.is_empty() || self.queue.is_paused()
    }
}
