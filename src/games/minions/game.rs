//! Board setup and death bookkeeping for the reference game.

use std::sync::Arc;

use crate::cards::CardDefinition;
use crate::core::{EntityId, GameConfig, PlayerId, SimError, SimResult, Tag, Zone};
use crate::queue::{Flow, Instruction, QueueObserver, TickInfo};
use crate::state::Game;

use super::actions::{sweep_if_marked, Destroy};
use super::cards;

/// Marks minions whose damage reached their health, and starts a death
/// sweep once the queue runs dry.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeathCheck;

impl QueueObserver for DeathCheck {
    fn after(&self, game: &mut Game, tick: &TickInfo) -> SimResult<Flow> {
        let mut damaged: Vec<EntityId> = game
            .deltas_since(tick.history_start)
            .filter(|d| d.tag == Tag::Damage && d.new > d.old)
            .map(|d| d.entity)
            .collect();
        damaged.sort_unstable();
        damaged.dedup();

        for id in damaged {
            if is_lethal(game, id)? {
                game.set(id, Tag::ToBeDestroyed, 1)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn queue_emptied(&self, game: &mut Game) -> SimResult<()> {
        sweep_if_marked(game)
    }
}

fn is_lethal(game: &Game, id: EntityId) -> SimResult<bool> {
    let entity = game.entity(id).ok_or(SimError::UnknownEntity(id))?;
    let health = entity.get(Tag::Health);
    Ok(entity.is_on_board() && health > 0 && entity.get(Tag::Damage) >= health)
}

/// Empty game with death processing wired in.
#[must_use]
pub fn new_game(config: GameConfig) -> Game {
    let mut game = Game::new(config);
    game.add_observer(Arc::new(DeathCheck));
    game
}

/// Put a new minion at the right end of `controller`'s board.
pub fn summon(game: &mut Game, card: &Arc<CardDefinition>, controller: PlayerId) -> SimResult<EntityId> {
    let slot = game.board(controller).len();
    if slot >= game.config().board_capacity {
        return Err(SimError::Action {
            name: "Summon",
            reason: format!("{} board is full", controller),
        });
    }
    let id = game.add_entity(Arc::clone(card), controller);
    game.set(id, Tag::Zone, Zone::Play.value())?;
    game.set(id, Tag::ZonePosition, slot as i64)?;
    Ok(id)
}

/// Instruction that kills `target` at the next sweep.
#[must_use]
pub fn destroy(target: EntityId) -> Instruction {
    Instruction::action(Destroy { target })
}

/// Player 0: Wisp, Volatile Sprite, Wisp. Player 1: two Stonehides.
///
/// Returns the root game and the Sprite. Destroying the Sprite fans out
/// into 2 targets x 4 damage rolls = 8 lines, which collapse to 5 distinct
/// outcomes: 1 or 2 damage on either Stonehide (1/8 each), or the target
/// dies (4/8).
pub fn deathrattle_scenario() -> SimResult<(Game, EntityId)> {
    let mut game = new_game(GameConfig::default());
    let wisp = Arc::new(cards::wisp());
    let stonehide = Arc::new(cards::stonehide());
    let a = PlayerId::new(0);
    let b = PlayerId::new(1);

    summon(&mut game, &wisp, a)?;
    let sprite = summon(&mut game, &Arc::new(cards::volatile_sprite()), a)?;
    summon(&mut game, &wisp, a)?;
    summon(&mut game, &stonehide, b)?;
    summon(&mut game, &stonehide, b)?;
    Ok((game, sprite))
}
