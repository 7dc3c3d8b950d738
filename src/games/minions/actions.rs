//! Instructions of the reference game.

use std::hash::Hasher;
use std::sync::Arc;

use crate::core::{EntityId, PlayerId, SimError, SimResult, Tag, Zone};
use crate::queue::{Action, Instruction, Value};
use crate::state::Game;

/// Every minion on the boards of the source's opponents, in board order.
#[derive(Clone, Copy, Debug)]
pub struct SelectEnemyMinions;

impl Action for SelectEnemyMinions {
    fn name(&self) -> &'static str {
        "SelectEnemyMinions"
    }

    fn execute(&self, game: &mut Game, source: EntityId, _args: &[Value]) -> SimResult<Option<Value>> {
        let owner = game
            .entity(source)
            .ok_or(SimError::UnknownEntity(source))?
            .controller();
        let enemies = PlayerId::all(game.player_count())
            .filter(|p| *p != owner)
            .flat_map(|p| game.board(p))
            .collect::<Vec<_>>();
        Ok(Some(Value::Entities(enemies)))
    }
}

/// `(target, amount)`: add damage to the target. A `Nothing` target does
/// nothing.
#[derive(Clone, Copy, Debug)]
pub struct DealDamage;

impl Action for DealDamage {
    fn name(&self) -> &'static str {
        "DealDamage"
    }

    fn arity(&self) -> usize {
        2
    }

    fn execute(&self, game: &mut Game, source: EntityId, args: &[Value]) -> SimResult<Option<Value>> {
        let [target, amount] = args else {
            return Err(SimError::Action {
                name: self.name(),
                reason: format!("expected 2 arguments, got {}", args.len()),
            });
        };
        let Some(target) = target.as_entity(self.name())? else {
            return Ok(None);
        };
        let amount = amount.as_int(self.name())?;
        if amount <= 0 {
            return Ok(None);
        }

        game.modify(target, Tag::Damage, amount)?;
        game.set(target, Tag::LastAffectedBy, i64::from(source.raw()))?;
        Ok(None)
    }
}

/// Mark a minion for the next death sweep.
#[derive(Clone, Copy, Debug)]
pub struct Destroy {
    pub target: EntityId,
}

impl Action for Destroy {
    fn name(&self) -> &'static str {
        "Destroy"
    }

    fn execute(&self, game: &mut Game, _source: EntityId, _args: &[Value]) -> SimResult<Option<Value>> {
        game.set(self.target, Tag::ToBeDestroyed, 1)?;
        Ok(None)
    }

    fn fingerprint(&self, state: &mut dyn Hasher) {
        state.write(self.name().as_bytes());
        state.write_u32(self.target.raw());
    }
}

/// Move every marked minion to the graveyard, close the gaps on its board,
/// and queue deathrattles.
#[derive(Clone, Copy, Debug)]
pub struct ProcessDeaths;

impl Action for ProcessDeaths {
    fn name(&self) -> &'static str {
        "ProcessDeaths"
    }

    fn execute(&self, game: &mut Game, _source: EntityId, _args: &[Value]) -> SimResult<Option<Value>> {
        let mut dying: Vec<(PlayerId, i64, EntityId)> = marked(game)
            .into_iter()
            .filter_map(|id| game.entity(id))
            .map(|e| (e.controller(), e.position(), e.id()))
            .collect();
        // Highest slot first so earlier removals never move a later victim.
        dying.sort_unstable_by(|a, b| b.cmp(a));

        let mut rattles = Vec::new();
        for (controller, position, id) in &dying {
            for neighbour in game.board(*controller) {
                let slot = game.get(neighbour, Tag::ZonePosition)?;
                if slot > *position {
                    game.set(neighbour, Tag::ZonePosition, slot - 1)?;
                }
            }
            game.set(*id, Tag::Zone, Zone::Graveyard.value())?;
            game.set(*id, Tag::ZonePosition, 0)?;
            game.set(*id, Tag::Damage, 0)?;
            game.set(*id, Tag::ToBeDestroyed, 0)?;
            if game.get(*id, Tag::Deathrattle)? != 0 {
                rattles.push(*id);
            }
        }

        // Blocks run last-pushed first; push in reverse board order.
        for id in rattles {
            game.push_block(id, deathrattle(), Some(Arc::new(sweep_if_marked)));
        }
        Ok(None)
    }
}

/// Volatile Sprite's deathrattle.
#[must_use]
pub fn deathrattle() -> Vec<Instruction> {
    vec![
        Instruction::action(SelectEnemyMinions),
        Instruction::ChooseEntity,
        Instruction::choose_number(1, 4),
        Instruction::action(DealDamage),
    ]
}

/// Minions on any board that are marked for destruction.
#[must_use]
pub fn marked(game: &Game) -> Vec<EntityId> {
    game.in_zone(Zone::Play)
        .into_iter()
        .filter(|id| game.get(*id, Tag::ToBeDestroyed).unwrap_or(0) != 0)
        .collect()
}

/// Queue a death sweep when something is marked.
pub fn sweep_if_marked(game: &mut Game) -> SimResult<()> {
    if !marked(game).is_empty() {
        game.enqueue(EntityId::player_id(0), Instruction::action(ProcessDeaths));
    }
    Ok(())
}
