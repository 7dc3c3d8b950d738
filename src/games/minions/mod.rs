//! Minimal minion-combat game used to exercise the outcome search.
//!
//! - Two players, each with a board of up to `board_capacity` minions
//! - Minions have attack, health and accumulated damage
//! - Damage at or above health marks a minion; a death sweep moves marked
//!   minions to the graveyard and closes the gap on their board
//! - Volatile Sprite's deathrattle deals 1-4 damage to a random enemy
//!   minion, which gives the search one entity choice and one number choice

pub mod actions;
pub mod cards;
mod game;

pub use actions::{deathrattle, marked, DealDamage, Destroy, ProcessDeaths, SelectEnemyMinions};
pub use game::{deathrattle_scenario, destroy, new_game, summon, DeathCheck};
