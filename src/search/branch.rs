//! Probabilistic branches.
//!
//! A `Branch` owns one game plus its place in the outcome space: the
//! conditional weight it was forked with and the cumulative probability
//! from the root.

use rayon::prelude::*;

use super::tree::{NodeId, SearchTree};
use crate::core::SimResult;
use crate::state::Game;

/// One live line of play.
#[derive(Debug)]
pub struct Branch {
    pub game: Game,
    pub node: NodeId,
    /// Probability of this branch given its parent.
    pub weight: f64,
    /// Probability of reaching this branch from the root.
    pub probability: f64,
}

impl Branch {
    /// Wrap the root game (probability 1).
    pub fn root(game: Game, tree: &SearchTree) -> Self {
        let node = tree.add_root(game.id());
        Self {
            game,
            node,
            weight: 1.0,
            probability: 1.0,
        }
    }

    /// Clone the game into a child branch with the given weight.
    pub fn branch(&self, weight: f64, tree: &SearchTree) -> SimResult<Branch> {
        let game = self.game.try_clone()?;
        let probability = self.probability * weight;
        let node = tree.add_child(self.node, weight, probability, game.id(), game.depth());
        tree.record_clones(1);
        tree.record_depth(game.depth());
        Ok(Branch {
            game,
            node,
            weight,
            probability,
        })
    }

    /// One child per weight, in order. Cloned concurrently when `parallel`.
    pub fn branch_many(&self, weights: &[f64], tree: &SearchTree, parallel: bool) -> SimResult<Vec<Branch>> {
        if parallel && weights.len() > 1 {
            weights.par_iter().map(|w| self.branch(*w, tree)).collect()
        } else {
            weights.iter().map(|w| self.branch(*w, tree)).collect()
        }
    }

    /// Take over the probability mass of an equivalent branch.
    pub fn absorb(&mut self, other: Branch) {
        self.probability += other.probability;
    }
}
