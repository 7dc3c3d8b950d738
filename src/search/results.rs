//! Terminal outcomes and the deduplicated result set.

use super::branch::Branch;
use super::tree::NodeId;
use crate::state::Game;

/// A terminal game and the probability mass that reached it.
#[derive(Debug)]
pub struct Outcome {
    pub game: Game,
    pub probability: f64,
    /// Structural hash of `game`.
    pub hash: u64,
    /// Raw terminal branches folded into this outcome.
    pub branches: usize,
    pub node: NodeId,
}

impl Outcome {
    /// Finalize a branch.
    pub fn from_branch(mut branch: Branch) -> Self {
        let hash = branch.game.state_hash();
        Self {
            game: branch.game,
            probability: branch.probability,
            hash,
            branches: 1,
            node: branch.node,
        }
    }

    /// Take over the mass of an equivalent outcome.
    pub fn absorb(&mut self, other: Outcome) {
        self.probability += other.probability;
        self.branches += other.branches;
    }
}

/// Unique terminal games with their cumulative probabilities, ordered by
/// hash.
#[derive(Debug, Default)]
pub struct UniqueResults {
    outcomes: Vec<Outcome>,
}

impl UniqueResults {
    #[must_use]
    pub fn new(mut outcomes: Vec<Outcome>) -> Self {
        outcomes.sort_by(|a, b| a.hash.cmp(&b.hash).then(a.probability.total_cmp(&b.probability)));
        Self { outcomes }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter()
    }

    #[must_use]
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn into_outcomes(self) -> Vec<Outcome> {
        self.outcomes
    }

    /// Sum of all outcome probabilities. `1.0` for a complete search.
    #[must_use]
    pub fn total_probability(&self) -> f64 {
        self.outcomes.iter().map(|o| o.probability).sum()
    }

    /// Raw terminal branches across all outcomes.
    #[must_use]
    pub fn total_branches(&self) -> usize {
        self.outcomes.iter().map(|o| o.branches).sum()
    }

    /// Probability of the outcome with structural hash `hash`.
    #[must_use]
    pub fn probability_of(&self, hash: u64) -> Option<f64> {
        self.outcomes
            .iter()
            .find(|o| o.hash == hash)
            .map(|o| o.probability)
    }

    /// `(hash, probability)` pairs, ordered by hash.
    #[must_use]
    pub fn distribution(&self) -> Vec<(u64, f64)> {
        self.outcomes.iter().map(|o| (o.hash, o.probability)).collect()
    }

    /// Outcome probabilities, largest first.
    #[must_use]
    pub fn probabilities(&self) -> Vec<f64> {
        let mut probs: Vec<_> = self.outcomes.iter().map(|o| o.probability).collect();
        probs.sort_by(|a, b| b.total_cmp(a));
        probs
    }
}

impl IntoIterator for UniqueResults {
    type Item = Outcome;
    type IntoIter = std::vec::IntoIter<Outcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EntityId, GameConfig, Tag};
    use crate::search::SearchTree;

    fn outcome(damage: i64, probability: f64) -> Outcome {
        let mut game = Game::new(GameConfig::default());
        game.set(EntityId(0), Tag::Damage, damage).unwrap();
        let tree = SearchTree::new(false);
        let mut branch = Branch::root(game, &tree);
        branch.probability = probability;
        Outcome::from_branch(branch)
    }

    #[test]
    fn test_absorb() {
        let mut a = outcome(1, 0.25);
        let b = outcome(1, 0.5);
        assert_eq!(a.hash, b.hash);
        a.absorb(b);
        assert!((a.probability - 0.75).abs() < 1e-12);
        assert_eq!(a.branches, 2);
    }

    #[test]
    fn test_results_summary() {
        let results = UniqueResults::new(vec![outcome(1, 0.25), outcome(2, 0.75)]);
        assert_eq!(results.len(), 2);
        assert!((results.total_probability() - 1.0).abs() < 1e-12);
        assert_eq!(results.total_branches(), 2);
        assert_eq!(results.probabilities(), vec![0.75, 0.25]);

        let (hash, probability) = results.distribution()[0];
        assert_eq!(results.probability_of(hash), Some(probability));
    }
}
