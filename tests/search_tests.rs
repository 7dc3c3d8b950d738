//! Outcome search integration tests using the minion reference game.

use std::sync::Arc;

use ccg_outcomes::core::{EntityId, GameConfig, PlayerId, SimResult, Tag, Zone};
use ccg_outcomes::fuzzy::{branch_key, equivalent, EquivalenceMode};
use ccg_outcomes::games::minions::{self, cards};
use ccg_outcomes::queue::{Action, Instruction, Value};
use ccg_outcomes::state::Game;
use ccg_outcomes::search::{NodeId, OutcomeSearch, SearchConfig, SearchPhase, StrategyKind, UniqueResults};

const STRATEGIES: [StrategyKind; 3] = [
    StrategyKind::Naive,
    StrategyKind::DepthFirst,
    StrategyKind::BreadthFirst,
];

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn run_scenario(config: SearchConfig) -> (UniqueResults, OutcomeSearch) {
    init_logging();
    let (root, sprite) = minions::deathrattle_scenario().unwrap();
    let mut search = OutcomeSearch::new(config);
    let results = search
        .run_action(root, sprite, minions::destroy(sprite))
        .unwrap();
    (results, search)
}

/// `(n)`: mark the game, then open a block whose callback records `n`.
/// Every line ends up with the same state and the same pending work until
/// the callback runs.
#[derive(Debug)]
struct DeferredStamp;

impl Action for DeferredStamp {
    fn name(&self) -> &'static str {
        "DeferredStamp"
    }

    fn arity(&self) -> usize {
        1
    }

    fn execute(&self, game: &mut Game, source: EntityId, args: &[Value]) -> SimResult<Option<Value>> {
        let n = args[0].as_int(self.name())?;
        game.set(source, Tag::Custom(1), 1)?;
        game.push_block(
            source,
            [Instruction::action(Idle)],
            Some(Arc::new(move |g: &mut Game| g.set(EntityId(0), Tag::Custom(7), n))),
        );
        Ok(None)
    }
}

#[derive(Debug)]
struct Idle;

impl Action for Idle {
    fn name(&self) -> &'static str {
        "Idle"
    }

    fn execute(&self, _game: &mut Game, _source: EntityId, _args: &[Value]) -> SimResult<Option<Value>> {
        Ok(None)
    }
}

fn assert_same_distribution(a: &UniqueResults, b: &UniqueResults) {
    let a = a.distribution();
    let b = b.distribution();
    assert_eq!(a.len(), b.len());
    for ((ha, pa), (hb, pb)) in a.iter().zip(&b) {
        assert_eq!(ha, hb);
        assert!((pa - pb).abs() < 1e-9, "{pa} vs {pb}");
    }
}

// =============================================================================
// Fuzzy Equivalence
// =============================================================================

#[test]
fn test_identical_clones_are_equivalent() {
    let (mut root, _) = minions::deathrattle_scenario().unwrap();
    let mut clone = root.try_clone().unwrap();

    assert!(equivalent(&mut root, &mut clone, EquivalenceMode::HashOnly));
    assert!(equivalent(&mut root, &mut clone, EquivalenceMode::Exact));
    assert_eq!(branch_key(&mut root), branch_key(&mut clone));
}

#[test]
fn test_pending_work_separates_branch_keys() {
    let (mut root, sprite) = minions::deathrattle_scenario().unwrap();
    let mut clone = root.try_clone().unwrap();
    clone.enqueue(sprite, minions::destroy(sprite));

    assert_eq!(root.state_hash(), clone.state_hash());
    assert_ne!(branch_key(&mut root), branch_key(&mut clone));
}

#[test]
fn test_cosmetic_tags_do_not_matter() {
    let (mut root, _) = minions::deathrattle_scenario().unwrap();
    let mut clone = root.try_clone().unwrap();
    let target = clone.board(PlayerId::new(1))[0];
    clone.set(target, Tag::LastAffectedBy, 3).unwrap();

    assert!(equivalent(&mut root, &mut clone, EquivalenceMode::HashOnly));
}

#[test]
fn test_swapped_identical_minions_are_equivalent() {
    let (mut a, _) = minions::deathrattle_scenario().unwrap();
    let mut b = a.try_clone().unwrap();
    let stones = a.board(PlayerId::new(1));

    a.set(stones[0], Tag::Damage, 1).unwrap();
    b.set(stones[1], Tag::Damage, 1).unwrap();
    // Same minion, different slot.
    assert!(!equivalent(&mut a, &mut b, EquivalenceMode::HashOnly));

    b.set(stones[1], Tag::ZonePosition, 0).unwrap();
    b.set(stones[0], Tag::ZonePosition, 1).unwrap();
    assert!(equivalent(&mut a, &mut b, EquivalenceMode::HashOnly));
    assert!(equivalent(&mut a, &mut b, EquivalenceMode::Exact));
}

// =============================================================================
// Deathrattle Scenario
// =============================================================================

#[test]
fn test_scenario_distribution() {
    let (results, search) = run_scenario(SearchConfig::default());

    assert_eq!(search.phase(), SearchPhase::Done);
    assert_eq!(results.len(), 5);
    assert!((results.total_probability() - 1.0).abs() < 1e-7);

    let probs = results.probabilities();
    assert!((probs[0] - 0.5).abs() < 1e-9);
    for p in &probs[1..] {
        assert!((p - 0.125).abs() < 1e-9);
    }
}

#[test]
fn test_scenario_lethal_outcome() {
    let (results, _) = run_scenario(SearchConfig::default().with_strategy(StrategyKind::DepthFirst));
    assert_eq!(results.total_branches(), 8);
    let lethal = results
        .iter()
        .find(|o| (o.probability - 0.5).abs() < 1e-9)
        .unwrap();

    let game = &lethal.game;
    assert_eq!(game.board(PlayerId::new(0)).len(), 2);
    let enemies = game.board(PlayerId::new(1));
    assert_eq!(enemies.len(), 1);
    assert_eq!(game.get(enemies[0], Tag::Damage).unwrap(), 0);
    assert_eq!(game.get(enemies[0], Tag::ZonePosition).unwrap(), 0);
    assert_eq!(game.in_zone(Zone::Graveyard).len(), 2);
    assert_eq!(lethal.branches, 4);
}

#[test]
fn test_strategies_agree() {
    let (reference, _) = run_scenario(SearchConfig::default().with_strategy(StrategyKind::Naive));
    for kind in STRATEGIES {
        let (results, search) = run_scenario(SearchConfig::default().with_strategy(kind));
        assert_eq!(results.len(), 5, "{}", search.strategy_name());
        assert_same_distribution(&reference, &results);
    }
}

#[test]
fn test_naive_keeps_every_terminal() {
    let (_, search) = run_scenario(SearchConfig::default().with_strategy(StrategyKind::Naive));
    let stats = search.stats();

    assert_eq!(stats.terminals, 8);
    assert_eq!(stats.clones, 10);
    assert_eq!(stats.unique, 5);
    assert_eq!(stats.merged, 3);
}

#[test]
fn test_depth_first_counts() {
    let (_, search) = run_scenario(SearchConfig::default().with_strategy(StrategyKind::DepthFirst));
    let stats = search.stats();

    assert_eq!(stats.clones, 10);
    assert_eq!(stats.terminals, 8);
    assert_eq!(stats.max_depth, 2);
    assert!(stats.dedup_ratio() > 0.0);
}

#[test]
fn test_breadth_first_runs_levels() {
    let (_, search) = run_scenario(SearchConfig::default().with_strategy(StrategyKind::BreadthFirst));
    assert!(search.stats().levels >= 2);
}

#[test]
fn test_exact_mode_matches_hash_mode() {
    for kind in STRATEGIES {
        let (hashed, _) = run_scenario(SearchConfig::default().with_strategy(kind));
        let (exact, _) = run_scenario(
            SearchConfig::default()
                .with_strategy(kind)
                .with_equivalence(EquivalenceMode::Exact),
        );
        assert_same_distribution(&hashed, &exact);
    }
}

#[test]
fn test_parallel_matches_sequential() {
    for kind in STRATEGIES {
        let (sequential, _) = run_scenario(SearchConfig::default().with_strategy(kind));
        let (parallel, search) = run_scenario(
            SearchConfig::default()
                .with_strategy(kind)
                .with_parallel_clones(true)
                .with_parallel_levels(true)
                .with_min_parallel_frontier(1)
                .with_workers(4),
        );
        assert!(search.config().is_parallel());
        assert_same_distribution(&sequential, &parallel);
        assert!((parallel.total_probability() - 1.0).abs() < 1e-7);
    }
}

#[test]
fn test_tree_tracking() {
    let (results, search) = run_scenario(
        SearchConfig::default()
            .with_strategy(StrategyKind::DepthFirst)
            .with_tree_tracking(true),
    );
    let tree = search.tree().unwrap();

    assert!(tree.is_tracking());
    assert_eq!(tree.len(), 11);
    let root = NodeId::new(0);
    assert!(tree.node(root).unwrap().parent.is_none());
    assert_eq!(tree.children(root).len(), 2);

    for outcome in results.iter() {
        let node = tree.node(outcome.node).unwrap();
        assert!(node.terminal);
        assert_eq!(node.depth, 2);
        assert!((node.probability - 0.125).abs() < 1e-9);
    }
}

#[test]
fn test_tree_untracked_by_default() {
    let (results, search) = run_scenario(SearchConfig::default());
    let tree = search.tree().unwrap();

    assert!(!tree.is_tracking());
    assert!(tree.is_empty());
    assert!(results.iter().all(|o| o.node.is_none()));
}

// =============================================================================
// Other Roots
// =============================================================================

#[test]
fn test_empty_enemy_board() {
    init_logging();
    let mut root = minions::new_game(GameConfig::default());
    let sprite = minions::summon(&mut root, &Arc::new(cards::volatile_sprite()), PlayerId::new(0)).unwrap();

    for kind in STRATEGIES {
        let mut search = OutcomeSearch::new(SearchConfig::default().with_strategy(kind));
        let results = search
            .run_action(root.try_clone().unwrap(), sprite, minions::destroy(sprite))
            .unwrap();
        // No target: every damage roll lands on nothing.
        assert_eq!(results.len(), 1);
        assert!((results.total_probability() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_chained_deathrattles() {
    init_logging();
    let mut root = minions::new_game(GameConfig::default());
    let sprite = Arc::new(cards::volatile_sprite());
    let mine = minions::summon(&mut root, &sprite, PlayerId::new(0)).unwrap();
    minions::summon(&mut root, &sprite, PlayerId::new(1)).unwrap();

    let mut totals = Vec::new();
    for kind in STRATEGIES {
        let mut search = OutcomeSearch::new(SearchConfig::default().with_strategy(kind));
        let results = search
            .run_action(root.try_clone().unwrap(), mine, minions::destroy(mine))
            .unwrap();
        assert!((results.total_probability() - 1.0).abs() < 1e-9);
        totals.push(results.distribution());
    }
    // Either sprite dying kills the other; both deathrattles fire and the
    // second finds no target.
    assert!(totals.iter().all(|d| d.len() == 1));
    assert_eq!(totals[0][0].0, totals[1][0].0);
    assert_eq!(totals[1][0].0, totals[2][0].0);
}

#[test]
fn test_custom_source_instruction() {
    init_logging();
    let mut root = minions::new_game(GameConfig::default());
    let stone = minions::summon(&mut root, &Arc::new(cards::stonehide()), PlayerId::new(1)).unwrap();
    root.enqueue(EntityId(0), Instruction::Fixed(Value::Entity(stone)));
    root.enqueue(EntityId(0), Instruction::choose_number(0, 2));

    let mut search = OutcomeSearch::new(SearchConfig::default());
    let results = search
        .run_action(root, EntityId(0), Instruction::action(minions::DealDamage))
        .unwrap();
    // 0, 1 and 2 damage are all distinct.
    assert_eq!(results.len(), 3);
}

#[test]
fn test_pending_callbacks_keep_lines_apart() {
    init_logging();
    let reference = {
        let mut root = Game::new(GameConfig::default());
        root.enqueue(EntityId(0), Instruction::choose_number(1, 2));
        let mut search = OutcomeSearch::new(SearchConfig::default().with_strategy(StrategyKind::Naive));
        search
            .run_action(root, EntityId(0), Instruction::action(DeferredStamp))
            .unwrap()
    };
    assert_eq!(reference.len(), 2);

    for kind in STRATEGIES {
        let mut root = Game::new(GameConfig::default());
        root.enqueue(EntityId(0), Instruction::choose_number(1, 2));
        let mut search = OutcomeSearch::new(SearchConfig::default().with_strategy(kind));
        let results = search
            .run_action(root, EntityId(0), Instruction::action(DeferredStamp))
            .unwrap();

        assert_eq!(results.len(), 2, "{}", search.strategy_name());
        assert_eq!(results.probabilities(), vec![0.5, 0.5]);
        assert_same_distribution(&reference, &results);
    }
}
