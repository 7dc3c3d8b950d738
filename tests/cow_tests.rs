//! Copy-on-write state tests.

use std::sync::Arc;

use ccg_outcomes::cards::{CardDefinition, CardId};
use ccg_outcomes::core::{EntityId, GameConfig, PlayerId, Tag};
use ccg_outcomes::games::minions::{self, cards};
use ccg_outcomes::state::Game;
use proptest::prelude::*;

fn board_game(config: GameConfig) -> (Game, Vec<EntityId>) {
    let mut game = minions::new_game(config);
    let wisp = Arc::new(cards::wisp());
    let stonehide = Arc::new(cards::stonehide());
    let ids = vec![
        minions::summon(&mut game, &wisp, PlayerId::new(0)).unwrap(),
        minions::summon(&mut game, &stonehide, PlayerId::new(0)).unwrap(),
        minions::summon(&mut game, &stonehide, PlayerId::new(1)).unwrap(),
    ];
    (game, ids)
}

// =============================================================================
// Sharing
// =============================================================================

#[test]
fn test_clone_shares_every_record() {
    let (game, _) = board_game(GameConfig::default());
    let clone = game.try_clone().unwrap();

    assert_eq!(clone.entity_count(), game.entity_count());
    for entity in game.entities() {
        let other = clone.entity(entity.id()).unwrap();
        assert!(entity.shares_record_with(other));
        assert_eq!(entity.share_count(), 2);
    }
}

#[test]
fn test_dropping_clone_releases_exactly_one_share() {
    let (game, ids) = board_game(GameConfig::default());
    let a = game.try_clone().unwrap();
    let b = game.try_clone().unwrap();
    assert_eq!(game.entity(ids[0]).unwrap().share_count(), 3);

    drop(a);
    assert_eq!(game.entity(ids[0]).unwrap().share_count(), 2);
    drop(b);
    assert_eq!(game.entity(ids[0]).unwrap().share_count(), 1);
}

#[test]
fn test_write_detaches_only_written_entity() {
    let (game, ids) = board_game(GameConfig::default());
    let mut clone = game.try_clone().unwrap();

    clone.set(ids[1], Tag::Damage, 2).unwrap();

    assert_eq!(game.get(ids[1], Tag::Damage).unwrap(), 0);
    assert_eq!(clone.get(ids[1], Tag::Damage).unwrap(), 2);
    assert!(!game.entity(ids[1]).unwrap().shares_record_with(clone.entity(ids[1]).unwrap()));
    assert_eq!(game.entity(ids[1]).unwrap().share_count(), 1);

    // Untouched entities still share.
    assert!(game.entity(ids[0]).unwrap().shares_record_with(clone.entity(ids[0]).unwrap()));
    assert_eq!(game.entity(ids[0]).unwrap().share_count(), 2);
}

#[test]
fn test_writing_same_value_keeps_sharing() {
    let (game, ids) = board_game(GameConfig::default());
    let mut clone = game.try_clone().unwrap();
    let health = clone.get(ids[1], Tag::Health).unwrap();

    clone.set(ids[1], Tag::Health, health).unwrap();
    assert!(game.entity(ids[1]).unwrap().shares_record_with(clone.entity(ids[1]).unwrap()));
}

#[test]
fn test_original_writes_do_not_leak_into_clone() {
    let (mut game, ids) = board_game(GameConfig::default());
    let clone = game.try_clone().unwrap();

    game.set(ids[2], Tag::Attack, 9).unwrap();
    assert_eq!(clone.get(ids[2], Tag::Attack).unwrap(), 2);
    assert_eq!(game.get(ids[2], Tag::Attack).unwrap(), 9);
}

#[test]
fn test_deep_copy_without_copy_on_write() {
    let (game, _) = board_game(GameConfig::default().with_copy_on_write(false));
    let clone = game.try_clone().unwrap();

    for entity in game.entities() {
        let other = clone.entity(entity.id()).unwrap();
        assert!(!entity.shares_record_with(other));
        assert_eq!(entity.share_count(), 1);
        assert_eq!(entity.tags().count(), other.tags().count());
    }
}

#[test]
fn test_clone_identity() {
    let (game, _) = board_game(GameConfig::default());
    let child = game.try_clone().unwrap();
    let grandchild = child.try_clone().unwrap();

    assert_ne!(game.id(), child.id());
    assert_ne!(child.id(), grandchild.id());
    assert_eq!(grandchild.depth(), game.depth() + 2);
    assert_eq!(child.next_entity_id(), game.next_entity_id());
}

// =============================================================================
// Properties
// =============================================================================

fn tag_strategy() -> impl Strategy<Value = Tag> {
    prop_oneof![
        Just(Tag::Attack),
        Just(Tag::Health),
        Just(Tag::Damage),
        Just(Tag::Cost),
        Just(Tag::Exhausted),
    ]
}

proptest! {
    #[test]
    fn prop_clone_writes_are_isolated(
        writes in prop::collection::vec((0usize..3, tag_strategy(), 0i64..20), 1..20)
    ) {
        let (game, ids) = board_game(GameConfig::default());
        let before: Vec<Vec<i64>> = ids
            .iter()
            .map(|id| [Tag::Attack, Tag::Health, Tag::Damage, Tag::Cost, Tag::Exhausted]
                .iter()
                .map(|tag| game.get(*id, *tag).unwrap())
                .collect())
            .collect();

        let mut clone = game.try_clone().unwrap();
        for (index, tag, value) in &writes {
            clone.set(ids[*index], *tag, *value).unwrap();
        }

        for (id, values) in ids.iter().zip(&before) {
            for (tag, value) in [Tag::Attack, Tag::Health, Tag::Damage, Tag::Cost, Tag::Exhausted]
                .iter()
                .zip(values)
            {
                prop_assert_eq!(game.get(*id, *tag).unwrap(), *value);
            }
        }
    }

    #[test]
    fn prop_hash_ignores_creation_order(
        stats in prop::collection::vec((1i64..10, 1i64..10), 1..6),
        rotation in 0usize..6,
    ) {
        let card = Arc::new(CardDefinition::new(CardId::new(50), "Token"));
        let build = |order: &[(i64, i64)]| {
            let mut game = Game::new(GameConfig::default());
            for (attack, health) in order {
                let id = game.add_entity(Arc::clone(&card), PlayerId::new(1));
                game.set(id, Tag::Attack, *attack).unwrap();
                game.set(id, Tag::Health, *health).unwrap();
            }
            game
        };

        let mut rotated = stats.clone();
        let len = rotated.len();
        rotated.rotate_left(rotation % len);

        let mut a = build(&stats);
        let mut b = build(&rotated);
        prop_assert_eq!(a.state_hash(), b.state_hash());
    }
}
