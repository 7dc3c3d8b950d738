use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ccg_outcomes::core::{GameConfig, PlayerId, Tag};
use ccg_outcomes::games::minions::{self, cards};
use ccg_outcomes::search::{OutcomeSearch, SearchConfig, StrategyKind};
use ccg_outcomes::state::Game;

fn full_boards(config: GameConfig) -> Game {
    let mut game = minions::new_game(config);
    let wisp = Arc::new(cards::wisp());
    let stonehide = Arc::new(cards::stonehide());
    for _ in 0..7 {
        minions::summon(&mut game, &wisp, PlayerId::new(0)).expect("board has room");
        minions::summon(&mut game, &stonehide, PlayerId::new(1)).expect("board has room");
    }
    game
}

fn benchmark_clone(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone");
    for cow in [true, false] {
        let game = full_boards(GameConfig::default().with_copy_on_write(cow));
        group.bench_with_input(BenchmarkId::new("copy_on_write", cow), &game, |b, game| {
            b.iter(|| black_box(game.try_clone().expect("not ticking")))
        });
    }
    group.finish();
}

fn benchmark_clone_and_write(c: &mut Criterion) {
    let game = full_boards(GameConfig::default());
    let target = game.board(PlayerId::new(1))[0];

    c.bench_function("clone_then_write_one", |b| {
        b.iter(|| {
            let mut clone = game.try_clone().expect("not ticking");
            clone.set(black_box(target), Tag::Damage, 1).expect("entity exists");
            black_box(clone.state_hash())
        })
    });
}

fn benchmark_scenario(c: &mut Criterion) {
    let mut group = c.benchmark_group("deathrattle_scenario");
    for kind in [StrategyKind::Naive, StrategyKind::DepthFirst, StrategyKind::BreadthFirst] {
        group.bench_function(format!("{kind:?}"), |b| {
            b.iter(|| {
                let (root, sprite) = minions::deathrattle_scenario().expect("scenario builds");
                let mut search = OutcomeSearch::new(SearchConfig::default().with_strategy(kind));
                search
                    .run_action(root, sprite, minions::destroy(sprite))
                    .expect("search succeeds")
            })
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_clone, benchmark_clone_and_write, benchmark_scenario);
criterion_main!(benches);
