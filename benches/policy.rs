use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use game_2048::engine::Game;
use std::hint::black_box;

fn bench_auto_move(c: &mut Criterion) {
    c.bench_function("policy/auto_move", |bch| {
        bch.iter_batched(
            || Game::from_seed(11),
            |mut game| {
                for _ in 0..32 {
                    black_box(game.auto_move());
                }
                game
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_random_move(c: &mut Criterion) {
    c.bench_function("policy/random_move", |bch| {
        bch.iter_batched(
            || Game::from_seed(13),
            |mut game| {
                for _ in 0..64 {
                    black_box(game.random_move());
                }
                game
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_full_game(c: &mut Criterion) {
    c.bench_function("policy/full_game", |bch| {
        bch.iter_batched(
            || Game::from_seed(2048),
            |mut game| {
                while game.can_move() {
                    game.auto_move();
                }
                (game.score(), game.max_tile())
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(policy, bench_auto_move, bench_random_move, bench_full_game);
criterion_main!(policy);
