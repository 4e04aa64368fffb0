use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};

use bitboard_duel::board::piece::Color;
use bitboard_duel::game::move_generation::is_valid_move;
use bitboard_duel::game::starting_position::standard_board;
use bitboard_duel::player::board_scoring::{BasicScorer, MaterialScorer};
use bitboard_duel::player::score_cache::{FixedScoreCache, NoScoreCache, ScoreCache};
use bitboard_duel::player::search::search_root;

const CACHE_SLOTS: usize = 1 << 16;

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("alpha_beta_start");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(10);

    let board = standard_board();

    for depth in 1..=3usize {
        // Correctness guard before benchmarking.
        let mut rng = StdRng::seed_from_u64(7);
        let outcome = search_root(&board, Color::Black, depth, &BasicScorer, &mut NoScoreCache, &mut rng)
            .expect("start position has moves");
        assert!(is_valid_move(&board, Color::Black, outcome.best_move));

        group.bench_with_input(BenchmarkId::new("uncached", depth), &depth, |b, &depth| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| {
                let outcome = search_root(
                    black_box(&board),
                    Color::Black,
                    depth,
                    &BasicScorer,
                    &mut NoScoreCache,
                    &mut rng,
                )
                .expect("search should succeed");
                black_box(outcome.score)
            });
        });

        group.bench_with_input(BenchmarkId::new("cold_cache", depth), &depth, |b, &depth| {
            let mut rng = StdRng::seed_from_u64(7);
            let mut cache = FixedScoreCache::new(CACHE_SLOTS);
            b.iter(|| {
                cache.clear();
                let outcome = search_root(
                    black_box(&board),
                    Color::Black,
                    depth,
                    &MaterialScorer,
                    &mut cache,
                    &mut rng,
                )
                .expect("search should succeed");
                black_box(outcome.score)
            });
        });
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);
