use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use bitboard_duel::board::board::Board;
use bitboard_duel::board::piece::{Color, Piece, PieceType};
use bitboard_duel::board::square::Square;
use bitboard_duel::game::perft::perft;
use bitboard_duel::game::starting_position::standard_board;

struct BenchCase {
    name: &'static str,
    board: Board,
    /// Known leaf counts for the first plies; deeper plies are only checked
    /// for stability between the warmup and the measured runs.
    expected_nodes: &'static [u64],
    depth: u8,
}

fn cases() -> Vec<BenchCase> {
    let endgame = Board::from_placements([
        (Square::new(0, 0), Piece::new(PieceType::King, Color::Black)),
        (Square::new(7, 7), Piece::new(PieceType::King, Color::White)),
        (Square::new(3, 3), Piece::new(PieceType::Queen, Color::White)),
        (Square::new(4, 5), Piece::new(PieceType::Rook, Color::Black)),
    ]);
    let suite_depth = match std::env::var("DUEL_BENCH_SUITE") {
        Ok(value) if value.eq_ignore_ascii_case("standard") => 4,
        _ => 3,
    };
    vec![
        BenchCase {
            name: "start",
            board: standard_board(),
            expected_nodes: &[26, 676],
            depth: suite_depth,
        },
        BenchCase {
            name: "endgame",
            board: endgame,
            expected_nodes: &[],
            depth: suite_depth + 1,
        },
    ]
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in cases() {
        for (depth_idx, expected) in case.expected_nodes.iter().enumerate() {
            let depth = (depth_idx + 1) as u8;
            let counts = perft(&case.board, Color::Black, depth);
            assert_eq!(counts.nodes, *expected, "node mismatch for {} depth {}", case.name, depth);
        }

        for depth in 1..=case.depth {
            // Correctness guard before benchmarking.
            let warmup = perft(&case.board, Color::Black, depth).nodes;
            group.throughput(Throughput::Elements(warmup));
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{}_d{}", case.name, depth)),
                &warmup,
                |b, expected| {
                    b.iter(|| {
                        let counts = perft(black_box(&case.board), Color::Black, black_box(depth));
                        assert_eq!(counts.nodes, *expected);
                        black_box(counts.nodes)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(perft_benches, bench_perft);
criterion_main!(perft_benches);
