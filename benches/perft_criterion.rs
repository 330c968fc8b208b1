use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use alphabeta_chess::game_state::board::Board;
use alphabeta_chess::game_state::chess_types::Side;
use alphabeta_chess::move_generation::perft::perft;
use alphabeta_chess::utils::fen_parser::parse_fen;

/// Published perft counts, index 0 is depth 1. Queen-only promotion means
/// only depths with no promotion among the leaves are listed.
const REFERENCE_POSITIONS: [(&str, &str, &[u64]); 3] = [
    (
        "start",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &[20, 400, 8902, 197_281],
    ),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        &[48, 2039, 97_862],
    ),
    (
        "endgame",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        &[14, 191, 2812, 43_238],
    ),
];

/// `ALPHABETA_BENCH_SUITE=standard` runs every listed depth; the default
/// quick suite drops the deepest one per position.
fn suite() -> (&'static str, usize) {
    match std::env::var("ALPHABETA_BENCH_SUITE") {
        Ok(value) if value.eq_ignore_ascii_case("standard") => ("standard", 0),
        _ => ("quick", 1),
    }
}

fn count_nodes(board: &mut Board, side: Side, depth: u8) -> u64 {
    perft(board, side, depth).expect("perft should run").nodes as u64
}

fn bench_perft(c: &mut Criterion) {
    let (suite_name, skipped_depths) = suite();

    let mut group = c.benchmark_group(format!("perft_{suite_name}"));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for (name, fen, counts) in REFERENCE_POSITIONS {
        let (board, side) = parse_fen(fen).expect("benchmark FEN should parse");
        let depths = counts.len().saturating_sub(skipped_depths);

        for (depth, &expected) in (1u8..).zip(&counts[..depths]) {
            let mut scratch = board.clone();
            assert_eq!(
                count_nodes(&mut scratch, side, depth),
                expected,
                "{name} depth {depth} disagrees with the reference count"
            );

            group.throughput(Throughput::Elements(expected));
            group.bench_function(BenchmarkId::new(name, depth), |b| {
                b.iter(|| black_box(count_nodes(black_box(&mut scratch), side, black_box(depth))));
            });
        }
    }

    group.finish();
}

criterion_group!(perft_benches, bench_perft);
criterion_main!(perft_benches);
