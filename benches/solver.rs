//! Benchmarks for the rolling puzzle solvers.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use roller::compress::compress_actions;
use roller::dial::DialPuzzle;
use roller::grid::parse;
use roller::presets::{grid_preset, DEFAULT_DIAL};
use roller::solver::{search, SearchOutcome, SolverConfig};
use roller::state::GameState;

/// Benchmark a full-board sweep with a single cube.
fn bench_solve_sweep(c: &mut Criterion) {
    let parsed = parse("1hhh\nhhhh\nhhhh").unwrap();
    let config = SolverConfig::default();

    c.bench_function("solve_sweep_3x4", |b| {
        b.iter(|| search(black_box(&parsed), &config))
    });
}

/// Benchmark the two-cuboid goal preset.
fn bench_solve_pair(c: &mut Criterion) {
    let parsed = parse(grid_preset("pair").unwrap().grid).unwrap();
    let config = SolverConfig::default();

    c.bench_function("solve_pair", |b| {
        b.iter(|| search(black_box(&parsed), &config))
    });
}

/// Benchmark parsing the default grid.
fn bench_parse(c: &mut Criterion) {
    let text = grid_preset("default").unwrap().grid;

    c.bench_function("parse_default_grid", |b| b.iter(|| parse(black_box(text))));
}

/// Benchmark neighbour generation and key building for one state.
fn bench_neighbors(c: &mut Criterion) {
    let parsed = parse("..2..\n.....\nhh.hh").unwrap();
    let start = GameState::initial(&parsed.grid, parsed.cuboids.clone(), &parsed.special_tiles);

    c.bench_function("neighbors_and_keys", |b| {
        b.iter(|| {
            black_box(&start)
                .neighbors(&parsed.grid)
                .into_iter()
                .map(|(state, _)| state.key())
                .count()
        })
    });
}

/// Benchmark compressing a solved move list.
fn bench_compress(c: &mut Criterion) {
    let parsed = parse("1hhh\nhhhh\nhhhh").unwrap();
    let SearchOutcome::Solved { actions, .. } = search(&parsed, &SolverConfig::default()).outcome
    else {
        panic!("sweep must be solvable");
    };

    c.bench_function("compress_actions", |b| {
        b.iter(|| compress_actions(black_box(&actions), 1))
    });
}

/// Benchmark the default dial puzzle.
fn bench_dial(c: &mut Criterion) {
    let puzzle = DialPuzzle::parse_combined(DEFAULT_DIAL).unwrap();

    c.bench_function("solve_default_dial", |b| b.iter(|| black_box(&puzzle).search()));
}

criterion_group!(
    benches,
    bench_solve_sweep,
    bench_solve_pair,
    bench_parse,
    bench_neighbors,
    bench_compress,
    bench_dial
);
criterion_main!(benches);
