mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use galton::board::{Board, BoardSpec};
use galton::draws::RngDraws;
use galton::rule::{BranchRule, BranchingRule};
use galton::sim::trajectory::simulate;
use galton::stats::terminal_distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;

const ROWS: [u32; 4] = [8, 32, 128, 512];

fn trajectory_benches(c: &mut Criterion) {
    let rules = [
        ("fair", BranchRule::FairCoin),
        (
            "polya",
            BranchRule::Polya {
                alpha: 1.0,
                beta: 3.0,
            },
        ),
    ];

    for (name, rule) in rules {
        let mut group = c.benchmark_group(format!("trajectory/{name}"));

        for &rows in &ROWS {
            let spec = BoardSpec::multiplicative(rows, 1.01, 2.0, 0.1);
            let board = Board::try_new(spec).expect("valid board");
            let mut draws = RngDraws::new(StdRng::seed_from_u64(0x7EA1 ^ rows as u64));
            group.throughput(common::particles_throughput(1));

            group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, _| {
                b.iter(|| {
                    let t = simulate(&board, &rule, &mut draws).expect("trajectory");
                    black_box(t.bin);
                });
            });
        }

        group.finish();
    }
}

fn exact_distribution_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats/terminal_distribution");
    let rule = BranchRule::Polya {
        alpha: 1.0,
        beta: 3.0,
    };
    for &rows in &ROWS {
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            b.iter(|| black_box(terminal_distribution(&rule as &dyn BranchingRule, rows)));
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = trajectory_benches, exact_distribution_benches
}
criterion_main!(benches);
