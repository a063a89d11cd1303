//! Criterion benchmarks for the CFLP strategies.
//!
//! Uses seeded random instances so every run measures the same work.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_cflp::problem::Problem;
use u_cflp::solution::Solution;
use u_cflp::solver::{AnnealingConfig, AnnealingRunner, BruteForce, Greedy};
use u_numflow::random::create_rng;

// ===========================================================================
// Instance generator
// ===========================================================================

/// `n` facilities and `m` customers with total capacity about twice the demand.
fn random_problem(n: usize, m: usize, seed: u64) -> Problem {
    let mut rng = create_rng(seed);
    let demands: Vec<u64> = (0..m).map(|_| rng.random_range(5..35)).collect();
    let total: u64 = demands.iter().sum();
    let mean_cap = (2 * total / n as u64).max(1);
    let capacities: Vec<u64> = (0..n)
        .map(|_| rng.random_range(mean_cap / 2..=mean_cap * 3 / 2))
        .collect();
    let fixed_costs: Vec<u64> = (0..n).map(|_| rng.random_range(300..900)).collect();
    let costs: Vec<Vec<u64>> = (0..n)
        .map(|_| (0..m).map(|_| rng.random_range(10..100)).collect())
        .collect();
    Problem::new(capacities, fixed_costs, demands, costs).expect("generated problem is well-formed")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_assign(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign");

    for (n, m) in [(10usize, 50usize), (30, 150), (60, 300)] {
        let problem = random_problem(n, m, 42);
        let mut sol = Solution::new(&problem);
        for i in 0..n {
            sol.open(i);
        }
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("n{n}_m{m}")),
            &n,
            |b, _| {
                b.iter(|| {
                    sol.assign();
                    black_box(sol.cost())
                })
            },
        );
    }
    group.finish();
}

fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy");

    for (n, m) in [(10usize, 50usize), (30, 150)] {
        let problem = random_problem(n, m, 7);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("n{n}_m{m}")),
            &problem,
            |b, p| b.iter(|| black_box(Greedy::run(black_box(p)))),
        );
    }
    group.finish();
}

fn bench_brute_force(c: &mut Criterion) {
    let mut group = c.benchmark_group("brute_force");
    group.sample_size(10);

    for &n in &[6usize, 8, 10] {
        let problem = random_problem(n, 20, 3);
        let strategy = BruteForce::default();
        group.bench_with_input(BenchmarkId::from_parameter(n), &problem, |b, p| {
            b.iter(|| black_box(strategy.run(black_box(p))))
        });
    }
    group.finish();
}

fn bench_annealing(c: &mut Criterion) {
    let mut group = c.benchmark_group("annealing");
    group.sample_size(10);

    for (n, m) in [(10usize, 50usize), (30, 150)] {
        let problem = random_problem(n, m, 11);
        let config = AnnealingConfig::default()
            .with_outer_iterations(50)
            .with_inner_iterations(50);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("n{n}_m{m}")),
            &(problem, config),
            |b, (p, c)| {
                b.iter(|| {
                    let mut rng = create_rng(42);
                    black_box(AnnealingRunner::run(black_box(p), c, &mut rng))
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_assign,
    bench_greedy,
    bench_brute_force,
    bench_annealing
);
criterion_main!(benches);
