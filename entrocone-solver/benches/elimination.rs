//! Benchmarks for the elimination pipeline on small elemental systems.

use criterion::{Criterion, criterion_group, criterion_main};
use entrocone_core::shannon::elemental_inequalities;
use entrocone_solver::{NullObserver, SolveOptions, minimize, solve_to};
use std::hint::black_box;

fn bench_minimize(c: &mut Criterion) {
    c.bench_function("minimize elemental(3)", |b| {
        b.iter(|| {
            let mut system = elemental_inequalities(3);
            minimize(black_box(&mut system), &mut NullObserver).unwrap();
            system.len()
        })
    });
}

fn bench_solve_to(c: &mut Criterion) {
    c.bench_function("project elemental(3) to 2 variables", |b| {
        b.iter(|| {
            let mut system = elemental_inequalities(3);
            solve_to(
                black_box(&mut system),
                4,
                &SolveOptions::default(),
                &mut NullObserver,
                None,
            )
            .unwrap();
            minimize(&mut system, &mut NullObserver).unwrap();
            system.len()
        })
    });
}

criterion_group!(benches, bench_minimize, bench_solve_to);
criterion_main!(benches);
