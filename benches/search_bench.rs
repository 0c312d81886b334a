//! Benchmarks of the hot paths: move generation, evaluation, and a full
//! fixed-depth search from the starting position.

use chaturaji::{Color, Engine, Evaluator, Position};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_move_generation(c: &mut Criterion) {
    let position = Position::new();

    c.bench_function("generate_moves_starting_position", |b| {
        b.iter(|| black_box(position.generate_moves(Color::Red)))
    });
}

fn bench_evaluation(c: &mut Criterion) {
    let position = Position::new();

    c.bench_function("evaluate_starting_position", |b| {
        b.iter(|| black_box(Evaluator::new(&position).eval_for(Color::Red)))
    });
}

fn bench_search(c: &mut Criterion) {
    let position = Position::new();

    for depth in [2, 4] {
        c.bench_function(&format!("search_starting_position_depth_{depth}"), |b| {
            b.iter(|| {
                // A fresh engine per iteration so the table never carries over
                let mut engine = Engine::with_capacity(1 << 16);
                black_box(engine.search(&position, Color::Red, depth).unwrap())
            })
        });
    }
}

criterion_group!(
    benches,
    bench_move_generation,
    bench_evaluation,
    bench_search
);
criterion_main!(benches);
