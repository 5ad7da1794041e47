//! Criterion benchmarks for CSG subtraction and the hidden-solid pass.

use adsoda::color::Color;
use adsoda::shapes::block;
use adsoda::space::Space;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

fn bench_subtract(c: &mut Criterion) {
    let mut group = c.benchmark_group("subtract");

    for &dim in &[2usize, 3, 4] {
        group.bench_with_input(BenchmarkId::new("nested_blocks", dim), &dim, |b, &dim| {
            let outer = block(&vec![(-2.0, 2.0); dim]);
            let inner = block(&vec![(-1.0, 1.0); dim]);
            b.iter(|| outer.subtract(&inner))
        });
    }

    group.bench_function("remove_hidden_solids_3d", |b| {
        b.iter_batched(
            || {
                let mut space = Space::new(3, Color::grey(0.2));
                space.add_solid(block(&[(10.0, 130.0), (10.0, 130.0), (10.0, 130.0)]));
                space.add_solid(block(&[(0.0, 140.0), (0.0, 140.0), (-130.0, -10.0)]));
                space.add_solid(block(&[(-130.0, -10.0), (-130.0, -10.0), (10.0, 130.0)]));
                space
            },
            |mut space| {
                space.remove_hidden_solids();
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_subtract);
criterion_main!(benches);
