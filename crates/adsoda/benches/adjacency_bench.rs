//! Criterion benchmarks for adjacency recovery (vertex enumeration).
//! Combinatorial in dimension and face count; blocks cover the dimension
//! axis, sampled polygons the face-count axis.

use adsoda::sampler::{polygon_solid, RadialCfg, ReplayToken};
use adsoda::shapes::block;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

fn bench_adjacency(c: &mut Criterion) {
    let mut group = c.benchmark_group("adjacency");

    for &dim in &[2usize, 3, 4] {
        group.bench_with_input(BenchmarkId::new("block", dim), &dim, |b, &dim| {
            b.iter_batched(
                || block(&vec![(10.0, 130.0); dim]),
                |mut solid| {
                    solid.find_adjacencies();
                },
                BatchSize::SmallInput,
            )
        });
    }

    for &faces in &[8usize, 16, 32] {
        group.bench_with_input(BenchmarkId::new("polygon", faces), &faces, |b, &faces| {
            b.iter_batched(
                || {
                    polygon_solid(
                        RadialCfg {
                            vertices: faces,
                            ..RadialCfg::default()
                        },
                        ReplayToken::new(43, faces as u64),
                    )
                    .expect("sampled polygon")
                },
                |mut solid| {
                    solid.find_adjacencies();
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_adjacency);
criterion_main!(benches);
