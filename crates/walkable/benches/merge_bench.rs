//! Criterion benchmarks for ring merging (`Polygon::add_ring`).
//! Sizes: number of overlapping random rings merged into one region.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use walkable::point::Point;
use walkable::polygon::Polygon;
use walkable::rand::{draw_ring_radial, RadialCfg, ReplayToken, VertexCount};
use walkable::ring::{Polarity, Ring};

/// `k` rings on a circle of radius 400, alternating fill and hole, close
/// enough that neighbours overlap.
fn overlapping_rings(k: usize, seed: u64) -> Vec<Ring> {
    let cfg = RadialCfg {
        vertex_count: VertexCount::Uniform { min: 6, max: 16 },
        base_radius: 300.0,
        ..RadialCfg::default()
    };
    (0..k)
        .map(|i| {
            let th = std::f64::consts::TAU * i as f64 / k.max(1) as f64;
            let center = Point::new((400.0 * th.cos()) as i32, (400.0 * th.sin()) as i32);
            let polarity = if i % 2 == 0 {
                Polarity::Fill
            } else {
                Polarity::Hole
            };
            let tok = ReplayToken {
                seed,
                index: i as u64,
            };
            draw_ring_radial(cfg, center, polarity, tok)
        })
        .collect()
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    for &k in &[2usize, 8, 32] {
        group.bench_with_input(BenchmarkId::new("add_overlapping", k), &k, |b, &k| {
            b.iter_batched(
                || overlapping_rings(k, 41),
                |rings| {
                    let _region = Polygon::merged(&rings);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_merge);
criterion_main!(benches);
