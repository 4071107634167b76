//! Benchmarks pour la synchronisation des coordonnées

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use site_boundary::{
    Boundary, CoordinateSynchronizer, HiddenField, Point, RestorationData, RowList, BOUNDARY_FIELD,
};

/// Polygone régulier de `n` sommets autour de Londres
fn ring(n: usize) -> Boundary {
    let points = (0..n)
        .map(|i| {
            let angle = (i as f64) * std::f64::consts::TAU / (n as f64);
            Point::new(51.505 + 0.01 * angle.sin(), -0.09 + 0.015 * angle.cos())
        })
        .collect();
    Boundary::new(points).unwrap()
}

fn bench_sync(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync");

    for n in [3usize, 32, 512] {
        let boundary = ring(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &boundary, |b, boundary| {
            let mut sync =
                CoordinateSynchronizer::new(Some(HiddenField::new(BOUNDARY_FIELD)), Some(RowList::default()));
            b.iter(|| black_box(sync.sync(black_box(boundary))))
        });
    }

    group.finish();
}

fn bench_restore(c: &mut Criterion) {
    let mut group = c.benchmark_group("restore");

    for n in [3usize, 32, 512] {
        let raw = site_boundary::serialize_boundary(&ring(n));
        group.throughput(Throughput::Bytes(raw.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &raw, |b, raw| {
            b.iter(|| {
                let data = RestorationData::Raw(black_box(raw.clone()));
                black_box(data.parse().unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sync, bench_restore);
criterion_main!(benches);
