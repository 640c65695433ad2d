//! Benchmarks for the diagonal stripe rasterizer.
//!
//! The preview path recomputes the stripe on every mouse move during a drag,
//! so these cover the box sizes a user actually drags:
//! - Small square boxes at thickness 1
//! - Large boxes at the maximum thickness
//! - Wide boxes with a negative thickness
//! - Encoding a stripe into the host region layout

extern crate bulldoze_extensions;

use bulldoze_extensions::{
    geometry::{compute_diagonal_region, diagonal_region_in, Anchor, CellBounds},
    host::{encode_region, HostAddress},
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

/// Benchmark a small square drag at thickness 1.
fn bench_diagonal_small_square(c: &mut Criterion) {
    c.bench_function("diagonal_small_square", |b| {
        b.iter(|| {
            let region = compute_diagonal_region(
                black_box(0),
                black_box(0),
                black_box(15),
                black_box(15),
                Some(Anchor::new(0, 0)),
                black_box(1),
            );
            black_box(region)
        });
    });
}

/// Benchmark square drags of growing size at the maximum thickness.
fn bench_diagonal_max_thickness(c: &mut Criterion) {
    let mut group = c.benchmark_group("diagonal_max_thickness");

    for size in [16, 64, 256] {
        let bounds = CellBounds::from_corners(0, 0, size - 1, size - 1);
        group.bench_with_input(BenchmarkId::from_parameter(size), &bounds, |b, bounds| {
            b.iter(|| black_box(diagonal_region_in(*bounds, Some(Anchor::new(size - 1, 0)), 9)));
        });
    }

    group.finish();
}

/// Benchmark a wide box widened towards smaller coordinates.
fn bench_diagonal_wide_negative(c: &mut Criterion) {
    let bounds = CellBounds::from_corners(0, 0, 255, 31);

    c.bench_function("diagonal_wide_negative", |b| {
        b.iter(|| black_box(diagonal_region_in(black_box(bounds), None, black_box(-5))));
    });
}

/// Benchmark encoding a stripe into the host region layout.
fn bench_encode_region(c: &mut Criterion) {
    let region = compute_diagonal_region(0, 0, 127, 127, None, 3);

    c.bench_function("encode_region_128", |b| {
        b.iter(|| black_box(encode_region(black_box(&region), HostAddress::new(0x1000_0000))));
    });
}

criterion_group!(
    benches,
    bench_diagonal_small_square,
    bench_diagonal_max_thickness,
    bench_diagonal_wide_negative,
    bench_encode_region,
);
criterion_main!(benches);
