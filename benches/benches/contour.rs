// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_contour::{ScalarGrid, contour};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};

fn ripple(x: f64, y: f64) -> f64 {
    (x * x + y * y).sqrt().sin()
}

fn bench_contour(c: &mut Criterion) {
    let bounds = Rect::new(-10.0, -10.0, 10.0, 10.0);
    let mut group = c.benchmark_group("contour");
    for n in [32_usize, 128, 512] {
        group.bench_with_input(BenchmarkId::new("sample", n), &n, |b, &n| {
            b.iter(|| ScalarGrid::sample(ripple, black_box(0.0), n, n, bounds));
        });
        let grid = ScalarGrid::sample(ripple, 0.0, n, n, bounds);
        group.bench_with_input(BenchmarkId::new("segments", n), &grid, |b, grid| {
            b.iter(|| grid.segments().len());
        });
        group.bench_with_input(BenchmarkId::new("to_pixel", n), &n, |b, &n| {
            b.iter(|| {
                contour(ripple, 0.5, n, n, bounds, |p| {
                    Point::new(p.x * 20.0 + 200.0, 200.0 - p.y * 20.0)
                })
                .len()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_contour);
criterion_main!(benches);
