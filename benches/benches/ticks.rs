// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_axis::{TickSpec, format_tick, generate_ticks, minor_ticks, nice_ticks};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn bench_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("ticks");

    group.bench_function("nice_ticks_8", |b| {
        b.iter(|| nice_ticks(black_box(-13.7), black_box(42.1), 8));
    });

    group.bench_function("delta_fallback", |b| {
        let spec = TickSpec::delta(100.0);
        b.iter(|| generate_ticks(black_box(-3.0), black_box(4.0), &spec));
    });

    group.bench_function("minor_4", |b| {
        let major = nice_ticks(-10.0, 10.0, 8);
        b.iter(|| minor_ticks(black_box(&major), 4, -10.0, 10.0));
    });

    group.bench_function("labels", |b| {
        let major = nice_ticks(-1.0, 1.0, 8);
        b.iter(|| {
            major
                .iter()
                .map(|v| format_tick(*v, 0.25))
                .map(|s| s.len())
                .sum::<usize>()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_ticks);
criterion_main!(benches);
