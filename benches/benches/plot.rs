// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_plot::marks::{ContourMark, Coordinates, FunctionGraph, GridStyle, Heatmap};
use canopy_plot::{Plot, Recorder};
use canopy_view::{SamplingMode, Viewport};
use criterion::{Criterion, criterion_group, criterion_main};

fn bench_plot(c: &mut Criterion) {
    let mut group = c.benchmark_group("plot");
    let viewport = Viewport::new(-10.0..10.0, -5.0..5.0);

    group.bench_function("axes_and_graph", |b| {
        let plot = Plot::new(800.0, 600.0)
            .with_viewport(viewport)
            .with_mark(Coordinates::cartesian().with_grid(GridStyle {
                minor: true,
                ..GridStyle::default()
            }))
            .with_mark(FunctionGraph::of_x(f64::sin));
        b.iter(|| {
            let mut r = Recorder::new();
            plot.render(&mut r);
            r.commands().len()
        });
    });

    group.bench_function("heatmap_64", |b| {
        let plot = Plot::new(800.0, 600.0).with_viewport(viewport).with_mark(
            Heatmap::new(|x, y| (x * y).sin()).with_sampling(SamplingMode::Viewport {
                count_x: 64,
                count_y: 64,
            }),
        );
        b.iter(|| {
            let mut r = Recorder::new();
            plot.render(&mut r);
            r.commands().len()
        });
    });

    group.bench_function("contour_128", |b| {
        let plot = Plot::new(800.0, 600.0).with_viewport(viewport).with_mark(
            ContourMark::new(|x, y| x * x - y * y).with_sampling(SamplingMode::Viewport {
                count_x: 128,
                count_y: 128,
            }),
        );
        b.iter(|| {
            let mut r = Recorder::new();
            plot.render(&mut r);
            r.commands().len()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_plot);
criterion_main!(benches);
