// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contouring a known curve.

use canopy_contour::{ScalarGrid, contour};
use kurbo::{Affine, Point, Rect};

fn circle(x: f64, y: f64) -> f64 {
    x * x + y * y
}

#[test]
fn unit_circle_within_grid_tolerance() {
    let bounds = Rect::new(-2.0, -2.0, 2.0, 2.0);
    let n = 64;
    let cell = bounds.width() / f64::from(n);
    let segments = ScalarGrid::sample(circle, 1.0, n as usize, n as usize, bounds).segments();
    assert!(!segments.is_empty());

    let mut length = 0.0;
    for seg in &segments {
        for p in [seg.p0, seg.p1] {
            let r = p.to_vec2().hypot();
            assert!((r - 1.0).abs() < cell * 0.1, "endpoint {p:?} has radius {r}");
        }
        length += (seg.p1 - seg.p0).hypot();
    }
    let circumference = 2.0 * core::f64::consts::PI;
    assert!((length - circumference).abs() / circumference < 0.01);
}

#[test]
fn pixel_mapping_is_applied() {
    let bounds = Rect::new(-2.0, -2.0, 2.0, 2.0);
    let to_pixel = Affine::new([100.0, 0.0, 0.0, -100.0, 200.0, 200.0]);
    let pixel = contour(circle, 1.0, 16, 16, bounds, |p| to_pixel * p);
    let world = ScalarGrid::sample(circle, 1.0, 16, 16, bounds).segments();
    assert_eq!(pixel.len(), world.len());
    for (px, w) in pixel.iter().zip(&world) {
        assert_eq!(px.p0, to_pixel * w.p0);
    }
    // Every pixel endpoint sits about 100 px from the center.
    let center = Point::new(200.0, 200.0);
    for seg in &pixel {
        assert!(((seg.p0 - center).hypot() - 100.0).abs() < 2.0);
    }
}
