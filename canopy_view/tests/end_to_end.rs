// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! World ↔ pixel mapping through a full plot frame.

use canopy_view::{Margins, PlotFrame, PlotSpace, Viewport};
use kurbo::{Point, Vec2};
use proptest::prelude::*;

fn reference_space() -> PlotSpace {
    PlotSpace::new(
        Viewport::new(-10.0..10.0, -5.0..5.0),
        PlotFrame::new(400.0, 300.0, Margins::ZERO),
    )
}

#[test]
fn reference_plot_maps_corners() {
    let space = reference_space();
    assert_eq!(space.world_to_pixel(Point::new(0.0, 0.0)), Point::new(200.0, 150.0));
    assert_eq!(space.world_to_pixel(Point::new(-10.0, -5.0)), Point::new(0.0, 300.0));
    assert_eq!(space.world_to_pixel(Point::new(10.0, 5.0)), Point::new(400.0, 0.0));
}

#[test]
fn translated_viewport_shifts_pixels_by_world_delta() {
    let space = reference_space();
    let moved = PlotSpace::new(
        space.viewport().translated(Vec2::new(2.0, 1.0)),
        space.frame(),
    );
    let p = Point::new(3.0, 2.0);
    let shift = space.world_to_pixel(p) - moved.world_to_pixel(p);
    assert_eq!(shift, space.world_vec_to_pixel(Vec2::new(2.0, 1.0)));
}

proptest! {
    #[test]
    fn pixel_round_trip(
        x in -10.0_f64..10.0,
        y in -5.0_f64..5.0,
        left in 0.0_f64..50.0,
        top in 0.0_f64..50.0,
    ) {
        let space = PlotSpace::new(
            Viewport::new(-10.0..10.0, -5.0..5.0),
            PlotFrame::new(400.0, 300.0, Margins { top, right: 0.0, bottom: 0.0, left }),
        );
        let world = Point::new(x, y);
        let back = space.pixel_to_world(space.world_to_pixel(world));
        prop_assert!((back - world).hypot() < 1e-9);
    }
}
