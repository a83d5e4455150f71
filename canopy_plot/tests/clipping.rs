// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_plot::marks::clip_line;
use kurbo::{Point, Rect, Vec2};
use proptest::prelude::*;

const VIEW: Rect = Rect::new(-10.0, -5.0, 10.0, 5.0);

fn on_line(p: Point, origin: Point, dir: Vec2) -> bool {
    let cross = (p - origin).cross(dir);
    cross.abs() <= 1e-9 * (1.0 + (p - origin).hypot() * dir.hypot())
}

proptest! {
    #[test]
    fn clipped_ends_are_on_the_line_and_the_boundary(
        ox in -20.0_f64..20.0,
        oy in -20.0_f64..20.0,
        angle in 0.0_f64..core::f64::consts::TAU,
    ) {
        let origin = Point::new(ox, oy);
        let dir = Vec2::new(angle.cos(), angle.sin());
        if let Some((a, b)) = clip_line(origin, dir, VIEW) {
            let grown = VIEW.inflate(1e-9, 1e-9);
            prop_assert!(grown.contains(a) && grown.contains(b));
            prop_assert!(on_line(a, origin, dir) && on_line(b, origin, dir));
            // Entry precedes exit along the direction of travel.
            prop_assert!((b - a).dot(dir) >= -1e-9);
        }
    }

    #[test]
    fn lines_through_the_view_are_never_dropped(
        px in -9.0_f64..9.0,
        py in -4.0_f64..4.0,
        angle in 0.0_f64..core::f64::consts::TAU,
    ) {
        let dir = Vec2::new(angle.cos(), angle.sin());
        prop_assert!(clip_line(Point::new(px, py), dir, VIEW).is_some());
    }
}
