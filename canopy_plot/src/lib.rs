// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Plot: 2D plot marks drawn through a painter port.
//!
//! A [`Plot`] owns a [`ViewportController`](canopy_gesture::ViewportController)
//! and a list of [`Mark`]s. Rendering threads a [`PlotContext`] (the current
//! world/pixel space and [`Theme`]) into every mark, which draws in pixel
//! space through a [`Painter`]. The painter is the only link to an actual
//! canvas; [`Recorder`] implements it by keeping a list of [`DrawCommand`]s.
//!
//! Marks are in [`marks`]:
//! - [`Coordinates`](marks::Coordinates): axes, major/minor grid, tick labels.
//! - [`PointMark`](marks::PointMark), [`Label`](marks::Label).
//! - [`Segment`](marks::Segment) and [`Line`](marks::Line), the latter
//!   clipped to the viewport.
//! - [`Circle`](marks::Circle), [`Ellipse`](marks::Ellipse),
//!   [`Polygon`](marks::Polygon), [`Polyline`](marks::Polyline).
//! - [`Vector`](marks::Vector) arrows.
//! - [`FunctionGraph`](marks::FunctionGraph) and
//!   [`Parametric`](marks::Parametric) curves.
//! - [`VectorField`](marks::VectorField), [`Heatmap`](marks::Heatmap) and
//!   [`ContourMark`](marks::ContourMark) over sampling lattices.
//!
//! Any `Fn(&PlotContext, &mut dyn Painter)` is also a mark.
//!
//! ## Example
//!
//! ```rust
//! use canopy_plot::marks::{Coordinates, FunctionGraph};
//! use canopy_plot::{Plot, Recorder};
//! use canopy_view::Viewport;
//!
//! let plot = Plot::new(400.0, 300.0)
//!     .with_viewport(Viewport::new(-10.0..10.0, -5.0..5.0))
//!     .with_mark(Coordinates::cartesian())
//!     .with_mark(FunctionGraph::of_x(|x| x.sin()));
//!
//! let mut recorder = Recorder::new();
//! plot.render(&mut recorder);
//! assert!(recorder.is_balanced());
//! ```

#![no_std]

extern crate alloc;

mod context;
pub mod marks;
mod painter;
mod plot;
mod ramp;
mod style;
mod theme;

pub use context::{Mark, PlotContext};
pub use painter::{DrawCommand, Painter, Recorder, TextAlign, TextBaseline, TextStyle};
pub use plot::Plot;
pub use ramp::ColorRamp;
pub use style::{LineStyle, ShapeStyle};
pub use theme::Theme;
