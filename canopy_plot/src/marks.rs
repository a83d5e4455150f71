// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The primitive marks.
//!
//! Every mark takes world coordinates and draws through the
//! [`PlotContext`](crate::PlotContext) it is given, so marks can be built
//! once and redrawn under any viewport.

mod coordinates;
mod field;
mod function;
mod lines;
mod point;
mod shapes;
mod vector;

pub use coordinates::{AxisOptions, Coordinates, GridStyle};
pub use field::{ContourLevels, ContourMark, Heatmap, VectorField};
pub use function::{FunctionGraph, GraphAxis, Parametric};
pub use lines::{Line, Segment, clip_line};
pub use point::{Label, PointMark};
pub use shapes::{Circle, Ellipse, Polygon, Polyline};
pub use vector::Vector;
