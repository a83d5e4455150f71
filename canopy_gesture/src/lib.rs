// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Gesture: the pan / pinch / wheel‑zoom state machine for plots.
//!
//! [`ViewportController`] owns a plot's authoritative [`Viewport`] and turns
//! host pointer events into viewport changes:
//!
//! - **Pan**: a primary mouse button, touch or pen pointer drags the content.
//!   The grabbed world point stays under the pointer.
//! - **Pinch**: two pointers scale the viewport about their midpoint.
//!   Pinch takes precedence over pan.
//! - **Wheel**: zooms about the world point under the cursor by
//!   [`GestureConfig::zoom_speed`] per event.
//!
//! Every handler returns an [`EventResponse`] telling the host whether to
//! re‑render, capture or release the pointer, and suppress default actions.
//! Registered listeners see each new `(x_range, y_range)`.
//!
//! ## Example
//!
//! ```rust
//! use canopy_gesture::{
//!     EventResponse, GestureConfig, PointerButton, PointerEvent, ViewportController,
//! };
//! use canopy_view::{Margins, PlotFrame, Viewport};
//! use kurbo::Point;
//!
//! let mut controller = ViewportController::new(
//!     Viewport::new(-10.0..10.0, -5.0..5.0),
//!     PlotFrame::new(400.0, 300.0, Margins::ZERO),
//!     GestureConfig::default(),
//! );
//!
//! let down = PointerEvent::mouse(1, Point::new(200.0, 150.0), PointerButton::Primary);
//! controller.pointer_down(&down);
//! let response = controller.pointer_move(&PointerEvent {
//!     position: Point::new(240.0, 150.0),
//!     ..down
//! });
//! assert!(response.contains(EventResponse::VIEWPORT_CHANGED));
//! // 40 px at 20 px per unit: the content moved two units right.
//! assert_eq!(controller.viewport().x_range(), -12.0..8.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod controller;
mod pan;
mod pointer;
mod response;

pub use canopy_view::Viewport;
pub use config::GestureConfig;
pub use controller::{GestureState, MIN_VIEWPORT_SPAN, ViewportController, ViewportListener};
pub use pointer::{PointerButton, PointerEvent, PointerId, PointerKind, WheelEvent};
pub use response::EventResponse;
