// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;
use core::ops::Range;

use canopy_view::{Margins, PlotFrame, PlotSpace, Viewport};
use kurbo::{Affine, Point};
use smallvec::SmallVec;
use tracing::trace;

use crate::pan::{PIXEL_EPSILON, PanSession, PinchSession};
use crate::{EventResponse, GestureConfig, PointerEvent, PointerId, WheelEvent};

/// Smallest world span the controller will zoom a viewport down to.
pub const MIN_VIEWPORT_SPAN: f64 = 1e-9;

/// Callback invoked with `(x_range, y_range)` after every viewport change.
pub type ViewportListener = Box<dyn FnMut(Range<f64>, Range<f64>)>;

/// Coarse state of the gesture machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureState {
    /// No gesture in progress.
    Idle,
    /// A single pointer is dragging the viewport.
    Panning,
    /// Two pointers are pinching.
    Pinching,
}

/// Owns a plot's authoritative viewport and mutates it from pointer input.
///
/// The host forwards raw pointer and wheel events in client coordinates;
/// the controller maps them into the plot surface's local space through the
/// inverse of the transform given to
/// [`set_surface_transform`](Self::set_surface_transform).
///
/// Pinch takes precedence over pan: a second pointer going down while
/// panning cancels the pan and starts a pinch.
pub struct ViewportController {
    config: GestureConfig,
    props: Viewport,
    viewport: Viewport,
    frame: PlotFrame,
    screen_to_local: Affine,
    pointers: SmallVec<[(PointerId, Point); 4]>,
    pan: Option<PanSession>,
    pinch: Option<PinchSession>,
    listener: Option<ViewportListener>,
}

impl fmt::Debug for ViewportController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportController")
            .field("config", &self.config)
            .field("props", &self.props)
            .field("viewport", &self.viewport)
            .field("frame", &self.frame)
            .field("screen_to_local", &self.screen_to_local)
            .field("pointers", &self.pointers)
            .field("pan", &self.pan)
            .field("pinch", &self.pinch)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl ViewportController {
    /// Creates a controller showing `viewport` in `frame`.
    #[must_use]
    pub fn new(viewport: Viewport, frame: PlotFrame, config: GestureConfig) -> Self {
        Self {
            config,
            props: viewport,
            viewport,
            frame,
            screen_to_local: Affine::IDENTITY,
            pointers: SmallVec::new(),
            pan: None,
            pinch: None,
            listener: None,
        }
    }

    /// The current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The current frame.
    #[must_use]
    pub fn frame(&self) -> PlotFrame {
        self.frame
    }

    /// The coordinate space for the current viewport and frame.
    #[must_use]
    pub fn space(&self) -> PlotSpace {
        PlotSpace::new(self.viewport, self.frame)
    }

    /// Current gesture configuration.
    #[must_use]
    pub fn config(&self) -> GestureConfig {
        self.config
    }

    /// Replaces the gesture configuration.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// Coarse gesture state.
    #[must_use]
    pub fn state(&self) -> GestureState {
        if self.pinch.is_some() {
            GestureState::Pinching
        } else if self.pan.is_some() {
            GestureState::Panning
        } else {
            GestureState::Idle
        }
    }

    /// Updates the container size after a resize.
    pub fn set_frame(&mut self, frame: PlotFrame) {
        self.frame = frame;
    }

    /// Updates the container size, keeping margins.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.frame = PlotFrame::new(width, height, self.frame.margins);
    }

    /// Updates the margins, keeping the container size.
    pub fn set_margins(&mut self, margins: Margins) {
        self.frame.margins = margins;
    }

    /// Sets the surface's local → client transform.
    ///
    /// A singular transform is ignored and local coordinates fall back to
    /// client coordinates.
    pub fn set_surface_transform(&mut self, local_to_screen: Affine) {
        self.screen_to_local = if local_to_screen.determinant().abs() > f64::EPSILON {
            local_to_screen.inverse()
        } else {
            Affine::IDENTITY
        };
    }

    /// Applies externally supplied viewport ranges.
    ///
    /// The viewport is reset only when `props` differs from the last props
    /// seen, so re-rendering a parent with unchanged ranges does not undo
    /// the user's pan and zoom. Returns `true` if the viewport was reset.
    pub fn set_viewport_props(&mut self, props: Viewport) -> bool {
        if props == self.props {
            return false;
        }
        self.props = props;
        self.viewport = props;
        self.pan = None;
        self.pinch = None;
        true
    }

    /// Registers the callback invoked after each gesture‑driven change.
    pub fn on_viewport_change(&mut self, listener: impl FnMut(Range<f64>, Range<f64>) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Handles a pointer going down.
    pub fn pointer_down(&mut self, event: &PointerEvent) -> EventResponse {
        self.track(event.id, event.position);
        if self.config.pinch_zoomable && self.pointers.len() >= 2 {
            let (a, b) = self.first_two();
            self.pinch = Some(PinchSession::start(&self.space(), a, b));
            self.pan = None;
            trace!(pointers = self.pointers.len(), "pinch started");
            return EventResponse::CAPTURE_POINTER | EventResponse::PREVENT_DEFAULT;
        }
        if self.config.pannable && self.pinch.is_none() && self.pan.is_none() && event.can_pan() {
            let local = self.to_local(event.position);
            self.pan = Some(PanSession::start(event.id, self.viewport, local));
            trace!(pointer = event.id.0, "pan started");
            return EventResponse::CAPTURE_POINTER | EventResponse::PREVENT_DEFAULT;
        }
        EventResponse::empty()
    }

    /// Handles a pointer move.
    pub fn pointer_move(&mut self, event: &PointerEvent) -> EventResponse {
        if !self.track_existing(event.id, event.position) {
            return EventResponse::empty();
        }
        if let Some(mut pinch) = self.pinch {
            let (a, b) = self.first_two();
            let next = pinch.step(self.viewport, self.frame, a, b);
            self.pinch = Some(pinch);
            return self.commit(next) | EventResponse::PREVENT_DEFAULT;
        }
        if let Some(pan) = self.pan
            && pan.pointer == event.id
        {
            let next = pan.viewport_at(self.frame, self.to_local(event.position));
            return self.commit(next) | EventResponse::PREVENT_DEFAULT;
        }
        EventResponse::empty()
    }

    /// Handles a pointer going up.
    pub fn pointer_up(&mut self, event: &PointerEvent) -> EventResponse {
        self.release(event.id)
    }

    /// Handles a cancelled pointer (for example a touch taken over by the
    /// platform).
    pub fn pointer_cancel(&mut self, event: &PointerEvent) -> EventResponse {
        self.release(event.id)
    }

    /// Handles a pointer leaving the surface.
    pub fn pointer_leave(&mut self, event: &PointerEvent) -> EventResponse {
        self.release(event.id)
    }

    /// Handles a wheel event: zooms about the world point under the cursor.
    ///
    /// Scrolling up (negative `delta_y`) zooms in by `zoom_speed`, scrolling
    /// down zooms out. A zero delta changes nothing.
    pub fn wheel(&mut self, event: &WheelEvent) -> EventResponse {
        if !self.config.zoomable {
            return EventResponse::empty();
        }
        if event.delta_y == 0.0 || !event.delta_y.is_finite() {
            return EventResponse::PREVENT_DEFAULT;
        }
        let speed = self.config.zoom_speed.max(PIXEL_EPSILON);
        let factor = if event.delta_y < 0.0 { 1.0 / speed } else { speed };
        let anchor = self.space().pixel_to_world(self.to_local(event.position));
        let next = self.viewport.scaled_about(anchor, factor, factor);
        self.commit(next) | EventResponse::PREVENT_DEFAULT
    }

    fn release(&mut self, id: PointerId) -> EventResponse {
        let before = self.state();
        self.pointers.retain(|(p, _)| *p != id);
        if self.pan.is_some_and(|pan| pan.pointer == id) {
            self.pan = None;
        }
        if self.pointers.len() < 2 {
            self.pinch = None;
        }
        let after = self.state();
        if before != after {
            trace!(?before, ?after, "gesture ended");
        }
        EventResponse::RELEASE_POINTER
    }

    fn commit(&mut self, next: Viewport) -> EventResponse {
        let next = clamp_span(next);
        if !next.is_finite() || next == self.viewport {
            return EventResponse::empty();
        }
        self.viewport = next;
        if let Some(listener) = self.listener.as_mut() {
            listener(next.x_range(), next.y_range());
        }
        EventResponse::VIEWPORT_CHANGED
    }

    fn to_local(&self, client: Point) -> Point {
        self.screen_to_local * client
    }

    fn track(&mut self, id: PointerId, client: Point) {
        if !self.track_existing(id, client) {
            self.pointers.push((id, client));
        }
    }

    fn track_existing(&mut self, id: PointerId, client: Point) -> bool {
        match self.pointers.iter_mut().find(|(p, _)| *p == id) {
            Some(entry) => {
                entry.1 = client;
                true
            }
            None => false,
        }
    }

    /// Local positions of the two oldest pointers. Only called with two or
    /// more pointers tracked.
    fn first_two(&self) -> (Point, Point) {
        let a = self.pointers[0].1;
        let b = self.pointers[1].1;
        (self.to_local(a), self.to_local(b))
    }
}

fn clamp_span(viewport: Viewport) -> Viewport {
    let center = viewport.center();
    let half = MIN_VIEWPORT_SPAN * 0.5;
    let x = if viewport.width().abs() < MIN_VIEWPORT_SPAN {
        center.x - half..center.x + half
    } else {
        viewport.x_range()
    };
    let y = if viewport.height().abs() < MIN_VIEWPORT_SPAN {
        center.y - half..center.y + half
    } else {
        viewport.y_range()
    };
    Viewport::new(x, y)
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::Cell;

    use canopy_view::{Margins, PlotFrame, Viewport};
    use kurbo::{Affine, Point};

    use super::{GestureState, ViewportController};
    use crate::{EventResponse, GestureConfig, PointerButton, PointerEvent, WheelEvent};

    fn controller() -> ViewportController {
        ViewportController::new(
            Viewport::new(-10.0..10.0, -5.0..5.0),
            PlotFrame::new(400.0, 300.0, Margins::ZERO),
            GestureConfig::default(),
        )
    }

    #[test]
    fn mouse_drag_pans() {
        let mut c = controller();
        let down = PointerEvent::mouse(1, Point::new(200.0, 150.0), PointerButton::Primary);
        assert!(c.pointer_down(&down).contains(EventResponse::CAPTURE_POINTER));
        assert_eq!(c.state(), GestureState::Panning);

        let r = c.pointer_move(&PointerEvent {
            position: Point::new(220.0, 150.0),
            ..down
        });
        assert!(r.contains(EventResponse::VIEWPORT_CHANGED));
        assert_eq!(c.viewport().x_range(), -11.0..9.0);

        assert_eq!(c.pointer_up(&down), EventResponse::RELEASE_POINTER);
        assert_eq!(c.state(), GestureState::Idle);
    }

    #[test]
    fn secondary_button_does_not_pan() {
        let mut c = controller();
        let down = PointerEvent::mouse(1, Point::new(200.0, 150.0), PointerButton::Secondary);
        assert!(c.pointer_down(&down).is_empty());
        assert_eq!(c.state(), GestureState::Idle);
    }

    #[test]
    fn disabled_config_ignores_input() {
        let mut c = controller();
        c.set_config(GestureConfig::disabled());
        c.pointer_down(&PointerEvent::touch(1, Point::new(10.0, 10.0)));
        c.pointer_down(&PointerEvent::touch(2, Point::new(30.0, 10.0)));
        assert_eq!(c.state(), GestureState::Idle);
        assert!(
            c.wheel(&WheelEvent {
                position: Point::ORIGIN,
                delta_y: -1.0
            })
            .is_empty()
        );
    }

    #[test]
    fn second_touch_switches_to_pinch() {
        let mut c = controller();
        c.pointer_down(&PointerEvent::touch(1, Point::new(150.0, 150.0)));
        assert_eq!(c.state(), GestureState::Panning);
        c.pointer_down(&PointerEvent::touch(2, Point::new(250.0, 150.0)));
        assert_eq!(c.state(), GestureState::Pinching);

        c.pointer_move(&PointerEvent::touch(2, Point::new(350.0, 150.0)));
        // Distance grew from 100 to 200: the viewport halves.
        assert!((c.viewport().width() - 10.0).abs() < 1e-9);

        c.pointer_up(&PointerEvent::touch(1, Point::ORIGIN));
        assert_eq!(c.state(), GestureState::Idle);
    }

    #[test]
    fn wheel_zoom_direction() {
        let mut c = controller();
        let center = Point::new(200.0, 150.0);
        let r = c.wheel(&WheelEvent {
            position: center,
            delta_y: -100.0,
        });
        assert!(r.contains(EventResponse::VIEWPORT_CHANGED | EventResponse::PREVENT_DEFAULT));
        assert!(c.viewport().width() < 20.0);

        let mut c = controller();
        c.wheel(&WheelEvent {
            position: center,
            delta_y: 100.0,
        });
        assert!((c.viewport().width() - 22.0).abs() < 1e-9);

        let mut c = controller();
        let r = c.wheel(&WheelEvent {
            position: center,
            delta_y: 0.0,
        });
        assert_eq!(r, EventResponse::PREVENT_DEFAULT);
        assert_eq!(c.viewport().width(), 20.0);
    }

    #[test]
    fn listener_sees_every_change() {
        let mut c = controller();
        let calls = Rc::new(Cell::new(0_u32));
        let seen = calls.clone();
        c.on_viewport_change(move |x, _y| {
            assert!(x.start < x.end);
            seen.set(seen.get() + 1);
        });
        let down = PointerEvent::mouse(1, Point::new(0.0, 0.0), PointerButton::Primary);
        c.pointer_down(&down);
        for i in 1..=3 {
            c.pointer_move(&PointerEvent {
                position: Point::new(f64::from(i) * 10.0, 0.0),
                ..down
            });
        }
        c.wheel(&WheelEvent {
            position: Point::ORIGIN,
            delta_y: 1.0,
        });
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn props_reset_only_on_change() {
        let mut c = controller();
        c.wheel(&WheelEvent {
            position: Point::new(200.0, 150.0),
            delta_y: 1.0,
        });
        let zoomed = c.viewport();
        assert!(!c.set_viewport_props(Viewport::new(-10.0..10.0, -5.0..5.0)));
        assert_eq!(c.viewport(), zoomed);
        assert!(c.set_viewport_props(Viewport::new(0.0..1.0, 0.0..1.0)));
        assert_eq!(c.viewport(), Viewport::new(0.0..1.0, 0.0..1.0));
    }

    #[test]
    fn surface_transform_maps_client_to_local() {
        let mut c = controller();
        c.set_surface_transform(Affine::translate((100.0, 50.0)));
        let down = PointerEvent::mouse(1, Point::new(300.0, 200.0), PointerButton::Primary);
        c.pointer_down(&down);
        c.pointer_move(&PointerEvent {
            position: Point::new(320.0, 200.0),
            ..down
        });
        assert_eq!(c.viewport().x_range(), -11.0..9.0);

        // Wheel at the client point over the local center keeps the center fixed.
        let mut c = controller();
        c.set_surface_transform(Affine::translate((100.0, 50.0)));
        c.wheel(&WheelEvent {
            position: Point::new(300.0, 200.0),
            delta_y: -1.0,
        });
        assert!(c.viewport().center().to_vec2().hypot() < 1e-9);
    }

    #[test]
    fn zoom_never_collapses_viewport() {
        let mut c = controller();
        for _ in 0..2000 {
            c.wheel(&WheelEvent {
                position: Point::new(123.0, 77.0),
                delta_y: -1.0,
            });
        }
        assert!(c.viewport().width() >= super::MIN_VIEWPORT_SPAN * 0.999);
        assert!(c.viewport().is_finite());
    }
}
