// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

/// Host‑assigned identity of an active pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

/// The device class of a pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// A mouse; only the primary button pans.
    Mouse,
    /// A finger on a touch surface.
    Touch,
    /// A stylus.
    Pen,
}

/// Which button a pointer event concerns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left mouse button, or contact for touch and pen.
    #[default]
    Primary,
    /// Right mouse button.
    Secondary,
    /// Middle mouse button.
    Auxiliary,
    /// No button (hover moves).
    None,
}

/// A pointer down/move/up/cancel/leave event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer identity, stable from down to up.
    pub id: PointerId,
    /// Device class.
    pub kind: PointerKind,
    /// Button involved.
    pub button: PointerButton,
    /// Position in client (screen) coordinates.
    pub position: Point,
}

impl PointerEvent {
    /// A mouse event with the given button.
    #[must_use]
    pub fn mouse(id: u64, position: Point, button: PointerButton) -> Self {
        Self {
            id: PointerId(id),
            kind: PointerKind::Mouse,
            button,
            position,
        }
    }

    /// A touch contact.
    #[must_use]
    pub fn touch(id: u64, position: Point) -> Self {
        Self {
            id: PointerId(id),
            kind: PointerKind::Touch,
            button: PointerButton::Primary,
            position,
        }
    }

    /// Whether this pointer may start a pan.
    ///
    /// Mouse pointers pan with the primary button only; touch and pen
    /// pointers always can.
    #[must_use]
    pub fn can_pan(&self) -> bool {
        match self.kind {
            PointerKind::Mouse => self.button == PointerButton::Primary,
            PointerKind::Touch | PointerKind::Pen => true,
        }
    }
}

/// A wheel or trackpad scroll event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelEvent {
    /// Cursor position in client coordinates.
    pub position: Point,
    /// Vertical scroll amount; negative scrolls up (zoom in).
    pub delta_y: f64,
}
