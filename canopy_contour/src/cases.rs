// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The marching‑squares case table.
//!
//! Corners are numbered counter‑clockwise from the bottom left, and each
//! contributes one bit to the case index when its sample is strictly
//! positive:
//!
//! ```text
//!   TL (8) ── top ── TR (4)
//!     │                │
//!   left             right
//!     │                │
//!   BL (1) ─ bottom ─ BR (2)
//! ```

/// One side of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Edge {
    /// Between BL and BR.
    Bottom = 0,
    /// Between BR and TR.
    Right = 1,
    /// Between TL and TR.
    Top = 2,
    /// Between BL and TL.
    Left = 3,
}

/// Bit for the bottom‑left corner.
pub const BOTTOM_LEFT: u8 = 1;
/// Bit for the bottom‑right corner.
pub const BOTTOM_RIGHT: u8 = 2;
/// Bit for the top‑right corner.
pub const TOP_RIGHT: u8 = 4;
/// Bit for the top‑left corner.
pub const TOP_LEFT: u8 = 8;

/// Computes the 4‑bit case index from corner samples.
#[must_use]
pub fn case_index(bl: f64, br: f64, tr: f64, tl: f64) -> u8 {
    let mut case = 0;
    if bl > 0.0 {
        case |= BOTTOM_LEFT;
    }
    if br > 0.0 {
        case |= BOTTOM_RIGHT;
    }
    if tr > 0.0 {
        case |= TOP_RIGHT;
    }
    if tl > 0.0 {
        case |= TOP_LEFT;
    }
    case
}

use Edge::{Bottom, Left, Right, Top};

const TABLE: [&[(Edge, Edge)]; 16] = [
    &[],
    &[(Left, Bottom)],
    &[(Bottom, Right)],
    &[(Left, Right)],
    &[(Right, Top)],
    // Saddle: the two positive corners are cut off separately.
    &[(Left, Bottom), (Right, Top)],
    &[(Bottom, Top)],
    &[(Left, Top)],
    &[(Left, Top)],
    &[(Bottom, Top)],
    // Saddle: the two negative corners are cut off separately.
    &[(Bottom, Right), (Top, Left)],
    &[(Right, Top)],
    &[(Left, Right)],
    &[(Bottom, Right)],
    &[(Left, Bottom)],
    &[],
];

/// Edge pairs crossed by the iso‑line for `case`.
///
/// Cases 0 and 15 cross nothing. Saddles (5 and 10) use a fixed pairing and
/// are never disambiguated by the cell's center value. Indices above 15 are
/// masked to their low four bits.
#[must_use]
pub fn case_segments(case: u8) -> &'static [(Edge, Edge)] {
    TABLE[usize::from(case & 0x0f)]
}
