// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

bitflags::bitflags! {
    /// What the host should do after the controller handled an event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EventResponse: u8 {
        /// The viewport changed and the plot should re-render.
        const VIEWPORT_CHANGED = 0b0000_0001;
        /// Suppress the platform's default action (scrolling, text selection).
        const PREVENT_DEFAULT  = 0b0000_0010;
        /// Capture the pointer so moves outside the surface keep arriving.
        const CAPTURE_POINTER  = 0b0000_0100;
        /// Release a previously captured pointer.
        const RELEASE_POINTER  = 0b0000_1000;
    }
}
