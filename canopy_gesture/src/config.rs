// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Which gestures a plot reacts to, and how strongly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Drag to pan.
    pub pannable: bool,
    /// Wheel to zoom.
    pub zoomable: bool,
    /// Two‑finger pinch to zoom.
    pub pinch_zoomable: bool,
    /// Per wheel notch zoom factor, greater than one.
    pub zoom_speed: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pannable: true,
            zoomable: true,
            pinch_zoomable: true,
            zoom_speed: 1.1,
        }
    }
}

impl GestureConfig {
    /// A configuration that ignores every gesture.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            pannable: false,
            zoomable: false,
            pinch_zoomable: false,
            ..Self::default()
        }
    }

    /// Enables or disables drag panning.
    #[must_use]
    pub fn with_pannable(mut self, pannable: bool) -> Self {
        self.pannable = pannable;
        self
    }

    /// Enables or disables wheel zoom.
    #[must_use]
    pub fn with_zoomable(mut self, zoomable: bool) -> Self {
        self.zoomable = zoomable;
        self
    }

    /// Enables or disables pinch zoom.
    #[must_use]
    pub fn with_pinch_zoomable(mut self, pinch_zoomable: bool) -> Self {
        self.pinch_zoomable = pinch_zoomable;
        self
    }

    /// Sets the wheel zoom factor.
    #[must_use]
    pub fn with_zoom_speed(mut self, zoom_speed: f64) -> Self {
        self.zoom_speed = zoom_speed;
        self
    }
}
