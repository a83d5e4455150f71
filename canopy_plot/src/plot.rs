// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The plot container.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use canopy_gesture::{GestureConfig, ViewportController};
use canopy_view::{Margins, PlotFrame, Viewport};
use kurbo::{Rect, Shape};
use tracing::trace;

use crate::context::{Mark, PlotContext};
use crate::painter::Painter;
use crate::theme::Theme;

/// A sized plot: a viewport controller, a theme and an ordered list of marks.
///
/// Input events go to [`controller_mut`](Self::controller_mut); the next
/// [`render`](Self::render) draws with the updated viewport. Marks are drawn
/// in insertion order, clipped to the inner rectangle of the frame.
pub struct Plot {
    controller: ViewportController,
    theme: Theme,
    marks: Vec<Box<dyn Mark>>,
}

impl fmt::Debug for Plot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plot")
            .field("controller", &self.controller)
            .field("theme", &self.theme)
            .field("marks", &self.marks.len())
            .finish()
    }
}

impl Plot {
    /// A `width × height` plot showing the default viewport with no margins.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            controller: ViewportController::new(
                Viewport::default(),
                PlotFrame::new(width, height, Margins::ZERO),
                GestureConfig::default(),
            ),
            theme: Theme::default(),
            marks: Vec::new(),
        }
    }

    /// Shows `viewport`.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.controller.set_viewport_props(viewport);
        self
    }

    /// Insets the plotting area.
    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.controller.set_margins(margins);
        self
    }

    /// Replaces the theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Replaces the gesture options.
    #[must_use]
    pub fn with_gestures(mut self, config: GestureConfig) -> Self {
        self.controller.set_config(config);
        self
    }

    /// Appends a mark.
    #[must_use]
    pub fn with_mark(mut self, mark: impl Mark + 'static) -> Self {
        self.push(mark);
        self
    }

    /// Appends a mark.
    pub fn push(&mut self, mark: impl Mark + 'static) {
        self.marks.push(Box::new(mark));
    }

    /// Removes every mark.
    pub fn clear(&mut self) {
        self.marks.clear();
    }

    /// Number of marks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Whether the plot has no marks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// The theme.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Sets the theme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// The viewport controller.
    #[must_use]
    pub fn controller(&self) -> &ViewportController {
        &self.controller
    }

    /// The viewport controller, for feeding input events and resizes.
    pub fn controller_mut(&mut self) -> &mut ViewportController {
        &mut self.controller
    }

    /// The context marks are drawn with right now.
    #[must_use]
    pub fn context(&self) -> PlotContext {
        PlotContext::new(self.controller.space(), self.theme)
    }

    /// Draws the background and every mark.
    pub fn render(&self, painter: &mut dyn Painter) {
        let cx = self.context();
        let frame = cx.space().frame();
        let outer = Rect::from_origin_size((0.0, 0.0), frame.size);
        painter.fill(&outer.to_path(0.1), self.theme.background);
        painter.push_clip(cx.space().inner_rect());
        for mark in &self.marks {
            mark.paint(&cx, painter);
        }
        painter.pop_clip();
        trace!(marks = self.marks.len(), "plot rendered");
    }
}

#[cfg(test)]
mod tests {
    use canopy_view::{Margins, Viewport};
    use kurbo::{Point, Rect};

    use super::Plot;
    use crate::context::PlotContext;
    use crate::painter::{DrawCommand, Painter, Recorder, TextStyle};

    #[test]
    fn clips_marks_to_the_inner_rect() {
        let plot = Plot::new(400.0, 300.0)
            .with_margins(Margins::uniform(10.0))
            .with_mark(|cx: &PlotContext, p: &mut dyn Painter| {
                let style = TextStyle::new(cx.theme().foreground, 12.0);
                p.text("origin", cx.to_pixel(Point::ORIGIN), &style);
            });
        let mut r = Recorder::new();
        plot.render(&mut r);
        assert!(r.is_balanced());
        assert!(matches!(r.commands()[0], DrawCommand::Fill { .. }));
        assert_eq!(
            r.commands()[1],
            DrawCommand::PushClip(Rect::new(10.0, 10.0, 390.0, 290.0))
        );
        assert_eq!(r.texts().next(), Some(("origin", Point::new(200.0, 150.0))));
    }

    #[test]
    fn renders_with_the_current_viewport() {
        let mut plot =
            Plot::new(400.0, 300.0).with_viewport(Viewport::new(-10.0..10.0, -5.0..5.0));
        assert_eq!(
            plot.context().to_pixel(Point::new(10.0, 5.0)),
            Point::new(400.0, 0.0)
        );
        plot.controller_mut()
            .set_viewport_props(Viewport::new(0.0..20.0, -5.0..5.0));
        assert_eq!(
            plot.context().to_pixel(Point::new(10.0, 0.0)),
            Point::new(200.0, 150.0)
        );
    }
}
