// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing port marks render through, and a recorder implementing it.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect, Stroke};
use peniko::Color;

/// Horizontal placement of text relative to its anchor point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// The anchor is the left edge.
    #[default]
    Start,
    /// The anchor is the horizontal centre.
    Middle,
    /// The anchor is the right edge.
    End,
}

/// Vertical placement of text relative to its anchor point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    /// The anchor is the top of the text.
    Top,
    /// The anchor is the vertical centre.
    Middle,
    /// The anchor is the alphabetic baseline.
    #[default]
    Alphabetic,
    /// The anchor is the bottom of the text.
    Bottom,
}

/// How a run of text is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Fill color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f64,
    /// Horizontal alignment.
    pub align: TextAlign,
    /// Vertical alignment.
    pub baseline: TextBaseline,
    /// Draw a halo in this color behind the glyphs, for legibility over lines.
    pub halo: Option<Color>,
}

impl TextStyle {
    /// Text of `size` pixels in `color`, start‑aligned on the baseline.
    #[must_use]
    pub fn new(color: Color, size: f64) -> Self {
        Self {
            color,
            size,
            align: TextAlign::Start,
            baseline: TextBaseline::Alphabetic,
            halo: None,
        }
    }

    /// Sets both alignments.
    #[must_use]
    pub fn aligned(mut self, align: TextAlign, baseline: TextBaseline) -> Self {
        self.align = align;
        self.baseline = baseline;
        self
    }

    /// Sets the halo color.
    #[must_use]
    pub fn with_halo(mut self, halo: Color) -> Self {
        self.halo = Some(halo);
        self
    }
}

/// A pixel‑space drawing surface.
///
/// Coordinates are in pixels with Y pointing down. Clips nest: every
/// [`push_clip`](Painter::push_clip) is matched by a
/// [`pop_clip`](Painter::pop_clip).
pub trait Painter {
    /// Fills `path` with `color` using the non‑zero rule.
    fn fill(&mut self, path: &BezPath, color: Color);
    /// Strokes `path`.
    fn stroke(&mut self, path: &BezPath, style: &Stroke, color: Color);
    /// Draws `text` anchored at `position`.
    fn text(&mut self, text: &str, position: Point, style: &TextStyle);
    /// Restricts drawing to `rect` until the matching `pop_clip`.
    fn push_clip(&mut self, rect: Rect);
    /// Ends the innermost clip.
    fn pop_clip(&mut self);
}

/// One call recorded by a [`Recorder`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// [`Painter::fill`].
    Fill {
        /// Filled path.
        path: BezPath,
        /// Fill color.
        color: Color,
    },
    /// [`Painter::stroke`].
    Stroke {
        /// Stroked path.
        path: BezPath,
        /// Stroke style.
        style: Stroke,
        /// Stroke color.
        color: Color,
    },
    /// [`Painter::text`].
    Text {
        /// The text.
        text: String,
        /// Anchor point.
        position: Point,
        /// Style.
        style: TextStyle,
    },
    /// [`Painter::push_clip`].
    PushClip(Rect),
    /// [`Painter::pop_clip`].
    PopClip,
}

/// A [`Painter`] that keeps every call for inspection or replay.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
    depth: usize,
    max_depth: usize,
    unbalanced: bool,
}

impl Recorder {
    /// An empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Takes the recorded commands, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        self.depth = 0;
        self.max_depth = 0;
        self.unbalanced = false;
        core::mem::take(&mut self.commands)
    }

    /// Whether every `push_clip` so far has been popped, and never more.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        !self.unbalanced && self.depth == 0
    }

    /// Deepest clip nesting seen.
    #[must_use]
    pub fn max_clip_depth(&self) -> usize {
        self.max_depth
    }

    /// Recorded fills, in order.
    pub fn fills(&self) -> impl Iterator<Item = (&BezPath, Color)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Fill { path, color } => Some((path, *color)),
            _ => None,
        })
    }

    /// Recorded strokes, in order.
    pub fn strokes(&self) -> impl Iterator<Item = (&BezPath, &Stroke, Color)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Stroke { path, style, color } => Some((path, style, *color)),
            _ => None,
        })
    }

    /// Recorded text runs, in order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, Point)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, position, .. } => Some((text.as_str(), *position)),
            _ => None,
        })
    }

    /// Replays the recording onto another painter.
    pub fn replay(&self, painter: &mut dyn Painter) {
        for command in &self.commands {
            match command {
                DrawCommand::Fill { path, color } => painter.fill(path, *color),
                DrawCommand::Stroke { path, style, color } => painter.stroke(path, style, *color),
                DrawCommand::Text {
                    text,
                    position,
                    style,
                } => painter.text(text, *position, style),
                DrawCommand::PushClip(rect) => painter.push_clip(*rect),
                DrawCommand::PopClip => painter.pop_clip(),
            }
        }
    }
}

impl Painter for Recorder {
    fn fill(&mut self, path: &BezPath, color: Color) {
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            color,
        });
    }

    fn stroke(&mut self, path: &BezPath, style: &Stroke, color: Color) {
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            style: style.clone(),
            color,
        });
    }

    fn text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            style: *style,
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.commands.push(DrawCommand::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        match self.depth.checked_sub(1) {
            Some(depth) => self.depth = depth,
            None => self.unbalanced = true,
        }
        self.commands.push(DrawCommand::PopClip);
    }
}
