// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Record-and-replay drawing.
//!
//! The colorbar never talks to a rendering backend directly. It emits drawing
//! commands against the [`Canvas`] trait; [`Picture`] is a canvas that records
//! those commands (and their bounds) so they can be replayed later against any
//! other canvas, any number of times.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use colorbar_text::TextStyle;
use kurbo::{Line, Point, Rect, RoundedRect};
use peniko::{Brush, Color, ColorStop, Gradient};

/// A 2D drawing surface accepting primitive paint commands.
///
/// Coordinates are in the caller's local space; placing that space in a scene
/// (translate/scale) is the implementation's business.
pub trait Canvas {
    /// Fills an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, brush: &Brush);
    /// Fills an axis-aligned rectangle with a linear gradient.
    fn fill_linear_gradient(&mut self, rect: Rect, gradient: &LinearGradient);
    /// Strokes the border of an axis-aligned rectangle.
    fn stroke_rect(&mut self, rect: Rect, stroke: &StrokeStyle);
    /// Fills a rounded rectangle.
    fn fill_rounded_rect(&mut self, rect: RoundedRect, brush: &Brush);
    /// Strokes the border of a rounded rectangle.
    fn stroke_rounded_rect(&mut self, rect: RoundedRect, stroke: &StrokeStyle);
    /// Strokes a line segment.
    fn stroke_line(&mut self, line: Line, stroke: &StrokeStyle);
    /// Draws a single line of text.
    fn draw_text(&mut self, run: &TextRun);
}

/// Stroke paint and width.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width.
    pub width: f64,
}

impl StrokeStyle {
    /// A solid stroke.
    pub fn solid(brush: impl Into<Brush>, width: f64) -> Self {
        Self {
            brush: brush.into(),
            width,
        }
    }
}

/// One color anchor of a [`LinearGradient`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Offset along the gradient axis, in `[0, 1]`.
    pub offset: f64,
    /// Color at the offset.
    pub color: Color,
}

/// A linear gradient in the local coordinate space.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    /// Point where offset 0 lies.
    pub start: Point,
    /// Point where offset 1 lies.
    pub end: Point,
    /// Stops sorted by offset.
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// Converts to a peniko brush for backends that consume peniko paints.
    pub fn to_brush(&self) -> Brush {
        let stops: Vec<ColorStop> = self
            .stops
            .iter()
            .map(|s| {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "offsets are in [0, 1]"
                )]
                let offset = s.offset as f32;
                ColorStop::from((offset, s.color))
            })
            .collect();
        Gradient::new_linear(self.start, self.end)
            .with_stops(stops.as_slice())
            .into()
    }
}

/// A positioned, pre-measured line of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    /// Text content (unshaped).
    pub text: String,
    /// Left end of the baseline.
    pub origin: Point,
    /// Font used for measuring and drawing.
    pub style: TextStyle,
    /// Fill paint.
    pub fill: Brush,
    /// Box spanning advance width by ascent + descent around `origin`.
    pub bounds: Rect,
}

/// A recorded drawing command.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// See [`Canvas::fill_rect`].
    FillRect(Rect, Brush),
    /// See [`Canvas::fill_linear_gradient`].
    FillLinearGradient(Rect, LinearGradient),
    /// See [`Canvas::stroke_rect`].
    StrokeRect(Rect, StrokeStyle),
    /// See [`Canvas::fill_rounded_rect`].
    FillRoundedRect(RoundedRect, Brush),
    /// See [`Canvas::stroke_rounded_rect`].
    StrokeRoundedRect(RoundedRect, StrokeStyle),
    /// See [`Canvas::stroke_line`].
    StrokeLine(Line, StrokeStyle),
    /// See [`Canvas::draw_text`].
    Text(TextRun),
}

impl DrawCommand {
    /// Geometric bounds of the command, ignoring stroke width.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::FillRect(r, _) | Self::FillLinearGradient(r, _) | Self::StrokeRect(r, _) => *r,
            Self::FillRoundedRect(r, _) | Self::StrokeRoundedRect(r, _) => r.rect(),
            Self::StrokeLine(l, _) => Rect::from_points(l.p0, l.p1),
            Self::Text(run) => run.bounds,
        }
    }

    /// Issues this command against `canvas`.
    pub fn apply(&self, canvas: &mut dyn Canvas) {
        match self {
            Self::FillRect(r, b) => canvas.fill_rect(*r, b),
            Self::FillLinearGradient(r, g) => canvas.fill_linear_gradient(*r, g),
            Self::StrokeRect(r, s) => canvas.stroke_rect(*r, s),
            Self::FillRoundedRect(r, b) => canvas.fill_rounded_rect(*r, b),
            Self::StrokeRoundedRect(r, s) => canvas.stroke_rounded_rect(*r, s),
            Self::StrokeLine(l, s) => canvas.stroke_line(*l, s),
            Self::Text(run) => canvas.draw_text(run),
        }
    }
}

/// An immutable-once-recorded list of drawing commands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Picture {
    commands: Vec<DrawCommand>,
    bounds: Option<Rect>,
}

impl Picture {
    /// Creates an empty picture.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded commands in paint order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Union of all recorded command bounds; [`Rect::ZERO`] when empty.
    pub fn bounds(&self) -> Rect {
        self.bounds.unwrap_or(Rect::ZERO)
    }

    /// Replays every recorded command, in order, against `canvas`.
    pub fn replay(&self, canvas: &mut dyn Canvas) {
        for command in &self.commands {
            command.apply(canvas);
        }
    }

    fn record(&mut self, command: DrawCommand) {
        let b = command.bounds();
        self.bounds = Some(match self.bounds {
            None => b,
            Some(r) => r.union(b),
        });
        self.commands.push(command);
    }
}

impl Canvas for Picture {
    fn fill_rect(&mut self, rect: Rect, brush: &Brush) {
        self.record(DrawCommand::FillRect(rect, brush.clone()));
    }

    fn fill_linear_gradient(&mut self, rect: Rect, gradient: &LinearGradient) {
        self.record(DrawCommand::FillLinearGradient(rect, gradient.clone()));
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &StrokeStyle) {
        self.record(DrawCommand::StrokeRect(rect, stroke.clone()));
    }

    fn fill_rounded_rect(&mut self, rect: RoundedRect, brush: &Brush) {
        self.record(DrawCommand::FillRoundedRect(rect, brush.clone()));
    }

    fn stroke_rounded_rect(&mut self, rect: RoundedRect, stroke: &StrokeStyle) {
        self.record(DrawCommand::StrokeRoundedRect(rect, stroke.clone()));
    }

    fn stroke_line(&mut self, line: Line, stroke: &StrokeStyle) {
        self.record(DrawCommand::StrokeLine(line, stroke.clone()));
    }

    fn draw_text(&mut self, run: &TextRun) {
        self.record(DrawCommand::Text(run.clone()));
    }
}
