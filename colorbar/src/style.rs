// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Colorbar styling and layout constants.

use colorbar_text::TextStyle;
use peniko::color::palette::css;
use peniko::{Brush, Color};

use crate::picture::StrokeStyle;

/// Tunable constants for colorbar layout and painting.
///
/// The defaults reproduce a compact legend: 6 ticks, 5px tick marks, labels
/// 10px left of the bar and a white backing panel with 9px rounded corners.
/// None of the numbers are derived from anything; adjust them to taste.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorbarStyle {
    /// Number of synthesized ticks when the caller supplies none.
    pub tick_count: usize,
    /// Significant digits of synthesized labels.
    pub label_precision: usize,
    /// Length of a tick mark, drawn leftwards from the bar edge.
    pub tick_length: f64,
    /// Horizontal gap between a label's right edge and the bar.
    pub label_offset: f64,
    /// Label baseline offset below the tick, as a fraction of the line height.
    pub label_baseline_factor: f64,
    /// Gap between the bar bottom and the title box.
    pub title_gap: f64,
    /// Mask padding left of the leftmost label.
    pub mask_pad_left: f64,
    /// Mask padding above the bar.
    pub mask_pad_top: f64,
    /// Mask padding added to the bar and title height.
    pub mask_pad_bottom: f64,
    /// Minimum clearance between the mask edge and any drawn box.
    pub mask_margin: f64,
    /// Mask corner radius.
    pub mask_radius: f64,
    /// Mask fill.
    pub mask_fill: Brush,
    /// Mask border.
    pub mask_stroke: StrokeStyle,
    /// Bar outline.
    pub outline: StrokeStyle,
    /// Tick mark stroke.
    pub tick_stroke: StrokeStyle,
    /// Tick label font.
    pub label_font: TextStyle,
    /// Title font.
    pub title_font: TextStyle,
    /// Fill of labels and title.
    pub text_fill: Brush,
}

impl Default for ColorbarStyle {
    fn default() -> Self {
        Self {
            tick_count: 6,
            label_precision: 2,
            tick_length: 5.0,
            label_offset: 10.0,
            label_baseline_factor: 0.25,
            title_gap: 5.0,
            mask_pad_left: 12.0,
            mask_pad_top: 15.0,
            mask_pad_bottom: 30.0,
            mask_margin: 2.0,
            mask_radius: 9.0,
            mask_fill: Color::from_rgba8(255, 255, 255, 200).into(),
            mask_stroke: StrokeStyle::solid(Color::TRANSPARENT, 1.0),
            outline: StrokeStyle::solid(css::BLACK, 1.0),
            tick_stroke: StrokeStyle::solid(css::BLACK, 1.0),
            label_font: TextStyle::new(12.0),
            title_font: TextStyle::new(12.0),
            text_fill: css::BLACK.into(),
        }
    }
}

impl ColorbarStyle {
    /// Sets the number of synthesized ticks.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Sets the significant digits of synthesized labels.
    pub fn with_label_precision(mut self, precision: usize) -> Self {
        self.label_precision = precision;
        self
    }

    /// Sets the tick mark length.
    pub fn with_tick_length(mut self, tick_length: f64) -> Self {
        self.tick_length = tick_length.max(0.0);
        self
    }

    /// Sets the gap between labels and the bar.
    pub fn with_label_offset(mut self, label_offset: f64) -> Self {
        self.label_offset = label_offset;
        self
    }

    /// Sets the label baseline factor.
    pub fn with_label_baseline_factor(mut self, factor: f64) -> Self {
        self.label_baseline_factor = factor;
        self
    }

    /// Sets the gap between the bar and the title.
    pub fn with_title_gap(mut self, title_gap: f64) -> Self {
        self.title_gap = title_gap;
        self
    }

    /// Sets the left, top and bottom mask padding.
    pub fn with_mask_padding(mut self, left: f64, top: f64, bottom: f64) -> Self {
        self.mask_pad_left = left;
        self.mask_pad_top = top;
        self.mask_pad_bottom = bottom;
        self
    }

    /// Sets the minimum clearance around drawn boxes inside the mask.
    pub fn with_mask_margin(mut self, margin: f64) -> Self {
        self.mask_margin = margin.max(0.0);
        self
    }

    /// Sets the mask corner radius.
    pub fn with_mask_radius(mut self, radius: f64) -> Self {
        self.mask_radius = radius.max(0.0);
        self
    }

    /// Sets the mask fill.
    pub fn with_mask_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.mask_fill = fill.into();
        self
    }

    /// Sets the bar outline stroke.
    pub fn with_outline(mut self, outline: StrokeStyle) -> Self {
        self.outline = outline;
        self
    }

    /// Sets the tick mark stroke.
    pub fn with_tick_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.tick_stroke = stroke;
        self
    }

    /// Sets the label font.
    pub fn with_label_font(mut self, font: TextStyle) -> Self {
        self.label_font = font;
        self
    }

    /// Sets the title font.
    pub fn with_title_font(mut self, font: TextStyle) -> Self {
        self.title_font = font;
        self
    }

    /// Sets the label and title fill.
    pub fn with_text_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.text_fill = fill.into();
        self
    }
}
