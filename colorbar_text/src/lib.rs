// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for colorbar layout.
//!
//! A colorbar places tick labels to the left of its gradient strip and a title
//! beneath it. Both placements depend on how large the rendered text is, so the
//! legend geometry asks a [`TextMeasurer`] for single-line metrics before any
//! drawing commands are recorded.
//!
//! This crate stays:
//! - dependency-free and `no_std` (it uses `alloc` for owned family names),
//! - renderer-agnostic: a shaping engine and a cheap heuristic can both
//!   implement the same trait.

#![no_std]

extern crate alloc;

use alloc::sync::Arc;

/// A minimal text measurement interface used by the colorbar layout.
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// Only the first line of `text` is measured; callers split on `\n`
    /// themselves if they lay out several lines.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        (**self).measure(text, style)
    }
}

/// Text styling inputs relevant to measurement and drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in legend coordinates (typically pixels).
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
    /// Font style (normal/italic/oblique).
    pub font_style: FontStyle,
}

impl TextStyle {
    /// Creates a sans-serif `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
        }
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_family(mut self, font_family: FontFamily) -> Self {
        self.font_family = font_family;
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_weight(mut self, font_weight: FontWeight) -> Self {
        self.font_weight = font_weight;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Font family selection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family (e.g. `"Inter"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the family string used in CSS/SVG font declarations.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// CSS-style font styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Normal style.
    Normal,
    /// Italic style.
    Italic,
    /// Oblique style.
    Oblique,
}

/// Horizontal alignment of a text box relative to its anchor x.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlign {
    /// The box starts at the anchor.
    #[default]
    Left,
    /// The box is centered on the anchor.
    Center,
    /// The box ends at the anchor.
    Right,
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// The advance width.
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Metrics of an empty string.
    pub const EMPTY: Self = Self {
        advance_width: 0.0,
        ascent: 0.0,
        descent: 0.0,
        leading: 0.0,
    };

    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }

    /// Returns the left edge of the text box for an anchor at `x = 0`.
    ///
    /// A right-aligned box spans `[-advance_width, 0]`.
    #[must_use]
    pub fn aligned_left(&self, align: TextAlign) -> f64 {
        match align {
            TextAlign::Left => 0.0,
            TextAlign::Center => -0.5 * self.advance_width,
            TextAlign::Right => -self.advance_width,
        }
    }
}

/// A tiny heuristic text measurer suitable for tests and quick previews.
///
/// It assumes an average glyph width of ~0.6em and a baseline at ~0.8em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let line = text.split('\n').next().unwrap_or("");
        if line.is_empty() {
            return TextMetrics::EMPTY;
        }
        TextMetrics {
            advance_width: 0.6 * style.font_size * line.chars().count() as f64,
            ascent: 0.8 * style.font_size,
            descent: 0.2 * style.font_size,
            leading: 0.0,
        }
    }
}
