// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parley-backed text measurement for colorbar legends.
//!
//! [`ParleyTextMeasurer`] shapes tick labels and titles with the system fonts so
//! the legend mask hugs the text the renderer will actually draw.

#![no_std]

extern crate alloc;

use alloc::borrow::Cow;
use core::cell::RefCell;

use colorbar_text::{FontFamily, FontStyle, TextMeasurer, TextMetrics, TextStyle};
use parley::style::{FontFamily as ParleyFontFamily, FontStack, GenericFamily, StyleProperty};
use parley::{
    Alignment, AlignmentOptions, FontContext, FontStyle as ParleyFontStyle, FontWeight,
    LayoutContext,
};

/// A [`TextMeasurer`] backed by Parley.
///
/// Shaping contexts are kept behind `RefCell`s, so a measurer is cheap to reuse
/// across many labels but is not `Sync`.
pub struct ParleyTextMeasurer {
    font_cx: RefCell<FontContext>,
    layout_cx: RefCell<LayoutContext<()>>,
    display_scale: f32,
}

impl core::fmt::Debug for ParleyTextMeasurer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParleyTextMeasurer")
            .field("display_scale", &self.display_scale)
            .finish_non_exhaustive()
    }
}

impl ParleyTextMeasurer {
    /// Creates a measurer using Parley's default system font configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            font_cx: RefCell::new(FontContext::new()),
            layout_cx: RefCell::new(LayoutContext::new()),
            display_scale: 1.0,
        }
    }

    /// Sets the device pixel ratio used while shaping.
    ///
    /// Metrics are always reported in logical (unscaled) coordinates.
    #[must_use]
    pub fn with_display_scale(mut self, display_scale: f32) -> Self {
        self.display_scale = if display_scale.is_finite() && display_scale > 0.0 {
            display_scale
        } else {
            1.0
        };
        self
    }

    fn font_stack(family: &FontFamily) -> FontStack<'_> {
        FontStack::from(match family {
            FontFamily::Serif => ParleyFontFamily::Generic(GenericFamily::Serif),
            FontFamily::SansSerif => ParleyFontFamily::Generic(GenericFamily::SansSerif),
            FontFamily::Monospace => ParleyFontFamily::Generic(GenericFamily::Monospace),
            FontFamily::Named(name) => ParleyFontFamily::Named(Cow::Borrowed(name.as_ref())),
        })
    }

    fn font_style(style: FontStyle) -> ParleyFontStyle {
        match style {
            FontStyle::Normal => ParleyFontStyle::Normal,
            FontStyle::Italic => ParleyFontStyle::Italic,
            FontStyle::Oblique => ParleyFontStyle::Oblique(None),
        }
    }

    /// Clamps a legend font size into the `f32` range Parley expects.
    fn font_size(font_size: f64) -> f32 {
        if !font_size.is_finite() || font_size <= 0.0 {
            return 0.0;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "clamped to the f32 range first"
        )]
        {
            font_size.min(f64::from(f32::MAX)) as f32
        }
    }

    fn unscale(&self, v: f32) -> f64 {
        f64::from(v) / f64::from(self.display_scale)
    }
}

impl Default for ParleyTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for ParleyTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let line = text.split('\n').next().unwrap_or("");
        if line.is_empty() {
            return TextMetrics::EMPTY;
        }

        let mut font_cx = self.font_cx.borrow_mut();
        let mut layout_cx = self.layout_cx.borrow_mut();

        let mut builder = layout_cx.ranged_builder(&mut font_cx, line, self.display_scale, true);
        builder.push_default(StyleProperty::FontSize(Self::font_size(style.font_size)));
        builder.push_default(StyleProperty::FontStack(Self::font_stack(
            &style.font_family,
        )));
        builder.push_default(StyleProperty::FontStyle(Self::font_style(style.font_style)));
        builder.push_default(StyleProperty::FontWeight(FontWeight::new(f32::from(
            style.font_weight.0,
        ))));

        let mut layout: parley::Layout<()> = builder.build(line);
        layout.break_all_lines(None);
        layout.align(None, Alignment::Start, AlignmentOptions::default());

        layout
            .lines()
            .next()
            .map_or(TextMetrics::EMPTY, |shaped| {
                let m = shaped.metrics();
                TextMetrics {
                    advance_width: self.unscale(m.advance),
                    ascent: self.unscale(m.ascent),
                    descent: self.unscale(m.descent),
                    leading: self.unscale(m.leading),
                }
            })
    }
}
