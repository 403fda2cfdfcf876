// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The colorbar legend.
//!
//! A [`Colorbar`] is built once from a [`ColorbarSpec`]: the geometry is
//! derived, and the bar, ticks, labels and title are recorded into a
//! [`Picture`]. Painting then draws the translucent mask and replays that
//! picture on top of it.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use colorbar_text::TextMeasurer;
use kurbo::{Rect, RoundedRect};
use peniko::Brush;

use crate::colormap::{ColorMapping, ColorStop};
use crate::error::ColorbarError;
use crate::geometry::LegendGeometry;
use crate::picture::{Canvas, Picture, StrokeStyle};
use crate::style::ColorbarStyle;
use crate::tick::Tick;

/// Inputs of a colorbar.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorbarSpec {
    /// Stops copied from the color mapping.
    pub stops: Vec<ColorStop>,
    /// Bar width.
    pub width: f64,
    /// Bar height.
    pub height: f64,
    /// Explicit ticks; `None` synthesizes evenly spaced ones.
    pub ticks: Option<Vec<Tick>>,
    /// Title drawn under the bar.
    pub title: Option<String>,
    /// Layout and paint constants.
    pub style: ColorbarStyle,
}

impl ColorbarSpec {
    /// Creates a spec for `mapping` with a `width` x `height` bar.
    pub fn new(mapping: &(impl ColorMapping + ?Sized), width: f64, height: f64) -> Self {
        Self {
            stops: mapping.stops().to_vec(),
            width,
            height,
            ticks: None,
            title: None,
            style: ColorbarStyle::default(),
        }
    }

    /// Sets explicit ticks.
    pub fn with_ticks<T: Into<Tick>>(mut self, ticks: impl IntoIterator<Item = T>) -> Self {
        self.ticks = Some(ticks.into_iter().map(Into::into).collect());
        self
    }

    /// Sets explicit tick values with matching labels.
    ///
    /// Values without a label (when `labels` is shorter) get formatted labels.
    pub fn with_labeled_ticks<S: Into<String>>(
        mut self,
        values: &[f64],
        labels: impl IntoIterator<Item = S>,
    ) -> Self {
        let mut labels = labels.into_iter();
        self.ticks = Some(
            values
                .iter()
                .map(|&value| Tick {
                    value,
                    label: labels.next().map(Into::into),
                })
                .collect(),
        );
        self
    }

    /// Goes back to synthesized ticks.
    pub fn without_ticks(mut self) -> Self {
        self.ticks = None;
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the style.
    pub fn with_style(mut self, style: ColorbarStyle) -> Self {
        self.style = style;
        self
    }
}

/// A vertical color legend: gradient bar, ticks, labels, title and mask.
///
/// Immutable after construction; build a new one to change anything.
#[derive(Clone, Debug)]
pub struct Colorbar {
    geometry: LegendGeometry,
    picture: Picture,
    mask_fill: Brush,
    mask_stroke: StrokeStyle,
}

impl Colorbar {
    /// Builds a colorbar, measuring labels and title with `measurer`.
    pub fn new(spec: &ColorbarSpec, measurer: &dyn TextMeasurer) -> Result<Self, ColorbarError> {
        let geometry = LegendGeometry::derive(spec, measurer)?;
        let style = &spec.style;

        let mut picture = Picture::new();
        picture.fill_linear_gradient(geometry.bar, &geometry.gradient);
        picture.stroke_rect(geometry.bar, &style.outline);
        for tick in &geometry.ticks {
            picture.stroke_line(tick.mark, &style.tick_stroke);
            if let Some(label) = &tick.label {
                picture.draw_text(label);
            }
        }
        if let Some(title) = &geometry.title {
            picture.draw_text(title);
        }

        Ok(Self {
            geometry,
            picture,
            mask_fill: style.mask_fill.clone(),
            mask_stroke: style.mask_stroke.clone(),
        })
    }

    /// Paints the mask, then the recorded bar, ticks, labels and title.
    pub fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rounded_rect(self.geometry.mask, &self.mask_fill);
        canvas.stroke_rounded_rect(self.geometry.mask, &self.mask_stroke);
        self.picture.replay(canvas);
    }

    /// Bounds of the drawn content, excluding the mask.
    pub fn bounding_rect(&self) -> Rect {
        self.picture.bounds()
    }

    /// The rounded backing panel.
    pub fn mask(&self) -> RoundedRect {
        self.geometry.mask
    }

    /// The derived geometry.
    pub fn geometry(&self) -> &LegendGeometry {
        &self.geometry
    }

    /// The recorded bar, ticks, labels and title.
    pub fn picture(&self) -> &Picture {
        &self.picture
    }
}
