// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertical color legends for continuous color mappings.
//!
//! A [`Colorbar`] depicts how scalar values map to colors: a gradient strip,
//! tick marks with labels, an optional title, and a rounded translucent panel
//! behind it all so the legend stays readable over arbitrary imagery.
//!
//! - [`ColorMap`] / [`ColorMapping`] describe the mapping as ordered stops.
//! - [`LegendGeometry`] holds everything derived from a [`ColorbarSpec`]:
//!   normalized stops, tick placement, text boxes and the mask.
//! - [`Picture`] records drawing commands once; [`Canvas`] is the surface they
//!   replay onto.
//!
//! Windowing and scene placement belong to the host. Text shaping is delegated
//! to a [`TextMeasurer`].

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod colorbar;
#[cfg(test)]
mod colorbar_tests;
mod colormap;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod geometry;
mod picture;
mod style;
mod tick;

pub use colorbar::{Colorbar, ColorbarSpec};
pub use colorbar_text::{HeuristicTextMeasurer, TextAlign, TextMeasurer, TextMetrics, TextStyle};
pub use colormap::{ColorMap, ColorMapping, ColorStop};
pub use error::ColorbarError;
pub use format::format_significant;
pub use geometry::{Domain, LegendGeometry, NormalizedStop, TickPlacement, normalize_stops};
pub use picture::{Canvas, DrawCommand, GradientStop, LinearGradient, Picture, StrokeStyle, TextRun};
pub use style::ColorbarStyle;
pub use tick::{Tick, default_tick_values};
