// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color mappings.
//!
//! A color mapping is an ordered list of `(position, color)` stops with linear
//! blending in between. The colorbar only reads the stops; sampling and lookup
//! tables are here so a host can color its imagery with the exact mapping the
//! legend depicts.

extern crate alloc;

use alloc::vec::Vec;

use peniko::Color;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// A single anchor of a color mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    /// Position in domain units.
    pub position: f64,
    /// Color at this position, channels in `[0, 1]`.
    pub color: Color,
}

impl ColorStop {
    /// Creates a stop from a position and a color.
    pub fn new(position: f64, color: Color) -> Self {
        Self { position, color }
    }

    /// Creates a stop from straight-alpha RGBA channels in `[0, 1]`.
    pub fn rgba(position: f64, rgba: [f32; 4]) -> Self {
        Self {
            position,
            color: Color::new(rgba),
        }
    }
}

/// Anything that exposes an ordered list of color stops.
///
/// Positions are expected to increase strictly; this is not checked.
pub trait ColorMapping {
    /// The stops in order of increasing position.
    fn stops(&self) -> &[ColorStop];
}

impl ColorMapping for [ColorStop] {
    fn stops(&self) -> &[ColorStop] {
        self
    }
}

impl ColorMapping for Vec<ColorStop> {
    fn stops(&self) -> &[ColorStop] {
        self
    }
}

/// A piecewise-linear color map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorMap {
    stops: Vec<ColorStop>,
}

impl ColorMap {
    /// Creates a color map from stops ordered by position.
    pub fn new(stops: impl Into<Vec<ColorStop>>) -> Self {
        Self {
            stops: stops.into(),
        }
    }

    /// Creates a color map from parallel position and RGBA arrays.
    ///
    /// Extra entries in the longer slice are ignored.
    pub fn from_arrays(positions: &[f64], colors: &[[f32; 4]]) -> Self {
        Self::new(
            positions
                .iter()
                .zip(colors)
                .map(|(&p, &c)| ColorStop::rgba(p, c))
                .collect::<Vec<_>>(),
        )
    }

    /// Returns `(min, max)` of the stop positions, or `None` for an empty map.
    pub fn domain(&self) -> Option<(f64, f64)> {
        let first = self.stops.first()?;
        Some(self.stops.iter().fold(
            (first.position, first.position),
            |(lo, hi), s| (lo.min(s.position), hi.max(s.position)),
        ))
    }

    /// Samples the map at `value` (domain units).
    ///
    /// Values outside the stop range take the color of the nearest end stop.
    /// An empty map samples as transparent black.
    pub fn sample(&self, value: f64) -> Color {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Color::TRANSPARENT;
        };
        if value.is_nan() || value <= first.position {
            return first.color;
        }
        if value >= last.position {
            return last.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if value <= b.position {
                let span = b.position - a.position;
                if span <= 0.0 {
                    return b.color;
                }
                return lerp(a.color, b.color, (value - a.position) / span);
            }
        }
        last.color
    }

    /// Builds an `n`-entry RGBA8 lookup table.
    ///
    /// `start` and `stop` are fractions of the domain (`0.0` is the lowest stop,
    /// `1.0` the highest); entries are sampled evenly between them, both ends
    /// included.
    pub fn lookup_table(&self, start: f64, stop: f64, n: usize) -> Vec<[u8; 4]> {
        let Some((lo, hi)) = self.domain() else {
            return Vec::new();
        };
        let span = hi - lo;
        (0..n)
            .map(|i| {
                let t = if n > 1 {
                    start + (stop - start) * i as f64 / (n - 1) as f64
                } else {
                    start
                };
                to_rgba8(self.sample(lo + t * span))
            })
            .collect()
    }
}

impl ColorMapping for ColorMap {
    fn stops(&self) -> &[ColorStop] {
        &self.stops
    }
}

fn lerp(a: Color, b: Color, t: f64) -> Color {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "t is a blend factor in [0, 1]"
    )]
    let t = t as f32;
    let mut out = [0.0_f32; 4];
    for (o, (x, y)) in out.iter_mut().zip(a.components.iter().zip(b.components)) {
        *o = x + (y - x) * t;
    }
    Color::new(out)
}

fn to_rgba8(color: Color) -> [u8; 4] {
    color.components.map(|c| {
        let v = (f64::from(c).clamp(0.0, 1.0) * 255.0).round();
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "clamped to 0..=255 above"
        )]
        {
            v as u8
        }
    })
}
