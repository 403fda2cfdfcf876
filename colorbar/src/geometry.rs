// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend geometry.
//!
//! Everything about a colorbar that depends on numbers rather than on a
//! rendering backend: the value domain, normalized stops, where each tick and
//! label sits, the title box and the backing mask. It is derived once from a
//! [`ColorbarSpec`] and never changes afterwards.
//!
//! Local coordinates put the bar at `[0, 0]..[width, height]` with `y` growing
//! downwards, so the largest domain value sits at the top (`y = 0`). Labels and
//! tick marks extend to the left of the bar (negative `x`); the title sits
//! below it.

extern crate alloc;

use alloc::string::ToString;
use alloc::vec::Vec;

use colorbar_text::{TextAlign, TextMeasurer};
use kurbo::{Line, Point, Rect, RoundedRect};
use peniko::Color;

use crate::colorbar::ColorbarSpec;
use crate::colormap::ColorStop;
use crate::error::ColorbarError;
use crate::picture::{GradientStop, LinearGradient, TextRun};
use crate::style::ColorbarStyle;
use crate::tick::{Tick, default_tick_values};

/// The value range covered by a color mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    /// Smallest stop position.
    pub min: f64,
    /// Largest minus smallest stop position; always finite and positive.
    pub span: f64,
}

impl Domain {
    /// Derives the domain from stop positions.
    ///
    /// Fails on an empty list, on NaN or infinite positions, when all
    /// positions coincide, and when the span itself overflows `f64`.
    pub fn from_stops(stops: &[ColorStop]) -> Result<Self, ColorbarError> {
        let first = stops.first().ok_or(ColorbarError::EmptyMapping)?;
        let mut lo = first.position;
        let mut hi = first.position;
        for (index, stop) in stops.iter().enumerate() {
            if !stop.position.is_finite() {
                return Err(ColorbarError::NonFiniteStop {
                    index,
                    position: stop.position,
                });
            }
            lo = lo.min(stop.position);
            hi = hi.max(stop.position);
        }
        let span = hi - lo;
        if span <= 0.0 {
            return Err(ColorbarError::DegenerateDomain { value: lo });
        }
        if !span.is_finite() {
            return Err(ColorbarError::DomainOverflow { min: lo, max: hi });
        }
        Ok(Self { min: lo, span })
    }

    /// Largest stop position.
    pub fn max(&self) -> f64 {
        self.min + self.span
    }

    /// Maps a domain value to `[0, 1]` (values outside the domain map outside).
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / self.span
    }

    /// Whether `value` lies in the closed domain interval.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max()).contains(&value)
    }

    /// Vertical position of `value` on a bar of the given height; the maximum
    /// maps to `0`, the minimum to `height`.
    pub fn y_at(&self, value: f64, height: f64) -> f64 {
        (1.0 - self.normalize(value)) * height
    }
}

/// A color stop with its position mapped into `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedStop {
    /// Normalized position; `0` is the domain minimum.
    pub position: f64,
    /// Unchanged stop color.
    pub color: Color,
}

/// Maps every stop position into `[0, 1]`, keeping order and colors.
pub fn normalize_stops(stops: &[ColorStop], domain: &Domain) -> Vec<NormalizedStop> {
    stops
        .iter()
        .map(|s| NormalizedStop {
            position: domain.normalize(s.position),
            color: s.color,
        })
        .collect()
}

/// A placed tick: its mark and optional label.
#[derive(Clone, Debug, PartialEq)]
pub struct TickPlacement {
    /// Domain value.
    pub value: f64,
    /// Vertical position in local coordinates.
    pub y: f64,
    /// Tick mark, from the bar edge leftwards.
    pub mark: Line,
    /// Label, absent when the label text is empty.
    pub label: Option<TextRun>,
}

/// Geometry of a colorbar, derived once from its spec.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendGeometry {
    /// Value domain of the mapping.
    pub domain: Domain,
    /// Stops with positions normalized into `[0, 1]`.
    pub stops: Vec<NormalizedStop>,
    /// The gradient strip.
    pub bar: Rect,
    /// Vertical gradient filling the strip; offset `1 - s` per stop.
    pub gradient: LinearGradient,
    /// Placed ticks in input order.
    pub ticks: Vec<TickPlacement>,
    /// Placed title, if any.
    pub title: Option<TextRun>,
    /// Left edge of the widest label box, right-aligned at the bar edge before
    /// the label offset is applied (never positive).
    pub min_x: f64,
    /// Rounded backing panel.
    pub mask: RoundedRect,
}

impl LegendGeometry {
    /// Derives the geometry of `spec`, measuring text with `measurer`.
    pub fn derive(
        spec: &ColorbarSpec,
        measurer: &dyn TextMeasurer,
    ) -> Result<Self, ColorbarError> {
        let (width, height) = (spec.width, spec.height);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ColorbarError::InvalidSize { width, height });
        }
        let domain = Domain::from_stops(&spec.stops)?;
        let style = &spec.style;

        let stops = normalize_stops(&spec.stops, &domain);
        let mut gradient_stops: Vec<GradientStop> = stops
            .iter()
            .map(|s| GradientStop {
                offset: 1.0 - s.position,
                color: s.color,
            })
            .collect();
        gradient_stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        let gradient = LinearGradient {
            start: Point::new(0.5 * width, 0.0),
            end: Point::new(0.5 * width, height),
            stops: gradient_stops,
        };

        let synthesized;
        let ticks: &[Tick] = match &spec.ticks {
            Some(ticks) => {
                if let Some((index, t)) = ticks
                    .iter()
                    .enumerate()
                    .find(|(_, t)| !t.value.is_finite())
                {
                    return Err(ColorbarError::NonFiniteTick {
                        index,
                        value: t.value,
                    });
                }
                ticks
            }
            None => {
                synthesized = default_tick_values(domain.min, domain.span, style.tick_count)
                    .into_iter()
                    .map(Tick::new)
                    .collect::<Vec<_>>();
                &synthesized
            }
        };

        let mut min_x = 0.0_f64;
        let mut placed = Vec::with_capacity(ticks.len());
        for tick in ticks {
            if !domain.contains(tick.value) {
                log::warn!(
                    "tick {} lies outside the colorbar domain [{}, {}]",
                    tick.value,
                    domain.min,
                    domain.max()
                );
            }
            let y = domain.y_at(tick.value, height);
            let mark = Line::new((0.0, y), (-style.tick_length, y));
            let text = tick.label_text(style.label_precision);
            let label = (!text.is_empty()).then(|| {
                let m = measurer.measure(&text, &style.label_font);
                min_x = min_x.min(m.aligned_left(TextAlign::Right));
                let left = m.aligned_left(TextAlign::Right) - style.label_offset;
                let baseline = y + m.line_height() * style.label_baseline_factor;
                TextRun {
                    text: text.to_string(),
                    origin: Point::new(left, baseline),
                    style: style.label_font.clone(),
                    fill: style.text_fill.clone(),
                    bounds: Rect::new(
                        left,
                        baseline - m.ascent,
                        left + m.advance_width,
                        baseline + m.descent,
                    ),
                }
            });
            log::trace!("tick {} at y={y} labelled {text:?}", tick.value);
            placed.push(TickPlacement {
                value: tick.value,
                y,
                mark,
                label,
            });
        }

        let mut title_size = (0.0, 0.0);
        let title = spec
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|text| {
                let m = measurer.measure(text, &style.title_font);
                title_size = (m.advance_width, m.line_height());
                let left = m.aligned_left(TextAlign::Center);
                let baseline = height + m.line_height() + style.title_gap;
                TextRun {
                    text: text.to_string(),
                    origin: Point::new(left, baseline),
                    style: style.title_font.clone(),
                    fill: style.text_fill.clone(),
                    bounds: Rect::new(
                        left,
                        baseline - m.ascent,
                        left + m.advance_width,
                        baseline + m.descent,
                    ),
                }
            });

        let bar = Rect::new(0.0, 0.0, width, height);
        let mask = mask_rect(
            style,
            bar,
            min_x,
            title_size,
            placed
                .iter()
                .filter_map(|t| t.label.as_ref().map(|run| run.bounds))
                .chain(title.as_ref().map(|run| run.bounds)),
        );

        log::debug!(
            "colorbar {width}x{height}: domain [{}, {}], {} stops, {} ticks, mask {:?}",
            domain.min,
            domain.max(),
            stops.len(),
            placed.len(),
            mask.rect()
        );

        Ok(Self {
            domain,
            stops,
            bar,
            gradient,
            ticks: placed,
            title,
            min_x,
            mask,
        })
    }
}

/// Derives the backing mask.
///
/// The base panel is `x = min_x - pad_left`, `y = -pad_top`,
/// `w = title_w - min_x`, `h = height + title_h + pad_bottom`. It is then grown
/// so the bar and every text box, inflated by `mask_margin`, fit inside.
fn mask_rect(
    style: &ColorbarStyle,
    bar: Rect,
    min_x: f64,
    (title_w, title_h): (f64, f64),
    boxes: impl Iterator<Item = Rect>,
) -> RoundedRect {
    let x0 = min_x - style.mask_pad_left;
    let y0 = -style.mask_pad_top;
    let base = Rect::new(
        x0,
        y0,
        x0 + (title_w - min_x),
        y0 + bar.height() + title_h + style.mask_pad_bottom,
    );
    let margin = style.mask_margin;
    let grown = core::iter::once(bar)
        .chain(boxes)
        .fold(base, |acc, b| acc.union(b.inflate(margin, margin)));
    RoundedRect::from_rect(grown, style.mask_radius)
}
