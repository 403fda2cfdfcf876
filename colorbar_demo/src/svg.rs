// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Canvas`] that writes SVG markup.

use std::fmt::Write as _;

use colorbar::{Canvas, LinearGradient, StrokeStyle, TextRun};
use kurbo::{Affine, Line, Rect, RoundedRect};
use peniko::Brush;

/// Accumulates SVG elements in paint order.
///
/// Every element is tagged with the canvas transform that was current when it
/// was drawn, which is how the host places a legend inside its scene.
#[derive(Debug, Default)]
pub(crate) struct SvgCanvas {
    defs: String,
    body: String,
    gradients: usize,
    transform: Affine,
}

impl SvgCanvas {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Sets the transform applied to subsequently drawn elements.
    pub(crate) fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    /// Maps a local-space rect to the bounding box it covers in the document.
    pub(crate) fn document_bounds(&self, rect: Rect) -> Rect {
        self.transform.transform_rect_bbox(rect)
    }

    pub(crate) fn to_svg_string(&self, view_box: Rect) -> String {
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        let _ = writeln!(
            out,
            r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        );
        if !self.defs.is_empty() {
            out.push_str("<defs>\n");
            out.push_str(&self.defs);
            out.push_str("</defs>\n");
        }
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }

    fn open(&mut self, tag: &str) {
        let _ = write!(self.body, "<{tag}");
        if self.transform != Affine::IDENTITY {
            let [a, b, c, d, e, f] = self.transform.as_coeffs();
            let _ = write!(self.body, r#" transform="matrix({a} {b} {c} {d} {e} {f})""#);
        }
    }

    fn rect_attrs(&mut self, rect: Rect) {
        let _ = write!(
            self.body,
            r#" x="{}" y="{}" width="{}" height="{}""#,
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height()
        );
    }

    fn rounded_attrs(&mut self, rect: RoundedRect) {
        self.rect_attrs(rect.rect());
        let r = rect.radii().top_left;
        let _ = write!(self.body, r#" rx="{r}" ry="{r}""#);
    }

    fn stroke_attrs(&mut self, stroke: &StrokeStyle) {
        self.body.push_str(r#" fill="none""#);
        write_paint_attr(&mut self.body, "stroke", &stroke.brush);
        let _ = write!(self.body, r#" stroke-width="{}""#, stroke.width);
    }
}

impl Canvas for SvgCanvas {
    fn fill_rect(&mut self, rect: Rect, brush: &Brush) {
        self.open("rect");
        self.rect_attrs(rect);
        write_paint_attr(&mut self.body, "fill", brush);
        self.body.push_str("/>\n");
    }

    fn fill_linear_gradient(&mut self, rect: Rect, gradient: &LinearGradient) {
        let id = format!("g{}", self.gradients);
        self.gradients += 1;

        let _ = write!(
            self.defs,
            r#"<linearGradient id="{id}" gradientUnits="userSpaceOnUse" x1="{}" y1="{}" x2="{}" y2="{}">"#,
            gradient.start.x, gradient.start.y, gradient.end.x, gradient.end.y
        );
        for stop in &gradient.stops {
            let (color, opacity) = svg_paint(&Brush::Solid(stop.color));
            let _ = write!(
                self.defs,
                r#"<stop offset="{}" stop-color="{color}" stop-opacity="{}"/>"#,
                stop.offset,
                opacity.unwrap_or(1.0)
            );
        }
        self.defs.push_str("</linearGradient>\n");

        self.open("rect");
        self.rect_attrs(rect);
        let _ = write!(self.body, r#" fill="url(#{id})""#);
        self.body.push_str("/>\n");
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &StrokeStyle) {
        self.open("rect");
        self.rect_attrs(rect);
        self.stroke_attrs(stroke);
        self.body.push_str("/>\n");
    }

    fn fill_rounded_rect(&mut self, rect: RoundedRect, brush: &Brush) {
        self.open("rect");
        self.rounded_attrs(rect);
        write_paint_attr(&mut self.body, "fill", brush);
        self.body.push_str("/>\n");
    }

    fn stroke_rounded_rect(&mut self, rect: RoundedRect, stroke: &StrokeStyle) {
        self.open("rect");
        self.rounded_attrs(rect);
        self.stroke_attrs(stroke);
        self.body.push_str("/>\n");
    }

    fn stroke_line(&mut self, line: Line, stroke: &StrokeStyle) {
        self.open("line");
        let _ = write!(
            self.body,
            r#" x1="{}" y1="{}" x2="{}" y2="{}""#,
            line.p0.x, line.p0.y, line.p1.x, line.p1.y
        );
        write_paint_attr(&mut self.body, "stroke", &stroke.brush);
        let _ = write!(self.body, r#" stroke-width="{}""#, stroke.width);
        self.body.push_str("/>\n");
    }

    fn draw_text(&mut self, run: &TextRun) {
        self.open("text");
        let _ = write!(
            self.body,
            r#" x="{}" y="{}" font-size="{}" font-family="{}" font-weight="{}""#,
            run.origin.x,
            run.origin.y,
            run.style.font_size,
            run.style.font_family.as_css_family(),
            run.style.font_weight.0
        );
        write_paint_attr(&mut self.body, "fill", &run.fill);
        // Leading spaces in titles are significant.
        self.body.push_str(r#" xml:space="preserve">"#);
        self.body.push_str(&escape_xml(&run.text));
        self.body.push_str("</text>\n");
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
