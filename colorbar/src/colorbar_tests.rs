// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use colorbar_text::{FontFamily, FontWeight};
use kurbo::Rect;
use peniko::Brush;
use peniko::color::palette::css;

use crate::{
    ColorMap, ColorMapping, ColorStop, Colorbar, ColorbarError, ColorbarSpec, ColorbarStyle,
    DrawCommand, HeuristicTextMeasurer, Picture, StrokeStyle, TextStyle, Tick,
};

const EPS: f64 = 1e-9;

fn diverging() -> ColorMap {
    ColorMap::from_arrays(
        &[-1.0, -0.5, 0.5, 1.0],
        &[
            [0.0, 0.0, 1.0, 0.7],
            [0.0, 1.0, 0.0, 0.2],
            [0.0, 0.0, 0.0, 0.8],
            [1.0, 0.0, 0.0, 1.0],
        ],
    )
}

fn build(spec: &ColorbarSpec) -> Colorbar {
    Colorbar::new(spec, &HeuristicTextMeasurer).expect("valid colorbar spec")
}

fn encloses(outer: Rect, inner: Rect) -> bool {
    outer.x0 <= inner.x0 + EPS
        && outer.y0 <= inner.y0 + EPS
        && outer.x1 + EPS >= inner.x1
        && outer.y1 + EPS >= inner.y1
}

fn label_boxes(bar: &Colorbar) -> Vec<Rect> {
    bar.geometry()
        .ticks
        .iter()
        .filter_map(|t| t.label.as_ref().map(|run| run.bounds))
        .collect()
}

#[test]
fn default_ticks_span_the_domain() {
    let bar = build(&ColorbarSpec::new(&diverging(), 20.0, 200.0));
    let ticks = &bar.geometry().ticks;

    let values: Vec<f64> = ticks.iter().map(|t| t.value).collect();
    let expected = [-1.0, -0.6, -0.2, 0.2, 0.6, 1.0];
    assert_eq!(values.len(), 6, "six synthesized ticks");
    for (got, want) in values.iter().zip(expected) {
        assert!((got - want).abs() < 1e-12, "tick {got} should be {want}");
    }

    let labels: Vec<&str> = ticks
        .iter()
        .map(|t| t.label.as_ref().map_or("", |run| run.text.as_str()))
        .collect();
    assert_eq!(labels, ["-1", "-0.6", "-0.2", "0.2", "0.6", "1"], "%.2g labels");

    assert!(ticks[5].y.abs() < EPS, "the maximum sits at the top");
    assert!((ticks[0].y - 200.0).abs() < EPS, "the minimum sits at the bottom");
}

#[test]
fn single_stop_is_a_degenerate_domain() {
    let map = ColorMap::new(vec![ColorStop::rgba(0.3, [1.0, 0.0, 0.0, 1.0])]);
    let err = Colorbar::new(&ColorbarSpec::new(&map, 20.0, 200.0), &HeuristicTextMeasurer)
        .expect_err("zero span must be rejected");
    assert_eq!(err, ColorbarError::DegenerateDomain { value: 0.3 }, "degenerate");
}

#[test]
fn coincident_stops_are_a_degenerate_domain() {
    let map = ColorMap::from_arrays(&[2.0, 2.0], &[[0.0; 4], [1.0; 4]]);
    let err = Colorbar::new(&ColorbarSpec::new(&map, 20.0, 200.0), &HeuristicTextMeasurer)
        .expect_err("zero span must be rejected");
    assert!(matches!(err, ColorbarError::DegenerateDomain { .. }), "{err}");
}

#[test]
fn empty_mapping_is_rejected() {
    let err = Colorbar::new(
        &ColorbarSpec::new(&ColorMap::default(), 20.0, 200.0),
        &HeuristicTextMeasurer,
    )
    .expect_err("no stops");
    assert_eq!(err, ColorbarError::EmptyMapping, "empty mapping");
}

#[test]
fn non_finite_inputs_are_rejected() {
    let map = ColorMap::from_arrays(&[0.0, f64::NAN, 1.0], &[[0.0; 4], [0.5; 4], [1.0; 4]]);
    let err = Colorbar::new(&ColorbarSpec::new(&map, 20.0, 200.0), &HeuristicTextMeasurer)
        .expect_err("NaN stop");
    assert!(
        matches!(err, ColorbarError::NonFiniteStop { index: 1, .. }),
        "NaN stop reported at its index: {err}"
    );

    let spec = ColorbarSpec::new(&diverging(), 20.0, 200.0).with_ticks([0.0, f64::INFINITY]);
    let err = Colorbar::new(&spec, &HeuristicTextMeasurer).expect_err("infinite tick");
    assert_eq!(
        err,
        ColorbarError::NonFiniteTick {
            index: 1,
            value: f64::INFINITY
        },
        "infinite tick reported at its index"
    );
}

#[test]
fn non_positive_sizes_are_rejected() {
    for (w, h) in [(0.0, 200.0), (20.0, -1.0), (f64::NAN, 10.0)] {
        let spec = ColorbarSpec::new(&diverging(), w, h);
        let err = Colorbar::new(&spec, &HeuristicTextMeasurer).expect_err("bad size");
        assert!(
            matches!(err, ColorbarError::InvalidSize { .. }),
            "{w}x{h} must be rejected, got {err}"
        );
    }
}

#[test]
fn stops_normalize_with_an_inverted_gradient_axis() {
    let bar = build(&ColorbarSpec::new(&diverging(), 20.0, 200.0));
    let geometry = bar.geometry();

    let positions: Vec<f64> = geometry.stops.iter().map(|s| s.position).collect();
    assert_eq!(positions, [0.0, 0.25, 0.75, 1.0], "normalized into [0, 1]");

    let gradient = &geometry.gradient;
    assert_eq!(gradient.start, kurbo::Point::new(10.0, 0.0), "starts at top center");
    assert_eq!(gradient.end, kurbo::Point::new(10.0, 200.0), "ends at bottom center");
    let offsets: Vec<f64> = gradient.stops.iter().map(|s| s.offset).collect();
    assert_eq!(offsets, [0.0, 0.25, 0.75, 1.0], "sorted offsets");
    assert_eq!(
        gradient.stops[0].color,
        diverging().stops()[3].color,
        "the maximum stop is at the top"
    );
    assert_eq!(
        gradient.stops[3].color,
        diverging().stops()[0].color,
        "the minimum stop is at the bottom"
    );
}

#[test]
fn tick_y_decreases_as_values_increase() {
    let spec =
        ColorbarSpec::new(&diverging(), 20.0, 200.0).with_ticks([0.3, -0.9, 0.8, 0.0, 0.3]);
    let bar = build(&spec);
    let mut ticks: Vec<(f64, f64)> = bar
        .geometry()
        .ticks
        .iter()
        .map(|t| (t.value, t.y))
        .collect();
    ticks.sort_by(|a, b| a.0.total_cmp(&b.0));
    for pair in ticks.windows(2) {
        assert!(pair[1].1 <= pair[0].1, "y must not increase with value: {pair:?}");
    }
}

#[test]
fn tick_marks_point_left_from_the_bar() {
    let bar = build(&ColorbarSpec::new(&diverging(), 20.0, 200.0));
    for tick in &bar.geometry().ticks {
        assert_eq!(tick.mark.p0.x, 0.0, "mark starts at the bar edge");
        assert_eq!(tick.mark.p1.x, -5.0, "mark is 5px long");
        assert_eq!(tick.mark.p0.y, tick.y, "mark is horizontal");
        assert_eq!(tick.mark.p1.y, tick.y, "mark is horizontal");
    }
}

#[test]
fn labels_sit_left_of_the_bar_and_centered_on_the_tick() {
    let bar = build(&ColorbarSpec::new(&diverging(), 20.0, 200.0));
    for tick in &bar.geometry().ticks {
        let run = tick.label.as_ref().expect("formatted label");
        assert!((run.bounds.x1 + 10.0).abs() < EPS, "right edge 10px left of the bar");
        // 12px heuristic font: line height 12, baseline a quarter below the tick.
        assert!((run.origin.y - (tick.y + 3.0)).abs() < EPS, "baseline offset");
    }
}

#[test]
fn explicit_labels_and_empty_labels() {
    let spec = ColorbarSpec::new(&diverging(), 20.0, 200.0)
        .with_labeled_ticks(&[-1.0, 0.0, 1.0], ["low", "", "high"]);
    let bar = build(&spec);
    let texts: Vec<Option<&str>> = bar
        .geometry()
        .ticks
        .iter()
        .map(|t| t.label.as_ref().map(|run| run.text.as_str()))
        .collect();
    assert_eq!(texts, [Some("low"), None, Some("high")], "empty labels are skipped");

    let spec = ColorbarSpec::new(&diverging(), 20.0, 200.0)
        .with_ticks([Tick::labeled(0.5, "mid"), Tick::new(0.25)]);
    let bar = build(&spec);
    let texts: Vec<&str> = bar
        .geometry()
        .ticks
        .iter()
        .filter_map(|t| t.label.as_ref().map(|run| run.text.as_str()))
        .collect();
    assert_eq!(texts, ["mid", "0.25"], "unlabeled ticks are formatted");
}

#[test]
fn title_is_centered_under_the_bar() {
    let title = String::from("      %      ");
    let spec = ColorbarSpec::new(&diverging(), 20.0, 200.0).with_title(title.clone());
    let bar = build(&spec);
    let run = bar.geometry().title.as_ref().expect("title placed");
    let width = 0.6 * 12.0 * 13.0;
    assert_eq!(run.text, title, "text preserved");
    assert!((run.origin.x + 0.5 * width).abs() < EPS, "left edge at -w/2");
    assert!((run.origin.y - (200.0 + 12.0 + 5.0)).abs() < EPS, "baseline under bar");
}

#[test]
fn empty_title_draws_nothing() {
    let spec = ColorbarSpec::new(&diverging(), 20.0, 200.0).with_title("");
    let bar = build(&spec);
    assert!(bar.geometry().title.is_none(), "empty title is absent");
    let texts = bar
        .picture()
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::Text(_)))
        .count();
    assert_eq!(texts, 6, "only tick labels are drawn");
}

#[test]
fn mask_follows_the_padding_formula_for_a_wide_title() {
    let spec = ColorbarSpec::new(&diverging(), 20.0, 200.0).with_title("      %      ");
    let bar = build(&spec);
    let g = bar.geometry();

    let title_w = 0.6 * 12.0 * 13.0;
    let label_w = 0.6 * 12.0 * 4.0;
    assert!((g.min_x + label_w).abs() < EPS, "widest label \"-0.6\", right-aligned");

    let base_x0 = g.min_x - 12.0;
    let title = g.title.as_ref().expect("title placed");
    let mask = bar.mask();
    let expected = Rect::new(
        // The title overhangs the padded labels, so the mask grows to hold it.
        title.bounds.x0 - 2.0,
        -15.0,
        base_x0 + (title_w - g.min_x),
        -15.0 + 200.0 + 12.0 + 30.0,
    );
    assert!(expected.x0 < base_x0, "title is wider than the padded label column");
    let r = mask.rect();
    for (got, want) in [
        (r.x0, expected.x0),
        (r.y0, expected.y0),
        (r.x1, expected.x1),
        (r.y1, expected.y1),
    ] {
        assert!((got - want).abs() < EPS, "mask edge {got} should be {want}");
    }
    assert_eq!(mask.radii().top_left, 9.0, "rounded corners");
}

#[test]
fn mask_contains_every_box_with_margin() {
    let specs = [
        ColorbarSpec::new(&diverging(), 20.0, 200.0),
        ColorbarSpec::new(&diverging(), 20.0, 200.0).with_title("x"),
        ColorbarSpec::new(&diverging(), 20.0, 200.0).with_title("a very long legend title"),
        ColorbarSpec::new(&diverging(), 8.0, 50.0).with_ticks([-3.0, 0.0, 4.0]),
    ];
    for spec in &specs {
        let bar = build(spec);
        let mask = bar.mask().rect();
        let margin = spec.style.mask_margin;
        let mut boxes = label_boxes(&bar);
        boxes.extend(bar.geometry().title.as_ref().map(|run| run.bounds));
        boxes.push(bar.geometry().bar);
        for b in boxes {
            assert!(
                encloses(mask, b.inflate(margin, margin)),
                "mask {mask:?} must contain {b:?} plus {margin}"
            );
        }
        let leftmost = bar.geometry().min_x;
        assert!(
            mask.x0 <= leftmost - spec.style.mask_pad_left + EPS,
            "left padding is kept"
        );
    }
}

#[test]
fn mask_without_title_still_covers_the_bar() {
    let bar = build(&ColorbarSpec::new(&diverging(), 20.0, 200.0));
    let mask = bar.mask().rect();
    let widest = 0.6 * 12.0 * 4.0;
    assert!(
        (bar.geometry().min_x + widest).abs() < EPS,
        "min_x is the right-aligned label edge"
    );
    assert!(
        (mask.x0 - (-widest - 12.0)).abs() < EPS,
        "12px left of the widest label box, got {mask:?}"
    );
    assert!((mask.x1 - 22.0).abs() < EPS, "bar edge plus margin, got {mask:?}");
    assert!((mask.y0 + 15.0).abs() < EPS, "top padding");
    assert!((mask.y1 - 215.0).abs() < EPS, "bottom padding with no title");
}

#[test]
fn bounding_rect_is_the_union_of_drawn_content() {
    let spec = ColorbarSpec::new(&diverging(), 20.0, 200.0).with_title("units");
    let bar = build(&spec);
    let g = bar.geometry();

    let mut expected = g.bar;
    for tick in &g.ticks {
        expected = expected.union(Rect::from_points(tick.mark.p0, tick.mark.p1));
        if let Some(run) = &tick.label {
            expected = expected.union(run.bounds);
        }
    }
    if let Some(run) = &g.title {
        expected = expected.union(run.bounds);
    }
    assert_eq!(bar.bounding_rect(), expected, "union of bar, marks, labels, title");
    assert_ne!(bar.bounding_rect(), bar.mask().rect(), "mask is not part of it");
    assert!(
        encloses(bar.mask().rect(), bar.bounding_rect()),
        "the mask halos the content"
    );
}

#[test]
fn paint_draws_the_mask_before_the_picture() {
    let spec = ColorbarSpec::new(&diverging(), 20.0, 200.0).with_title("units");
    let bar = build(&spec);

    let mut out = Picture::new();
    bar.paint(&mut out);
    let commands = out.commands();
    assert!(
        matches!(commands[0], DrawCommand::FillRoundedRect(r, _) if r == bar.mask()),
        "mask fill first"
    );
    assert!(
        matches!(commands[1], DrawCommand::StrokeRoundedRect(r, _) if r == bar.mask()),
        "invisible mask border second"
    );
    assert_eq!(&commands[2..], bar.picture().commands(), "then the cached picture");
    assert!(
        matches!(commands[2], DrawCommand::FillLinearGradient(r, _) if r == bar.geometry().bar),
        "gradient bar first in the picture"
    );

    let mut again = Picture::new();
    bar.paint(&mut again);
    assert_eq!(again, out, "painting is repeatable");
}

#[test]
fn custom_style_changes_layout_constants() {
    let style = ColorbarStyle::default()
        .with_tick_count(3)
        .with_tick_length(8.0)
        .with_label_offset(4.0)
        .with_mask_padding(6.0, 20.0, 10.0)
        .with_label_precision(3)
        .with_label_baseline_factor(0.5)
        .with_title_gap(9.0)
        .with_mask_margin(5.0)
        .with_mask_radius(4.0);
    let spec = ColorbarSpec::new(&diverging(), 20.0, 200.0)
        .with_title("t")
        .with_style(style);
    let bar = build(&spec);
    let g = bar.geometry();
    assert_eq!(g.ticks.len(), 3, "tick count honoured");
    assert_eq!(g.ticks[1].value, 0.0, "midpoint tick");
    assert_eq!(g.ticks[0].mark.p1.x, -8.0, "tick length honoured");
    let run = g.ticks[0].label.as_ref().expect("label");
    assert!((run.bounds.x1 + 4.0).abs() < EPS, "label offset honoured");
    assert!(
        (run.origin.y - (g.ticks[0].y + 6.0)).abs() < EPS,
        "baseline half a 12px line below the tick"
    );

    let title = g.title.as_ref().expect("title placed");
    assert!(
        (title.origin.y - (200.0 + 12.0 + 9.0)).abs() < EPS,
        "title gap honoured"
    );

    let mask = bar.mask();
    let r = mask.rect();
    assert!((r.y0 + 20.0).abs() < EPS, "top padding honoured");
    assert!((r.x1 - 25.0).abs() < EPS, "bar edge plus a 5px margin, got {r:?}");
    assert!(
        (r.y1 - (title.bounds.y1 + 5.0)).abs() < EPS,
        "mask grows past the 10px bottom pad to clear the title by 5px, got {r:?}"
    );
    assert_eq!(mask.radii().top_left, 4.0, "corner radius honoured");

    let spec = ColorbarSpec::new(&diverging(), 20.0, 200.0)
        .with_ticks([1.0 / 3.0])
        .with_style(ColorbarStyle::default().with_label_precision(3));
    let bar = build(&spec);
    let run = bar.geometry().ticks[0].label.as_ref().expect("label");
    assert_eq!(run.text, "0.333", "three significant digits");
}

#[test]
fn custom_paint_style_reaches_the_recorded_commands() {
    let outline = StrokeStyle::solid(css::NAVY, 2.0);
    let tick_stroke = StrokeStyle::solid(css::GRAY, 0.5);
    let label_font = TextStyle::new(10.0).with_weight(FontWeight::BOLD);
    let title_font = TextStyle::new(16.0).with_family(FontFamily::Monospace);
    let style = ColorbarStyle::default()
        .with_mask_fill(css::BLACK)
        .with_outline(outline.clone())
        .with_tick_stroke(tick_stroke.clone())
        .with_label_font(label_font.clone())
        .with_title_font(title_font.clone())
        .with_text_fill(css::WHITE);
    let spec = ColorbarSpec::new(&diverging(), 20.0, 200.0)
        .with_title("units")
        .with_style(style);
    let bar = build(&spec);

    let mut out = Picture::new();
    bar.paint(&mut out);
    let white: Brush = css::WHITE.into();
    let black: Brush = css::BLACK.into();
    for command in out.commands() {
        match command {
            DrawCommand::FillRoundedRect(_, brush) => assert_eq!(brush, &black, "mask fill"),
            DrawCommand::StrokeRect(_, stroke) => assert_eq!(stroke, &outline, "bar outline"),
            DrawCommand::StrokeLine(_, stroke) => assert_eq!(stroke, &tick_stroke, "tick marks"),
            DrawCommand::Text(run) => assert_eq!(run.fill, white, "text fill"),
            _ => {}
        }
    }

    let g = bar.geometry();
    let label = g.ticks[0].label.as_ref().expect("label");
    assert_eq!(label.style, label_font, "label font");
    assert!(
        (label.origin.y - (g.ticks[0].y + 2.5)).abs() < EPS,
        "baseline scales with the 10px label line"
    );
    let title = g.title.as_ref().expect("title placed");
    assert_eq!(title.style, title_font, "title font");
    assert!(
        (title.bounds.width() - 0.6 * 16.0 * 5.0).abs() < EPS,
        "title measured at 16px"
    );
}

#[test]
fn without_ticks_restores_synthesized_ticks() {
    let spec = ColorbarSpec::new(&diverging(), 20.0, 200.0)
        .with_ticks([0.0])
        .without_ticks();
    assert!(spec.ticks.is_none(), "explicit ticks cleared");
    let bar = build(&spec);
    assert_eq!(bar.geometry().ticks.len(), 6, "default tick count");
}

#[test]
fn overflowing_span_is_reported_as_such() {
    let map = ColorMap::from_arrays(&[-f64::MAX, f64::MAX], &[[0.0; 4], [1.0; 4]]);
    let err = Colorbar::new(&ColorbarSpec::new(&map, 20.0, 200.0), &HeuristicTextMeasurer)
        .expect_err("span overflows");
    assert_eq!(
        err,
        ColorbarError::DomainOverflow {
            min: -f64::MAX,
            max: f64::MAX
        },
        "finite stops with an infinite span"
    );
}

#[test]
fn colorbar_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Colorbar>();
}
