// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Colorbar demo: a diverging heat map with its legend, written as SVG.

mod svg;

use std::path::PathBuf;

use clap::Parser;
use colorbar::{
    Canvas, ColorMap, Colorbar, ColorbarSpec, ColorbarStyle, TextMeasurer,
};
use kurbo::{Affine, Rect};
use peniko::Color;

use crate::svg::SvgCanvas;

/// Render a colorbar legend over a synthetic heat map.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output SVG path.
    #[arg(short, long, default_value = "colorbar_demo.svg")]
    output: PathBuf,

    /// Gradient bar width.
    #[arg(long, default_value_t = 20.0)]
    width: f64,

    /// Gradient bar height.
    #[arg(long, default_value_t = 200.0)]
    height: f64,

    /// Legend title; pass an empty string for none.
    #[arg(long, default_value = "      %      ")]
    title: String,

    /// Number of synthesized ticks.
    #[arg(long, default_value_t = 6)]
    ticks: usize,

    /// Legend placement inside the plot (x offset).
    #[arg(long, default_value_t = 120.0)]
    x: f64,

    /// Legend placement inside the plot (y offset).
    #[arg(long, default_value_t = 40.0)]
    y: f64,
}

const PLOT: Rect = Rect::new(0.0, 0.0, 320.0, 280.0);
const CELLS: (usize, usize) = (64, 56);

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let cmap = ColorMap::from_arrays(
        &[-1.0, -0.5, 0.5, 1.0],
        &[
            [0.0, 0.0, 1.0, 0.7],
            [0.0, 1.0, 0.0, 0.2],
            [0.0, 0.0, 0.0, 0.8],
            [1.0, 0.0, 0.0, 1.0],
        ],
    );

    let measurer = demo_measurer();
    let spec = ColorbarSpec::new(&cmap, args.width, args.height)
        .with_title(args.title)
        .with_style(ColorbarStyle::default().with_tick_count(args.ticks));
    let legend = Colorbar::new(&spec, measurer.as_ref())?;

    let mut canvas = SvgCanvas::new();
    paint_heat_map(&mut canvas, &cmap);

    canvas.set_transform(Affine::translate((args.x, args.y)));
    legend.paint(&mut canvas);
    let view = PLOT.union(canvas.document_bounds(legend.mask().rect()));

    std::fs::write(&args.output, canvas.to_svg_string(view.inflate(10.0, 10.0)))?;
    log::info!(
        "wrote {} (legend bounds {:?})",
        args.output.display(),
        legend.bounding_rect()
    );
    Ok(())
}

fn demo_measurer() -> Box<dyn TextMeasurer> {
    #[cfg(feature = "parley")]
    {
        Box::new(colorbar_text_parley::ParleyTextMeasurer::new())
    }

    #[cfg(not(feature = "parley"))]
    {
        Box::new(colorbar::HeuristicTextMeasurer)
    }
}

/// Paints a smooth two-blob field in `[-1, 1]` through the colormap's lookup
/// table, the way an image item would.
fn paint_heat_map(canvas: &mut dyn Canvas, cmap: &ColorMap) {
    let lut = cmap.lookup_table(0.0, 1.0, 256);
    let (nx, ny) = CELLS;
    let cw = PLOT.width() / nx as f64;
    let ch = PLOT.height() / ny as f64;
    for j in 0..ny {
        for i in 0..nx {
            let u = (i as f64 + 0.5) / nx as f64;
            let v = (j as f64 + 0.5) / ny as f64;
            let value = field(u, v);
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                reason = "normalized value is clamped to the table range"
            )]
            let idx = (((value + 1.0) * 0.5).clamp(0.0, 1.0) * 255.0).round() as usize;
            let [r, g, b, a] = lut[idx.min(lut.len() - 1)];
            let x0 = PLOT.x0 + i as f64 * cw;
            let y0 = PLOT.y0 + j as f64 * ch;
            canvas.fill_rect(
                Rect::new(x0, y0, x0 + cw, y0 + ch),
                &Color::from_rgba8(r, g, b, a).into(),
            );
        }
    }
}

fn field(u: f64, v: f64) -> f64 {
    let bump = |cx: f64, cy: f64, s: f64| {
        let (dx, dy) = (u - cx, v - cy);
        (-(dx * dx + dy * dy) / (2.0 * s * s)).exp()
    };
    (bump(0.3, 0.35, 0.15) - bump(0.7, 0.7, 0.18)).clamp(-1.0, 1.0)
}
