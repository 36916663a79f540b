//! Steps-post line plot of one or more 1D histograms.

use ndarray::Array1;
use nh_core::Histogram;

use crate::canvas::Canvas;
use crate::color::{Color, SERIES_PALETTE};
use crate::config::FigureConfig;
use crate::error::{RenderError, Result};
use crate::layout::{AxisScale, PlotArea};
use crate::plots::axes_draw::draw_axes;
use crate::primitives::{LineStyle, TextAnchor, TextStyle};

/// One histogram to draw, with optional styling.
pub struct Series<'a> {
    pub hist: &'a Histogram,
    /// Legend label; the legend is drawn only when at least one series
    /// has a label.
    pub label: Option<String>,
    /// Line color; defaults to the shared palette.
    pub color: Option<Color>,
    /// Multiplier applied to the bin contents before drawing.
    pub norm: f64,
}

impl<'a> Series<'a> {
    pub fn new(hist: &'a Histogram) -> Self {
        Self { hist, label: None, color: None, norm: 1.0 }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Options for the 1D plot.
pub struct Options1d {
    pub ylabel: String,
    pub log: bool,
}

impl Default for Options1d {
    fn default() -> Self {
        Self { ylabel: "entries".to_string(), log: false }
    }
}

/// X edges and y values for a steps-post draw: overflow bins cropped,
/// final y value duplicated, x from `linspace(min, max, n_bins + 1)`.
pub fn step_points(hist: &Histogram) -> Result<(Vec<f64>, Vec<f64>)> {
    if hist.ndim() != 1 {
        return Err(RenderError::Input(format!(
            "1D renderer got a {}-dim histogram",
            hist.ndim()
        )));
    }
    let axis = &hist.axes()[0];
    let cropped = hist.cropped();
    let mut y: Vec<f64> = cropped.iter().copied().collect();
    let x = Array1::linspace(axis.lims.0, axis.lims.1, y.len() + 1).to_vec();
    if let Some(last) = y.last().copied() {
        y.push(last);
    }
    Ok((x, y))
}

/// Render the plot to an SVG string.
pub fn render(series: &[Series], opts: &Options1d, config: &FigureConfig) -> Result<String> {
    if series.is_empty() {
        return Err(RenderError::Input("no histograms to draw".into()));
    }
    let x_ref = &series[0].hist.axes()[0];
    for s in series {
        if s.hist.ndim() != 1 {
            return Err(RenderError::Input(format!(
                "1D renderer got a {}-dim histogram",
                s.hist.ndim()
            )));
        }
        if s.hist.axes()[0].lims != x_ref.lims {
            return Err(RenderError::Input(
                "overlaid histograms must share x-axis limits".into(),
            ));
        }
    }

    let y_max = series
        .iter()
        .flat_map(|s| s.hist.cropped().iter().map(|v| v * s.norm).collect::<Vec<_>>())
        .fold(0.0_f64, f64::max);

    let x_axis = AxisScale::linear(x_ref.lims.0, x_ref.lims.1, 6).with_label(x_ref.label());
    let y_axis = if opts.log {
        // Floor at 1 and leave headroom above the tallest bin.
        AxisScale::log(1.0, (y_max * 2.0).max(10.0)).with_label(opts.ylabel.clone())
    } else {
        AxisScale::linear(0.0, (y_max * 1.1).max(1.0), 5).with_label(opts.ylabel.clone())
    };

    let mut canvas = Canvas::new(config.width, config.height);
    let area = PlotArea::auto(&canvas, &y_axis, &x_axis, config, 0.0);
    draw_axes(&mut canvas, &area, &x_axis, &y_axis, config);

    for (si, s) in series.iter().enumerate() {
        let color = s
            .color
            .unwrap_or(SERIES_PALETTE[si % SERIES_PALETTE.len()]);
        let (x, y) = step_points(s.hist)?;

        // steps-post: hold each bin's value until the next edge.
        let mut points = Vec::with_capacity(2 * x.len());
        for i in 0..x.len() - 1 {
            let v = (y[i] * s.norm).max(if opts.log { y_axis.min } else { f64::NEG_INFINITY });
            let py = y_axis.to_pixel(v, area.bottom(), area.top);
            points.push((x_axis.to_pixel(x[i], area.left, area.right()), py));
            points.push((x_axis.to_pixel(x[i + 1], area.left, area.right()), py));
        }
        canvas.polyline(&points, &LineStyle::solid(color, 1.4));
    }

    draw_legend(&mut canvas, &area, series, config);
    Ok(canvas.finish_svg())
}

fn draw_legend(canvas: &mut Canvas, area: &PlotArea, series: &[Series], config: &FigureConfig) {
    if !series.iter().any(|s| s.label.is_some()) {
        return;
    }
    let style = TextStyle {
        size: config.tick_size,
        anchor: TextAnchor::End,
        ..Default::default()
    };
    let mut y = area.top + 14.0;
    for (si, s) in series.iter().enumerate() {
        let Some(label) = &s.label else { continue };
        let color = s
            .color
            .unwrap_or(SERIES_PALETTE[si % SERIES_PALETTE.len()]);
        let x_text = area.right() - 8.0;
        let swatch_w = 14.0;
        canvas.line(
            x_text - canvas.estimate_text_width(label, style.size) - swatch_w - 4.0,
            y - 3.5,
            x_text - canvas.estimate_text_width(label, style.size) - 4.0,
            y - 3.5,
            &LineStyle::solid(color, 2.0),
        );
        canvas.text(x_text, y, label, &style);
        y += config.tick_size + 4.0;
    }
}
