//! 2D histogram heatmap with colorbar.

use ndarray::Ix2;
use nh_core::Histogram;

use crate::canvas::Canvas;
use crate::color::{hot, Color};
use crate::config::FigureConfig;
use crate::error::{RenderError, Result};
use crate::layout::{AxisScale, PlotArea};
use crate::plots::axes_draw::draw_axes;
use crate::primitives::{Style, TextAnchor, TextBaseline, TextStyle};

/// Options for the 2D heatmap.
#[derive(Default)]
pub struct Options2d {
    /// Logarithmic color normalization; cells with non-positive content
    /// are left blank.
    pub log: bool,
}

const COLORBAR_W: f64 = 16.0;
const COLORBAR_GAP: f64 = 8.0;
const COLORBAR_STEPS: usize = 50;

/// Render the heatmap to an SVG string.
pub fn render(hist: &Histogram, opts: &Options2d, config: &FigureConfig) -> Result<String> {
    if hist.ndim() != 2 {
        return Err(RenderError::Input(format!(
            "2D renderer got a {}-dim histogram",
            hist.ndim()
        )));
    }
    let image = hist
        .cropped()
        .into_dimensionality::<Ix2>()
        .map_err(|e| RenderError::Input(e.to_string()))?;
    let (ax_x, ax_y) = (&hist.axes()[0], &hist.axes()[1]);

    let x_axis = AxisScale::linear(ax_x.lims.0, ax_x.lims.1, 6).with_label(ax_x.label());
    let y_axis = AxisScale::linear(ax_y.lims.0, ax_y.lims.1, 6).with_label(ax_y.label());

    let mut canvas = Canvas::new(config.width, config.height);
    let area = PlotArea::auto(
        &canvas,
        &y_axis,
        &x_axis,
        config,
        COLORBAR_GAP + COLORBAR_W + 30.0,
    );
    draw_axes(&mut canvas, &area, &x_axis, &y_axis, config);

    // An empty histogram still produces a valid (blank) figure.
    let total: f64 = image.iter().sum();
    if total > 0.0 {
        let vmax = image.iter().copied().fold(f64::MIN, f64::max);
        let vmin = if opts.log {
            image
                .iter()
                .copied()
                .filter(|v| *v > 0.0)
                .fold(f64::MAX, f64::min)
        } else {
            0.0
        };

        let (n_x, n_y) = image.dim();
        let cell_w = area.width / n_x as f64;
        let cell_h = area.height / n_y as f64;
        for ix in 0..n_x {
            for iy in 0..n_y {
                let v = image[[ix, iy]];
                let Some(t) = normalize(v, vmin, vmax, opts.log) else { continue };
                let x = area.left + ix as f64 * cell_w;
                // y axis runs bottom-up.
                let y = area.bottom() - (iy + 1) as f64 * cell_h;
                // Slight overdraw hides hairline gaps between cells.
                canvas.rect(x, y, cell_w + 0.3, cell_h + 0.3, &Style::filled(hot(t)));
            }
        }

        draw_colorbar(&mut canvas, &area, vmin, vmax, opts.log, config);
    }

    Ok(canvas.finish_svg())
}

/// Map a cell value to [0, 1], or `None` for blank cells.
fn normalize(v: f64, vmin: f64, vmax: f64, log: bool) -> Option<f64> {
    if log {
        if v <= 0.0 || vmax <= vmin {
            return None;
        }
        Some(((v.ln() - vmin.ln()) / (vmax.ln() - vmin.ln())).clamp(0.0, 1.0))
    } else {
        if vmax <= 0.0 {
            return None;
        }
        Some((v.max(0.0) / vmax).clamp(0.0, 1.0))
    }
}

fn draw_colorbar(
    canvas: &mut Canvas,
    area: &PlotArea,
    vmin: f64,
    vmax: f64,
    log: bool,
    config: &FigureConfig,
) {
    let cb_x = area.right() + COLORBAR_GAP;
    let step_h = area.height / COLORBAR_STEPS as f64;
    for i in 0..COLORBAR_STEPS {
        let t = 1.0 - i as f64 / (COLORBAR_STEPS - 1) as f64;
        let y = area.top + i as f64 * step_h;
        canvas.rect(cb_x, y, COLORBAR_W, step_h + 0.5, &Style::filled(hot(t)));
    }
    canvas.frame(cb_x, area.top, COLORBAR_W, area.height, Color::rgb(0, 0, 0), 0.6);

    let label_style = TextStyle {
        size: config.tick_size * 0.9,
        anchor: TextAnchor::Start,
        baseline: TextBaseline::Central,
        ..Default::default()
    };
    let lo_label = if log { format!("{vmin:.3}") } else { "0".to_string() };
    canvas.text(cb_x + COLORBAR_W + 3.0, area.top, &format!("{vmax:.3}"), &label_style);
    canvas.text(cb_x + COLORBAR_W + 3.0, area.bottom(), &lo_label, &label_style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{ArrayD, IxDyn};
    use nh_core::Axis;

    fn hist_2d(n_x: usize, n_y: usize, fill: f64) -> Histogram {
        let ax0 = Axis::new("x", (0.0, 1.0), "", n_x).unwrap();
        let ax1 = Axis::new("y", (0.0, 2.0), "cm", n_y).unwrap();
        let data = ArrayD::from_elem(IxDyn(&[n_x + 2, n_y + 2]), fill);
        Histogram::new(data, vec![ax0, ax1]).unwrap()
    }

    #[test]
    fn renders_cells_and_colorbar() {
        let svg = render(&hist_2d(3, 2, 1.0), &Options2d::default(), &FigureConfig::default())
            .unwrap();
        // 6 cells + 50 colorbar steps + frames; just check it's well formed
        // and labelled.
        assert!(svg.matches("<rect").count() > 50);
        assert!(svg.contains("y [cm]"));
    }

    #[test]
    fn empty_histogram_renders_blank_figure() {
        let svg = render(&hist_2d(3, 2, 0.0), &Options2d::default(), &FigureConfig::default())
            .unwrap();
        assert!(svg.contains("</svg>"));
        // No colorbar labels when nothing was drawn.
        assert!(!svg.contains("1.000"));
    }

    #[test]
    fn log_mode_skips_non_positive_cells() {
        assert_eq!(normalize(0.0, 1.0, 10.0, true), None);
        assert_eq!(normalize(-1.0, 1.0, 10.0, true), None);
        assert_eq!(normalize(10.0, 1.0, 10.0, true), Some(1.0));
    }

    #[test]
    fn rejects_1d_input() {
        let axis = Axis::new("x", (0.0, 1.0), "", 1).unwrap();
        let h = Histogram::new(ArrayD::zeros(IxDyn(&[3])), vec![axis]).unwrap();
        assert!(render(&h, &Options2d::default(), &FigureConfig::default()).is_err());
    }
}
