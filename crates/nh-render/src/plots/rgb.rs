//! Three-channel RGB composite of 2D histograms.

use ndarray::{Array2, Ix2};
use nh_core::Histogram;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::FigureConfig;
use crate::error::{RenderError, Result};
use crate::layout::{AxisScale, PlotArea};
use crate::plots::axes_draw::draw_axes;
use crate::primitives::{Style, TextAnchor, TextStyle};

/// Legend labels for the three channels.
pub struct RgbLegend {
    pub red: String,
    pub green: String,
    pub blue: String,
}

/// Render the composite to an SVG string.
///
/// Each channel is `ln(1 + x)`-compressed and scaled by its second-largest
/// value (clipped at 1), so a single hottest cell does not wash out the
/// rest. A channel whose saturation reference is non-positive has nothing
/// to draw and renders as all-zero; this is a defined no-op, not an error.
pub fn render(
    red: &Histogram,
    green: &Histogram,
    blue: &Histogram,
    legend: &RgbLegend,
    config: &FigureConfig,
) -> Result<String> {
    let r = channel(red)?;
    let g = channel(green)?;
    let b = channel(blue)?;
    if r.dim() != g.dim() || r.dim() != b.dim() {
        return Err(RenderError::Input(format!(
            "RGB channels disagree on shape: {:?} vs {:?} vs {:?}",
            r.dim(),
            g.dim(),
            b.dim()
        )));
    }
    for other in [green, blue] {
        for (a, o) in red.axes().iter().zip(other.axes()) {
            if !a.compatible_with(o) {
                return Err(RenderError::Input(
                    "RGB channels disagree on axis ranges".into(),
                ));
            }
        }
    }

    let (ax_x, ax_y) = (&red.axes()[0], &red.axes()[1]);
    let x_axis = AxisScale::linear(ax_x.lims.0, ax_x.lims.1, 6).with_label(ax_x.label());
    let y_axis = AxisScale::linear(ax_y.lims.0, ax_y.lims.1, 6).with_label(ax_y.label());

    let mut canvas = Canvas::new(config.width, config.height);
    let area = PlotArea::auto(&canvas, &y_axis, &x_axis, config, 0.0);
    draw_axes(&mut canvas, &area, &x_axis, &y_axis, config);

    let (n_x, n_y) = r.dim();
    let cell_w = area.width / n_x as f64;
    let cell_h = area.height / n_y as f64;
    for ix in 0..n_x {
        for iy in 0..n_y {
            let color = Color::rgb(
                (r[[ix, iy]] * 255.0).round() as u8,
                (g[[ix, iy]] * 255.0).round() as u8,
                (b[[ix, iy]] * 255.0).round() as u8,
            );
            let x = area.left + ix as f64 * cell_w;
            let y = area.bottom() - (iy + 1) as f64 * cell_h;
            canvas.rect(x, y, cell_w + 0.3, cell_h + 0.3, &Style::filled(color));
        }
    }

    draw_channel_legend(&mut canvas, &area, legend, config);
    Ok(canvas.finish_svg())
}

/// Crop, log-compress, and scale one channel into [0, 1].
fn channel(hist: &Histogram) -> Result<Array2<f64>> {
    if hist.ndim() != 2 {
        return Err(RenderError::Input(format!(
            "RGB composite needs 2-dim channels, got {}-dim",
            hist.ndim()
        )));
    }
    let mut image = hist
        .cropped()
        .into_dimensionality::<Ix2>()
        .map_err(|e| RenderError::Input(e.to_string()))?;
    image.mapv_inplace(f64::ln_1p);

    let saturation = second_largest(&image);
    if saturation > 0.0 {
        image.mapv_inplace(|v| (v / saturation).min(1.0));
    } else {
        // Nothing to draw in this channel.
        image.fill(0.0);
    }
    Ok(image)
}

/// The second-largest value of the image (the saturation reference).
fn second_largest(image: &Array2<f64>) -> f64 {
    let mut values: Vec<f64> = image.iter().copied().collect();
    values.sort_by(|a, b| b.total_cmp(a));
    values.get(1).copied().unwrap_or(0.0)
}

fn draw_channel_legend(
    canvas: &mut Canvas,
    area: &PlotArea,
    legend: &RgbLegend,
    config: &FigureConfig,
) {
    let entries = [
        (Color::rgb(255, 0, 0), &legend.red),
        (Color::rgb(0, 255, 0), &legend.green),
        (Color::rgb(0, 0, 255), &legend.blue),
    ];
    let style = TextStyle {
        size: config.tick_size,
        anchor: TextAnchor::End,
        color: Color::rgb(255, 255, 255),
        ..Default::default()
    };
    let mut y = area.top + 14.0;
    for (color, label) in entries {
        let x_text = area.right() - 8.0;
        let swatch = 9.0;
        canvas.rect(
            x_text - canvas.estimate_text_width(label, style.size) - swatch - 5.0,
            y - swatch + 1.0,
            swatch,
            swatch,
            &Style::filled(color),
        );
        canvas.text(x_text, y, label, &style);
        y += config.tick_size + 4.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{ArrayD, IxDyn};
    use nh_core::Axis;

    fn hist_2d(values: &[f64]) -> Histogram {
        // 1 x 2 regular bins => 3 x 4 payload.
        let ax0 = Axis::new("x", (0.0, 1.0), "", 1).unwrap();
        let ax1 = Axis::new("y", (0.0, 1.0), "", 2).unwrap();
        let data = ArrayD::from_shape_vec(IxDyn(&[3, 4]), values.to_vec()).unwrap();
        Histogram::new(data, vec![ax0, ax1]).unwrap()
    }

    fn filled(fill: f64) -> Histogram {
        hist_2d(&[fill; 12])
    }

    fn default_legend() -> RgbLegend {
        RgbLegend { red: "r".into(), green: "g".into(), blue: "b".into() }
    }

    #[test]
    fn second_largest_picks_the_runner_up() {
        let img = Array2::from_shape_vec((2, 2), vec![1.0, 9.0, 4.0, 2.0]).unwrap();
        assert_eq!(second_largest(&img), 4.0);
    }

    #[test]
    fn composite_renders_with_legend() {
        let svg = render(
            &filled(5.0),
            &filled(1.0),
            &filled(0.5),
            &RgbLegend {
                red: "barrel".into(),
                green: "endcap".into(),
                blue: "forward".into(),
            },
            &FigureConfig::default(),
        )
        .unwrap();
        assert!(svg.contains("barrel"));
        assert!(svg.contains("endcap"));
        assert!(svg.contains("forward"));
    }

    #[test]
    fn empty_channel_is_a_no_op_not_an_error() {
        // All-zero red channel: ln(1+0) = 0 everywhere, saturation
        // reference non-positive.
        let svg = render(
            &filled(0.0),
            &filled(2.0),
            &filled(2.0),
            &default_legend(),
            &FigureConfig::default(),
        )
        .unwrap();
        assert!(svg.contains("</svg>"));
        // Composite cells carry no red component.
        assert!(svg.contains("#00ff"));
    }

    #[test]
    fn mismatched_shapes_rejected() {
        let small = filled(1.0);
        let big = {
            let ax0 = Axis::new("x", (0.0, 1.0), "", 2).unwrap();
            let ax1 = Axis::new("y", (0.0, 1.0), "", 2).unwrap();
            Histogram::new(ArrayD::zeros(IxDyn(&[4, 4])), vec![ax0, ax1]).unwrap()
        };
        let err = render(&small, &big, &small, &default_legend(), &FigureConfig::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::Input(_)));
    }

    #[test]
    fn rejects_1d_channel() {
        let axis = Axis::new("x", (0.0, 1.0), "", 1).unwrap();
        let h1 = Histogram::new(ArrayD::zeros(IxDyn(&[3])), vec![axis]).unwrap();
        assert!(channel(&h1).is_err());
    }
}
