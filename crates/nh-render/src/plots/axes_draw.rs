//! Shared frame, tick, and axis-label drawing.

use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::FigureConfig;
use crate::layout::{AxisScale, PlotArea};
use crate::primitives::{LineStyle, TextAnchor, TextBaseline, TextStyle};

/// Draw the plot frame, tick marks, tick labels, and axis labels.
pub fn draw_axes(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &AxisScale,
    y_axis: &AxisScale,
    config: &FigureConfig,
) {
    let frame = LineStyle::solid(Color::rgb(0, 0, 0), 0.8);
    canvas.frame(area.left, area.top, area.width, area.height, frame.color, frame.width);

    let tick_len = 4.0;
    let tick_style = LineStyle::solid(Color::rgb(0, 0, 0), 0.8);

    // X ticks along the bottom edge.
    let x_label_style = TextStyle {
        size: config.tick_size,
        anchor: TextAnchor::Middle,
        baseline: TextBaseline::Hanging,
        ..Default::default()
    };
    for (v, label) in &x_axis.ticks {
        let px = x_axis.to_pixel(*v, area.left, area.right());
        canvas.line(px, area.bottom(), px, area.bottom() - tick_len, &tick_style);
        canvas.text(px, area.bottom() + 4.0, label, &x_label_style);
    }

    // Y ticks along the left edge.
    let y_label_style = TextStyle {
        size: config.tick_size,
        anchor: TextAnchor::End,
        baseline: TextBaseline::Central,
        ..Default::default()
    };
    for (v, label) in &y_axis.ticks {
        let py = y_axis.to_pixel(*v, area.bottom(), area.top);
        canvas.line(area.left, py, area.left + tick_len, py, &tick_style);
        canvas.text(area.left - 5.0, py, label, &y_label_style);
    }

    // Axis labels, anchored at the high end of each axis.
    if !x_axis.label.is_empty() {
        let style = TextStyle {
            size: config.label_size,
            anchor: TextAnchor::End,
            ..Default::default()
        };
        canvas.text(
            area.right(),
            area.bottom() + config.tick_size + 14.0,
            &x_axis.label,
            &style,
        );
    }
    if !y_axis.label.is_empty() {
        let style = TextStyle {
            size: config.label_size,
            anchor: TextAnchor::End,
            ..Default::default()
        };
        canvas.text_rotated(area.left - 28.0, area.top, &y_axis.label, &style, 90.0);
    }
}
