//! Plot-area margins within a canvas.

use crate::canvas::Canvas;
use crate::config::FigureConfig;
use crate::layout::axes::AxisScale;

/// Rectangular plot area within the canvas.
#[derive(Debug, Clone, Copy)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Margins computed from tick-label widths and axis labels, with an
    /// optional extra gutter on the right (colorbars, legends).
    pub fn auto(
        canvas: &Canvas,
        y_axis: &AxisScale,
        x_axis: &AxisScale,
        config: &FigureConfig,
        right_gutter: f64,
    ) -> Self {
        let max_tick_w = y_axis
            .ticks
            .iter()
            .map(|(_, l)| canvas.estimate_text_width(l, config.tick_size))
            .fold(0.0_f64, f64::max);
        let mut left = 10.0 + max_tick_w + 6.0;
        if !y_axis.label.is_empty() {
            left += config.label_size + 6.0;
        }

        let mut bottom = 10.0 + config.tick_size + 6.0;
        if !x_axis.label.is_empty() {
            bottom += config.label_size + 6.0;
        }

        let top = 12.0;
        let right = 12.0 + right_gutter;

        let width = (canvas.width - left - right).max(50.0);
        let height = (canvas.height - top - bottom).max(50.0);
        Self { left, top, width, height }
    }

    /// Manual placement.
    pub fn manual(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }
}
