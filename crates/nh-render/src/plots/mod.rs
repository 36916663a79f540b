pub mod axes_draw;
pub mod heatmap;
pub mod line1d;
pub mod rgb;
