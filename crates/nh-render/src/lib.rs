//! # nh-render
//!
//! SVG renderers for ndhist histograms: steps-post 1D line plots, 2D
//! heatmaps with a `hot` colormap, and three-channel RGB composites.
//!
//! Renderers are pure consumers of `nh-core` histograms: flow bins are
//! cropped before display, axes are labelled `name [units]`, and saving
//! creates the output path's parent directories.
//!
//! ## Example
//!
//! ```no_run
//! use nh_render::plots::line1d::{Options1d, Series};
//!
//! # fn demo(hist: &nh_core::Histogram) -> nh_render::Result<()> {
//! let series = [Series::new(hist).with_label("data")];
//! nh_render::draw_1d(&series, &Options1d::default(), "plots/pt.svg".as_ref())?;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod layout;
pub mod output;
pub mod plots;
pub mod primitives;

use std::path::Path;

pub use canvas::Canvas;
pub use color::Color;
pub use config::FigureConfig;
pub use error::{RenderError, Result};
pub use output::save_svg;
pub use plots::rgb::RgbLegend;

use nh_core::Histogram;
use plots::line1d::{Options1d, Series};
use plots::heatmap::Options2d;

/// Render one or more 1D histograms as a steps-post line plot and write
/// the figure to `out_path`.
pub fn draw_1d(series: &[Series], opts: &Options1d, out_path: &Path) -> Result<()> {
    let svg = plots::line1d::render(series, opts, &FigureConfig::default())?;
    save_svg(&svg, out_path)
}

/// Render a 2D histogram heatmap and write the figure to `out_path`.
pub fn draw_2d(hist: &Histogram, opts: &Options2d, out_path: &Path) -> Result<()> {
    let svg = plots::heatmap::render(hist, opts, &FigureConfig::default())?;
    save_svg(&svg, out_path)
}

/// Render a three-channel RGB composite and write the figure to
/// `out_path`.
pub fn draw_rgb(
    red: &Histogram,
    green: &Histogram,
    blue: &Histogram,
    legend: &RgbLegend,
    out_path: &Path,
) -> Result<()> {
    let svg = plots::rgb::render(red, green, blue, legend, &FigureConfig::default())?;
    save_svg(&svg, out_path)
}
