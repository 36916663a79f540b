pub mod area;
pub mod axes;

pub use area::PlotArea;
pub use axes::AxisScale;
