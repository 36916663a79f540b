//! Figure configuration: sizes and font settings.

use serde::Deserialize;

/// Figure-level configuration shared by all plot routines.
///
/// Defaults match a 5in × 3.75in figure at 72 pt/in.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    /// Canvas width in points.
    pub width: f64,
    /// Canvas height in points.
    pub height: f64,
    /// Tick label font size.
    pub tick_size: f64,
    /// Axis label font size.
    pub label_size: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self { width: 360.0, height: 270.0, tick_size: 10.0, label_size: 12.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_overrides_keep_defaults() {
        let cfg: FigureConfig = serde_json::from_str(r#"{"width": 500.0}"#).unwrap();
        assert_eq!(cfg.width, 500.0);
        assert_eq!(cfg.height, 270.0);
    }
}
