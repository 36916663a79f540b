//! Axis tick generation and data→pixel mapping.

/// A plot axis: fixed data range, linear or logarithmic, with generated
/// tick positions and labels. The range is taken as given (histogram axis
/// limits are authoritative); only tick placement is "nice".
#[derive(Debug, Clone)]
pub struct AxisScale {
    pub min: f64,
    pub max: f64,
    pub log: bool,
    pub label: String,
    pub ticks: Vec<(f64, String)>,
}

impl AxisScale {
    /// Linear axis over `[min, max]` with about `target` ticks placed at
    /// nice-number multiples inside the range.
    pub fn linear(min: f64, max: f64, target: usize) -> Self {
        let step = nice_step((max - min) / target.max(1) as f64);
        let mut ticks = Vec::new();
        if step > 0.0 {
            let mut v = (min / step).ceil() * step;
            while v <= max + step * 1e-9 {
                // Snap tiny float residue so labels read "0" not "1.2e-16".
                let snapped = if v.abs() < step * 1e-6 { 0.0 } else { v };
                ticks.push((snapped, format_tick(snapped, step)));
                v += step;
            }
        }
        Self { min, max, log: false, label: String::new(), ticks }
    }

    /// Logarithmic axis over `[min, max]` (both positive) with decade ticks.
    pub fn log(min: f64, max: f64) -> Self {
        let min = min.max(1e-12);
        let max = max.max(min * 10.0);
        let lo = min.log10().ceil() as i32;
        let hi = max.log10().floor() as i32;
        let mut ticks = Vec::new();
        for exp in lo..=hi {
            let v = 10.0_f64.powi(exp);
            ticks.push((v, format!("1e{exp}")));
        }
        Self { min, max, log: true, label: String::new(), ticks }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Map a data value to a pixel coordinate. `px_min` maps to `min`;
    /// pass a descending pixel pair for the usual inverted y direction.
    pub fn to_pixel(&self, value: f64, px_min: f64, px_max: f64) -> f64 {
        let frac = if self.log {
            let v = value.max(self.min).ln();
            (v - self.min.ln()) / (self.max.ln() - self.min.ln())
        } else {
            (value - self.min) / (self.max - self.min)
        };
        px_min + frac * (px_max - px_min)
    }
}

/// Largest of 1, 2, 5 × 10^k not exceeding a rough step.
fn nice_step(rough: f64) -> f64 {
    if !(rough > 0.0) || !rough.is_finite() {
        return 0.0;
    }
    let mag = 10.0_f64.powf(rough.log10().floor());
    let frac = rough / mag;
    let nice = if frac >= 5.0 {
        5.0
    } else if frac >= 2.0 {
        2.0
    } else {
        1.0
    };
    nice * mag
}

fn format_tick(v: f64, step: f64) -> String {
    // Enough decimals to distinguish adjacent ticks.
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    format!("{v:.decimals$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_ticks_stay_inside_range() {
        let ax = AxisScale::linear(0.0, 300.0, 6);
        assert!(!ax.ticks.is_empty());
        for (v, _) in &ax.ticks {
            assert!(*v >= 0.0 && *v <= 300.0);
        }
        assert_eq!(ax.ticks.first().map(|t| t.1.as_str()), Some("0"));
    }

    #[test]
    fn fractional_steps_get_decimals() {
        let ax = AxisScale::linear(0.0, 1.0, 5);
        assert!(ax.ticks.iter().any(|(_, l)| l == "0.2"));
    }

    #[test]
    fn pixel_mapping_linear() {
        let ax = AxisScale::linear(0.0, 10.0, 5);
        assert_eq!(ax.to_pixel(0.0, 100.0, 200.0), 100.0);
        assert_eq!(ax.to_pixel(10.0, 100.0, 200.0), 200.0);
        assert_eq!(ax.to_pixel(5.0, 100.0, 200.0), 150.0);
        // Inverted direction for y axes.
        assert_eq!(ax.to_pixel(5.0, 200.0, 100.0), 150.0);
    }

    #[test]
    fn log_ticks_are_decades() {
        let ax = AxisScale::log(1.0, 1000.0);
        let labels: Vec<&str> = ax.ticks.iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(labels, ["1e0", "1e1", "1e2", "1e3"]);
    }

    #[test]
    fn log_mapping_clamps_below_floor() {
        let ax = AxisScale::log(1.0, 100.0);
        // Zero and negatives map to the lower edge, not -inf.
        assert_eq!(ax.to_pixel(0.0, 0.0, 100.0), 0.0);
        assert!((ax.to_pixel(10.0, 0.0, 100.0) - 50.0).abs() < 1e-9);
    }
}
