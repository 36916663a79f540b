//! Axis descriptor: one dimension of a histogram.

use std::fmt;

use crate::error::{Error, Result};

/// Describes one dimension of a histogram: name, bin-edge range (excluding
/// the flow bins), units, and the number of regular bins.
///
/// Immutable after construction; owned by exactly one [`Histogram`]
/// (duplicated by value when a histogram is copied).
///
/// [`Histogram`]: crate::Histogram
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    /// Identifier of the dimension (e.g. `"pt"`).
    pub name: String,
    /// Lower and upper bin-edge limits, `lims.0 < lims.1`.
    pub lims: (f64, f64),
    /// Unit string, may be empty.
    pub units: String,
    /// Number of regular bins, excluding the two flow bins.
    pub n_bins: usize,
}

impl Axis {
    /// Construct a validated axis.
    pub fn new(
        name: impl Into<String>,
        lims: (f64, f64),
        units: impl Into<String>,
        n_bins: usize,
    ) -> Result<Self> {
        let name = name.into();
        if !(lims.0 < lims.1) {
            return Err(Error::BadAxisRange { name, min: lims.0, max: lims.1 });
        }
        if n_bins == 0 {
            return Err(Error::NoBins(name));
        }
        Ok(Self { name, lims, units: units.into(), n_bins })
    }

    /// Payload extent along this axis, including the two flow bins.
    pub fn extent(&self) -> usize {
        self.n_bins + 2
    }

    /// Axis label for plots: `name [units]`, or just `name` when the unit
    /// string is empty.
    pub fn label(&self) -> String {
        if self.units.is_empty() {
            self.name.clone()
        } else {
            format!("{} [{}]", self.name, self.units)
        }
    }

    /// Whether two axes may be summed over: same range and bin count.
    /// Names and units are not compared.
    pub fn compatible_with(&self, other: &Axis) -> bool {
        self.lims == other.lims && self.n_bins == other.n_bins
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "name: {}, range: {}-{}, units {}",
            self.name, self.lims.0, self.lims.1, self.units
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validates_range() {
        let err = Axis::new("pt", (2.0, 1.0), "GeV", 10).unwrap_err();
        assert!(matches!(err, Error::BadAxisRange { .. }));
        let err = Axis::new("pt", (1.0, 1.0), "GeV", 10).unwrap_err();
        assert!(matches!(err, Error::BadAxisRange { .. }));
    }

    #[test]
    fn new_validates_bins() {
        let err = Axis::new("pt", (0.0, 1.0), "", 0).unwrap_err();
        assert!(matches!(err, Error::NoBins(_)));
    }

    #[test]
    fn display_one_liner() {
        let ax = Axis::new("pt", (0.0, 300.0), "GeV", 30).unwrap();
        assert_eq!(ax.to_string(), "name: pt, range: 0-300, units GeV");
    }

    #[test]
    fn label_with_and_without_units() {
        let ax = Axis::new("pt", (0.0, 300.0), "GeV", 30).unwrap();
        assert_eq!(ax.label(), "pt [GeV]");
        let ax = Axis::new("eta", (-2.5, 2.5), "", 50).unwrap();
        assert_eq!(ax.label(), "eta");
    }

    #[test]
    fn compatibility_ignores_names_and_units() {
        let a = Axis::new("pt", (0.0, 1.0), "GeV", 5).unwrap();
        let b = Axis::new("momentum", (0.0, 1.0), "MeV", 5).unwrap();
        assert!(a.compatible_with(&b));
        let c = Axis::new("pt", (0.0, 2.0), "GeV", 5).unwrap();
        assert!(!a.compatible_with(&c));
        let d = Axis::new("pt", (0.0, 1.0), "GeV", 6).unwrap();
        assert!(!a.compatible_with(&d));
    }
}
