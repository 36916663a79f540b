//! Dense N-dimensional histogram payload plus axis descriptors.

use std::fmt;

use ndarray::{ArrayD, Slice};

use crate::axis::Axis;
use crate::error::{Error, Result};

/// An N-dimensional histogram: a dense `f64` array and one [`Axis`] per
/// dimension, in dimension order.
///
/// Each dimension's extent is `n_bins + 2`: index 0 holds the underflow
/// bin and the last index the overflow bin.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    data: ArrayD<f64>,
    axes: Vec<Axis>,
}

impl Histogram {
    /// Construct a histogram, validating the shape invariant
    /// `data.shape()[i] == axes[i].n_bins + 2` for every dimension.
    pub fn new(data: ArrayD<f64>, axes: Vec<Axis>) -> Result<Self> {
        if axes.is_empty() {
            return Err(Error::NoAxes);
        }
        if data.ndim() != axes.len() {
            return Err(Error::Incompatible(format!(
                "payload has {} dimensions but {} axes were given",
                data.ndim(),
                axes.len()
            )));
        }
        for (dim, (extent, axis)) in data.shape().iter().zip(&axes).enumerate() {
            if *extent != axis.extent() {
                return Err(Error::ShapeMismatch {
                    dim,
                    extent: *extent,
                    axis: axis.name.clone(),
                    expected: axis.extent(),
                });
            }
        }
        Ok(Self { data, axes })
    }

    /// Bin contents, including the flow bins.
    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    /// Axis descriptors, one per dimension.
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Dimensionality (used by renderers to pick a drawing path).
    pub fn ndim(&self) -> usize {
        self.axes.len()
    }

    /// Bin contents with the underflow and overflow bin sliced off every
    /// axis (the display region).
    pub fn cropped(&self) -> ArrayD<f64> {
        self.data
            .slice_each_axis(|_| Slice::new(1, Some(-1), 1))
            .to_owned()
    }

    /// Non-mutating sum: deep-copies `self`, folds `other` into the copy
    /// and returns it. The left operand's axis metadata wins.
    pub fn add(&self, other: &Histogram) -> Result<Histogram> {
        let mut out = self.clone();
        out.accumulate(other)?;
        Ok(out)
    }

    /// In-place sum of `other`'s bin contents into `self`. Axes are left
    /// untouched. Fails without touching either operand when the two
    /// histograms are not compatible.
    pub fn accumulate(&mut self, other: &Histogram) -> Result<()> {
        self.check_compatible(other)?;
        self.data += &other.data;
        Ok(())
    }

    /// Compatibility for accumulation: same axis count, and every axis
    /// pair agrees on range and bin count (which implies equal shapes).
    fn check_compatible(&self, other: &Histogram) -> Result<()> {
        if self.axes.len() != other.axes.len() {
            return Err(Error::Incompatible(format!(
                "{}-dim vs {}-dim",
                self.axes.len(),
                other.axes.len()
            )));
        }
        for (dim, (a, b)) in self.axes.iter().zip(&other.axes).enumerate() {
            if !a.compatible_with(b) {
                return Err(Error::Incompatible(format!(
                    "dimension {dim}: ({a}) vs ({b})"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.axes.iter().map(|a| a.name.as_str()).collect();
        write!(f, "Histogram[{}]", names.join(" vs "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    fn hist_1d(name: &str, lims: (f64, f64), bins: &[f64]) -> Histogram {
        let axis = Axis::new(name, lims, "GeV", bins.len() - 2).unwrap();
        let data = ArrayD::from_shape_vec(IxDyn(&[bins.len()]), bins.to_vec()).unwrap();
        Histogram::new(data, vec![axis]).unwrap()
    }

    #[test]
    fn new_rejects_shape_mismatch() {
        let axis = Axis::new("pt", (0.0, 1.0), "", 3).unwrap();
        let data = ArrayD::zeros(IxDyn(&[4])); // needs 5
        let err = Histogram::new(data, vec![axis]).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { dim: 0, .. }));
    }

    #[test]
    fn new_rejects_missing_axes() {
        let data = ArrayD::zeros(IxDyn(&[3]));
        assert!(matches!(
            Histogram::new(data, vec![]).unwrap_err(),
            Error::NoAxes
        ));
    }

    #[test]
    fn add_sums_and_preserves_left_axes() {
        let a = hist_1d("pt", (0.0, 1.0), &[1.0, 2.0, 3.0]);
        let b = {
            // Same range/bins, different name: still compatible.
            let axis = Axis::new("other", (0.0, 1.0), "", 1).unwrap();
            let data =
                ArrayD::from_shape_vec(IxDyn(&[3]), vec![10.0, 20.0, 30.0]).unwrap();
            Histogram::new(data, vec![axis]).unwrap()
        };
        let c = a.add(&b).unwrap();
        assert_eq!(c.data().as_slice().unwrap(), &[11.0, 22.0, 33.0]);
        assert_eq!(c.axes()[0].name, "pt");
        // Neither operand mutated.
        assert_eq!(a.data().as_slice().unwrap(), &[1.0, 2.0, 3.0]);
        assert_eq!(b.data().as_slice().unwrap(), &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn accumulate_mutates_receiver_only() {
        let mut a = hist_1d("pt", (0.0, 1.0), &[1.0, 2.0, 3.0]);
        let b = hist_1d("pt", (0.0, 1.0), &[10.0, 20.0, 30.0]);
        a.accumulate(&b).unwrap();
        assert_eq!(a.data().as_slice().unwrap(), &[11.0, 22.0, 33.0]);
        assert_eq!(b.data().as_slice().unwrap(), &[10.0, 20.0, 30.0]);
    }

    #[test]
    fn incompatible_shapes_leave_operands_unmodified() {
        let mut a = hist_1d("pt", (0.0, 1.0), &[1.0, 2.0, 3.0]);
        let b = hist_1d("pt", (0.0, 1.0), &[0.0, 1.0, 2.0, 3.0, 0.0]);
        let err = a.accumulate(&b).unwrap_err();
        assert!(matches!(err, Error::Incompatible(_)));
        assert_eq!(a.data().as_slice().unwrap(), &[1.0, 2.0, 3.0]);
        assert_eq!(b.data().as_slice().unwrap(), &[0.0, 1.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    fn mismatched_ranges_are_rejected() {
        let a = hist_1d("pt", (0.0, 1.0), &[1.0, 2.0, 3.0]);
        let b = hist_1d("pt", (0.0, 2.0), &[1.0, 2.0, 3.0]);
        assert!(matches!(a.add(&b).unwrap_err(), Error::Incompatible(_)));
    }

    #[test]
    fn cropped_drops_flow_bins() {
        let a = hist_1d("pt", (0.0, 1.0), &[7.0, 5.0, 10.0, 9.0]);
        let c = a.cropped();
        assert_eq!(c.as_slice().unwrap(), &[5.0, 10.0]);
    }

    #[test]
    fn display_names_axes() {
        let ax0 = Axis::new("pt", (0.0, 1.0), "", 1).unwrap();
        let ax1 = Axis::new("eta", (-1.0, 1.0), "", 1).unwrap();
        let data = ArrayD::zeros(IxDyn(&[3, 3]));
        let h = Histogram::new(data, vec![ax0, ax1]).unwrap();
        assert_eq!(h.to_string(), "Histogram[pt vs eta]");
    }
}
