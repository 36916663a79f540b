//! Fold accumulator for summing an arbitrary-length histogram sequence.
//!
//! The empty accumulator is the identity element, so the first pushed
//! histogram needs no special-casing.

use crate::error::Result;
use crate::histogram::Histogram;

/// Accumulator over a sequence of compatible histograms.
#[derive(Debug, Default)]
pub struct HistSum {
    acc: Option<Histogram>,
}

impl HistSum {
    /// The identity element (no histograms folded yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one histogram in. The first push moves the histogram into the
    /// accumulator unchanged; later pushes accumulate in place.
    pub fn push(&mut self, hist: Histogram) -> Result<()> {
        match self.acc.as_mut() {
            Some(acc) => acc.accumulate(&hist),
            None => {
                self.acc = Some(hist);
                Ok(())
            }
        }
    }

    /// The folded sum, or `None` when nothing was pushed.
    pub fn finish(self) -> Option<Histogram> {
        self.acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Axis;
    use ndarray::{ArrayD, IxDyn};

    fn hist(bins: &[f64]) -> Histogram {
        let axis = Axis::new("x", (0.0, 1.0), "", bins.len() - 2).unwrap();
        let data = ArrayD::from_shape_vec(IxDyn(&[bins.len()]), bins.to_vec()).unwrap();
        Histogram::new(data, vec![axis]).unwrap()
    }

    #[test]
    fn empty_sum_is_none() {
        assert!(HistSum::new().finish().is_none());
    }

    #[test]
    fn single_push_is_identity() {
        let h = hist(&[1.0, 2.0, 3.0]);
        let mut sum = HistSum::new();
        sum.push(h.clone()).unwrap();
        assert_eq!(sum.finish().unwrap(), h);
    }

    #[test]
    fn folds_a_sequence() {
        let mut sum = HistSum::new();
        for bins in [[1.0, 2.0, 3.0], [10.0, 20.0, 30.0], [100.0, 200.0, 300.0]] {
            sum.push(hist(&bins)).unwrap();
        }
        let total = sum.finish().unwrap();
        assert_eq!(total.data().as_slice().unwrap(), &[111.0, 222.0, 333.0]);
    }

    #[test]
    fn incompatible_push_fails() {
        let mut sum = HistSum::new();
        sum.push(hist(&[1.0, 2.0, 3.0])).unwrap();
        assert!(sum.push(hist(&[1.0, 2.0, 3.0, 4.0])).is_err());
        // The previously folded state survives a failed push.
        assert!(sum.finish().is_some());
    }
}
