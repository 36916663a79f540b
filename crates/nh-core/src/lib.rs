//! # nh-core
//!
//! Data model for N-dimensional histograms: axis descriptors, the dense
//! payload wrapper with type-checked accumulation, and a fold accumulator
//! for summing histogram sequences.
//!
//! Persistence lives in `nh-container`; rendering in `nh-render`. This
//! crate has no file I/O.
//!
//! ## Example
//!
//! ```
//! use nh_core::{Axis, Histogram};
//! use ndarray::{ArrayD, IxDyn};
//!
//! let axis = Axis::new("pt", (0.0, 100.0), "GeV", 2).unwrap();
//! let data = ArrayD::from_shape_vec(IxDyn(&[4]), vec![0.0, 5.0, 10.0, 1.0]).unwrap();
//! let h = Histogram::new(data, vec![axis]).unwrap();
//! let doubled = h.add(&h).unwrap();
//! assert_eq!(doubled.data()[IxDyn(&[1])], 10.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod axis;
pub mod error;
pub mod histogram;
pub mod sum;

pub use axis::Axis;
pub use error::{Error, Result};
pub use histogram::Histogram;
pub use sum::HistSum;
