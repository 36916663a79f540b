//! # nh-container
//!
//! Self-describing binary container ("NDC") for N-dimensional histograms,
//! and the `hadd` merger that sums matching histograms across files.
//!
//! A container is a hierarchical namespace of named groups and datasets;
//! a histogram-bearing dataset carries its bin contents (flow bins
//! included) plus an `axes` attribute with one record per dimension.
//!
//! ## Example
//!
//! ```no_run
//! use nh_container::{hadd, ContainerFile, Node};
//! use nh_container::hist::read_histogram;
//!
//! hadd("merged.ndc", &["run1.ndc", "run2.ndc"], false).unwrap();
//! let f = ContainerFile::open("merged.ndc").unwrap();
//! if let Some(Node::Dataset(ds)) = f.root().lookup("jets/pt") {
//!     let h = read_histogram("jets/pt", ds).unwrap();
//!     println!("{h}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buffer;
pub mod error;
pub mod file;
pub mod hadd;
pub mod hist;
pub mod model;

pub use error::{ContainerError, Result};
pub use file::ContainerFile;
pub use hadd::{hadd, MergeTree, TreeNode};
pub use hist::{AXES_ATTR, AXIS_FIELDS};
pub use model::{Dataset, Group, Node, RecordTable, Value};
