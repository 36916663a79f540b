//! Histogram (de)serialization against container datasets.
//!
//! A histogram-bearing dataset carries the dense bin contents (flow bins
//! included) and one attribute named `axes`: a record table with one row
//! per dimension and fields `name`, `min`, `max`, `units`, `n_bins`.

use nh_core::{Axis, Histogram};

use crate::error::{ContainerError, Result};
use crate::model::{Dataset, Group, Node, RecordTable, Value};

/// Attribute name marking a dataset as a histogram.
pub const AXES_ATTR: &str = "axes";

/// Canonical axis-record field order used when writing.
pub const AXIS_FIELDS: [&str; 5] = ["name", "min", "max", "units", "n_bins"];

/// Structural predicate: does this dataset look like a histogram?
///
/// Cheap pre-check used by the merger to tell leaves from groups without
/// attempting a full parse.
pub fn is_histogram(dataset: &Dataset) -> bool {
    dataset.attr(AXES_ATTR).is_some()
}

/// Parse a histogram from a dataset.
///
/// `name` is only used for error reporting. A dataset without an `axes`
/// attribute is [`ContainerError::NotAHistogram`]; an axis row missing a
/// required field is [`ContainerError::MalformedAxis`].
pub fn read_histogram(name: &str, dataset: &Dataset) -> Result<Histogram> {
    let table = dataset
        .attr(AXES_ATTR)
        .ok_or_else(|| ContainerError::NotAHistogram { name: name.to_string() })?;
    let mut axes = Vec::with_capacity(table.rows().len());
    for row in 0..table.rows().len() {
        axes.push(axis_from_row(table, row)?);
    }
    Ok(Histogram::new(dataset.data().clone(), axes)?)
}

fn axis_from_row(table: &RecordTable, row: usize) -> Result<Axis> {
    let missing = |field: &str| ContainerError::MalformedAxis { field: field.to_string() };

    let name = table
        .get(row, "name")
        .and_then(Value::as_str)
        .ok_or_else(|| missing("name"))?;
    let min = table
        .get(row, "min")
        .and_then(Value::as_f64)
        .ok_or_else(|| missing("min"))?;
    let max = table
        .get(row, "max")
        .and_then(Value::as_f64)
        .ok_or_else(|| missing("max"))?;
    let units = table
        .get(row, "units")
        .and_then(Value::as_str)
        .ok_or_else(|| missing("units"))?;
    let n_bins = table
        .get(row, "n_bins")
        .and_then(Value::as_usize)
        .ok_or_else(|| missing("n_bins"))?;

    Ok(Axis::new(name, (min, max), units, n_bins)?)
}

/// Project axes into a record table following `field_order`, so a file
/// read with a custom field layout can be written back in the same shape.
/// Unknown field names are [`ContainerError::MalformedAxis`].
pub fn axes_table(axes: &[Axis], field_order: &[&str]) -> Result<RecordTable> {
    let mut table = RecordTable::new(field_order.iter().map(|s| s.to_string()).collect());
    for axis in axes {
        let mut row = Vec::with_capacity(field_order.len());
        for field in field_order {
            let cell = match *field {
                "name" => Value::Str(axis.name.clone()),
                "min" => Value::F64(axis.lims.0),
                "max" => Value::F64(axis.lims.1),
                "units" => Value::Str(axis.units.clone()),
                "n_bins" => Value::I64(axis.n_bins as i64),
                other => {
                    return Err(ContainerError::MalformedAxis { field: other.to_string() })
                }
            };
            row.push(cell);
        }
        table.push_row(row)?;
    }
    Ok(table)
}

/// Serialize a histogram as a new dataset named `name` under `group`,
/// with its axes attached as the `axes` attribute. An existing entry of
/// that name is a [`ContainerError::StructuralConflict`].
pub fn write_histogram(group: &mut Group, name: &str, hist: &Histogram) -> Result<()> {
    let mut dataset = Dataset::new(hist.data().clone());
    dataset.set_attr(AXES_ATTR, axes_table(hist.axes(), &AXIS_FIELDS)?)?;
    group.insert(name, Node::Dataset(dataset))
}
