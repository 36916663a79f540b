//! File-level round-trip tests: histogram → container file → histogram.

use ndarray::{ArrayD, IxDyn};
use nh_container::hist::{read_histogram, write_histogram, AXES_ATTR};
use nh_container::{ContainerError, ContainerFile, Node};
use nh_core::{Axis, Histogram};

fn sample_hist() -> Histogram {
    let ax0 = Axis::new("pt", (0.0, 300.0), "GeV", 3).unwrap();
    let ax1 = Axis::new("eta", (-2.5, 2.5), "", 2).unwrap();
    // 5 x 4 payload with distinctive values, including awkward floats.
    let values: Vec<f64> = (0..20)
        .map(|i| (i as f64) * 0.1 + f64::from(i % 3) * 1e-9)
        .collect();
    let data = ArrayD::from_shape_vec(IxDyn(&[5, 4]), values).unwrap();
    Histogram::new(data, vec![ax0, ax1]).unwrap()
}

#[test]
fn histogram_survives_a_file_round_trip_bit_exact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hists.ndc");

    let hist = sample_hist();
    let mut file = ContainerFile::new();
    let group = file.root_mut().create_group("jets").unwrap();
    write_histogram(group, "pt_vs_eta", &hist).unwrap();
    file.save(&path).unwrap();

    let reopened = ContainerFile::open(&path).unwrap();
    let ds = match reopened.root().lookup("jets/pt_vs_eta") {
        Some(Node::Dataset(ds)) => ds,
        other => panic!("expected dataset, got {other:?}"),
    };
    let back = read_histogram("jets/pt_vs_eta", ds).unwrap();

    // Bit-exact payload.
    for (a, b) in hist.data().iter().zip(back.data().iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
    // Identical axis field values.
    assert_eq!(back.axes(), hist.axes());
}

#[test]
fn attribute_field_order_is_preserved_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("order.ndc");

    let hist = sample_hist();
    let mut file = ContainerFile::new();
    // Write with a non-canonical field order.
    let table =
        nh_container::hist::axes_table(hist.axes(), &["units", "name", "n_bins", "max", "min"])
            .unwrap();
    let mut ds = nh_container::Dataset::new(hist.data().clone());
    ds.set_attr(AXES_ATTR, table).unwrap();
    file.root_mut().insert("h", Node::Dataset(ds)).unwrap();
    file.save(&path).unwrap();

    let reopened = ContainerFile::open(&path).unwrap();
    let ds = match reopened.root().get("h") {
        Some(Node::Dataset(ds)) => ds,
        other => panic!("expected dataset, got {other:?}"),
    };
    let fields: Vec<&str> = ds
        .attr(AXES_ATTR)
        .unwrap()
        .fields()
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(fields, ["units", "name", "n_bins", "max", "min"]);
    // And the axes still parse correctly from that layout.
    let back = read_histogram("h", ds).unwrap();
    assert_eq!(back.axes(), hist.axes());
}

#[test]
fn dataset_without_axes_is_not_a_histogram() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.ndc");

    let mut file = ContainerFile::new();
    let ds = nh_container::Dataset::new(ArrayD::zeros(IxDyn(&[4])));
    file.root_mut().insert("counts", Node::Dataset(ds)).unwrap();
    file.save(&path).unwrap();

    let reopened = ContainerFile::open(&path).unwrap();
    let ds = match reopened.root().get("counts") {
        Some(Node::Dataset(ds)) => ds,
        other => panic!("expected dataset, got {other:?}"),
    };
    let err = read_histogram("counts", ds).unwrap_err();
    assert!(matches!(err, ContainerError::NotAHistogram { .. }));
}

#[test]
fn opening_a_missing_file_is_an_io_error() {
    let err = ContainerFile::open("/no/such/file.ndc").unwrap_err();
    assert!(matches!(err, ContainerError::Io(_)));
}
