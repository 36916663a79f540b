//! NDC container file reading and writing.
//!
//! Layout (all integers big-endian):
//!
//! ```text
//! file    := "NDC1" | u8 version | group
//! group   := u32 n_entries | n × entry
//! entry   := string name | u8 kind (0 group, 1 dataset) | body
//! dataset := u8 ndim | ndim × u64 dims | Π dims × f64 | u32 n_attrs
//!            | n_attrs × (string name | table)
//! table   := u16 n_fields | n_fields × string | u32 n_rows
//!            | n_rows × n_fields × cell
//! cell    := u8 tag | payload      (0: f64, 1: i64, 2: string)
//! string  := u32 byte length | UTF-8 bytes
//! ```
//!
//! The whole file is held in memory; a cursor reader walks it once. Entry
//! order in a group is the file's native order and is preserved on write.

use std::path::Path;

use ndarray::{ArrayD, IxDyn};

use crate::buffer::{Reader, Writer};
use crate::error::{ContainerError, Result};
use crate::model::{Dataset, Group, Node, RecordTable, Value};

const MAGIC: [u8; 4] = *b"NDC1";
const FORMAT_VERSION: u8 = 1;

const KIND_GROUP: u8 = 0;
const KIND_DATASET: u8 = 1;

const TAG_F64: u8 = 0;
const TAG_I64: u8 = 1;
const TAG_STR: u8 = 2;

/// An open container: the parsed root group of an NDC file, or a fresh
/// root being assembled for writing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerFile {
    root: Group,
}

impl ContainerFile {
    /// Create an empty container (write mode).
    pub fn new() -> Self {
        Self::default()
    }

    /// Open and parse a container file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Parse a container from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut r = Reader::new(bytes);
        let magic = r.bytes(4)?;
        if magic != MAGIC {
            return Err(ContainerError::BadMagic {
                found: [magic[0], magic[1], magic[2], magic[3]],
            });
        }
        let version = r.u8()?;
        if version != FORMAT_VERSION {
            return Err(ContainerError::UnsupportedVersion(version));
        }
        let root = read_group(&mut r)?;
        Ok(Self { root })
    }

    /// The root namespace.
    pub fn root(&self) -> &Group {
        &self.root
    }

    /// Mutable root namespace (write mode).
    pub fn root_mut(&mut self) -> &mut Group {
        &mut self.root
    }

    /// Encode the container to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut w = Writer::new();
        w.bytes(&MAGIC);
        w.u8(FORMAT_VERSION);
        write_group(&mut w, &self.root);
        w.into_bytes()
    }

    /// Write the container to a file, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_bytes())?;
        Ok(())
    }
}

fn read_group(r: &mut Reader) -> Result<Group> {
    let n_entries = r.u32()? as usize;
    let mut group = Group::new();
    for _ in 0..n_entries {
        let name = r.string()?;
        let kind = r.u8()?;
        let node = match kind {
            KIND_GROUP => Node::Group(read_group(r)?),
            KIND_DATASET => Node::Dataset(read_dataset(r)?),
            other => return Err(ContainerError::UnknownEntryKind(other)),
        };
        group.insert(name, node)?;
    }
    Ok(group)
}

fn read_dataset(r: &mut Reader) -> Result<Dataset> {
    let ndim = r.u8()? as usize;
    let mut dims = Vec::with_capacity(ndim);
    for _ in 0..ndim {
        dims.push(r.u64()? as usize);
    }
    let len = dims.iter().try_fold(1usize, |acc, d| acc.checked_mul(*d));
    let len = len.ok_or_else(|| ContainerError::Corrupt("dimension product overflow".into()))?;
    let values = r.array_f64(len)?;
    let data = ArrayD::from_shape_vec(IxDyn(&dims), values)?;

    let mut dataset = Dataset::new(data);
    let n_attrs = r.u32()? as usize;
    for _ in 0..n_attrs {
        let name = r.string()?;
        let table = read_table(r)?;
        dataset.set_attr(name, table)?;
    }
    Ok(dataset)
}

fn read_table(r: &mut Reader) -> Result<RecordTable> {
    let n_fields = r.u16()? as usize;
    let mut fields = Vec::with_capacity(n_fields);
    for _ in 0..n_fields {
        fields.push(r.string()?);
    }
    let mut table = RecordTable::new(fields);
    let n_rows = r.u32()? as usize;
    for _ in 0..n_rows {
        let mut row = Vec::with_capacity(n_fields);
        for _ in 0..n_fields {
            row.push(read_value(r)?);
        }
        table.push_row(row)?;
    }
    Ok(table)
}

fn read_value(r: &mut Reader) -> Result<Value> {
    match r.u8()? {
        TAG_F64 => Ok(Value::F64(r.f64()?)),
        TAG_I64 => Ok(Value::I64(r.i64()?)),
        TAG_STR => Ok(Value::Str(r.string()?)),
        other => Err(ContainerError::UnknownValueTag(other)),
    }
}

fn write_group(w: &mut Writer, group: &Group) {
    w.u32(group.len() as u32);
    for (name, node) in group.entries() {
        w.string(name);
        match node {
            Node::Group(g) => {
                w.u8(KIND_GROUP);
                write_group(w, g);
            }
            Node::Dataset(d) => {
                w.u8(KIND_DATASET);
                write_dataset(w, d);
            }
        }
    }
}

fn write_dataset(w: &mut Writer, dataset: &Dataset) {
    let data = dataset.data();
    w.u8(data.ndim() as u8);
    for dim in data.shape() {
        w.u64(*dim as u64);
    }
    for v in data.iter() {
        w.f64(*v);
    }
    w.u32(dataset.attrs().len() as u32);
    for (name, table) in dataset.attrs() {
        w.string(name);
        write_table(w, table);
    }
}

fn write_table(w: &mut Writer, table: &RecordTable) {
    w.u16(table.fields().len() as u16);
    for field in table.fields() {
        w.string(field);
    }
    w.u32(table.rows().len() as u32);
    for row in table.rows() {
        for cell in row {
            write_value(w, cell);
        }
    }
}

fn write_value(w: &mut Writer, value: &Value) {
    match value {
        Value::F64(v) => {
            w.u8(TAG_F64);
            w.f64(*v);
        }
        Value::I64(v) => {
            w.u8(TAG_I64);
            w.i64(*v);
        }
        Value::Str(s) => {
            w.u8(TAG_STR);
            w.string(s);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_container() -> ContainerFile {
        let mut file = ContainerFile::new();
        let dir = file.root_mut().create_group("dir").unwrap();

        let data =
            ArrayD::from_shape_vec(IxDyn(&[2, 3]), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let mut ds = Dataset::new(data);
        let mut table = RecordTable::new(vec!["name".into(), "min".into()]);
        table
            .push_row(vec![Value::Str("pt".into()), Value::F64(0.5)])
            .unwrap();
        ds.set_attr("axes", table).unwrap();
        dir.insert("h", Node::Dataset(ds)).unwrap();

        file.root_mut().create_group("empty").unwrap();
        file
    }

    #[test]
    fn bytes_round_trip() {
        let file = sample_container();
        let bytes = file.to_bytes();
        let parsed = ContainerFile::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, file);
        // Re-encoding is byte-identical.
        assert_eq!(parsed.to_bytes(), bytes);
    }

    #[test]
    fn bad_magic_rejected() {
        let err = ContainerFile::from_bytes(b"ROOT\x01\x00\x00\x00\x00").unwrap_err();
        assert!(matches!(err, ContainerError::BadMagic { .. }));
    }

    #[test]
    fn unsupported_version_rejected() {
        let mut bytes = sample_container().to_bytes();
        bytes[4] = 99;
        let err = ContainerFile::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, ContainerError::UnsupportedVersion(99)));
    }

    #[test]
    fn truncated_file_underflows() {
        let bytes = sample_container().to_bytes();
        let err = ContainerFile::from_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, ContainerError::BufferUnderflow { .. }));
    }
}
