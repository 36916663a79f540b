//! In-memory model of an NDC container: groups, datasets, attributes.

use ndarray::ArrayD;

use crate::error::{ContainerError, Result};

/// A typed attribute cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit float.
    F64(f64),
    /// 64-bit signed integer.
    I64(i64),
    /// UTF-8 string.
    Str(String),
}

impl Value {
    /// Numeric view; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F64(v) => Some(*v),
            Value::I64(v) => Some(*v as f64),
            Value::Str(_) => None,
        }
    }

    /// Non-negative integer view. Floats are accepted when integral, so a
    /// bin count stored as `30.0` by another writer still parses.
    pub fn as_usize(&self) -> Option<usize> {
        match self {
            Value::I64(v) if *v >= 0 => Some(*v as usize),
            Value::F64(v) if *v >= 0.0 && v.fract() == 0.0 => Some(*v as usize),
            _ => None,
        }
    }

    /// String view.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// An ordered table of named-field records: the shape of the `axes`
/// attribute (one row per dimension). Field order is preserved exactly so
/// a file written with a custom layout round-trips byte-identically.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTable {
    fields: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl RecordTable {
    /// Create an empty table with the given field order.
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields, rows: Vec::new() }
    }

    /// Field names, in storage order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Rows, each one cell per field.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Append a row; its arity must match the field list.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.fields.len() {
            return Err(ContainerError::Corrupt(format!(
                "record has {} cells but the table declares {} fields",
                row.len(),
                self.fields.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Cell lookup by row index and field name.
    pub fn get(&self, row: usize, field: &str) -> Option<&Value> {
        let idx = self.fields.iter().position(|f| f == field)?;
        self.rows.get(row)?.get(idx)
    }
}

/// A dense dataset: the payload array plus named attribute tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    data: ArrayD<f64>,
    attrs: Vec<(String, RecordTable)>,
}

impl Dataset {
    /// Wrap a payload array with no attributes.
    pub fn new(data: ArrayD<f64>) -> Self {
        Self { data, attrs: Vec::new() }
    }

    /// The payload array.
    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    /// Attribute lookup by name.
    pub fn attr(&self, name: &str) -> Option<&RecordTable> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t)
    }

    /// All attributes in insertion order.
    pub fn attrs(&self) -> &[(String, RecordTable)] {
        &self.attrs
    }

    /// Attach an attribute; duplicate names conflict.
    pub fn set_attr(&mut self, name: impl Into<String>, table: RecordTable) -> Result<()> {
        let name = name.into();
        if self.attr(&name).is_some() {
            return Err(ContainerError::StructuralConflict { path: name });
        }
        self.attrs.push((name, table));
        Ok(())
    }
}

/// One entry in a group: a nested group or a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Nested namespace.
    Group(Group),
    /// Dense array with attributes.
    Dataset(Dataset),
}

/// A named, order-preserving namespace of entries. Keys are unique within
/// a group; enumeration follows insertion (i.e. file) order, which need
/// not be sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    entries: Vec<(String, Node)>,
}

impl Group {
    /// Create an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of direct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the group has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(n, node)| (n.as_str(), node))
    }

    /// Entry lookup by name.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, node)| node)
    }

    /// Mutable entry lookup by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, node)| node)
    }

    /// Insert a new entry; an existing entry of that name is a
    /// [`ContainerError::StructuralConflict`] (no silent overwrite).
    pub fn insert(&mut self, name: impl Into<String>, node: Node) -> Result<()> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(ContainerError::StructuralConflict { path: name });
        }
        self.entries.push((name, node));
        Ok(())
    }

    /// Insert an empty sub-group and return a mutable handle to it.
    pub fn create_group(&mut self, name: &str) -> Result<&mut Group> {
        self.insert(name, Node::Group(Group::new()))?;
        match self.entries.last_mut() {
            Some((_, Node::Group(g))) => Ok(g),
            _ => Err(ContainerError::Corrupt(
                "group vanished right after insertion".into(),
            )),
        }
    }

    /// Resolve a slash-separated path to an entry, e.g. `"jets/pt"`.
    pub fn lookup(&self, path: &str) -> Option<&Node> {
        let mut parts = path.split('/').filter(|p| !p.is_empty());
        let first = parts.next()?;
        let mut node = self.get(first)?;
        for part in parts {
            match node {
                Node::Group(g) => node = g.get(part)?,
                Node::Dataset(_) => return None,
            }
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    #[test]
    fn insert_rejects_duplicates() {
        let mut g = Group::new();
        g.insert("a", Node::Group(Group::new())).unwrap();
        let err = g.insert("a", Node::Group(Group::new())).unwrap_err();
        assert!(matches!(err, ContainerError::StructuralConflict { .. }));
    }

    #[test]
    fn entries_keep_insertion_order() {
        let mut g = Group::new();
        for name in ["zeta", "alpha", "mid"] {
            g.insert(name, Node::Group(Group::new())).unwrap();
        }
        let names: Vec<&str> = g.entries().map(|(n, _)| n).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn lookup_walks_nested_groups() {
        let mut root = Group::new();
        let sub = root.create_group("jets").unwrap();
        sub.insert("pt", Node::Dataset(Dataset::new(ArrayD::zeros(IxDyn(&[3])))))
            .unwrap();
        assert!(matches!(root.lookup("jets/pt"), Some(Node::Dataset(_))));
        assert!(root.lookup("jets/eta").is_none());
        assert!(root.lookup("jets/pt/deeper").is_none());
    }

    #[test]
    fn record_table_arity_checked() {
        let mut t = RecordTable::new(vec!["a".into(), "b".into()]);
        t.push_row(vec![Value::F64(1.0), Value::F64(2.0)]).unwrap();
        assert!(t.push_row(vec![Value::F64(1.0)]).is_err());
        assert_eq!(t.get(0, "b"), Some(&Value::F64(2.0)));
        assert_eq!(t.get(0, "missing"), None);
    }

    #[test]
    fn value_coercions() {
        assert_eq!(Value::I64(5).as_f64(), Some(5.0));
        assert_eq!(Value::F64(30.0).as_usize(), Some(30));
        assert_eq!(Value::F64(30.5).as_usize(), None);
        assert_eq!(Value::I64(-1).as_usize(), None);
        assert_eq!(Value::Str("x".into()).as_f64(), None);
    }
}
