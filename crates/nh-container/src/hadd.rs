//! Merge many histogram containers into one by summing matching paths.
//!
//! The merge walks each input's namespace in file order, accumulating
//! histograms found at matching paths and unioning groups into an
//! in-memory tree, then writes the combined tree to a fresh output
//! container. Only one input file is open at a time; the tree holds one
//! in-memory copy of every distinct histogram across all inputs.

use std::path::Path;

use nh_core::Histogram;
use tracing::debug;

use crate::error::{ContainerError, Result};
use crate::file::ContainerFile;
use crate::hist::{is_histogram, read_histogram, write_histogram};
use crate::model::{Group, Node};

/// A node of the merge-time tree: a histogram leaf or a named branch.
#[derive(Debug)]
pub enum TreeNode {
    /// Histogram accumulated across inputs.
    Leaf(Histogram),
    /// Nested namespace.
    Branch(MergeTree),
}

/// Insertion-ordered mapping from entry name to [`TreeNode`]; keys are
/// unique within a node.
#[derive(Debug, Default)]
pub struct MergeTree {
    entries: Vec<(String, TreeNode)>,
}

impl MergeTree {
    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &TreeNode)> {
        self.entries.iter().map(|(n, node)| (n.as_str(), node))
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut TreeNode> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, node)| node)
    }

    fn insert(&mut self, name: &str, node: TreeNode) {
        self.entries.push((name.to_string(), node));
    }

    /// Branch under `name`, created empty when absent. An existing leaf
    /// under that name is a structural conflict (same path used as a
    /// histogram in one input and as a group in another).
    fn branch_mut(&mut self, name: &str, path: &str) -> Result<&mut MergeTree> {
        if self.get_mut(name).is_none() {
            self.insert(name, TreeNode::Branch(MergeTree::default()));
        }
        match self.get_mut(name) {
            Some(TreeNode::Branch(sub)) => Ok(sub),
            _ => Err(ContainerError::StructuralConflict { path: path.to_string() }),
        }
    }

    /// Fold one histogram leaf in: fresh insert, or accumulation into the
    /// existing leaf. An existing branch under that name conflicts.
    fn merge_leaf(&mut self, name: &str, hist: Histogram, path: &str) -> Result<()> {
        match self.get_mut(name) {
            None => {
                self.insert(name, TreeNode::Leaf(hist));
                Ok(())
            }
            Some(TreeNode::Leaf(existing)) => {
                existing.accumulate(&hist)?;
                Ok(())
            }
            Some(TreeNode::Branch(_)) => {
                Err(ContainerError::StructuralConflict { path: path.to_string() })
            }
        }
    }
}

/// Merge an ordered sequence of input containers into `output_path`.
///
/// Inputs are consumed one at a time, in order; the combined tree is
/// written out wholesale once all inputs are merged. Fails fast on any
/// I/O or structural error; a failure partway through leaves the output
/// absent or incomplete (caller discards it). When `verbose`, one
/// progress line per input file is printed.
pub fn hadd<P: AsRef<Path>>(
    output_path: impl AsRef<Path>,
    inputs: &[P],
    verbose: bool,
) -> Result<()> {
    let mut tree = MergeTree::default();
    for input in inputs {
        let input = input.as_ref();
        if verbose {
            println!("adding {}", input.display());
        }
        debug!(file = %input.display(), "merging input container");
        let file = ContainerFile::open(input)?;
        merge_group(&mut tree, file.root(), "")?;
        // `file` drops here, before the next input is opened.
    }

    let mut out = ContainerFile::new();
    write_tree(out.root_mut(), &tree)?;
    debug!(file = %output_path.as_ref().display(), "writing merged container");
    out.save(output_path)
}

/// Recursively merge a source namespace into the accumulating tree.
fn merge_group(tree: &mut MergeTree, group: &Group, path: &str) -> Result<()> {
    for (name, node) in group.entries() {
        let child_path = join(path, name);
        match node {
            Node::Dataset(ds) if is_histogram(ds) => {
                let hist = read_histogram(&child_path, ds)?;
                tree.merge_leaf(name, hist, &child_path)?;
            }
            Node::Dataset(_) => {
                // A bare dataset has no meaning in a histogram tree.
                return Err(ContainerError::NotAHistogram { name: child_path });
            }
            Node::Group(sub) => {
                let branch = tree.branch_mut(name, &child_path)?;
                merge_group(branch, sub, &child_path)?;
            }
        }
    }
    Ok(())
}

/// Write the combined tree into a fresh output group.
fn write_tree(dest: &mut Group, tree: &MergeTree) -> Result<()> {
    for (name, node) in tree.entries() {
        match node {
            TreeNode::Leaf(hist) => write_histogram(dest, name, hist)?,
            TreeNode::Branch(sub) => {
                let group = dest.create_group(name)?;
                write_tree(group, sub)?;
            }
        }
    }
    Ok(())
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}/{name}")
    }
}
