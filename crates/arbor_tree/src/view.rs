//! Node views.

use arbor_types::{SharedType, TypeSystem};
use arbor_value::{Path, Value};

use crate::ValueTree;

/// One position in a value tree, as of a given generation.
///
/// The view owns cheap clones of its type and value, so it stays readable
/// after the tree moves on; [`NodeView::is_stale`] says whether it still
/// reflects the tree.
#[derive(Clone, Debug)]
pub struct NodeView {
    pub(crate) tree: u64,
    pub(crate) generation: u64,
    pub(crate) path: Path,
    pub(crate) ty: SharedType,
    pub(crate) value: Value,
}

impl NodeView {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ty(&self) -> &SharedType {
        &self.ty
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn num_children(&self) -> usize {
        self.ty.num_children(&self.value)
    }

    pub fn is_leaf(&self) -> bool {
        self.num_children() == 0
    }

    /// Id of the tree this view was taken from.
    pub fn tree_id(&self) -> u64 {
        self.tree
    }

    /// Taken from another tree, or before this tree's latest mutation.
    pub fn is_stale(&self, tree: &ValueTree<'_>) -> bool {
        self.tree != tree.id() || self.generation != tree.generation()
    }

    /// The value rendered through its type.
    pub fn display(&self, ts: &TypeSystem) -> String {
        self.ty.format_value(ts, &self.value)
    }
}
