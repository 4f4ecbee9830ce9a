//! Value tree errors.

use arbor_types::TypeError;
use arbor_value::{Path, PathStep};

/// Failure of a tree navigation or mutation. A failed mutation leaves the
/// tree exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A step does not match the value found at its position.
    #[error("cannot resolve `{path}` at `{step}`: {reason}")]
    PathResolution {
        path: Path,
        step: PathStep,
        reason: String,
    },

    /// The node at `path` is not of the kind the operation needs.
    #[error("node at `{path}` is of kind {found}, expected {expected}")]
    KindMismatch {
        path: Path,
        expected: &'static str,
        found: &'static str,
    },

    /// A view taken before the latest mutation.
    #[error("view of `{path}` is stale (generation {view}, tree at {tree})")]
    StaleView { path: Path, view: u64, tree: u64 },

    /// A view taken from a different tree.
    #[error("view of `{path}` belongs to another tree")]
    ForeignView { path: Path },

    #[error(transparent)]
    Type(#[from] TypeError),
}
