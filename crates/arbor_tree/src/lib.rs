//! Value trees for arbor.
//!
//! A [`ValueTree`] pairs a root type with a [`ValueHolder`] and presents the
//! value as a tree of nodes addressed by [`Path`]. Nodes are not objects:
//! a [`NodeView`] is a snapshot of one position, tagged with the tree
//! generation it was taken at. Every successful mutation rebuilds the
//! ancestors of the edited node copy-on-write, installs a new root holder
//! and bumps the generation, so older views report themselves stale
//! instead of pointing at replaced values.
//!
//! Older holders are never touched by a rewrite. Keeping the previous root
//! (see [`ValueTree::snapshot`]) is enough to undo.
//!
//! [`ValueHolder`]: arbor_value::ValueHolder
//! [`Path`]: arbor_value::Path

mod error;
mod tree;
mod view;
mod walk;

pub use error::TreeError;
pub use tree::ValueTree;
pub use view::NodeView;
pub use walk::Walk;
