//! Depth-first traversal of a value tree.

use crate::{NodeView, TreeError, ValueTree};

/// Pre-order iterator over every node of a tree, children in order.
///
/// Borrows the tree, so no mutation can happen mid-walk. The walk ends
/// after the first error.
pub struct Walk<'a, 'ts> {
    tree: &'a ValueTree<'ts>,
    stack: Vec<NodeView>,
}

impl<'a, 'ts> Walk<'a, 'ts> {
    pub(crate) fn new(tree: &'a ValueTree<'ts>) -> Self {
        Walk {
            tree,
            stack: vec![tree.root_node()],
        }
    }
}

impl Iterator for Walk<'_, '_> {
    type Item = Result<NodeView, TreeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        match self.tree.children(&node) {
            Ok(children) => {
                self.stack.extend(children.into_iter().rev());
                Some(Ok(node))
            }
            Err(err) => {
                self.stack.clear();
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests;
