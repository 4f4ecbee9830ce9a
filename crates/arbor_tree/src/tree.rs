//! The value tree: path resolution and copy-on-write rewrites.
//!
//! Resolution walks a path from the root, asking each node's type for the
//! child addressed by the next step. A rewrite resolves the path once,
//! keeping every ancestor it passed, computes the new value of the target
//! node, checks it against the target's type, and then rebuilds the
//! ancestors bottom-up with `Type::with_child`. Only the values on the path
//! are copied; siblings are shared with the previous root.

use std::sync::atomic::{AtomicU64, Ordering};

use arbor_ir::ShortId;
use arbor_types::{Child, SharedType, Type, TypeError, TypeKind, TypeSystem};
use arbor_value::{Fallback, MapEntry, Path, PathStep, TypeRef, Value, ValueHolder};

use crate::{NodeView, TreeError, Walk};

/// An ancestor passed on the way to a node: its type, its value, and the
/// index of the child the path continues through.
struct Frame {
    ty: SharedType,
    value: Value,
    index: usize,
}

struct Located {
    frames: Vec<Frame>,
    ty: SharedType,
    value: Value,
}

fn kind_mismatch(path: &Path, expected: &'static str, ty: &SharedType) -> TreeError {
    TreeError::KindMismatch {
        path: path.clone(),
        expected,
        found: ty.kind().kind_name(),
    }
}

fn no_child(path: &Path, step: PathStep, ty: &SharedType) -> TreeError {
    TreeError::PathResolution {
        path: path.clone(),
        step,
        reason: format!("`{}` has no child `{step}`", ty.name()),
    }
}

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(0);

fn next_tree_id() -> u64 {
    NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed)
}

/// A typed value presented as a tree of path-addressed nodes.
///
/// Single writer: mutations take `&mut self`. Readers that need to outlive
/// a mutation keep a [`ValueTree::snapshot`] or a [`NodeView`].
#[derive(Debug)]
pub struct ValueTree<'ts> {
    ts: &'ts TypeSystem,
    root_type: SharedType,
    root: ValueHolder,
    id: u64,
    generation: u64,
}

impl<'ts> ValueTree<'ts> {
    /// Wrap an existing value; it must be valid for `root_type`.
    pub fn new(
        ts: &'ts TypeSystem,
        root_type: SharedType,
        root: ValueHolder,
    ) -> Result<Self, TreeError> {
        root_type.validate(ts, root.get())?;
        Ok(ValueTree {
            ts,
            root_type,
            root,
            id: next_tree_id(),
            generation: 0,
        })
    }

    /// A tree holding the default value of `root_type`.
    pub fn with_default(ts: &'ts TypeSystem, root_type: SharedType) -> Result<Self, TreeError> {
        let value = root_type.create_value(ts)?;
        Ok(ValueTree {
            ts,
            root_type,
            root: ValueHolder::new(value),
            id: next_tree_id(),
            generation: 0,
        })
    }

    /// Resolve `type_ref` and start from its default value.
    pub fn for_type_ref(ts: &'ts TypeSystem, type_ref: &TypeRef) -> Result<Self, TreeError> {
        Self::with_default(ts, ts.resolve(type_ref)?)
    }

    pub fn type_system(&self) -> &'ts TypeSystem {
        self.ts
    }

    pub fn root_type(&self) -> &SharedType {
        &self.root_type
    }

    pub fn root(&self) -> &ValueHolder {
        &self.root
    }

    pub fn root_value(&self) -> &Value {
        self.root.get()
    }

    /// Process-unique identity; views remember the tree they came from.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Incremented by every successful mutation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// A holder sharing the current root. Later mutations never show
    /// through it.
    pub fn snapshot(&self) -> ValueHolder {
        self.root.clone()
    }

    pub fn into_root(self) -> ValueHolder {
        self.root
    }

    // Navigation

    fn locate(&self, path: &Path) -> Result<Located, TreeError> {
        let mut frames = Vec::with_capacity(path.len());
        let mut ty = self.root_type.clone();
        let mut value = self.root.get().clone();
        for &step in path {
            let Some(index) = ty.child_index(&value, step) else {
                return Err(no_child(path, step, &ty));
            };
            let Some(Child {
                value: child_value,
                type_ref,
                ..
            }) = ty.child(&value, index)
            else {
                return Err(no_child(path, step, &ty));
            };
            let child_ty = self.ts.resolve_strict(&type_ref)?;
            frames.push(Frame { ty, value, index });
            ty = child_ty;
            value = child_value;
        }
        Ok(Located { frames, ty, value })
    }

    pub fn root_node(&self) -> NodeView {
        NodeView {
            tree: self.id,
            generation: self.generation,
            path: Path::root(),
            ty: self.root_type.clone(),
            value: self.root.get().clone(),
        }
    }

    /// View of the node at `path`.
    pub fn node(&self, path: &Path) -> Result<NodeView, TreeError> {
        let Located { ty, value, .. } = self.locate(path)?;
        Ok(NodeView {
            tree: self.id,
            generation: self.generation,
            path: path.clone(),
            ty,
            value,
        })
    }

    pub fn resolve_type(&self, path: &Path) -> Result<SharedType, TreeError> {
        Ok(self.locate(path)?.ty)
    }

    pub fn value_at(&self, path: &Path) -> Result<Value, TreeError> {
        Ok(self.locate(path)?.value)
    }

    fn check_fresh(&self, view: &NodeView) -> Result<(), TreeError> {
        if view.tree != self.id {
            return Err(TreeError::ForeignView {
                path: view.path.clone(),
            });
        }
        if view.is_stale(self) {
            return Err(TreeError::StaleView {
                path: view.path.clone(),
                view: view.generation,
                tree: self.generation,
            });
        }
        Ok(())
    }

    fn child_view(&self, parent: &NodeView, child: Child) -> Result<NodeView, TreeError> {
        Ok(NodeView {
            tree: self.id,
            generation: self.generation,
            path: parent.path.child(child.step),
            ty: self.ts.resolve_strict(&child.type_ref)?,
            value: child.value,
        })
    }

    /// Child `index` of a fresh view.
    pub fn child(&self, view: &NodeView, index: usize) -> Result<NodeView, TreeError> {
        self.check_fresh(view)?;
        let Some(child) = view.ty.child(&view.value, index) else {
            return Err(TreeError::PathResolution {
                path: view.path.clone(),
                step: PathStep::Index(u32::try_from(index).unwrap_or(u32::MAX)),
                reason: format!(
                    "`{}` has {} children",
                    view.ty.name(),
                    view.num_children()
                ),
            });
        };
        self.child_view(view, child)
    }

    /// Child of a fresh view addressed by `step`.
    pub fn child_by_step(&self, view: &NodeView, step: PathStep) -> Result<NodeView, TreeError> {
        self.check_fresh(view)?;
        let child = view
            .ty
            .child_index(&view.value, step)
            .and_then(|index| view.ty.child(&view.value, index))
            .ok_or_else(|| no_child(&view.path, step, &view.ty))?;
        self.child_view(view, child)
    }

    pub fn children(&self, view: &NodeView) -> Result<Vec<NodeView>, TreeError> {
        self.check_fresh(view)?;
        view.ty
            .children(&view.value)
            .into_iter()
            .map(|child| self.child_view(view, child))
            .collect()
    }

    /// Re-resolve a view's path against the current root. The view then
    /// belongs to this tree.
    pub fn resync(&self, view: &mut NodeView) -> Result<(), TreeError> {
        let fresh = self.node(&view.path)?;
        *view = fresh;
        Ok(())
    }

    /// Depth-first, parents before children.
    pub fn walk(&self) -> Walk<'_, 'ts> {
        Walk::new(self)
    }

    // Mutation

    fn rewrite(
        &mut self,
        op: &'static str,
        path: &Path,
        edit: impl FnOnce(&'ts TypeSystem, &SharedType, &Value) -> Result<Value, TreeError>,
    ) -> Result<(), TreeError> {
        let Located { frames, ty, value } = self.locate(path)?;
        let mut new = edit(self.ts, &ty, &value)?;
        ty.validate(self.ts, &new)?;
        for frame in frames.into_iter().rev() {
            new = frame.ty.with_child(&frame.value, frame.index, new)?;
        }
        self.root = ValueHolder::new(new);
        self.generation += 1;
        tracing::debug!(op, path = %path, generation = self.generation, "rewrote value tree");
        Ok(())
    }

    /// Replace the value at `path`; it must be valid for the node's type.
    #[tracing::instrument(level = "trace", skip_all, fields(path = %path))]
    pub fn set_value(&mut self, path: &Path, value: Value) -> Result<(), TreeError> {
        self.rewrite("set_value", path, move |_, _, _| Ok(value))
    }

    /// Apply `f` to the node at `path` and store its result.
    pub fn modify(
        &mut self,
        path: &Path,
        f: impl FnOnce(&TypeSystem, &Type, &Value) -> Result<Value, TypeError>,
    ) -> Result<(), TreeError> {
        self.rewrite("modify", path, |ts, ty, value| Ok(f(ts, ty, value)?))
    }

    /// Install a new root, returning the previous one.
    pub fn replace_root(&mut self, root: ValueHolder) -> Result<ValueHolder, TreeError> {
        self.root_type.validate(self.ts, root.get())?;
        let previous = std::mem::replace(&mut self.root, root);
        self.generation += 1;
        tracing::debug!(generation = self.generation, "replaced value tree root");
        Ok(previous)
    }

    #[tracing::instrument(level = "trace", skip_all, fields(path = %path, size = size))]
    pub fn resize_array(&mut self, path: &Path, size: u32) -> Result<(), TreeError> {
        self.rewrite("resize_array", path, |ts, ty, value| match ty.kind() {
            TypeKind::Array(a) => Ok(a.set_size(ts, ty.name(), value, size)?),
            _ => Err(kind_mismatch(path, "array", ty)),
        })
    }

    /// Insert a default element before position `at`.
    #[tracing::instrument(level = "trace", skip_all, fields(path = %path, at = at))]
    pub fn insert_array_element(&mut self, path: &Path, at: usize) -> Result<(), TreeError> {
        self.rewrite("insert_array_element", path, |ts, ty, value| match ty.kind() {
            TypeKind::Array(a) => Ok(a.insert_default(ts, ty.name(), value, at)?),
            _ => Err(kind_mismatch(path, "array", ty)),
        })
    }

    #[tracing::instrument(level = "trace", skip_all, fields(path = %path, at = at))]
    pub fn remove_array_element(&mut self, path: &Path, at: usize) -> Result<(), TreeError> {
        self.rewrite("remove_array_element", path, |_, ty, value| match ty.kind() {
            TypeKind::Array(a) => Ok(a.remove_at(ty.name(), value, at)?),
            _ => Err(kind_mismatch(path, "array", ty)),
        })
    }

    #[tracing::instrument(level = "trace", skip_all, fields(path = %path, tag = %tag))]
    pub fn select_tag(&mut self, path: &Path, tag: ShortId) -> Result<(), TreeError> {
        self.rewrite("select_tag", path, |ts, ty, value| match ty.kind() {
            TypeKind::Variant(v) => Ok(v.select_tag(ts, ty.name(), value, tag)?),
            _ => Err(kind_mismatch(path, "variant", ty)),
        })
    }

    #[tracing::instrument(level = "trace", skip_all, fields(path = %path, index = index))]
    pub fn select_summand(&mut self, path: &Path, index: u32) -> Result<(), TreeError> {
        self.rewrite("select_summand", path, |ts, ty, value| match ty.kind() {
            TypeKind::Sum(s) => Ok(s.select_summand(ts, ty.name(), value, index)?),
            _ => Err(kind_mismatch(path, "sum", ty)),
        })
    }

    #[tracing::instrument(level = "trace", skip_all, fields(path = %path, field = %field, active = active))]
    pub fn set_field_active(
        &mut self,
        path: &Path,
        field: ShortId,
        active: bool,
    ) -> Result<(), TreeError> {
        self.rewrite("set_field_active", path, |ts, ty, value| match ty.kind() {
            TypeKind::Record(r) => Ok(r.set_field_active(ts, ty.name(), value, field, active)?),
            _ => Err(kind_mismatch(path, "record", ty)),
        })
    }

    /// Bind variable `index` of the generic at `path` to `binding`.
    #[tracing::instrument(level = "trace", skip_all, fields(path = %path, index = index, binding = %binding))]
    pub fn bind_variable(
        &mut self,
        path: &Path,
        index: u32,
        binding: TypeRef,
    ) -> Result<(), TreeError> {
        self.rewrite("bind_variable", path, move |ts, ty, value| match ty.kind() {
            TypeKind::Generic(g) => Ok(g.bind_variable(ts, ty.name(), value, index, binding)?),
            _ => Err(kind_mismatch(path, "generic", ty)),
        })
    }

    #[tracing::instrument(level = "trace", skip_all, fields(path = %path, pos = pos))]
    pub fn insert_map_entry(
        &mut self,
        path: &Path,
        pos: usize,
        entry: MapEntry,
    ) -> Result<(), TreeError> {
        self.rewrite("insert_map_entry", path, move |ts, ty, value| match ty.kind() {
            TypeKind::Map(m) => Ok(m.insert_entry(ts, ty.name(), value, pos, entry)?),
            _ => Err(kind_mismatch(path, "map", ty)),
        })
    }

    #[tracing::instrument(level = "trace", skip_all, fields(path = %path, pos = pos))]
    pub fn remove_map_entry(&mut self, path: &Path, pos: usize) -> Result<(), TreeError> {
        self.rewrite("remove_map_entry", path, |_, ty, value| match ty.kind() {
            TypeKind::Map(m) => Ok(m.remove_entry(ty.name(), value, pos)?),
            _ => Err(kind_mismatch(path, "map", ty)),
        })
    }

    #[tracing::instrument(level = "trace", skip_all, fields(path = %path))]
    pub fn set_map_fallback(&mut self, path: &Path, policy: Fallback) -> Result<(), TreeError> {
        self.rewrite("set_map_fallback", path, move |ts, ty, value| match ty.kind() {
            TypeKind::Map(m) => Ok(m.set_fallback(ts, ty.name(), value, policy)?),
            _ => Err(kind_mismatch(path, "map", ty)),
        })
    }
}
