//! Resolved types.
//!
//! A [`Type`] is built once per distinct [`TypeRef`] and never changes.
//! Behavior is a closed match over [`TypeKind`]: creating defaults,
//! validating values, rendering them, and decomposing compound values into
//! addressable children for value trees.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
#[expect(clippy::disallowed_types, reason = "SharedType is the one sanctioned Arc over types")]
use std::sync::Arc;

use arbor_value::{PathStep, TypeRef, Value, ValueHolder};

use crate::kinds::{
    ArrayType, EnumType, FailureType, GenericType, IntRange, MapType, RationalRange, RecordType,
    SumType, TupleType, TypeVar, VariantType,
};
use crate::{TypeError, TypeFlags, TypeSystem};

/// The closed set of type kinds.
#[derive(Debug)]
pub enum TypeKind {
    Bool,
    Int(IntRange),
    Rational(RationalRange),
    Text,
    Enumeration(EnumType),
    Record(RecordType),
    Variant(VariantType),
    Array(ArrayType),
    Sum(SumType),
    Tuple(TupleType),
    Generic(GenericType),
    Map(MapType),
    Var(TypeVar),
    Failure(FailureType),
}

impl TypeKind {
    /// Types this kind was built from.
    pub fn child_types(&self) -> Vec<&SharedType> {
        match self {
            TypeKind::Record(r) => r.fields().iter().map(|f| &f.ty).collect(),
            TypeKind::Variant(v) => v.fields().iter().map(|f| &f.ty).collect(),
            TypeKind::Array(a) => vec![a.element()],
            TypeKind::Sum(s) => s.summands().iter().collect(),
            TypeKind::Tuple(t) => t.slots().iter().collect(),
            TypeKind::Generic(g) => {
                let mut out = vec![g.inner_type()];
                out.extend(g.default_bindings().iter().map(|(_, ty)| ty));
                out
            }
            TypeKind::Map(m) => vec![m.source(), m.target()],
            TypeKind::Bool
            | TypeKind::Int(_)
            | TypeKind::Rational(_)
            | TypeKind::Text
            | TypeKind::Enumeration(_)
            | TypeKind::Var(_)
            | TypeKind::Failure(_) => Vec::new(),
        }
    }

    pub fn is_compound(&self) -> bool {
        matches!(
            self,
            TypeKind::Record(_)
                | TypeKind::Variant(_)
                | TypeKind::Array(_)
                | TypeKind::Sum(_)
                | TypeKind::Tuple(_)
                | TypeKind::Generic(_)
                | TypeKind::Map(_)
        )
    }

    /// Deepest free variable depth, relative to this type.
    fn free_depth(&self) -> Option<u32> {
        match self {
            TypeKind::Var(v) => Some(v.depth),
            TypeKind::Generic(g) => {
                let inner = g.inner_type().free_depth().and_then(|d| d.checked_sub(1));
                g.default_bindings()
                    .iter()
                    .filter_map(|(_, ty)| ty.free_depth())
                    .chain(inner)
                    .max()
            }
            _ => self.child_types().iter().filter_map(|ty| ty.free_depth()).max(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeKind::Bool => "bool",
            TypeKind::Int(_) => "int",
            TypeKind::Rational(_) => "rational",
            TypeKind::Text => "text",
            TypeKind::Enumeration(_) => "enumeration",
            TypeKind::Record(_) => "record",
            TypeKind::Variant(_) => "variant",
            TypeKind::Array(_) => "array",
            TypeKind::Sum(_) => "sum",
            TypeKind::Tuple(_) => "tuple",
            TypeKind::Generic(_) => "generic",
            TypeKind::Map(_) => "map",
            TypeKind::Var(_) => "var",
            TypeKind::Failure(_) => "failure",
        }
    }
}

/// One child of a compound value, as seen by a value tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Child {
    pub value: Value,
    pub step: PathStep,
    pub type_ref: TypeRef,
}

/// A resolved type.
#[derive(Debug)]
pub struct Type {
    type_ref: TypeRef,
    name: String,
    kind: TypeKind,
    flags: TypeFlags,
    free_depth: Option<u32>,
}

impl Type {
    /// Assemble a type, deriving flags from the kind and its argument types.
    pub(crate) fn new(type_ref: TypeRef, name: String, kind: TypeKind) -> Self {
        let mut flags = TypeFlags::propagate(kind.child_types().iter().map(|t| &t.flags));
        let free_depth = kind.free_depth();
        if free_depth.is_some() {
            flags |= TypeFlags::HAS_VAR;
        }
        if type_ref.is_primitive() {
            flags |= TypeFlags::IS_PRIMITIVE;
        }
        if kind.is_compound() {
            flags |= TypeFlags::IS_COMPOUND;
        }
        match &kind {
            TypeKind::Generic(g) => {
                flags |= TypeFlags::IS_GENERIC;
                if g.is_bound() && free_depth.is_none() {
                    flags |= TypeFlags::IS_INHABITED;
                }
            }
            TypeKind::Var(_) => flags |= TypeFlags::IS_VAR,
            TypeKind::Failure(_) => flags |= TypeFlags::HAS_FAILURE,
            _ => {
                let children_inhabited = kind
                    .child_types()
                    .iter()
                    .all(|t| t.flags.contains(TypeFlags::IS_INHABITED));
                if free_depth.is_none() && children_inhabited {
                    flags |= TypeFlags::IS_INHABITED;
                }
            }
        }
        Type {
            type_ref,
            name,
            kind,
            flags,
            free_depth,
        }
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn flags(&self) -> TypeFlags {
        self.flags
    }

    /// Depth of the outermost free type variable, `None` when closed.
    pub fn free_depth(&self) -> Option<u32> {
        self.free_depth
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.kind, TypeKind::Failure(_))
    }

    // Values

    /// Default value of this type.
    pub fn create_value(&self, ts: &TypeSystem) -> Result<Value, TypeError> {
        match &self.kind {
            TypeKind::Bool => Ok(Value::Bool(false)),
            TypeKind::Int(r) => Ok(Value::Int(r.default_value())),
            TypeKind::Rational(r) => Ok(Value::Rational(r.default_value())),
            TypeKind::Text => Ok(Value::text("")),
            TypeKind::Enumeration(e) => Ok(e.default_value()),
            TypeKind::Record(r) => r.create_value(ts),
            TypeKind::Variant(v) => v.create_value(ts),
            TypeKind::Array(a) => a.create_value(ts),
            TypeKind::Sum(s) => s.create_value(ts),
            TypeKind::Tuple(t) => t.create_value(ts),
            TypeKind::Generic(g) => g.create_value(ts),
            TypeKind::Map(m) => m.create_value(ts),
            TypeKind::Var(v) => Err(v.unresolved()),
            TypeKind::Failure(f) => Err(f.error(&self.type_ref)),
        }
    }

    pub fn is_valid_value(&self, ts: &TypeSystem, value: &Value) -> bool {
        self.validate(ts, value).is_ok()
    }

    /// Check `value` is in this type's value set.
    pub fn validate(&self, ts: &TypeSystem, value: &Value) -> Result<(), TypeError> {
        let name = self.name.as_str();
        match (&self.kind, value) {
            (TypeKind::Bool, Value::Bool(_)) | (TypeKind::Text, Value::Text(_)) => Ok(()),
            (TypeKind::Int(r), Value::Int(n)) => r.validate(name, *n),
            (TypeKind::Rational(r), Value::Rational(q)) => r.validate(name, *q),
            (TypeKind::Enumeration(e), _) => e.validate(name, value),
            (TypeKind::Record(r), _) => r.validate(ts, name, value),
            (TypeKind::Variant(v), _) => v.validate(ts, name, value),
            (TypeKind::Array(a), _) => a.validate(ts, name, value),
            (TypeKind::Sum(s), _) => s.validate(ts, name, value),
            (TypeKind::Tuple(t), _) => t.validate(ts, name, value),
            (TypeKind::Generic(g), _) => g.validate(ts, name, value),
            (TypeKind::Map(m), _) => m.validate(ts, name, value),
            (TypeKind::Var(v), _) => Err(v.unresolved()),
            (TypeKind::Failure(f), _) => Err(f.error(&self.type_ref)),
            (kind, _) => Err(TypeError::invalid(
                name,
                format!("expected a {} value, found {}", kind.kind_name(), value.type_name()),
            )),
        }
    }

    /// Render `value` using this type's structure (field names, summand
    /// types). Values that do not fit fall back to their own text form.
    pub fn format_value(&self, ts: &TypeSystem, value: &Value) -> String {
        let formatted = match &self.kind {
            TypeKind::Record(r) => r.format_value(ts, value),
            TypeKind::Variant(v) => v.format_value(ts, value),
            TypeKind::Array(a) => a.format_value(ts, value),
            TypeKind::Sum(s) => s.format_value(ts, value),
            TypeKind::Tuple(t) => t.format_value(ts, value),
            TypeKind::Generic(g) => g.format_value(ts, value),
            _ => None,
        };
        formatted.unwrap_or_else(|| value.to_string())
    }

    /// Store `value` in `holder` if it is valid; otherwise leave the
    /// holder untouched.
    pub fn assign(
        &self,
        ts: &TypeSystem,
        holder: &mut ValueHolder,
        value: Value,
    ) -> Result<(), TypeError> {
        self.validate(ts, &value)?;
        holder.replace(value);
        Ok(())
    }

    // Children

    pub fn num_children(&self, value: &Value) -> usize {
        match &self.kind {
            TypeKind::Record(r) => r.num_children(value),
            TypeKind::Variant(_) => value.as_variant().map_or(0, |v| v.fields.len()),
            TypeKind::Array(_) => value.as_array().map_or(0, <[Value]>::len),
            TypeKind::Tuple(_) => value.as_tuple().map_or(0, <[Value]>::len),
            TypeKind::Sum(_) => usize::from(value.as_sum().is_some()),
            TypeKind::Generic(_) => usize::from(value.as_generic().is_some()),
            TypeKind::Map(m) => m.num_children(value),
            _ => 0,
        }
    }

    /// Child `index` of `value`, `None` when out of range or mis-shaped.
    pub fn child(&self, value: &Value, index: usize) -> Option<Child> {
        match &self.kind {
            TypeKind::Record(r) => r.child(value, index),
            TypeKind::Variant(v) => v.child(value, index),
            TypeKind::Array(a) => a.child(value, index),
            TypeKind::Sum(s) => s.child(value, index),
            TypeKind::Tuple(t) => t.child(value, index),
            TypeKind::Generic(g) => g.child(value, index),
            TypeKind::Map(m) => m.child(value, index),
            _ => None,
        }
    }

    pub fn children(&self, value: &Value) -> Vec<Child> {
        (0..self.num_children(value))
            .filter_map(|i| self.child(value, i))
            .collect()
    }

    /// Index of the child addressed by `step`.
    pub fn child_index(&self, value: &Value, step: PathStep) -> Option<usize> {
        match &self.kind {
            TypeKind::Record(r) => r.child_index(value, step),
            TypeKind::Variant(v) => v.child_index(value, step),
            TypeKind::Array(_) | TypeKind::Tuple(_) => {
                let index = usize::try_from(step.as_index()?).ok()?;
                (index < self.num_children(value)).then_some(index)
            }
            TypeKind::Sum(s) => s.child_index(value, step),
            TypeKind::Generic(_) => {
                (step == PathStep::Index(0) && value.as_generic().is_some()).then_some(0)
            }
            TypeKind::Map(m) => m.child_index(value, step),
            _ => None,
        }
    }

    /// Copy of `value` with child `index` replaced. The caller has already
    /// validated `child` against the child's type.
    pub fn with_child(&self, value: &Value, index: usize, child: Value) -> Result<Value, TypeError> {
        let name = self.name.as_str();
        let mut out = value.clone();
        let slot = match &self.kind {
            TypeKind::Record(_) => out.as_record_mut().and_then(|r| {
                r.slots_mut()
                    .iter_mut()
                    .filter_map(|(_, v)| v.as_mut())
                    .nth(index)
            }),
            TypeKind::Variant(_) => out
                .as_variant_mut()
                .and_then(|v| v.fields.get_mut(index))
                .map(|(_, v)| v),
            TypeKind::Array(_) => out.as_array_mut().and_then(|items| items.get_mut(index)),
            TypeKind::Tuple(_) => out.as_tuple_mut().and_then(|items| items.get_mut(index)),
            TypeKind::Sum(_) if index == 0 => out.as_sum_mut().map(|s| &mut s.value),
            TypeKind::Generic(_) if index == 0 => out.as_generic_mut().map(|g| &mut g.inner),
            TypeKind::Map(m) => return m.with_child(name, value, index, child),
            _ => None,
        };
        match slot {
            Some(slot) => {
                *slot = child;
                Ok(out)
            }
            None => Err(TypeError::invalid(name, format!("no child at index {index}"))),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Shared handle to a canonical [`Type`].
///
/// Types live as long as the type system that built them, and equal
/// `TypeRef`s resolve to the same instance, so equality and hashing are by
/// identity.
#[derive(Clone)]
#[expect(clippy::disallowed_types, reason = "SharedType is the one sanctioned Arc over types")]
pub struct SharedType(Arc<Type>);

#[expect(clippy::disallowed_types, reason = "SharedType is the one sanctioned Arc over types")]
impl SharedType {
    pub(crate) fn new(ty: Type) -> Self {
        SharedType(Arc::new(ty))
    }

    /// Whether both handles point at the same type instance.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Identity key for memo tables.
    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }
}

impl Deref for SharedType {
    type Target = Type;

    fn deref(&self) -> &Type {
        &self.0
    }
}

impl PartialEq for SharedType {
    fn eq(&self, other: &Self) -> bool {
        SharedType::ptr_eq(self, other)
    }
}

impl Eq for SharedType {}

impl Hash for SharedType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for SharedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedType({})", self.0.name)
    }
}

impl fmt::Display for SharedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}
