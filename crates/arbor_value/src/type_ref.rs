//! Structural type descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Heap, LongId, Value};

/// Structural descriptor of a type, resolved against a type system.
///
/// A `TypeRef` has no identity: equality and hashing are structural, which
/// is what lets type references key the constructor cache.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    /// A registered primitive type.
    Primitive(LongId),
    /// A type built by a registered constructor.
    Constructed(Heap<ConstructedRef>),
}

/// Constructor application: `constructor<type_args; value_args>`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ConstructedRef {
    pub constructor: LongId,
    #[serde(rename = "types", default)]
    pub type_args: Vec<TypeRef>,
    #[serde(rename = "values", default)]
    pub value_args: Vec<Value>,
}

impl TypeRef {
    pub fn primitive(id: LongId) -> Self {
        TypeRef::Primitive(id)
    }

    pub fn constructed(constructor: LongId, type_args: Vec<TypeRef>, value_args: Vec<Value>) -> Self {
        TypeRef::Constructed(Heap::new(ConstructedRef {
            constructor,
            type_args,
            value_args,
        }))
    }

    /// Primitive id or constructor id.
    pub fn id(&self) -> LongId {
        match self {
            TypeRef::Primitive(id) => *id,
            TypeRef::Constructed(c) => c.constructor,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Primitive(_))
    }

    pub fn constructor_id(&self) -> Option<LongId> {
        match self {
            TypeRef::Primitive(_) => None,
            TypeRef::Constructed(c) => Some(c.constructor),
        }
    }

    pub fn type_args(&self) -> &[TypeRef] {
        match self {
            TypeRef::Primitive(_) => &[],
            TypeRef::Constructed(c) => &c.type_args,
        }
    }

    pub fn value_args(&self) -> &[Value] {
        match self {
            TypeRef::Primitive(_) => &[],
            TypeRef::Constructed(c) => &c.value_args,
        }
    }

    /// Same constructor and value arguments, new type arguments.
    ///
    /// Primitives have no type arguments and are returned unchanged.
    pub fn with_type_args(&self, type_args: Vec<TypeRef>) -> TypeRef {
        match self {
            TypeRef::Primitive(_) => self.clone(),
            TypeRef::Constructed(c) => {
                TypeRef::constructed(c.constructor, type_args, c.value_args.clone())
            }
        }
    }

    /// Textual reconstruction from the stored arguments alone.
    ///
    /// Used to name types whose constructor is not loaded.
    pub fn fallback_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(id) => write!(f, "{id}"),
            TypeRef::Constructed(c) => {
                write!(f, "{}<", c.constructor)?;
                for (i, arg) in c.type_args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                if !c.value_args.is_empty() {
                    f.write_str("; ")?;
                    for (i, arg) in c.value_args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                }
                f.write_str(">")
            }
        }
    }
}

#[cfg(test)]
mod tests;
