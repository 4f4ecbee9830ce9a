//! Structural type system for arbor.
//!
//! A [`TypeRef`](arbor_value::TypeRef) names a type structurally: a
//! registered primitive, or a constructor applied to type and value
//! arguments. [`TypeSystem::resolve`] turns it into a canonical
//! [`SharedType`]: equal references always resolve to the same instance,
//! because constructed types are memoized in a sharded cache and never
//! evicted.
//!
//! # Kinds
//!
//! Every type has a [`TypeKind`]: scalar ranges, text, enumerations, and the
//! compound kinds (record, variant record, array, sum, tuple, generic, map).
//! Compound kinds decompose their values into children addressed by
//! [`PathStep`](arbor_value::PathStep)s, which is what value trees navigate.
//!
//! # Subtyping
//!
//! [`TypeSystem::compare_subtype`] is structural and double-dispatched
//! over kinds; see [`SubtypeOrder`].

mod builtins;
mod cache;
mod config;
mod constructor;
mod error;
mod flags;
mod kinds;
mod subtype;
mod system;
mod ty;

pub use builtins::{
    builtin_constructors, core_id, core_ids, CoreIds, PrimitiveDecl, PrimitiveInfo,
    BUILTIN_PRIMITIVES, CORE_NAMESPACE,
};
pub use config::{ConfigError, FailurePolicy, TypeSystemConfig, FAILURE_POLICY_ENV};
pub use constructor::{Arity, ConstructorArgs, NameTemplate, TypeConstructor};
pub use error::TypeError;
pub use flags::TypeFlags;
pub use kinds::{
    instantiate, ArrayType, EnumType, FailureType, FieldDecl, GenericType, IntRange, MapType,
    RationalRange, RecordType, SumType, TagDecl, TupleType, TypeVar, VariantField, VariantType,
};
pub use subtype::SubtypeOrder;
pub use system::{SharedTypeSystem, TypeSystem};
pub use ty::{Child, SharedType, Type, TypeKind};

/// Type reference builders for the `core` constructors.
pub mod refs {
    pub use crate::builtins::{
        array, boolean, enumeration, generic, generic_bound, int, int_range, list, map, rational,
        rational_range, record, sum, text, tuple, var, Field, VariantBuilder,
    };
}
