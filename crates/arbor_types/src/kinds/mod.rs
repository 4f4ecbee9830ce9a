//! Type kinds.
//!
//! Each kind owns its argument types (already resolved and canonical) and
//! implements value creation, validation, child decomposition and its half
//! of the subtype relation. `Type` dispatches to these by matching on
//! `TypeKind`.

mod array;
mod enumeration;
mod failure;
mod generic;
mod map;
mod record;
mod scalar;
mod sum;
mod tuple;
mod variant;

pub use array::ArrayType;
pub use enumeration::EnumType;
pub use failure::FailureType;
pub use generic::{instantiate, GenericType, TypeVar};
pub use map::MapType;
pub use record::{FieldDecl, RecordType};
pub use scalar::{IntRange, RationalRange};
pub use sum::SumType;
pub use tuple::TupleType;
pub use variant::{TagDecl, VariantField, VariantType};
