//! Values, type references and paths.
//!
//! # Ownership
//!
//! A [`Value`] is an immutable tree. Compound payloads sit behind [`Heap<T>`]
//! (a reference-counted box), so cloning a value is O(1) and children are
//! shared between versions of a tree. Nothing points back at a parent.
//!
//! Mutation is copy-on-write: [`Heap::make_mut`] and
//! [`ValueHolder::make_mut`] clone the payload when it is aliased, so a
//! reader holding an older handle never observes a write made through
//! another one.
//!
//! # Type references
//!
//! [`TypeRef`] lives here rather than next to the types it names because the
//! two definitions are mutually recursive: a constructed type reference
//! carries value arguments, and a generic value carries the type references
//! its variables are bound to.

mod heap;
mod holder;
mod path;
mod rational;
mod type_ref;
mod value;

pub use heap::Heap;
pub use holder::ValueHolder;
pub use path::{Path, PathParseError, PathStep};
pub use rational::{Rational, RationalError};
pub use type_ref::{ConstructedRef, TypeRef};
pub use value::{
    Fallback, GenericValue, MapEntry, MapError, MapSource, MapTarget, MapValue, RecordValue,
    SumValue, Value, VariantValue,
};

pub use arbor_ir::{LongId, MediumId, ShortId};
