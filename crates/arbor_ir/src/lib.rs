//! Identifiers for the arbor type system.
//!
//! Types, constructors, fields and tags are named by interned identifiers.
//! The core only relies on identifiers being cheap to copy, hashable and
//! totally ordered; the text behind them lives in a process-wide
//! [`StringInterner`] reachable through [`registry`].
//!
//! Three scopes are distinguished:
//! - [`ShortId`]: local names (record fields, enumeration members, variant tags)
//! - [`MediumId`]: namespaces (a plugin or module that contributes types)
//! - [`LongId`]: globally unique names (`namespace.local`) for primitives and
//!   type constructors

mod ident;
mod interner;
mod name;

pub use ident::{IdError, LongId, MediumId, ShortId};
pub use interner::{registry, InternError, StringInterner};
pub use name::Name;
