//! Type constructor contract.
//!
//! A constructor turns already-resolved arguments into a [`TypeKind`]. It is
//! called at most once per distinct `TypeRef`, under the cache's write lock,
//! so it must be pure and must never call back into the type system.

mod template;

use std::fmt;

use arbor_ir::{LongId, ShortId};
use arbor_value::{Rational, TypeRef, Value};

use crate::{SharedType, TypeError, TypeKind};

pub use template::NameTemplate;

/// Number of type arguments a constructor accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "exactly {n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Resolved arguments handed to a constructor.
///
/// `type_refs[i]` is the unresolved form of `types[i]`; generic
/// constructors need it to substitute variables structurally.
#[derive(Clone, Copy)]
pub struct ConstructorArgs<'a> {
    pub constructor: LongId,
    pub type_refs: &'a [TypeRef],
    pub types: &'a [SharedType],
    pub values: &'a [Value],
}

impl<'a> ConstructorArgs<'a> {
    fn error(&self, message: impl Into<String>) -> TypeError {
        TypeError::value_args(self.constructor, message)
    }

    /// Fail unless exactly `count` value arguments were supplied.
    pub fn expect_values(&self, count: usize) -> Result<(), TypeError> {
        if self.values.len() == count {
            Ok(())
        } else {
            Err(self.error(format!(
                "expects {count} value argument(s), found {}",
                self.values.len()
            )))
        }
    }

    pub fn value(&self, index: usize) -> Result<&'a Value, TypeError> {
        self.values
            .get(index)
            .ok_or_else(|| self.error(format!("missing value argument {index}")))
    }

    pub fn int(&self, index: usize) -> Result<i64, TypeError> {
        let value = self.value(index)?;
        value
            .as_int()
            .ok_or_else(|| self.error(format!("value argument {index} must be an int, found {value}")))
    }

    /// Non-negative int that fits in `u32`.
    pub fn count(&self, index: usize) -> Result<u32, TypeError> {
        let n = self.int(index)?;
        u32::try_from(n).map_err(|_| self.error(format!("value argument {index} out of range: {n}")))
    }

    pub fn boolean(&self, index: usize) -> Result<bool, TypeError> {
        let value = self.value(index)?;
        value
            .as_bool()
            .ok_or_else(|| self.error(format!("value argument {index} must be a bool, found {value}")))
    }

    /// Int or rational, widened to a rational.
    pub fn number(&self, index: usize) -> Result<Rational, TypeError> {
        let value = self.value(index)?;
        value
            .as_number()
            .ok_or_else(|| self.error(format!("value argument {index} must be a number, found {value}")))
    }

    fn list(&self, index: usize) -> Result<&'a [Value], TypeError> {
        let value = self.value(index)?;
        value
            .as_array()
            .ok_or_else(|| self.error(format!("value argument {index} must be an array, found {value}")))
    }

    pub fn idents(&self, index: usize) -> Result<Vec<ShortId>, TypeError> {
        self.list(index)?
            .iter()
            .map(|item| {
                item.as_ident()
                    .ok_or_else(|| self.error(format!("value argument {index}: `{item}` is not an identifier")))
            })
            .collect()
    }

    pub fn booleans(&self, index: usize) -> Result<Vec<bool>, TypeError> {
        self.list(index)?
            .iter()
            .map(|item| {
                item.as_bool()
                    .ok_or_else(|| self.error(format!("value argument {index}: `{item}` is not a bool")))
            })
            .collect()
    }

    /// Array of arrays of non-negative ints.
    pub fn index_lists(&self, index: usize) -> Result<Vec<Vec<usize>>, TypeError> {
        self.list(index)?
            .iter()
            .map(|row| {
                let row = row
                    .as_array()
                    .ok_or_else(|| self.error(format!("value argument {index}: `{row}` is not an array")))?;
                row.iter()
                    .map(|item| {
                        item.as_int()
                            .and_then(|n| usize::try_from(n).ok())
                            .ok_or_else(|| self.error(format!("value argument {index}: `{item}` is not an index")))
                    })
                    .collect()
            })
            .collect()
    }
}

/// A registered, memoized generator of types.
pub trait TypeConstructor: Send + Sync {
    fn id(&self) -> LongId;

    fn arity(&self) -> Arity;

    fn name_template(&self) -> &NameTemplate;

    /// Validate value arguments before construction.
    fn check_args(&self, args: &ConstructorArgs<'_>) -> Result<(), TypeError> {
        let _ = args;
        Ok(())
    }

    /// Build the kind. Arity and `check_args` have already passed.
    fn construct(&self, args: &ConstructorArgs<'_>) -> Result<TypeKind, TypeError>;

    /// Human-readable name of the constructed type.
    fn display_name(&self, args: &ConstructorArgs<'_>) -> String {
        self.name_template().render(args)
    }
}

impl fmt::Debug for dyn TypeConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeConstructor({})", self.id())
    }
}
