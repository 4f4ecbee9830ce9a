//! Type system errors.

use arbor_ir::LongId;
use arbor_value::MapError;

use crate::constructor::Arity;

/// Failure raised while resolving types or checking values against them.
///
/// Clone + Eq so the constructor cache can keep a failure marker and hand
/// the same error back on every later lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// A primitive or constructor id is unregistered, or an argument failed.
    #[error("unresolved type `{type_ref}`: {reason}")]
    UnresolvedType { type_ref: String, reason: String },

    /// Wrong number of type arguments for a constructor.
    #[error("type constructor `{constructor}` expects {expected} type argument(s), found {found}")]
    Arity {
        constructor: LongId,
        expected: Arity,
        found: usize,
    },

    /// Value arguments of the wrong number or kind.
    #[error("type constructor `{constructor}`: {message}")]
    ValueArgs { constructor: LongId, message: String },

    /// A value is not in the value set of its declared type.
    #[error("invalid value for `{type_name}`: {reason}")]
    InvalidValue { type_name: String, reason: String },

    /// Array resize outside the declared bounds.
    #[error("size {requested} outside the allowed range [{min}, {max}]")]
    SizeOutOfRange { requested: u32, min: u32, max: u32 },

    /// A value was requested through a type variable nobody bound.
    #[error("type variable {index} (depth {depth}) is unbound")]
    UnresolvedGenericVariable { index: u32, depth: u32 },

    #[error("`{id}` is already registered")]
    DuplicateRegistration { id: LongId },

    #[error(transparent)]
    Map(#[from] MapError),
}

impl TypeError {
    pub(crate) fn invalid(type_name: &str, reason: impl Into<String>) -> Self {
        TypeError::InvalidValue {
            type_name: type_name.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn value_args(constructor: LongId, message: impl Into<String>) -> Self {
        TypeError::ValueArgs {
            constructor,
            message: message.into(),
        }
    }

    /// Whether this is a resolution failure rather than a value failure.
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            TypeError::UnresolvedType { .. }
                | TypeError::Arity { .. }
                | TypeError::ValueArgs { .. }
        )
    }
}
