//! The inert stand-in for a type that failed to resolve.

use arbor_value::TypeRef;

use crate::TypeError;

/// Carries the diagnostic of the failed resolution. Has no values and is
/// disjoint from every type, itself included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailureType {
    error: TypeError,
}

impl FailureType {
    pub fn new(error: TypeError) -> Self {
        FailureType { error }
    }

    pub fn error_cause(&self) -> &TypeError {
        &self.error
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }

    pub(crate) fn error(&self, type_ref: &TypeRef) -> TypeError {
        TypeError::UnresolvedType {
            type_ref: type_ref.fallback_name(),
            reason: self.message(),
        }
    }
}
