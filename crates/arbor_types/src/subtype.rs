//! The structural subtype relation.
//!
//! Comparison is double dispatch: the left type's kind is asked for an
//! opinion about the right type; if it has none the right type is asked
//! and the answer reversed; if neither has one the types are unrelated.
//! Failure types short-circuit to `IsDisjoint` before either is asked.

use std::fmt;

use crate::{SharedType, TypeKind, TypeSystem};

/// Relation between two types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SubtypeOrder {
    IsSubtype,
    IsSupertype,
    IsEquivalent,
    IsUnrelated,
    /// One side is a Failure stand-in.
    IsDisjoint,
}

impl SubtypeOrder {
    /// The relation seen from the other side.
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            SubtypeOrder::IsSubtype => SubtypeOrder::IsSupertype,
            SubtypeOrder::IsSupertype => SubtypeOrder::IsSubtype,
            other => other,
        }
    }

    /// Build from the two inclusion tests `a ⊑ b` and `b ⊑ a`.
    pub fn from_inclusion(a_in_b: bool, b_in_a: bool) -> Self {
        match (a_in_b, b_in_a) {
            (true, true) => SubtypeOrder::IsEquivalent,
            (true, false) => SubtypeOrder::IsSubtype,
            (false, true) => SubtypeOrder::IsSupertype,
            (false, false) => SubtypeOrder::IsUnrelated,
        }
    }

    /// Combine the relations of two components compared pointwise.
    #[must_use]
    pub fn meet(self, other: Self) -> Self {
        use SubtypeOrder::{IsDisjoint, IsEquivalent, IsSubtype, IsSupertype, IsUnrelated};
        match (self, other) {
            (IsDisjoint, _) | (_, IsDisjoint) => IsDisjoint,
            (IsUnrelated, _) | (_, IsUnrelated) => IsUnrelated,
            (IsEquivalent, x) | (x, IsEquivalent) => x,
            (IsSubtype, IsSubtype) => IsSubtype,
            (IsSupertype, IsSupertype) => IsSupertype,
            (IsSubtype, IsSupertype) | (IsSupertype, IsSubtype) => IsUnrelated,
        }
    }

    /// `IsSubtype` or `IsEquivalent`.
    pub fn is_subtype(self) -> bool {
        matches!(self, SubtypeOrder::IsSubtype | SubtypeOrder::IsEquivalent)
    }

    /// `IsSupertype` or `IsEquivalent`.
    pub fn is_supertype(self) -> bool {
        matches!(self, SubtypeOrder::IsSupertype | SubtypeOrder::IsEquivalent)
    }

    /// Any of subtype, supertype or equivalent.
    pub fn is_related(self) -> bool {
        self.is_subtype() || self.is_supertype()
    }
}

impl fmt::Display for SubtypeOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SubtypeOrder::IsSubtype => "subtype",
            SubtypeOrder::IsSupertype => "supertype",
            SubtypeOrder::IsEquivalent => "equivalent",
            SubtypeOrder::IsUnrelated => "unrelated",
            SubtypeOrder::IsDisjoint => "disjoint",
        })
    }
}

/// Opinion of `a`'s kind about `b`, `None` when the kinds do not compare.
pub(crate) fn compare_helper(
    ts: &TypeSystem,
    a: &SharedType,
    b: &SharedType,
) -> Option<SubtypeOrder> {
    match (a.kind(), b.kind()) {
        (TypeKind::Bool, TypeKind::Bool) | (TypeKind::Text, TypeKind::Text) => {
            Some(SubtypeOrder::IsEquivalent)
        }
        (TypeKind::Int(x), TypeKind::Int(y)) => Some(x.compare(*y)),
        (TypeKind::Rational(x), TypeKind::Rational(y)) => Some(x.compare(*y)),
        (TypeKind::Enumeration(x), TypeKind::Enumeration(y)) => Some(x.compare(y)),
        (TypeKind::Record(x), TypeKind::Record(y)) => Some(x.compare(ts, y)),
        (TypeKind::Variant(x), TypeKind::Variant(y)) => Some(x.compare(ts, y)),
        (TypeKind::Array(x), TypeKind::Array(y)) => Some(x.compare(ts, y)),
        (TypeKind::Sum(x), TypeKind::Sum(y)) => Some(x.compare(ts, y)),
        (TypeKind::Tuple(x), TypeKind::Tuple(y)) => Some(x.compare(ts, y)),
        (TypeKind::Map(x), TypeKind::Map(y)) => Some(x.compare(ts, y)),
        (TypeKind::Generic(x), _) => Some(x.compare(ts, a, b)),
        (TypeKind::Var(x), TypeKind::Var(y)) => Some(if x == y {
            SubtypeOrder::IsEquivalent
        } else {
            SubtypeOrder::IsUnrelated
        }),
        (TypeKind::Var(_), _) => Some(SubtypeOrder::IsUnrelated),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
