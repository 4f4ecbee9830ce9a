//! Pre-computed type metadata flags.
//!
//! `TypeFlags` are computed once when a type is built and never change,
//! so properties like "contains a free type variable" are O(1) queries.

use bitflags::bitflags;

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u16 {
        // === Presence flags ===

        /// Contains a type variable not bound by an enclosing generic.
        const HAS_VAR = 1 << 0;
        /// Is or contains the Failure stand-in.
        const HAS_FAILURE = 1 << 1;

        // === Category flags ===

        /// Registered primitive (no constructor).
        const IS_PRIMITIVE = 1 << 4;
        /// Decomposes into children in a value tree.
        const IS_COMPOUND = 1 << 5;
        /// Generic wrapper.
        const IS_GENERIC = 1 << 6;
        /// Type variable placeholder.
        const IS_VAR = 1 << 7;

        // === Capability flags ===

        /// `create_value` can succeed.
        const IS_INHABITED = 1 << 8;
    }
}

impl TypeFlags {
    /// Flags inherited by a compound type from its argument types.
    pub const PROPAGATE_MASK: Self = Self::HAS_FAILURE;

    /// Presence flags of the children, filtered by [`Self::PROPAGATE_MASK`].
    pub fn propagate<'a>(children: impl IntoIterator<Item = &'a TypeFlags>) -> Self {
        children
            .into_iter()
            .fold(TypeFlags::empty(), |acc, f| acc | (*f & Self::PROPAGATE_MASK))
    }

    pub fn has_var(self) -> bool {
        self.contains(Self::HAS_VAR)
    }

    pub fn has_failure(self) -> bool {
        self.contains(Self::HAS_FAILURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn propagate_keeps_only_presence_flags() {
        let child_a = TypeFlags::IS_PRIMITIVE | TypeFlags::IS_INHABITED;
        let child_b = TypeFlags::HAS_FAILURE | TypeFlags::IS_COMPOUND;
        let inherited = TypeFlags::propagate([&child_a, &child_b]);
        assert_eq!(inherited, TypeFlags::HAS_FAILURE);
    }

    #[test]
    fn empty_children_propagate_nothing() {
        assert_eq!(TypeFlags::propagate([]), TypeFlags::empty());
    }
}
