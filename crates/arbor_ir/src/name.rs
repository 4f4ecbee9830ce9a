//! Packed interner handle.

use std::fmt;

/// Handle to one interned text: a shard number in the top 4 bits and the
/// slot within that shard in the low 28.
///
/// Ordering compares the packed bits, not the text. Identifiers only need a
/// total order that is stable for the life of the process.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    pub const SHARD_BITS: u32 = 4;
    pub const SHARDS: usize = 1 << Self::SHARD_BITS;
    /// Largest slot a shard can hand out.
    pub const MAX_SLOT: u32 = (1 << (32 - Self::SHARD_BITS)) - 1;

    #[inline]
    pub const fn pack(shard: u32, slot: u32) -> Self {
        debug_assert!((shard as usize) < Self::SHARDS);
        debug_assert!(slot <= Self::MAX_SLOT);
        Name((shard << (32 - Self::SHARD_BITS)) | slot)
    }

    #[inline]
    pub const fn shard(self) -> usize {
        (self.0 >> (32 - Self::SHARD_BITS)) as usize
    }

    #[inline]
    pub const fn slot(self) -> usize {
        (self.0 & Self::MAX_SLOT) as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({}:{})", self.shard(), self.slot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_shard_and_slot() {
        let name = Name::pack(5, 1000);
        assert_eq!(name.shard(), 5);
        assert_eq!(name.slot(), 1000);
        assert_eq!(format!("{name:?}"), "Name(5:1000)");
    }

    #[test]
    fn extremes_survive_packing() {
        let name = Name::pack(15, Name::MAX_SLOT);
        assert_eq!(name.shard(), 15);
        assert_eq!(name.slot(), Name::MAX_SLOT as usize);
        assert_eq!(name.raw(), u32::MAX);
    }

    #[test]
    fn order_follows_packed_bits() {
        assert!(Name::pack(0, 2) < Name::pack(1, 0));
        assert!(Name::pack(3, 1) < Name::pack(3, 2));
    }
}
