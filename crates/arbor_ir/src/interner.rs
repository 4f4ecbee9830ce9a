//! Process-wide identifier text table.
//!
//! Texts are spread over [`Name::SHARDS`] shards by hash, each behind its
//! own `RwLock`, so concurrent resolution threads rarely contend. A text is
//! leaked once on first sight and never freed; identifiers live as long as
//! the process.

use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHasher};

use crate::Name;

#[derive(Default)]
struct Shard {
    slots: FxHashMap<&'static str, u32>,
    texts: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    #[error("identifier shard {shard} is full ({len} texts, at most {max})", max = Name::MAX_SLOT)]
    ShardOverflow { shard: usize, len: usize },
}

/// Sharded, append-only table from identifier text to [`Name`].
pub struct StringInterner {
    shards: [RwLock<Shard>; Name::SHARDS],
    len: AtomicUsize,
}

impl StringInterner {
    pub fn new() -> Self {
        StringInterner {
            shards: std::array::from_fn(|_| RwLock::new(Shard::default())),
            len: AtomicUsize::new(0),
        }
    }

    #[expect(clippy::cast_possible_truncation, reason = "reduced modulo SHARDS first")]
    fn shard_of(text: &str) -> u32 {
        let mut hasher = FxHasher::default();
        text.hash(&mut hasher);
        (hasher.finish() % Name::SHARDS as u64) as u32
    }

    /// Name for `text`, adding it on first use.
    pub fn try_intern(&self, text: &str) -> Result<Name, InternError> {
        let shard = Self::shard_of(text);
        let lock = &self.shards[shard as usize];

        if let Some(&slot) = lock.read().slots.get(text) {
            return Ok(Name::pack(shard, slot));
        }

        let mut table = lock.write();
        // Another thread may have added it between the two locks.
        if let Some(&slot) = table.slots.get(text) {
            return Ok(Name::pack(shard, slot));
        }

        let len = table.texts.len();
        let slot = u32::try_from(len)
            .ok()
            .filter(|&slot| slot <= Name::MAX_SLOT)
            .ok_or(InternError::ShardOverflow {
                shard: shard as usize,
                len,
            })?;
        let text: &'static str = Box::leak(text.to_owned().into_boxed_str());
        table.texts.push(text);
        table.slots.insert(text, slot);
        self.len.fetch_add(1, Ordering::Relaxed);
        Ok(Name::pack(shard, slot))
    }

    /// Infallible [`StringInterner::try_intern`].
    ///
    /// # Panics
    /// When a shard runs out of slots (2^28 texts in one shard).
    #[inline]
    pub fn intern(&self, text: &str) -> Name {
        self.try_intern(text).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Text behind `name`; empty for a name this table never issued.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.shards[name.shard()]
            .read()
            .texts
            .get(name.slot())
            .copied()
            .unwrap_or_default()
    }

    /// Name for `text` if it was interned already.
    pub fn get(&self, text: &str) -> Option<Name> {
        let shard = Self::shard_of(text);
        self.shards[shard as usize]
            .read()
            .slots
            .get(text)
            .map(|&slot| Name::pack(shard, slot))
    }

    pub fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// The table every identifier is interned in.
pub fn registry() -> &'static StringInterner {
    static REGISTRY: OnceLock<StringInterner> = OnceLock::new();
    REGISTRY.get_or_init(StringInterner::new)
}

#[cfg(test)]
mod tests;
