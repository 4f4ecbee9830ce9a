//! Sharded constructor cache.
//!
//! Maps constructed type references to the type built for them, or to the
//! failure that prevented building one. Entries are never evicted or
//! replaced, so a `SharedType` handed out once stays the canonical instance
//! for that reference.
//!
//! Lookup is double-checked: a read lock for the hit path, then a write
//! lock that re-checks before the caller's builder runs. Builders run under
//! the write lock and must not touch the cache.

use std::hash::{Hash, Hasher};

use arbor_value::TypeRef;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::{SharedType, TypeError};

const NUM_SHARDS: usize = 16;

#[derive(Clone, Debug)]
pub(crate) enum CacheEntry {
    Built(SharedType),
    /// Construction failed; `stand_in` is the Failure type for lenient
    /// callers.
    Failed {
        error: TypeError,
        stand_in: SharedType,
    },
}

pub(crate) struct ConstructorCache {
    shards: [RwLock<FxHashMap<TypeRef, CacheEntry>>; NUM_SHARDS],
}

impl ConstructorCache {
    pub(crate) fn new() -> Self {
        ConstructorCache {
            shards: std::array::from_fn(|_| RwLock::new(FxHashMap::default())),
        }
    }

    #[inline]
    fn shard_for(key: &TypeRef) -> usize {
        let mut hasher = rustc_hash::FxHasher::default();
        key.hash(&mut hasher);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "truncation is fine for hash-based shard selection"
        )]
        let hash_usize = hasher.finish() as usize;
        hash_usize % NUM_SHARDS
    }

    /// Read-locked lookup.
    pub(crate) fn get(&self, key: &TypeRef) -> Option<CacheEntry> {
        self.shards[Self::shard_for(key)].read().get(key).cloned()
    }

    /// Write-locked lookup that runs `build` only if `key` is still absent.
    pub(crate) fn get_or_insert_with(
        &self,
        key: &TypeRef,
        build: impl FnOnce() -> CacheEntry,
    ) -> CacheEntry {
        let mut guard = self.shards[Self::shard_for(key)].write();
        // Another thread may have built it since our read.
        if let Some(entry) = guard.get(key) {
            return entry.clone();
        }
        let entry = build();
        match &entry {
            CacheEntry::Built(ty) => tracing::debug!(type_ref = %key, name = ty.name(), "constructed type"),
            CacheEntry::Failed { error, .. } => {
                tracing::debug!(type_ref = %key, %error, "cached construction failure");
            }
        }
        guard.insert(key.clone(), entry.clone());
        entry
    }

    /// Drop failure markers so they are retried. Built types stay.
    pub(crate) fn clear_failures(&mut self) {
        for shard in &mut self.shards {
            shard
                .get_mut()
                .retain(|_, entry| matches!(entry, CacheEntry::Built(_)));
        }
    }

    /// Number of cached entries, failures included.
    pub(crate) fn len(&self) -> usize {
        self.shards.iter().map(|s| s.read().len()).sum()
    }

    pub(crate) fn built_types(&self) -> Vec<SharedType> {
        self.shards
            .iter()
            .flat_map(|s| {
                s.read()
                    .values()
                    .filter_map(|entry| match entry {
                        CacheEntry::Built(ty) => Some(ty.clone()),
                        CacheEntry::Failed { .. } => None,
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
