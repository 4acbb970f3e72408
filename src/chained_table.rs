//! ChainedTable: public hash table over a `ChainArena`.
//!
//! Owns the key operations and the two release hooks. User code runs at
//! well-defined points only: `KeyOps` while locating a chain position, and
//! the release hooks after the arena is consistent again.

use crate::builder::TableBuilder;
use crate::chain_arena::{ChainArena, Iter};
use crate::error::TableError;
use crate::key_ops::{BuildHasherOps, Djb2, KeyOps};
use crate::release::{DropRelease, Release};
use core::borrow::Borrow;
use core::fmt;
use tracing::{debug, trace};

/// Outcome of a successful `put`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Put {
    /// The key was new; an entry was created.
    Inserted,
    /// The key was present; its value was replaced.
    Replaced,
}

/// A separately-chained hash table with a fixed bucket count that changes
/// only through `resize`.
pub struct ChainedTable<K, V, O = BuildHasherOps, RK = DropRelease, RV = DropRelease>
where
    RK: Release<K>,
    RV: Release<V>,
{
    arena: ChainArena<K, V>,
    ops: O,
    release_key: RK,
    release_value: RV,
}

/// Table keyed by owned strings, hashed with djb2.
pub type StringTable<V> = ChainedTable<String, V, Djb2>;

impl<K, V> ChainedTable<K, V>
where
    K: Eq + core::hash::Hash,
{
    /// Table with `capacity` buckets, the default hasher and drop-based release.
    pub fn new(capacity: usize) -> Result<Self, TableError> {
        Self::with_parts(capacity, BuildHasherOps::default(), DropRelease, DropRelease)
    }

    /// Builder starting from the default hasher and drop-based release.
    /// Name the key and value types, as in `ChainedTable::<String, u32>::builder()`.
    pub fn builder() -> TableBuilder<BuildHasherOps, DropRelease, DropRelease> {
        TableBuilder::new()
    }
}

impl<V> ChainedTable<String, V, Djb2> {
    /// String-keyed table using djb2; keys and values are dropped on release.
    pub fn string_keyed(capacity: usize) -> Result<Self, TableError> {
        Self::with_parts(capacity, Djb2, DropRelease, DropRelease)
    }
}

impl<K, V, O, RK, RV> ChainedTable<K, V, O, RK, RV>
where
    RK: Release<K>,
    RV: Release<V>,
{
    pub fn with_parts(
        capacity: usize,
        ops: O,
        release_key: RK,
        release_value: RV,
    ) -> Result<Self, TableError> {
        Ok(Self {
            arena: ChainArena::with_buckets(capacity)?,
            ops,
            release_key,
            release_value,
        })
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Entry count of a possibly absent table; absent counts as empty.
    pub fn len_of(table: Option<&Self>) -> usize {
        table.map_or(0, Self::len)
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    /// Length of the longest chain.
    pub fn longest_chain(&self) -> usize {
        self.arena.longest_chain()
    }

    pub fn key_ops(&self) -> &O {
        &self.ops
    }

    /// Iterate live entries. The order is unspecified and changes on resize.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.arena.iter()
    }

    /// Insert `key -> value`, or replace the value of an equal key already
    /// present.
    ///
    /// On replace the stored key is kept: the displaced value goes to the
    /// value hook and the `key` argument goes to the key hook.
    pub fn put(&mut self, key: K, value: V) -> Put
    where
        O: KeyOps<K>,
    {
        let hash = self.ops.hash(&key);
        let ops = &self.ops;
        match self.arena.find(hash, |k| ops.equal(k, &key)) {
            Some(slot) => {
                let old = match self.arena.value_mut(slot) {
                    Some(v) => core::mem::replace(v, value),
                    None => unreachable!("found slot must be live"),
                };
                self.release_value.release(old);
                self.release_key.release(key);
                Put::Replaced
            }
            None => {
                self.arena.push_front(hash, key, value);
                Put::Inserted
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOps<Q>,
    {
        let hash = self.ops.hash(key);
        let slot = self
            .arena
            .find(hash, |k| self.ops.equal(k.borrow(), key))?;
        self.arena.value(slot)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOps<Q>,
    {
        let hash = self.ops.hash(key);
        let ops = &self.ops;
        let slot = self.arena.find(hash, |k| ops.equal(k.borrow(), key))?;
        self.arena.value_mut(slot)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOps<Q>,
    {
        self.get(key).is_some()
    }

    /// Remove the entry for `key`, releasing its key and value. Returns
    /// false if no entry matched.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOps<Q>,
    {
        let hash = self.ops.hash(key);
        let ops = &self.ops;
        match self.arena.unlink(hash, |k| ops.equal(k.borrow(), key)) {
            Some((k, v)) => {
                self.release_key.release(k);
                self.release_value.release(v);
                true
            }
            None => false,
        }
    }

    /// Release every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        let released = self.release_all();
        if released > 0 {
            debug!(released, capacity = self.capacity(), "cleared table");
        }
    }

    fn release_all(&mut self) -> usize {
        let mut released = 0usize;
        for (k, v) in self.arena.detach_all() {
            self.release_key.release(k);
            self.release_value.release(v);
            released += 1;
        }
        released
    }

    /// Rebuild the bucket array with `capacity` buckets and relink every
    /// entry. Nothing is released; on error the table is unchanged.
    pub fn resize(&mut self, capacity: usize) -> Result<(), TableError> {
        let len = self.len();
        if capacity == 0 {
            trace!(len, "resize to zero buckets rejected");
            return Err(TableError::ZeroCapacity);
        }
        if capacity < len {
            trace!(requested = capacity, len, "resize below entry count rejected");
            return Err(TableError::BelowLen {
                requested: capacity,
                len,
            });
        }
        let old = self.capacity();
        self.arena.rehash(capacity)?;
        debug!(old_capacity = old, new_capacity = capacity, len, "rehashed table");
        Ok(())
    }

    /// Clear and free the table.
    pub fn destroy(self) {
        drop(self);
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        self.arena.assert_consistent();
    }
}

impl<K, V, O, RK, RV> Drop for ChainedTable<K, V, O, RK, RV>
where
    RK: Release<K>,
    RV: Release<V>,
{
    fn drop(&mut self) {
        self.release_all();
    }
}

impl<K, V, O, RK, RV> fmt::Debug for ChainedTable<K, V, O, RK, RV>
where
    K: fmt::Debug,
    V: fmt::Debug,
    RK: Release<K>,
    RV: Release<V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, O, RK, RV> IntoIterator for &'a ChainedTable<K, V, O, RK, RV>
where
    RK: Release<K>,
    RV: Release<V>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
