//! ChainArena: structural layer holding bucket heads and chained entries.
//!
//! Entries live in a generational arena; each bucket slot stores the key of
//! its chain head and each entry stores the key of its successor. Callers
//! pass a precomputed hash and an equality predicate, so this layer never
//! hashes and never releases anything on its own. Every mutation leaves the
//! chains consistent before returning owned keys or values to the caller.

use crate::error::TableError;
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
pub(crate) struct Link<K, V> {
    key: K,
    value: V,
    hash: u64,
    next: Option<DefaultKey>,
}

#[derive(Debug)]
pub(crate) struct ChainArena<K, V> {
    heads: Vec<Option<DefaultKey>>,
    slots: SlotMap<DefaultKey, Link<K, V>>,
}

fn alloc_heads(capacity: usize) -> Result<Vec<Option<DefaultKey>>, TableError> {
    if capacity == 0 {
        return Err(TableError::ZeroCapacity);
    }
    let mut heads = Vec::new();
    heads
        .try_reserve_exact(capacity)
        .map_err(|_| TableError::AllocationFailed { capacity })?;
    heads.resize(capacity, None);
    Ok(heads)
}

impl<K, V> ChainArena<K, V> {
    pub(crate) fn with_buckets(capacity: usize) -> Result<Self, TableError> {
        Ok(Self {
            heads: alloc_heads(capacity)?,
            slots: SlotMap::with_key(),
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.heads.len()
    }

    #[inline]
    fn bucket(&self, hash: u64) -> usize {
        // heads.len() >= 1, and the remainder fits in usize.
        (hash % self.heads.len() as u64) as usize
    }

    /// Walk the chain for `hash` and return the first entry accepted by `eq`.
    pub(crate) fn find<F>(&self, hash: u64, mut eq: F) -> Option<DefaultKey>
    where
        F: FnMut(&K) -> bool,
    {
        let mut cur = self.heads[self.bucket(hash)];
        while let Some(k) = cur {
            let link = &self.slots[k];
            if link.hash == hash && eq(&link.key) {
                return Some(k);
            }
            cur = link.next;
        }
        None
    }

    pub(crate) fn value(&self, k: DefaultKey) -> Option<&V> {
        self.slots.get(k).map(|l| &l.value)
    }

    pub(crate) fn value_mut(&mut self, k: DefaultKey) -> Option<&mut V> {
        self.slots.get_mut(k).map(|l| &mut l.value)
    }

    /// Link a new entry at the head of its chain. The caller has already
    /// checked that no equal key is present.
    pub(crate) fn push_front(&mut self, hash: u64, key: K, value: V) -> DefaultKey {
        let b = self.bucket(hash);
        let k = self.slots.insert(Link {
            key,
            value,
            hash,
            next: self.heads[b],
        });
        self.heads[b] = Some(k);
        k
    }

    /// Unlink the first entry of the chain for `hash` accepted by `eq` and
    /// return its key and value.
    pub(crate) fn unlink<F>(&mut self, hash: u64, mut eq: F) -> Option<(K, V)>
    where
        F: FnMut(&K) -> bool,
    {
        let b = self.bucket(hash);
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.heads[b];
        while let Some(k) = cur {
            let link = &self.slots[k];
            let next = link.next;
            if link.hash == hash && eq(&link.key) {
                match prev {
                    None => self.heads[b] = next,
                    Some(p) => self.slots[p].next = next,
                }
                let link = self.slots.remove(k)?;
                return Some((link.key, link.value));
            }
            prev = Some(k);
            cur = next;
        }
        None
    }

    /// Empty every bucket, then hand back all entries. The arena is already
    /// empty and consistent when the first pair is yielded.
    pub(crate) fn detach_all(&mut self) -> impl Iterator<Item = (K, V)> + '_ {
        self.heads.iter_mut().for_each(|h| *h = None);
        self.slots.drain().map(|(_, link)| (link.key, link.value))
    }

    /// Relink every entry into a fresh bucket array of `capacity` slots
    /// using the cached hashes. Entries are not moved in the arena.
    pub(crate) fn rehash(&mut self, capacity: usize) -> Result<(), TableError> {
        let mut heads = alloc_heads(capacity)?;
        let n = capacity as u64;
        for (k, link) in self.slots.iter_mut() {
            let b = (link.hash % n) as usize;
            link.next = heads[b];
            heads[b] = Some(k);
        }
        self.heads = heads;
        Ok(())
    }

    pub(crate) fn longest_chain(&self) -> usize {
        self.heads
            .iter()
            .map(|&head| {
                let mut n = 0;
                let mut cur = head;
                while let Some(k) = cur {
                    n += 1;
                    cur = self.slots[k].next;
                }
                n
            })
            .max()
            .unwrap_or(0)
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.slots.values(),
        }
    }

    /// Check that every live entry is reachable exactly once, from the
    /// bucket its cached hash selects.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut reachable = 0;
        for (b, &head) in self.heads.iter().enumerate() {
            let mut cur = head;
            while let Some(k) = cur {
                let link = self.slots.get(k).expect("chain link must be live");
                assert_eq!(self.bucket(link.hash), b, "entry in wrong bucket");
                reachable += 1;
                assert!(reachable <= self.slots.len(), "cycle in chains");
                cur = link.next;
            }
        }
        assert_eq!(reachable, self.slots.len(), "unreachable entries");
    }
}

/// Iterator over the live entries of a table, in unspecified order.
pub struct Iter<'a, K, V> {
    it: slotmap::basic::Values<'a, DefaultKey, Link<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|l| (&l.key, &l.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}
