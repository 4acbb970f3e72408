//! Hashing and equality capabilities injected into a table at construction.
//!
//! A table never calls `Hash` or `Eq` on its keys directly; every hash and
//! every comparison goes through a `KeyOps` value. The trait is
//! parameterized by the type being looked up so a table keyed by `String`
//! can be queried with `&str`, provided both impls agree.

use core::fmt;
use core::hash::{BuildHasher, Hash};

/// Hash and equality over keys of type `Q`.
///
/// Contract: `equal` is an equivalence relation and `equal(a, b)` implies
/// `hash(a) == hash(b)`. `hash` must be deterministic for the lifetime of
/// the table, since cached hashes are reused when the table is resized.
pub trait KeyOps<Q: ?Sized> {
    fn hash(&self, key: &Q) -> u64;
    fn equal(&self, a: &Q, b: &Q) -> bool;
}

/// `KeyOps` for `Hash + Eq` keys through any `BuildHasher`.
#[derive(Clone, Debug, Default)]
pub struct BuildHasherOps<S = hashbrown::hash_map::DefaultHashBuilder> {
    hasher: S,
}

impl<S> BuildHasherOps<S> {
    pub fn new(hasher: S) -> Self {
        Self { hasher }
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }
}

impl<Q, S> KeyOps<Q> for BuildHasherOps<S>
where
    Q: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    #[inline]
    fn hash(&self, key: &Q) -> u64 {
        self.hasher.hash_one(key)
    }

    #[inline]
    fn equal(&self, a: &Q, b: &Q) -> bool {
        a == b
    }
}

/// The djb2 string hash (`h = h * 33 + byte`, seeded with 5381) with
/// byte-wise string equality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Djb2;

impl Djb2 {
    const SEED: u64 = 5381;

    pub fn hash_bytes(bytes: &[u8]) -> u64 {
        bytes.iter().fold(Self::SEED, |h, &b| {
            (h << 5).wrapping_add(h).wrapping_add(u64::from(b))
        })
    }
}

impl KeyOps<str> for Djb2 {
    #[inline]
    fn hash(&self, key: &str) -> u64 {
        Self::hash_bytes(key.as_bytes())
    }

    #[inline]
    fn equal(&self, a: &str, b: &str) -> bool {
        a == b
    }
}

impl KeyOps<String> for Djb2 {
    #[inline]
    fn hash(&self, key: &String) -> u64 {
        Self::hash_bytes(key.as_bytes())
    }

    #[inline]
    fn equal(&self, a: &String, b: &String) -> bool {
        a == b
    }
}

/// `KeyOps` assembled from a hash closure and an equality closure.
#[derive(Clone)]
pub struct FnKeyOps<H, E> {
    hash: H,
    equal: E,
}

impl<H, E> FnKeyOps<H, E> {
    pub fn new(hash: H, equal: E) -> Self {
        Self { hash, equal }
    }
}

impl<H, E> fmt::Debug for FnKeyOps<H, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnKeyOps").finish_non_exhaustive()
    }
}

impl<Q, H, E> KeyOps<Q> for FnKeyOps<H, E>
where
    Q: ?Sized,
    H: Fn(&Q) -> u64,
    E: Fn(&Q, &Q) -> bool,
{
    #[inline]
    fn hash(&self, key: &Q) -> u64 {
        (self.hash)(key)
    }

    #[inline]
    fn equal(&self, a: &Q, b: &Q) -> bool {
        (self.equal)(a, b)
    }
}
