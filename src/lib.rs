//! chain-table: a single-threaded, separately-chained hash table with
//! injectable hashing, equality and release hooks.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a plain associative container whose bucket count is under the
//!   caller's control, with every hash, comparison and disposal routed
//!   through capabilities chosen at construction.
//! - Layers:
//!   - ChainArena<K, V>: structural layer. Entries live in a generational
//!     arena; each bucket holds the key of its chain head and each entry
//!     the key of its successor. Never calls user code besides the
//!     equality predicate it is handed.
//!   - ChainedTable<K, V, O, RK, RV>: public API. Hashes through
//!     `O: KeyOps`, compares through the same, and hands displaced keys and
//!     values to `RK`/`RV: Release` once the chains are consistent again.
//!
//! Constraints
//! - Single-threaded: mutation needs `&mut self`; share behind a lock.
//! - Unique keys: `put` on an existing key replaces the value in place.
//! - No automatic growth: the bucket count changes only through
//!   `resize`, which refuses zero and anything below the entry count.
//! - No ordering guarantees for `iter`, before or after a resize.
//!
//! Hasher and rehashing invariants
//! - Each entry caches the `u64` hash computed on insertion. Bucket
//!   selection is `hash % capacity`; `resize` relinks entries using the
//!   cached hash, so `KeyOps::hash` is never invoked on stored keys and
//!   must therefore be deterministic.
//! - Lookups compare cached hashes before calling `KeyOps::equal`.
//!
//! Release policy
//! - Every key and value handed to the table is released exactly once:
//!   on overwrite (old value, plus the surplus key argument; the stored
//!   key is kept), on `remove`, on `clear`, or when the table is dropped.
//! - `resize` moves entries and releases nothing.
//! - The default hook, `DropRelease`, just drops.
//!
//! Errors
//! - Only bucket-array allocation and bad capacities are errors
//!   (`TableError`). Absent keys are reported as `None`/`false`. Entry
//!   allocation follows the global allocator's abort-on-OOM behavior.

mod builder;
mod chain_arena;
mod chained_table;
mod chained_table_proptest;
mod error;
pub mod key_ops;
pub mod release;

// Public surface
pub use builder::{TableBuilder, DEFAULT_CAPACITY};
pub use chain_arena::Iter;
pub use chained_table::{ChainedTable, Put, StringTable};
pub use error::TableError;
pub use key_ops::{BuildHasherOps, Djb2, FnKeyOps, KeyOps};
pub use release::{DropRelease, Release};
