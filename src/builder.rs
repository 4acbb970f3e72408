//! TableBuilder: construction-time configuration for `ChainedTable`.

use crate::chained_table::ChainedTable;
use crate::error::TableError;
use crate::key_ops::BuildHasherOps;
use crate::release::{DropRelease, Release};

/// Bucket count used when the builder is not given one.
pub const DEFAULT_CAPACITY: usize = 16;

/// Collects capacity, key operations and release hooks, then builds a table.
///
/// Each setter for a capability changes the corresponding type parameter,
/// so the finished table is fully monomorphized.
#[derive(Clone, Debug)]
pub struct TableBuilder<O, RK, RV> {
    capacity: usize,
    ops: O,
    release_key: RK,
    release_value: RV,
}

impl TableBuilder<BuildHasherOps, DropRelease, DropRelease> {
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            ops: BuildHasherOps::default(),
            release_key: DropRelease,
            release_value: DropRelease,
        }
    }
}

impl Default for TableBuilder<BuildHasherOps, DropRelease, DropRelease> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O, RK, RV> TableBuilder<O, RK, RV> {
    /// Bucket count. Zero is accepted here and rejected by `build`.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn key_ops<O2>(self, ops: O2) -> TableBuilder<O2, RK, RV> {
        TableBuilder {
            capacity: self.capacity,
            ops,
            release_key: self.release_key,
            release_value: self.release_value,
        }
    }

    pub fn release_key<RK2>(self, release_key: RK2) -> TableBuilder<O, RK2, RV> {
        TableBuilder {
            capacity: self.capacity,
            ops: self.ops,
            release_key,
            release_value: self.release_value,
        }
    }

    pub fn release_value<RV2>(self, release_value: RV2) -> TableBuilder<O, RK, RV2> {
        TableBuilder {
            capacity: self.capacity,
            ops: self.ops,
            release_key: self.release_key,
            release_value,
        }
    }

    pub fn build<K, V>(self) -> Result<ChainedTable<K, V, O, RK, RV>, TableError>
    where
        RK: Release<K>,
        RV: Release<V>,
    {
        ChainedTable::with_parts(
            self.capacity,
            self.ops,
            self.release_key,
            self.release_value,
        )
    }
}
