//! Error type shared by table construction and resize.

use thiserror::Error;

/// Failure reported by operations that allocate or reshape the bucket array.
///
/// A failed operation leaves the table exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("bucket count must be at least 1")]
    ZeroCapacity,
    #[error("cannot resize to {requested} buckets while holding {len} entries")]
    BelowLen { requested: usize, len: usize },
    #[error("failed to allocate {capacity} buckets")]
    AllocationFailed { capacity: usize },
}
