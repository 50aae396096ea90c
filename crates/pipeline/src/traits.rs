//! Core trait for the grouping boundary between job steps.
//!
//! The physical shuffle (partitioning, spilling, moving data between
//! workers) belongs to whatever executes the job. Stage logic only relies
//! on the contract below, so a distributed runner can replace the
//! in-process `LocalShuffle` without touching any stage.

use anyhow::Result;

/// Groups key/value records by key.
///
/// ## Contract
/// - Every value sharing a key ends up in the same group
/// - A group is only handed out once all of its values are present
///   (reducers never see partial groups)
/// - Each key appears in exactly one group
pub trait Shuffle: Send + Sync {
    /// Returns the name of this shuffle (for logging/debugging)
    fn name(&self) -> &str;

    /// Group `records` by key, materializing every value of each key.
    fn group_by_key<K, V>(&self, records: Vec<(K, V)>) -> Result<Vec<(K, Vec<V>)>>
    where
        K: Ord + Send,
        V: Send;
}
