//! In-process implementation of the `Shuffle` trait.

use crate::traits::Shuffle;
use anyhow::Result;
use std::collections::BTreeMap;

/// Groups records in memory.
///
/// Groups come back in ascending key order and values keep their arrival
/// order, so a run over the same input always produces the same output.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalShuffle;

impl Shuffle for LocalShuffle {
    fn name(&self) -> &str {
        "LocalShuffle"
    }

    fn group_by_key<K, V>(&self, records: Vec<(K, V)>) -> Result<Vec<(K, Vec<V>)>>
    where
        K: Ord + Send,
        V: Send,
    {
        let mut groups: BTreeMap<K, Vec<V>> = BTreeMap::new();
        for (key, value) in records {
            groups.entry(key).or_default().push(value);
        }
        Ok(groups.into_iter().collect())
    }
}
