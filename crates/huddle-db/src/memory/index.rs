//! Secondary index: parent key to the ordered set of child ids

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

#[derive(Debug)]
pub(super) struct Index<K, V> {
    entries: HashMap<K, BTreeSet<V>>,
}

impl<K, V> Default for Index<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K, V> Index<K, V>
where
    K: Eq + Hash,
    V: Ord + Copy,
{
    pub(super) fn insert(&mut self, key: K, value: V) {
        self.entries.entry(key).or_default().insert(value);
    }

    /// Drop one entry, pruning the key once its set is empty
    pub(super) fn remove(&mut self, key: &K, value: &V) {
        if let Some(set) = self.entries.get_mut(key) {
            set.remove(value);
            if set.is_empty() {
                self.entries.remove(key);
            }
        }
    }

    /// Ids under `key` in ascending (creation) order
    pub(super) fn get(&self, key: &K) -> impl DoubleEndedIterator<Item = V> + '_ {
        self.entries.get(key).into_iter().flatten().copied()
    }

    pub(super) fn count(&self, key: &K) -> usize {
        self.entries.get(key).map_or(0, BTreeSet::len)
    }
}
