//! Insertion-ordered accumulation.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Keyed accumulator that remembers the order in which keys first appeared.
///
/// Iteration yields entries in first-seen order, which is what gives the
/// per-product views their stable ordering and tie-breaks.
#[derive(Debug, Clone)]
pub(crate) struct OrderedTally<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> OrderedTally<K, V>
where
    K: Eq + Hash + Clone,
    V: Default,
{
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Accumulator for `key`, created with `V::default()` on first sight.
    pub(crate) fn slot<Q>(&mut self, key: &Q) -> &mut V
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ToOwned<Owned = K> + ?Sized,
    {
        let pos = match self.index.get(key) {
            Some(&pos) => pos,
            None => {
                let pos = self.entries.len();
                self.index.insert(key.to_owned(), pos);
                self.entries.push((key.to_owned(), V::default()));
                pos
            }
        };
        &mut self.entries[pos].1
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub(crate) fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }
}
