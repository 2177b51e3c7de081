//! Mapping from vertex keys to dense slots.
use crate::errors::InvariantViolation;
use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

/// Index of the slot currently assigned to each vertex key.
///
/// The slots held by the index are always exactly `0..len()`: registering a key assigns it the
/// next slot, and removing one renumbers every higher slot down by one.
#[derive(Debug, Clone)]
pub struct SlotIndex<K> {
    slots: HashMap<K, usize>,
}

impl<K> Default for SlotIndex<K> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> SlotIndex<K> {
    /// Create a new, empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty index with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: HashMap::with_capacity(capacity),
        }
    }

    /// Number of indexed keys.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no key is indexed.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns true if the key is indexed.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.slots.contains_key(key)
    }

    /// Returns the slot currently assigned to the key.
    pub fn get<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.slots.get(key).copied()
    }

    /// Assigns the next free slot to `key` and returns it.
    ///
    /// Returns [`None`] without changing anything if the key is already indexed.
    pub fn register(&mut self, key: K) -> Option<usize> {
        let slot = self.slots.len();
        match self.slots.entry(key) {
            Entry::Occupied(_) => None,
            Entry::Vacant(entry) => Some(*entry.insert(slot)),
        }
    }

    /// Removes the key and returns the slot it occupied.
    ///
    /// Every key whose slot was greater than the removed one is moved down by one slot, so that
    /// the index stays dense.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let removed = self.slots.remove(key)?;
        for slot in self.slots.values_mut() {
            if *slot > removed {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    /// Returns an iterator over all `(key, slot)` pairs, in arbitrary order.
    pub fn iter(&self) -> impl '_ + Iterator<Item = (&K, usize)> {
        self.slots.iter().map(|(key, &slot)| (key, slot))
    }

    /// Returns the keys ordered by their slot.
    pub fn keys_by_slot(&self) -> Vec<&K> {
        let mut keys = vec![None; self.slots.len()];
        for (key, &slot) in &self.slots {
            if let Some(entry) = keys.get_mut(slot) {
                *entry = Some(key);
            }
        }
        keys.into_iter().flatten().collect()
    }

    /// Checks that the slots are exactly `0..len()`, each used once.
    pub fn check_dense(&self) -> Result<(), InvariantViolation> {
        let len = self.slots.len();
        let mut used = vec![false; len];
        for &slot in self.slots.values() {
            match used.get_mut(slot) {
                None => return Err(InvariantViolation::SlotOutOfRange { slot, len }),
                Some(true) => return Err(InvariantViolation::DuplicateSlot { slot }),
                Some(seen) => *seen = true,
            }
        }
        Ok(())
    }

    /// Removes all keys.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
