//! Per-vertex metadata storage.
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::ops;

/// Position of a vertex in the plane. Stored and returned verbatim by the graph.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// Horizontal component
    pub x: f64,
    /// Vertical component
    pub y: f64,
}

impl Coordinate {
    /// Create a new coordinate.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Per-vertex data, mapped by vertex key. Use this alongside the index of a graph to store
/// arbitrary attributes independently of the slot the vertex occupies.
#[derive(Debug, Clone)]
pub struct MetadataStore<K, M> {
    entries: HashMap<K, M>,
}

impl<K, M> Default for MetadataStore<K, M> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, M> MetadataStore<K, M> {
    /// Create a new, empty [`MetadataStore`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entry is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add data for this vertex. Returns the previously stored data, if there was one.
    ///
    /// # Arguments
    ///
    /// * `key`: Vertex key
    /// * `value`: Value to insert
    pub fn insert(&mut self, key: K, value: M) -> Option<M> {
        self.entries.insert(key, value)
    }

    /// Retrieve the data for the given vertex, if it exists.
    pub fn get<Q>(&self, key: &Q) -> Option<&M>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.get(key)
    }

    /// Retrieve the data for the given vertex mutably, if it exists.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut M>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.get_mut(key)
    }

    /// Returns true if data is stored for this vertex.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.contains_key(key)
    }

    /// Remove and return the data for this vertex.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<M>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.remove(key)
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Eq + Hash + Borrow<Q>, Q: ?Sized + Hash + Eq, M> ops::Index<&Q> for MetadataStore<K, M> {
    type Output = M;

    fn index(&self, index: &Q) -> &Self::Output {
        &self.entries[index]
    }
}
