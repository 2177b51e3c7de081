//! A module providing the dense adjacency storage of a keyed graph.
//!
//! This module defines the [`EdgeList`] of a single vertex, which implements the upsert-by-target
//! edge editing semantics, and the [`AdjacencyStore`], a gap-free sequence of edge lists
//! addressed by slot.
use crate::Edge;
use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;
use std::ops;

/// Result of upserting an edge into an [`EdgeList`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Upsert {
    /// No edge targeted this vertex; the edge was appended at the end of the list.
    Appended,
    /// An edge with a different weight targeted this vertex; its weight was replaced in place.
    Replaced,
    /// An edge with the same weight already targeted this vertex; nothing changed.
    Unchanged,
}

/// Ordered list of the outgoing edges of a single vertex.
///
/// At most one edge may target a given vertex. The list otherwise preserves the order in which
/// edges were provided.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeList<K> {
    edges: Vec<Edge<K>>,
}

impl<K> Default for EdgeList<K> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

impl<K> ops::Deref for EdgeList<K> {
    type Target = [Edge<K>];

    fn deref(&self) -> &Self::Target {
        &self.edges
    }
}

impl<K> EdgeList<K> {
    /// Create a new, empty edge list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps edges without checking for duplicate targets.
    pub(crate) fn from_raw(edges: Vec<Edge<K>>) -> Self {
        Self { edges }
    }

    /// Returns the edges as a slice.
    pub fn as_slice(&self) -> &[Edge<K>] {
        &self.edges
    }

    /// Returns the position of the edge targeting `target`, if any.
    pub fn position<Q>(&self, target: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.edges.iter().position(|edge| edge.target.borrow() == target)
    }

    /// Inserts or updates the edge targeting `edge.target`.
    ///
    /// - If no edge targets the same vertex, `edge` is appended.
    /// - If one does with a different weight, its weight is replaced in place, keeping its position.
    /// - If one does with the same weight, the list is left untouched.
    ///
    /// # Arguments
    ///
    /// * `edge`: Edge to upsert
    ///
    /// # Examples
    ///
    /// ```
    /// use slotgraph::{Edge, EdgeList, Upsert};
    ///
    /// let mut list = EdgeList::new();
    /// assert_eq!(list.upsert(Edge::new('b', 1.0)), Upsert::Appended);
    /// assert_eq!(list.upsert(Edge::new('c', 1.5)), Upsert::Appended);
    /// assert_eq!(list.upsert(Edge::new('b', 2.0)), Upsert::Replaced);
    /// assert_eq!(list.upsert(Edge::new('c', 1.5)), Upsert::Unchanged);
    /// assert_eq!(list.as_slice(), &[Edge::new('b', 2.0), Edge::new('c', 1.5)]);
    /// ```
    pub fn upsert(&mut self, edge: Edge<K>) -> Upsert
    where
        K: Eq,
    {
        match self.position(&edge.target) {
            None => {
                self.edges.push(edge);
                Upsert::Appended
            }
            Some(i) if self.edges[i].weight != edge.weight => {
                self.edges[i] = edge;
                Upsert::Replaced
            }
            Some(_) => Upsert::Unchanged,
        }
    }

    /// Removes every edge for which `predicate` returns true, keeping the relative order of the
    /// remaining edges. Returns the number of removed edges.
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&Edge<K>) -> bool) -> usize {
        let before = self.edges.len();
        self.edges.retain(|edge| !predicate(edge));
        before - self.edges.len()
    }

    /// Removes the edges targeting `target`. Returns the number of removed edges.
    pub fn remove_target<Q>(&mut self, target: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.remove_where(|edge| edge.target.borrow() == target)
    }

    /// Returns true if two edges of this list target the same vertex.
    pub fn has_duplicate_targets(&self) -> bool
    where
        K: Eq + Hash,
    {
        let mut seen = HashSet::with_capacity(self.edges.len());
        !self.edges.iter().all(|edge| seen.insert(&edge.target))
    }
}

impl<K: Eq> FromIterator<Edge<K>> for EdgeList<K> {
    /// Builds the list by upserting every edge in order, so that later duplicates of a target
    /// overwrite the weight of the first one without moving it.
    fn from_iter<T: IntoIterator<Item = Edge<K>>>(iter: T) -> Self {
        let mut list = Self::new();
        for edge in iter {
            list.upsert(edge);
        }
        list
    }
}

/// Dense storage of edge lists, addressed by slot.
///
/// Slots are always `0..len()`; removing a slot shifts every following list down by one.
#[derive(Debug, Clone)]
pub struct AdjacencyStore<K> {
    lists: Vec<EdgeList<K>>,
}

impl<K> Default for AdjacencyStore<K> {
    fn default() -> Self {
        Self { lists: Vec::new() }
    }
}

impl<K> ops::Index<usize> for AdjacencyStore<K> {
    type Output = EdgeList<K>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.lists[index]
    }
}

impl<K> AdjacencyStore<K> {
    /// Create a new, empty adjacency store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty adjacency store with room for `capacity` vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lists: Vec::with_capacity(capacity),
        }
    }

    /// Number of stored edge lists.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Returns true if no edge list is stored.
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Appends an edge list, returning the slot it was stored at.
    pub fn push(&mut self, list: EdgeList<K>) -> usize {
        self.lists.push(list);
        self.lists.len() - 1
    }

    /// Removes the edge list at `slot`, shifting all following lists down by one slot.
    ///
    /// Returns [`None`] if the slot is out of range.
    pub fn remove(&mut self, slot: usize) -> Option<EdgeList<K>> {
        (slot < self.lists.len()).then(|| self.lists.remove(slot))
    }

    /// Returns the edge list stored at `slot`.
    pub fn get(&self, slot: usize) -> Option<&EdgeList<K>> {
        self.lists.get(slot)
    }

    /// Returns the edge list stored at `slot`, mutably.
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut EdgeList<K>> {
        self.lists.get_mut(slot)
    }

    /// Returns an iterator over the edge lists, in slot order.
    pub fn iter(&self) -> impl '_ + Iterator<Item = &EdgeList<K>> {
        self.lists.iter()
    }

    /// Removes every edge targeting `target` from all edge lists. Returns the number of removed
    /// edges.
    pub fn purge_target<Q>(&mut self, target: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.lists
            .iter_mut()
            .map(|list| list.remove_target(target))
            .sum()
    }

    /// Removes all edge lists.
    pub fn clear(&mut self) {
        self.lists.clear();
    }
}
