#![warn(missing_docs)]
//! # Keyed graph datastructures
//!
//! Implements a mutable, directed, weighted graph whose vertices are addressed by arbitrary
//! user-provided keys instead of dense integer IDs.
//!
//! Internally, the graph is split into three stores kept in lockstep:
//!
//! - a [`SlotIndex`], mapping each key to its current slot,
//! - an [`AdjacencyStore`], a dense, gap-free list of [`EdgeList`]s addressed by slot,
//! - a [`MetadataStore`], holding per-vertex attributes (a [`Coordinate`] by default).
//!
//! The [`KeyedGraph`] facade orchestrates them; every operation takes the graph from one
//! consistent state to another. Operations addressing missing vertices are silent no-ops, and
//! queries signal absence with [`None`].
//!
//! ```
//! use slotgraph::{Edge, KeyedGraph, Vertex};
//!
//! let mut graph = KeyedGraph::new();
//! graph.add_vertex(Vertex::new("A", [("B", 1.0), ("C", 1.5)]));
//! graph.add_vertex(Vertex::new("B", [("A", 1.0)]));
//! graph.add_vertex(Vertex::new("C", [("A", 1.5)]));
//!
//! graph.remove_vertex("C");
//! assert_eq!(graph.adjacent_vertices("A"), Some(&[Edge::new("B", 1.0)][..]));
//! assert_eq!(graph.adjacent_vertices("C"), None);
//! ```
use std::borrow::Borrow;
use std::hash::Hash;

pub mod adjacency;
pub mod data;
pub mod errors;
pub mod graph;
pub mod index;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use adjacency::{AdjacencyStore, EdgeList, Upsert};
pub use data::{Coordinate, MetadataStore};
pub use graph::{KeyedGraph, Vertex};
pub use index::SlotIndex;

/// Weighted edge, stored in the edge list of its source vertex.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge<K> {
    /// Key of the vertex this edge points to.
    pub target: K,
    /// Weight of the edge
    pub weight: f64,
}

impl<K> Edge<K> {
    /// Create a new edge pointing to `target`.
    pub fn new(target: K, weight: f64) -> Self {
        Self { target, weight }
    }
}

impl<K> From<(K, f64)> for Edge<K> {
    fn from((target, weight): (K, f64)) -> Self {
        Self { target, weight }
    }
}

/// A read-only view over a keyed graph.
///
/// Only [`Graph::vertices`] and [`Graph::adjacent_vertices`] are required; everything else is
/// derived from them by scanning, and implementors are free to override the provided methods
/// with cheaper versions.
///
/// # Examples
///
/// ```
/// use slotgraph::{Graph, KeyedGraph, Vertex};
///
/// let mut graph = KeyedGraph::new();
/// graph.add_vertex(Vertex::new(1, [(2, 0.5)]));
/// graph.add_vertex(Vertex::new(2, [(1, 2.0), (3, 1.0)]));
///
/// assert!(graph.has_edge_between(&1, &2));
/// assert!(!graph.has_edge_between(&1, &3));
/// assert_eq!(graph.num_edges(), 3);
/// assert_eq!(graph.predecessors(&1).collect::<Vec<_>>(), vec![&2]);
/// ```
pub trait Graph {
    /// Type of the keys identifying vertices.
    type Key: Eq + Hash;

    /// Returns an iterator over the keys of all live vertices.
    fn vertices(&self) -> impl '_ + Iterator<Item = &Self::Key>;

    /// Returns the edge list of the vertex, or [`None`] if no such vertex exists.
    ///
    /// An existing vertex with no outgoing edges returns an empty slice, not [`None`].
    fn adjacent_vertices<Q>(&self, key: &Q) -> Option<&[Edge<Self::Key>]>
    where
        Self::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// Checks whether a vertex with this key is currently in the graph.
    fn contains_vertex<Q>(&self, key: &Q) -> bool
    where
        Self::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.adjacent_vertices(key).is_some()
    }

    /// Returns the number of live vertices.
    fn num_vertices(&self) -> usize {
        self.vertices().count()
    }

    /// Returns the total number of edges stored across all vertices.
    ///
    /// Edges pointing to vertices that were never inserted are counted too.
    fn num_edges(&self) -> usize {
        self.vertices()
            .filter_map(|key| self.adjacent_vertices(key))
            .map(<[_]>::len)
            .sum()
    }

    /// Returns the weight of the edge going from `from` to `to`, if there is one.
    fn edge_weight<Q>(&self, from: &Q, to: &Q) -> Option<f64>
    where
        Self::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.adjacent_vertices(from)?
            .iter()
            .find(|edge| edge.target.borrow() == to)
            .map(|edge| edge.weight)
    }

    /// Returns true if there is an edge going from `from` to `to`.
    fn has_edge_between<Q>(&self, from: &Q, to: &Q) -> bool
    where
        Self::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.edge_weight(from, to).is_some()
    }

    /// Returns an iterator over the targets of the outgoing edges of a vertex.
    ///
    /// The iterator is empty when the vertex does not exist.
    fn successors<'a, Q>(&'a self, key: &'a Q) -> impl 'a + Iterator<Item = &'a Self::Key>
    where
        Self::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.adjacent_vertices(key)
            .into_iter()
            .flatten()
            .map(|edge| &edge.target)
    }

    /// Returns an iterator over the live vertices having an edge pointing to `key`.
    ///
    /// This scans every edge list in the graph.
    fn predecessors<'a, Q>(&'a self, key: &'a Q) -> impl 'a + Iterator<Item = &'a Self::Key>
    where
        Self::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.vertices().filter(move |&source| {
            self.adjacent_vertices::<Self::Key>(source)
                .is_some_and(|edges| edges.iter().any(|edge| edge.target.borrow() == key))
        })
    }
}
