//! The [`KeyedGraph`] facade, orchestrating the index, adjacency and metadata stores.
use crate::adjacency::{AdjacencyStore, EdgeList, Upsert};
use crate::data::{Coordinate, MetadataStore};
use crate::errors::InvariantViolation;
use crate::index::SlotIndex;
use crate::{Edge, Graph};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

/// Payload used to insert a vertex into a [`KeyedGraph`].
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex<K, M = Coordinate> {
    /// Key of the vertex
    pub key: K,
    /// Outgoing edges, in order. Targets do not need to exist yet.
    pub edges: Vec<Edge<K>>,
    /// Vertex metadata. When [`None`], the default value of `M` is stored.
    pub metadata: Option<M>,
}

impl<K> Vertex<K> {
    /// Create a vertex payload with the given outgoing edges and default metadata.
    ///
    /// # Arguments
    ///
    /// * `key`: Key of the new vertex
    /// * `edges`: Outgoing edges, either [`Edge`]s or `(target, weight)` tuples
    pub fn new<I>(key: K, edges: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Edge<K>>,
    {
        Self {
            key,
            edges: edges.into_iter().map(Into::into).collect(),
            metadata: None,
        }
    }

    /// Create a vertex payload without outgoing edges.
    pub fn isolated(key: K) -> Self {
        Self {
            key,
            edges: Vec::new(),
            metadata: None,
        }
    }
}

impl<K, M> Vertex<K, M> {
    /// Attach metadata to this vertex payload, possibly changing the metadata type.
    pub fn with_metadata<N>(self, metadata: N) -> Vertex<K, N> {
        Vertex {
            key: self.key,
            edges: self.edges,
            metadata: Some(metadata),
        }
    }
}

/// Mutable, directed, weighted graph whose vertices are addressed by arbitrary keys.
///
/// Each live vertex occupies a slot in `0..len()`. Slots are an implementation detail that is
/// exposed for inspection only: removing a vertex renumbers the slots of every vertex inserted
/// after it, so they must not be cached across mutations.
///
/// All mutating operations are total. Adding a vertex whose key already exists, or removing or
/// editing a vertex that does not exist, does nothing and returns `false`.
///
/// # Examples
///
/// ```
/// use slotgraph::{Coordinate, Edge, KeyedGraph, Vertex};
///
/// let mut graph = KeyedGraph::new();
/// graph.add_vertex(Vertex::new("A", [("B", 1.0), ("C", 1.5)]));
/// graph.add_vertex(Vertex::new("B", [("A", 1.0)]).with_metadata(Coordinate::new(2.0, 1.0)));
///
/// graph.update_edges("A", [("B", 2.0)]);
/// assert_eq!(
///     graph.adjacent_vertices("A"),
///     Some(&[Edge::new("B", 2.0), Edge::new("C", 1.5)][..])
/// );
/// assert_eq!(graph.metadata("A"), Some(&Coordinate::default()));
/// ```
#[derive(Debug, Clone)]
pub struct KeyedGraph<K, M = Coordinate> {
    index: SlotIndex<K>,
    adjacency: AdjacencyStore<K>,
    metadata: MetadataStore<K, M>,
}

impl<K, M> Default for KeyedGraph<K, M> {
    fn default() -> Self {
        Self {
            index: SlotIndex::default(),
            adjacency: AdjacencyStore::default(),
            metadata: MetadataStore::default(),
        }
    }
}

impl<K: Eq + Hash + Clone> KeyedGraph<K> {
    /// Create a new, empty graph storing a [`Coordinate`] per vertex.
    ///
    /// Use [`KeyedGraph::default`] to pick another metadata type.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with room for `capacity` vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_metadata(capacity)
    }
}

impl<K: Eq + Hash + Clone, M> KeyedGraph<K, M> {
    /// Create an empty graph with room for `capacity` vertices, for any metadata type.
    pub fn with_capacity_and_metadata(capacity: usize) -> Self {
        Self {
            index: SlotIndex::with_capacity(capacity),
            adjacency: AdjacencyStore::with_capacity(capacity),
            metadata: MetadataStore::with_capacity(capacity),
        }
    }

    /// Number of live vertices.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the graph holds no vertex.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Checks whether a vertex with this key exists.
    pub fn contains_vertex<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.contains(key)
    }

    /// Returns the slot currently occupied by the vertex.
    pub fn slot_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.get(key)
    }

    /// Adds a vertex to the graph.
    ///
    /// If a vertex with the same key already exists, the graph is left untouched (the first
    /// insertion wins) and `false` is returned. Otherwise the vertex gets the next slot, and
    /// `true` is returned.
    ///
    /// Edges may point to vertices that do not exist yet. If several edges of the payload
    /// target the same vertex, they are folded as if inserted one by one with
    /// [`KeyedGraph::update_edges`].
    pub fn add_vertex(&mut self, vertex: Vertex<K, M>) -> bool
    where
        M: Default,
    {
        let Vertex { key, edges, metadata } = vertex;
        let Some(slot) = self.index.register(key.clone()) else {
            log::debug!("[KeyedGraph] add_vertex: key already present, ignoring");
            return false;
        };
        let stored = self.adjacency.push(EdgeList::from_iter(edges));
        debug_assert_eq!(slot, stored);
        self.metadata.insert(key, metadata.unwrap_or_default());
        log::trace!("[KeyedGraph] add_vertex: assigned slot {slot}");
        true
    }

    /// Removes a vertex, along with every edge pointing to it from other vertices.
    ///
    /// Vertices stored after the removed one move down by one slot. Returns `false` if no such
    /// vertex exists.
    #[profiling::function]
    pub fn remove_vertex<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(slot) = self.index.remove(key) else {
            log::debug!("[KeyedGraph] remove_vertex: key not found, ignoring");
            return false;
        };
        let removed = self.adjacency.remove(slot);
        debug_assert!(removed.is_some());
        self.metadata.remove(key);
        let purged = self.adjacency.purge_target(key);
        log::trace!("[KeyedGraph] remove_vertex: freed slot {slot}, purged {purged} incoming edges");
        true
    }

    /// Returns the outgoing edges of the vertex, or [`None`] if it does not exist.
    ///
    /// The returned slice borrows the stored list directly; an existing vertex without edges
    /// yields an empty slice.
    pub fn adjacent_vertices<Q>(&self, key: &Q) -> Option<&[Edge<K>]>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let slot = self.index.get(key)?;
        self.adjacency.get(slot).map(EdgeList::as_slice)
    }

    /// Inserts or updates edges of the vertex, keyed by target.
    ///
    /// For each edge, in order: an edge to a new target is appended; an edge to an existing
    /// target with a different weight replaces the existing one in place; an edge identical in
    /// weight to the existing one changes nothing. Returns `false` if the vertex does not exist.
    #[profiling::function]
    pub fn update_edges<Q, I>(&mut self, key: &Q, edges: I) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        I: IntoIterator,
        I::Item: Into<Edge<K>>,
    {
        let Some(list) = self.edge_list_mut(key) else {
            log::debug!("[KeyedGraph] update_edges: key not found, ignoring");
            return false;
        };
        let (mut appended, mut replaced) = (0usize, 0usize);
        for edge in edges {
            match list.upsert(edge.into()) {
                Upsert::Appended => appended += 1,
                Upsert::Replaced => replaced += 1,
                Upsert::Unchanged => {}
            }
        }
        log::trace!("[KeyedGraph] update_edges: {appended} appended, {replaced} replaced");
        true
    }

    /// Removes every edge of the vertex whose target is in `targets`, keeping the order of the
    /// remaining edges. Returns `false` if the vertex does not exist.
    ///
    /// Like `key`, targets can be given in any borrowed form of `K` (`&str` for `String` keys).
    #[profiling::function]
    pub fn remove_edges<'t, Q, T, I>(&mut self, key: &Q, targets: I) -> bool
    where
        K: Borrow<Q> + Borrow<T>,
        Q: ?Sized + Hash + Eq,
        T: 't + ?Sized + Hash + Eq,
        I: IntoIterator<Item = &'t T>,
    {
        let Some(list) = self.edge_list_mut(key) else {
            log::debug!("[KeyedGraph] remove_edges: key not found, ignoring");
            return false;
        };
        let targets = targets.into_iter().collect::<HashSet<_>>();
        let removed =
            list.remove_where(|edge| targets.contains(<K as Borrow<T>>::borrow(&edge.target)));
        log::trace!("[KeyedGraph] remove_edges: {removed} removed");
        true
    }

    /// Returns the metadata of the vertex, if it exists.
    pub fn metadata<Q>(&self, key: &Q) -> Option<&M>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.metadata.get(key)
    }

    /// Replaces the metadata of an existing vertex, returning the previous value.
    ///
    /// Returns [`None`] and stores nothing if the vertex does not exist.
    pub fn set_metadata<Q>(&mut self, key: &Q, metadata: M) -> Option<M>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.metadata
            .get_mut(key)
            .map(|current| std::mem::replace(current, metadata))
    }

    /// Returns the weight of the edge going from `from` to `to`, if there is one.
    pub fn edge_weight<Q>(&self, from: &Q, to: &Q) -> Option<f64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let list = self.adjacency.get(self.index.get(from)?)?;
        list.position(to).map(|i| list[i].weight)
    }

    /// Returns an iterator over `(key, slot)` pairs of all live vertices, in arbitrary order.
    pub fn slots(&self) -> impl '_ + Iterator<Item = (&K, usize)> {
        self.index.iter()
    }

    /// Returns an iterator over the keys of all live vertices, ordered by slot.
    pub fn vertices_by_slot(&self) -> impl '_ + Iterator<Item = &K> {
        self.index.keys_by_slot().into_iter()
    }

    /// Returns an iterator over the edges pointing to keys that are not in the graph (forward
    /// references), along with the key of their source vertex.
    pub fn dangling_edges(&self) -> impl '_ + Iterator<Item = (&K, &Edge<K>)> {
        self.vertices_by_slot()
            .zip(self.adjacency.iter())
            .flat_map(move |(source, list)| {
                list.iter()
                    .filter(move |edge| !self.index.contains(&edge.target))
                    .map(move |edge| (source, edge))
            })
    }

    /// Removes all vertices.
    pub fn clear(&mut self) {
        self.index.clear();
        self.adjacency.clear();
        self.metadata.clear();
    }

    /// Checks that the three stores backing the graph agree with each other.
    ///
    /// This verifies that all stores have the same size, that slots are dense, that every
    /// vertex has metadata, and that no edge list targets a vertex twice.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let (index, adjacency, metadata) = (self.index.len(), self.adjacency.len(), self.metadata.len());
        if index != adjacency || index != metadata {
            return Err(InvariantViolation::LengthMismatch {
                index,
                adjacency,
                metadata,
            });
        }
        self.index.check_dense()?;
        if let Some((_, slot)) = self.index.iter().find(|(key, _)| !self.metadata.contains(*key)) {
            return Err(InvariantViolation::MissingMetadata { slot });
        }
        if let Some(slot) = self.adjacency.iter().position(EdgeList::has_duplicate_targets) {
            return Err(InvariantViolation::DuplicateTarget { slot });
        }
        Ok(())
    }

    pub(crate) fn edge_list_mut<Q>(&mut self, key: &Q) -> Option<&mut EdgeList<K>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let slot = self.index.get(key)?;
        self.adjacency.get_mut(slot)
    }

    pub(crate) fn stores(&self) -> (&SlotIndex<K>, &AdjacencyStore<K>, &MetadataStore<K, M>) {
        (&self.index, &self.adjacency, &self.metadata)
    }

    pub(crate) fn push_unchecked(&mut self, key: K, edges: EdgeList<K>, metadata: M) -> Option<usize> {
        let slot = self.index.register(key.clone())?;
        self.adjacency.push(edges);
        self.metadata.insert(key, metadata);
        Some(slot)
    }
}

impl<K: Eq + Hash + Clone, M> Graph for KeyedGraph<K, M> {
    type Key = K;

    fn vertices(&self) -> impl '_ + Iterator<Item = &Self::Key> {
        self.index.iter().map(|(key, _)| key)
    }

    fn adjacent_vertices<Q>(&self, key: &Q) -> Option<&[Edge<Self::Key>]>
    where
        Self::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        KeyedGraph::adjacent_vertices(self, key)
    }

    fn contains_vertex<Q>(&self, key: &Q) -> bool
    where
        Self::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.contains(key)
    }

    fn num_vertices(&self) -> usize {
        self.len()
    }

    fn num_edges(&self) -> usize {
        self.adjacency.iter().map(|list| list.len()).sum()
    }

    fn edge_weight<Q>(&self, from: &Q, to: &Q) -> Option<f64>
    where
        Self::Key: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        KeyedGraph::edge_weight(self, from, to)
    }
}

/// Renders one line per vertex, in slot order: `slot: key -> target (weight), ...`.
impl<K: Eq + Hash + Clone + fmt::Display, M> fmt::Display for KeyedGraph<K, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (slot, (key, list)) in self.vertices_by_slot().zip(self.adjacency.iter()).enumerate() {
            if slot > 0 {
                writeln!(f)?;
            }
            write!(f, "{slot}: {key} ->")?;
            for (i, edge) in list.iter().enumerate() {
                let sep = if i == 0 { " " } else { ", " };
                write!(f, "{sep}{} ({})", edge.target, edge.weight)?;
            }
        }
        Ok(())
    }
}
