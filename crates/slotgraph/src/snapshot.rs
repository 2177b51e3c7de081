//! Consistent, slot-ordered snapshots of a [`KeyedGraph`].
//!
//! A [`Snapshot`] captures the three stores of a graph at once, so that it can be stored or sent
//! elsewhere and later turned back into an equivalent graph. Restoring validates the snapshot
//! instead of trusting it.
//!
//! With the `serialize` feature, snapshots implement `serde` traits, and [`to_writer`] /
//! [`from_reader`] encode graphs as CBOR.
use crate::adjacency::EdgeList;
use crate::data::Coordinate;
use crate::errors::SnapshotError;
use crate::{Edge, KeyedGraph};
use std::hash::Hash;

/// A single vertex of a [`Snapshot`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapshotVertex<K, M> {
    /// Key of the vertex
    pub key: K,
    /// Outgoing edges, in order
    pub edges: Vec<Edge<K>>,
    /// Vertex metadata
    pub metadata: M,
}

/// All vertices of a graph, in slot order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot<K, M = Coordinate> {
    /// Vertices, ordered by slot
    pub vertices: Vec<SnapshotVertex<K, M>>,
}

impl<K: Eq + Hash + Clone, M: Clone> KeyedGraph<K, M> {
    /// Captures the current state of the graph.
    pub fn snapshot(&self) -> Snapshot<K, M> {
        let (index, adjacency, metadata) = self.stores();
        let vertices = index
            .keys_by_slot()
            .into_iter()
            .zip(adjacency.iter())
            .filter_map(|(key, list)| {
                Some(SnapshotVertex {
                    key: key.clone(),
                    edges: list.to_vec(),
                    metadata: metadata.get(key)?.clone(),
                })
            })
            .collect();
        Snapshot { vertices }
    }
}

impl<K: Eq + Hash + Clone, M> TryFrom<Snapshot<K, M>> for KeyedGraph<K, M> {
    type Error = SnapshotError;

    /// Rebuilds a graph from a snapshot, assigning slots in snapshot order.
    ///
    /// Edge lists are restored as-is: a list targeting the same vertex twice is rejected rather
    /// than folded. Edges pointing to keys absent from the snapshot are kept.
    fn try_from(snapshot: Snapshot<K, M>) -> Result<Self, Self::Error> {
        let mut graph = Self::with_capacity_and_metadata(snapshot.vertices.len());
        for (position, vertex) in snapshot.vertices.into_iter().enumerate() {
            let edges = EdgeList::from_raw(vertex.edges);
            if graph.push_unchecked(vertex.key, edges, vertex.metadata).is_none() {
                return Err(SnapshotError::DuplicateKey { position });
            }
        }
        graph.check_invariants()?;
        log::trace!("[Snapshot] restored {} vertices", graph.len());
        Ok(graph)
    }
}

/// Encodes the graph as CBOR into a writer.
///
/// # Arguments
///
/// * `writer` - The writer to which the serialized data will be written.
/// * `graph` - The graph to serialize.
#[cfg(feature = "serialize")]
pub fn to_writer<K, M>(writer: impl std::io::Write, graph: &KeyedGraph<K, M>) -> Result<(), serde_cbor::Error>
where
    K: Eq + Hash + Clone + serde::Serialize,
    M: Clone + serde::Serialize,
{
    serde_cbor::to_writer(writer, &graph.snapshot())
}

/// Decodes a graph previously encoded with [`to_writer`].
///
/// # Arguments
///
/// * `reader` - The reader from which the serialized data will be read.
///
/// # Returns
///
/// The restored graph, or an error if the data cannot be decoded or does not describe a valid
/// graph.
#[cfg(feature = "serialize")]
pub fn from_reader<K, M>(reader: impl std::io::Read) -> Result<KeyedGraph<K, M>, SnapshotError>
where
    K: Eq + Hash + Clone + serde::de::DeserializeOwned,
    M: serde::de::DeserializeOwned,
{
    let snapshot: Snapshot<K, M> = serde_cbor::from_reader(reader)?;
    KeyedGraph::try_from(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::InvariantViolation;
    use crate::Vertex;

    fn sample() -> KeyedGraph<&'static str> {
        let mut graph = KeyedGraph::new();
        graph.add_vertex(Vertex::new("A", [("B", 1.0), ("C", 1.5)]));
        graph.add_vertex(Vertex::new("B", [("A", 1.0), ("D", 3.0)]).with_metadata(Coordinate::new(1.0, 2.0)));
        graph.add_vertex(Vertex::new("C", [("A", 1.5)]));
        graph
    }

    #[test]
    fn test_snapshot_is_slot_ordered() {
        let mut graph = sample();
        graph.remove_vertex("A");
        let snapshot = graph.snapshot();

        assert_eq!(
            vec![
                SnapshotVertex {
                    key: "B",
                    edges: vec![Edge::new("D", 3.0)],
                    metadata: Coordinate::new(1.0, 2.0),
                },
                SnapshotVertex {
                    key: "C",
                    edges: vec![],
                    metadata: Coordinate::default(),
                },
            ],
            snapshot.vertices
        );
    }

    #[test]
    fn test_restore_from_snapshot() {
        let graph = sample();
        let restored = KeyedGraph::try_from(graph.snapshot()).unwrap();

        assert_eq!(graph.snapshot(), restored.snapshot());
        assert_eq!(Some(2), restored.slot_of("C"));
        assert_eq!(Some(&Coordinate::new(1.0, 2.0)), restored.metadata("B"));
    }

    #[test]
    fn test_restore_rejects_duplicate_key() {
        let mut snapshot = sample().snapshot();
        snapshot.vertices.push(SnapshotVertex {
            key: "A",
            edges: vec![],
            metadata: Coordinate::default(),
        });

        let err = KeyedGraph::try_from(snapshot).unwrap_err();
        assert!(matches!(err, SnapshotError::DuplicateKey { position: 3 }));
    }

    #[test]
    fn test_restore_rejects_duplicate_target() {
        let mut snapshot = sample().snapshot();
        snapshot.vertices[1].edges.push(Edge::new("A", 4.0));

        let err = KeyedGraph::try_from(snapshot).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::Inconsistent(InvariantViolation::DuplicateTarget { slot: 1 })
        ));
    }

    #[test]
    #[cfg(feature = "serialize")]
    fn test_cbor_roundtrip() {
        let graph = sample();
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &graph).unwrap();

        let restored: KeyedGraph<String> = from_reader(buffer.as_slice()).unwrap();
        assert_eq!(Some(&[Edge::new(String::from("A"), 1.5)][..]), restored.adjacent_vertices("C"));
        assert_eq!(Some(&Coordinate::new(1.0, 2.0)), restored.metadata("B"));
    }

    #[test]
    #[cfg(feature = "serialize")]
    fn test_json_snapshot_layout() {
        let mut graph = KeyedGraph::new();
        graph.add_vertex(Vertex::new("X", [("Y", 2.0)]));

        let value = serde_json::to_value(graph.snapshot()).unwrap();
        assert_eq!(
            serde_json::json!({
                "vertices": [
                    { "key": "X", "edges": [{ "target": "Y", "weight": 2.0 }], "metadata": { "x": 0.0, "y": 0.0 } }
                ]
            }),
            value
        );
    }

    #[test]
    #[cfg(feature = "serialize")]
    fn test_from_reader_rejects_garbage() {
        let result = from_reader::<String, Coordinate>(&[0xffu8, 0x00][..]);
        assert!(matches!(result, Err(SnapshotError::Decode(_))));
    }
}
