use crate::{Edge, KeyedGraph, Vertex};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(u8, Vec<(u8, f64)>),
    Remove(u8),
    Update(u8, Vec<(u8, f64)>),
    RemoveEdges(u8, Vec<u8>),
}

fn edges() -> impl Strategy<Value = Vec<(u8, f64)>> {
    prop::collection::vec((0..8u8, prop::sample::select(vec![0.5, 1.0, 2.0])), 0..5)
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..8u8, edges()).prop_map(|(key, edges)| Op::Add(key, edges)),
        (0..8u8).prop_map(Op::Remove),
        (0..8u8, edges()).prop_map(|(key, edges)| Op::Update(key, edges)),
        (0..8u8, prop::collection::vec(0..8u8, 0..4)).prop_map(|(key, targets)| Op::RemoveEdges(key, targets)),
    ]
}

/// Straightforward list-of-vertices model; a vertex's slot is its position in the list.
#[derive(Debug, Default)]
struct Model {
    vertices: Vec<(u8, Vec<(u8, f64)>)>,
}

impl Model {
    fn upsert(list: &mut Vec<(u8, f64)>, (target, weight): (u8, f64)) {
        match list.iter_mut().find(|(t, _)| *t == target) {
            Some(existing) => existing.1 = weight,
            None => list.push((target, weight)),
        }
    }

    fn apply(&mut self, op: &Op) {
        match op {
            Op::Add(key, edges) => {
                if self.vertices.iter().all(|(k, _)| k != key) {
                    let mut list = Vec::new();
                    for &edge in edges {
                        Self::upsert(&mut list, edge);
                    }
                    self.vertices.push((*key, list));
                }
            }
            Op::Remove(key) => {
                if let Some(pos) = self.vertices.iter().position(|(k, _)| k == key) {
                    self.vertices.remove(pos);
                    for (_, list) in &mut self.vertices {
                        list.retain(|(t, _)| t != key);
                    }
                }
            }
            Op::Update(key, edges) => {
                if let Some((_, list)) = self.vertices.iter_mut().find(|(k, _)| k == key) {
                    for &edge in edges {
                        Self::upsert(list, edge);
                    }
                }
            }
            Op::RemoveEdges(key, targets) => {
                if let Some((_, list)) = self.vertices.iter_mut().find(|(k, _)| k == key) {
                    list.retain(|(t, _)| !targets.contains(t));
                }
            }
        }
    }
}

fn apply(graph: &mut KeyedGraph<u8>, op: &Op) -> bool {
    match op {
        Op::Add(key, edges) => graph.add_vertex(Vertex::new(*key, edges.iter().copied())),
        Op::Remove(key) => graph.remove_vertex(key),
        Op::Update(key, edges) => graph.update_edges(key, edges.iter().copied()),
        Op::RemoveEdges(key, targets) => graph.remove_edges(key, targets.iter()),
    }
}

proptest! {
    #[test]
    fn proptest_matches_model(ops in prop::collection::vec(op(), 1..64)) {
        let mut graph = KeyedGraph::new();
        let mut model = Model::default();

        for op in &ops {
            apply(&mut graph, op);
            model.apply(op);

            assert_eq!(Ok(()), graph.check_invariants());
            assert_eq!(model.vertices.len(), graph.len());
            for (slot, (key, list)) in model.vertices.iter().enumerate() {
                let expected = list.iter().copied().map(Edge::from).collect::<Vec<_>>();
                assert_eq!(Some(slot), graph.slot_of(key));
                assert_eq!(Some(expected.as_slice()), graph.adjacent_vertices(key));
            }
        }
    }

    #[test]
    fn proptest_slots_stay_dense(ops in prop::collection::vec(op(), 1..64)) {
        let mut graph = KeyedGraph::new();
        for op in &ops {
            apply(&mut graph, op);
            let mut slots = graph.slots().map(|(_, slot)| slot).collect::<Vec<_>>();
            slots.sort_unstable();
            assert_eq!((0..graph.len()).collect::<Vec<_>>(), slots);
        }
    }

    #[test]
    fn proptest_removal_purges_references(ops in prop::collection::vec(op(), 1..64), removed in 0..8u8) {
        let mut graph = KeyedGraph::new();
        for op in &ops {
            apply(&mut graph, op);
        }

        let existed = graph.contains_vertex(&removed);
        assert_eq!(existed, graph.remove_vertex(&removed));
        assert_eq!(None, graph.adjacent_vertices(&removed));
        if existed {
            for (key, _) in graph.slots() {
                let edges = graph.adjacent_vertices(key).unwrap_or_default();
                assert!(edges.iter().all(|edge| edge.target != removed));
            }
        }
    }

    #[test]
    fn proptest_duplicate_insert_is_noop(ops in prop::collection::vec(op(), 1..32), key in 0..8u8, edges in edges()) {
        let mut graph = KeyedGraph::new();
        for op in &ops {
            apply(&mut graph, op);
        }
        graph.add_vertex(Vertex::isolated(key));

        let before = graph.snapshot();
        assert!(!graph.add_vertex(Vertex::new(key, edges).with_metadata(crate::Coordinate::new(7.0, 7.0))));
        assert_eq!(before, graph.snapshot());
    }
}
