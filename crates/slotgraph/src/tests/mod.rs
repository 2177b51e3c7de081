mod proptest_tests;

use super::*;
use std::collections::HashSet;

fn sample() -> KeyedGraph<char> {
    let mut graph = KeyedGraph::new();
    graph.add_vertex(Vertex::new('a', [('b', 1.0), ('c', 1.5)]));
    graph.add_vertex(Vertex::new('b', [('a', 1.0), ('d', 3.0)]));
    graph.add_vertex(Vertex::new('c', [('a', 1.5)]));
    graph.add_vertex(Vertex::new('d', [('b', 3.0)]));
    graph
}

#[test]
fn test_has_edge_between() {
    let graph = sample();
    assert!(graph.has_edge_between(&'a', &'c'));
    assert!(!graph.has_edge_between(&'c', &'d'));
    assert!(!graph.has_edge_between(&'e', &'a'));
}

#[test]
fn test_counts() {
    let mut graph = sample();
    assert_eq!(4, graph.num_vertices());
    assert_eq!(6, graph.num_edges());

    graph.remove_vertex(&'a');
    assert_eq!(3, graph.num_vertices());
    assert_eq!(2, graph.num_edges());
}

#[test]
fn test_successors() {
    let graph = sample();
    assert_eq!(vec![&'a', &'d'], graph.successors(&'b').collect::<Vec<_>>());
    assert_eq!(0, graph.successors(&'e').count());
}

#[test]
fn test_predecessors() {
    let graph = sample();
    let predecessors: HashSet<char> = graph.predecessors(&'a').copied().collect();
    assert_eq!(HashSet::from(['b', 'c']), predecessors);
}

#[test]
fn test_predecessors_with_borrowed_key() {
    let mut graph = KeyedGraph::new();
    graph.add_vertex(Vertex::new(String::from("a"), [(String::from("b"), 1.0)]));
    graph.add_vertex(Vertex::new(String::from("b"), [(String::from("b"), 2.0)]));
    graph.add_vertex(Vertex::isolated(String::from("c")));

    let predecessors: HashSet<&str> = graph.predecessors("b").map(String::as_str).collect();
    assert_eq!(HashSet::from(["a", "b"]), predecessors);
    assert_eq!(0, graph.predecessors("c").count());
}

#[test]
fn test_vertices() {
    let graph = sample();
    let vertices: HashSet<char> = Graph::vertices(&graph).copied().collect();
    assert_eq!(HashSet::from(['a', 'b', 'c', 'd']), vertices);
}

#[test]
fn test_trait_and_inherent_agree() {
    fn weight<G: Graph<Key = char>>(graph: &G, from: char, to: char) -> Option<f64> {
        graph.edge_weight(&from, &to)
    }

    let graph = sample();
    assert_eq!(graph.edge_weight(&'b', &'d'), weight(&graph, 'b', 'd'));
    assert_eq!(None, weight(&graph, 'd', 'a'));
    assert_eq!(
        KeyedGraph::adjacent_vertices(&graph, &'c'),
        Graph::adjacent_vertices(&graph, &'c')
    );
}
