use std::collections::VecDeque;

use itertools::Itertools;

use super::{labeled_graph::LabeledGraph, Distance, Graph, VertexId, VertexLabel};
use crate::search::path::{Path, ShortestPathTestCase};

const EPSILON: Distance = 1e-9;

/// Compares two distances with a tolerance relative to their magnitude.
pub fn distances_match(a: Distance, b: Distance) -> bool {
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    (a - b).abs() <= EPSILON * a.abs().max(b.abs()).max(1.0)
}

/// Check if a path is correct for a given test case.
pub fn validate_path<V: VertexLabel>(
    graph: &LabeledGraph<V>,
    validation: &ShortestPathTestCase<V>,
    path: &Option<Path<V>>,
) -> Result<(), String> {
    if let Some(path) = path {
        if let Some(distance) = validation.distance {
            if !distances_match(path.distance, distance) {
                return Err("wrong path distance".to_string());
            }

            if path.vertices.is_empty() {
                return Err("path is empty".to_string());
            }

            // Ensure fist and last vertex of path are source and target of request.
            if path.vertices.first() != Some(&validation.source) {
                return Err("first vertex of path is not source of request".to_string());
            }
            if path.vertices.last() != Some(&validation.target) {
                return Err("last vertex of path is not target of request".to_string());
            }

            if !path.vertices.iter().all_unique() {
                return Err("path visits a vertex twice".to_string());
            }

            let ids = path
                .vertices
                .iter()
                .map(|vertex| graph.vertex_id(vertex))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|error| error.to_string())?;

            // check if there is an edge between consecutive path vertices and
            // that the total weight of path is correct.
            let true_distance = get_path_distance(graph, &ids)
                .ok_or_else(|| "path uses an edge missing in the graph".to_string())?;
            if !distances_match(true_distance, distance) {
                return Err("wrong path distance".to_string());
            }
        } else {
            return Err("a path was found where there should be none".to_string());
        }
    } else if validation.distance.is_some() {
        return Err("no path is found but there should be one".to_string());
    }

    Ok(())
}

/// Sum of the cheapest edges between consecutive vertices, `None` if some
/// consecutive pair is not connected.
pub fn get_path_distance(graph: &dyn Graph, vertices: &[VertexId]) -> Option<Distance> {
    vertices
        .iter()
        .tuple_windows()
        .map(|(&tail, &head)| graph.get_weight(tail, head))
        .sum()
}

pub fn is_bidirectional(graph: &dyn Graph) -> bool {
    (0..graph.number_of_vertices()).all(|vertex| {
        graph.out_edges(vertex).all(|out_edge| {
            let reversed = out_edge.reversed();
            graph
                .out_edges(reversed.tail())
                .any(|edge| edge.head() == reversed.head() && edge.weight() == reversed.weight())
        })
    })
}

pub fn degree_vec(graph: &dyn Graph) -> Vec<u32> {
    (0..graph.number_of_vertices())
        .map(|vertex| graph.out_edges(vertex).len() as u32)
        .collect()
}

/// Number of edges on a hop-minimal path from `source` to every vertex,
/// `None` for unreached ones.
pub fn hop_distances(graph: &dyn Graph, source: VertexId) -> Vec<Option<u32>> {
    let mut hops = vec![None; graph.number_of_vertices() as usize];
    let mut queue = VecDeque::from([source]);
    hops[source as usize] = Some(0);

    while let Some(tail) = queue.pop_front() {
        let Some(hops_tail) = hops[tail as usize] else {
            continue;
        };
        for edge in graph.out_edges(tail) {
            if hops[edge.head() as usize].is_none() {
                hops[edge.head() as usize] = Some(hops_tail + 1);
                queue.push_back(edge.head());
            }
        }
    }

    hops
}

#[cfg(test)]
mod tests {
    use super::{degree_vec, distances_match, get_path_distance, hop_distances};
    use crate::graphs::labeled_graph::LabeledGraph;

    #[test]
    fn path_distance_uses_cheapest_parallel_edge() {
        let mut graph = LabeledGraph::new();
        graph.add_edge("a", "b", 3.0, false).unwrap();
        graph.add_edge("a", "b", 1.0, false).unwrap();
        graph.add_edge("b", "c", 2.5, false).unwrap();

        assert_eq!(get_path_distance(&graph, &[0, 1, 2]), Some(3.5));
        assert_eq!(get_path_distance(&graph, &[2, 1]), None);
        assert_eq!(get_path_distance(&graph, &[1]), Some(0.0));
        assert_eq!(degree_vec(&graph), vec![2, 1, 0]);
    }

    #[test]
    fn hop_distances_ignore_weights() {
        let mut graph = LabeledGraph::new();
        graph.add_edge("a", "b", 1.0, false).unwrap();
        graph.add_edge("b", "c", 1.0, false).unwrap();
        graph.add_edge("a", "c", 50.0, false).unwrap();
        graph.add_vertex("d");

        assert_eq!(hop_distances(&graph, 0), vec![Some(0), Some(1), Some(1), None]);
        assert_eq!(hop_distances(&graph, 2), vec![None, None, Some(0), None]);
    }

    #[test]
    fn infinite_distances_only_match_themselves() {
        assert!(distances_match(f64::INFINITY, f64::INFINITY));
        assert!(!distances_match(f64::INFINITY, 1e300));
        assert!(distances_match(0.1 + 0.2, 0.3));
    }
}
