use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    error::GraphError,
    graphs::{labeled_graph::LabeledGraph, Distance, VertexLabel, Weight},
};

/// Vertices of a path from source to target and its total weight.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Path<V> {
    pub vertices: Vec<V>,
    pub distance: Distance,
}

impl<V> Path<V> {
    /// Number of edges on the path.
    pub fn hops(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    pub fn map_vertices<W>(self, f: impl FnMut(V) -> W) -> Path<W> {
        Path {
            vertices: self.vertices.into_iter().map(f).collect(),
            distance: self.distance,
        }
    }
}

/// A source/target pair together with the distance of a shortest path, if
/// there exists one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShortestPathTestCase<V> {
    pub source: V,
    pub target: V,
    pub distance: Option<Distance>,
}

/// One edge of a route with the weight accumulated up to its head.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteSegment<V> {
    pub from: V,
    pub to: V,
    pub weight: Weight,
    pub cumulative_weight: Weight,
}

/// Walks the predecessor map backwards from `target` and returns the path
/// from `source`, or `None` if `target` was not reached.
pub fn reconstruct_path<V: VertexLabel>(
    predecessors: &BTreeMap<V, Option<V>>,
    source: &V,
    target: &V,
) -> Option<Vec<V>> {
    let mut vertices = vec![target.clone()];
    let mut current = target;

    // A well formed map has no cycles, the bound only guards against
    // hand-built ones.
    while current != source && vertices.len() <= predecessors.len() + 1 {
        match predecessors.get(current) {
            Some(Some(predecessor)) => {
                vertices.push(predecessor.clone());
                current = predecessor;
            }
            _ => break,
        }
    }

    if current != source {
        return None;
    }

    vertices.reverse();
    Some(vertices)
}

/// Splits `vertices` into its edges, taking the cheapest edge between each
/// consecutive pair. `None` if some pair is not connected.
pub fn route_segments<V: VertexLabel>(
    graph: &LabeledGraph<V>,
    vertices: &[V],
) -> Result<Option<Vec<RouteSegment<V>>>, GraphError> {
    let mut segments = Vec::with_capacity(vertices.len().saturating_sub(1));
    let mut cumulative_weight = 0.0;

    for (from, to) in vertices.iter().tuple_windows() {
        let Some(weight) = graph.edge_weight(from, to)? else {
            return Ok(None);
        };
        cumulative_weight += weight;
        segments.push(RouteSegment {
            from: from.clone(),
            to: to.clone(),
            weight,
            cumulative_weight,
        });
    }

    Ok(Some(segments))
}

/// Total weight of walking `vertices` in order.
pub fn path_weight<V: VertexLabel>(
    graph: &LabeledGraph<V>,
    vertices: &[V],
) -> Result<Option<Weight>, GraphError> {
    for vertex in vertices {
        graph.vertex_id(vertex)?;
    }

    Ok(route_segments(graph, vertices)?.map(|segments| {
        segments
            .last()
            .map(|segment| segment.cumulative_weight)
            .unwrap_or(0.0)
    }))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{path_weight, reconstruct_path, route_segments, RouteSegment};
    use crate::{error::GraphError, graphs::labeled_graph::LabeledGraph};

    fn predecessors() -> BTreeMap<char, Option<char>> {
        BTreeMap::from([
            ('a', None),
            ('b', Some('a')),
            ('c', Some('b')),
            ('d', None),
        ])
    }

    #[test]
    fn reconstructs_from_source_to_target() {
        assert_eq!(
            reconstruct_path(&predecessors(), &'a', &'c'),
            Some(vec!['a', 'b', 'c'])
        );
        assert_eq!(reconstruct_path(&predecessors(), &'a', &'a'), Some(vec!['a']));
    }

    #[test]
    fn unreached_target_has_no_path() {
        assert_eq!(reconstruct_path(&predecessors(), &'a', &'d'), None);
        assert_eq!(reconstruct_path(&predecessors(), &'a', &'x'), None);
    }

    #[test]
    fn cyclic_map_terminates() {
        let predecessors = BTreeMap::from([('b', Some('c')), ('c', Some('b'))]);
        assert_eq!(reconstruct_path(&predecessors, &'a', &'b'), None);
    }

    #[test]
    fn segments_accumulate_weight() {
        let mut graph = LabeledGraph::new();
        graph.add_edge('a', 'b', 2.0, true).unwrap();
        graph.add_edge('b', 'c', 3.0, true).unwrap();
        graph.add_vertex('z');

        assert_eq!(
            route_segments(&graph, &['a', 'b', 'c']).unwrap(),
            Some(vec![
                RouteSegment {
                    from: 'a',
                    to: 'b',
                    weight: 2.0,
                    cumulative_weight: 2.0
                },
                RouteSegment {
                    from: 'b',
                    to: 'c',
                    weight: 3.0,
                    cumulative_weight: 5.0
                },
            ])
        );
        assert_eq!(path_weight(&graph, &['c', 'b', 'a']).unwrap(), Some(5.0));
        assert_eq!(path_weight(&graph, &['a']).unwrap(), Some(0.0));
        assert_eq!(path_weight(&graph, &['a', 'z']).unwrap(), None);
        assert!(matches!(
            path_weight(&graph, &['a', 'x']),
            Err(GraphError::UnknownVertex(_))
        ));
    }
}
