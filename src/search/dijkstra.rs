use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use super::{
    cancellation::CancellationFlag,
    collections::{
        dijkstra_data::{DijkstraData, DijkstraDataVec},
        vertex_distance_queue::{
            DijkstraQueueElement, VertexDistanceQueue, VertexDistanceQueueBinaryHeap,
        },
    },
    path::{reconstruct_path, Path},
};
use crate::{
    error::GraphError,
    graphs::{labeled_graph::LabeledGraph, Distance, Graph, VertexId, VertexLabel},
};

/// Counters of one Dijkstra run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DijkstraStatistics {
    pub pops: u32,
    pub stale_pops: u32,
    pub relaxations: u32,
}

/// Dijkstra with lazy deletion.
///
/// A vertex is re-inserted into `queue` whenever a strictly shorter distance
/// to it is found; entries whose distance is larger than the current best one
/// are skipped when popped. Stops early once `target` is popped, if given.
/// `cancellation` is checked once per pop. All edge weights must be
/// non-negative. A distance sum that is no longer finite aborts the search
/// with `DistanceOverflow` instead of leaving the vertex unreached.
pub fn dijkstra_search(
    graph: &dyn Graph,
    data: &mut dyn DijkstraData,
    queue: &mut dyn VertexDistanceQueue,
    source: VertexId,
    target: Option<VertexId>,
    cancellation: &CancellationFlag,
) -> Result<DijkstraStatistics, GraphError> {
    let mut statistics = DijkstraStatistics::default();

    data.set_distance(source, 0.0);
    queue.insert(source, 0.0);

    while let Some(DijkstraQueueElement {
        distance: distance_tail,
        vertex: tail,
    }) = queue.pop()
    {
        if cancellation.is_cancelled() {
            warn!(source, pops = statistics.pops, "dijkstra cancelled");
            return Err(GraphError::Cancelled);
        }
        statistics.pops += 1;

        if distance_tail > data.get_distance(tail) {
            statistics.stale_pops += 1;
            continue;
        }
        if Some(tail) == target {
            break;
        }

        for edge in graph.out_edges(tail) {
            let alternative_distance_head = distance_tail + edge.weight();
            if !alternative_distance_head.is_finite() {
                warn!(tail, head = edge.head(), "distance overflow");
                return Err(GraphError::DistanceOverflow {
                    tail,
                    head: edge.head(),
                });
            }
            if alternative_distance_head < data.get_distance(edge.head()) {
                data.set_distance(edge.head(), alternative_distance_head);
                data.set_predecessor(edge.head(), tail);
                queue.insert(edge.head(), alternative_distance_head);
                statistics.relaxations += 1;
            }
        }
    }

    debug!(
        source,
        pops = statistics.pops,
        stale_pops = statistics.stale_pops,
        relaxations = statistics.relaxations,
        "dijkstra finished"
    );

    Ok(statistics)
}

pub fn dijkstra_one_to_all_wrapped(
    graph: &dyn Graph,
    source: VertexId,
    cancellation: &CancellationFlag,
) -> Result<DijkstraDataVec, GraphError> {
    let mut data = DijkstraDataVec::new(graph);
    let mut queue = VertexDistanceQueueBinaryHeap::new();
    dijkstra_search(graph, &mut data, &mut queue, source, None, cancellation)?;
    Ok(data)
}

/// Distance and predecessor maps of a single-source run.
///
/// Both maps hold an entry for every vertex of the graph. Unreached vertices
/// have an infinite distance, they and the source have no predecessor.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShortestPaths<V> {
    pub source: V,
    pub distances: BTreeMap<V, Distance>,
    pub predecessors: BTreeMap<V, Option<V>>,
}

impl<V: VertexLabel> ShortestPaths<V> {
    fn from_data(graph: &LabeledGraph<V>, source: VertexId, data: &DijkstraDataVec) -> Self {
        let distances = (0..graph.number_of_vertices())
            .map(|vertex| (graph.label(vertex).clone(), data.get_distance(vertex)))
            .collect();
        let predecessors = (0..graph.number_of_vertices())
            .map(|vertex| {
                (
                    graph.label(vertex).clone(),
                    data.get_predecessor(vertex)
                        .map(|predecessor| graph.label(predecessor).clone()),
                )
            })
            .collect();

        ShortestPaths {
            source: graph.label(source).clone(),
            distances,
            predecessors,
        }
    }

    /// Distance from the source, infinite for unreached or unknown vertices.
    pub fn distance(&self, target: &V) -> Distance {
        self.distances
            .get(target)
            .copied()
            .unwrap_or(Distance::INFINITY)
    }

    pub fn path(&self, target: &V) -> Option<Path<V>> {
        let vertices = reconstruct_path(&self.predecessors, &self.source, target)?;
        Some(Path {
            vertices,
            distance: self.distance(target),
        })
    }
}

/// Shortest distances and predecessors from `source` to every vertex.
pub fn shortest_paths<V: VertexLabel>(
    graph: &LabeledGraph<V>,
    source: &V,
) -> Result<ShortestPaths<V>, GraphError> {
    shortest_paths_cancellable(graph, source, &CancellationFlag::new())
}

pub fn shortest_paths_cancellable<V: VertexLabel>(
    graph: &LabeledGraph<V>,
    source: &V,
    cancellation: &CancellationFlag,
) -> Result<ShortestPaths<V>, GraphError> {
    let source = graph.vertex_id(source)?;
    let data = dijkstra_one_to_all_wrapped(graph, source, cancellation)?;
    Ok(ShortestPaths::from_data(graph, source, &data))
}

/// Shortest path between two vertices, stopping once `target` is settled.
pub fn shortest_path<V: VertexLabel>(
    graph: &LabeledGraph<V>,
    source: &V,
    target: &V,
) -> Result<Option<Path<V>>, GraphError> {
    let source = graph.vertex_id(source)?;
    let target = graph.vertex_id(target)?;

    let mut data = DijkstraDataVec::new(graph);
    let mut queue = VertexDistanceQueueBinaryHeap::new();
    dijkstra_search(
        graph,
        &mut data,
        &mut queue,
        source,
        Some(target),
        &CancellationFlag::new(),
    )?;

    Ok(data
        .get_path(target)
        .map(|path| path.map_vertices(|vertex| graph.label(vertex).clone())))
}
