use std::collections::BTreeMap;

use indicatif::{ParallelProgressIterator, ProgressBar};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::{
    error::GraphError,
    graphs::{labeled_graph::LabeledGraph, Distance, Graph, VertexId, VertexLabel},
    search::{
        cancellation::CancellationFlag,
        collections::{
            dijkstra_data::{DijkstraData, DijkstraDataVec},
            vertex_distance_queue::{VertexDistanceQueue, VertexDistanceQueueBinaryHeap},
        },
        dijkstra::dijkstra_search,
    },
};

/// Shortest distances between all ordered vertex pairs.
///
/// Rows and columns follow the ascending vertex order. The diagonal is zero
/// and unreachable pairs are infinite (serialized as `null`).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DistanceMatrix<V> {
    vertices: Vec<V>,
    distances: Vec<Vec<Distance>>,
}

impl<V: VertexLabel> DistanceMatrix<V> {
    pub fn new(graph: &LabeledGraph<V>) -> Result<Self, GraphError> {
        Self::compute(graph, &CancellationFlag::new(), None)
    }

    pub fn with_progress(graph: &LabeledGraph<V>, bar: ProgressBar) -> Result<Self, GraphError> {
        Self::compute(graph, &CancellationFlag::new(), Some(bar))
    }

    pub fn cancellable(
        graph: &LabeledGraph<V>,
        cancellation: &CancellationFlag,
    ) -> Result<Self, GraphError> {
        Self::compute(graph, cancellation, None)
    }

    // One Dijkstra run per row. Rows are independent, each rayon task owns
    // the row it writes and reuses its search buffers across rows.
    fn compute(
        graph: &LabeledGraph<V>,
        cancellation: &CancellationFlag,
        bar: Option<ProgressBar>,
    ) -> Result<Self, GraphError> {
        let order = graph.sorted_vertex_ids();
        let mut column = vec![0; order.len()];
        for (index, &vertex) in order.iter().enumerate() {
            column[vertex as usize] = index;
        }

        let init = || {
            (
                DijkstraDataVec::new(graph),
                VertexDistanceQueueBinaryHeap::new(),
            )
        };
        let row = |(data, queue): &mut (DijkstraDataVec, VertexDistanceQueueBinaryHeap),
                   &source: &VertexId|
         -> Result<Vec<Distance>, GraphError> {
            data.clear();
            queue.clear();
            dijkstra_search(graph, data, queue, source, None, cancellation)?;

            let mut row = vec![Distance::INFINITY; order.len()];
            for vertex in 0..graph.number_of_vertices() {
                row[column[vertex as usize]] = data.get_distance(vertex);
            }
            Ok(row)
        };

        let distances = match bar {
            Some(bar) => order
                .par_iter()
                .progress_with(bar)
                .map_init(init, row)
                .collect::<Result<Vec<_>, _>>()?,
            None => order
                .par_iter()
                .map_init(init, row)
                .collect::<Result<Vec<_>, _>>()?,
        };

        info!(vertices = order.len(), "computed distance matrix");

        Ok(DistanceMatrix {
            vertices: order
                .iter()
                .map(|&vertex| graph.label(vertex).clone())
                .collect(),
            distances,
        })
    }

    /// Vertices in row and column order.
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    fn index(&self, vertex: &V) -> Result<usize, GraphError> {
        self.vertices
            .binary_search(vertex)
            .map_err(|_| GraphError::UnknownVertex(format!("{:?}", vertex)))
    }

    pub fn distance(&self, source: &V, target: &V) -> Result<Distance, GraphError> {
        Ok(self.distances[self.index(source)?][self.index(target)?])
    }

    pub fn row(&self, source: &V) -> Result<&[Distance], GraphError> {
        Ok(&self.distances[self.index(source)?])
    }

    /// All `((source, target), distance)` entries, row by row.
    pub fn iter(&self) -> impl Iterator<Item = ((&V, &V), Distance)> + '_ {
        self.vertices
            .iter()
            .zip(self.distances.iter())
            .flat_map(move |(source, row)| {
                self.vertices
                    .iter()
                    .zip(row.iter())
                    .map(move |(target, &distance)| ((source, target), distance))
            })
    }

    pub fn to_map(&self) -> BTreeMap<(V, V), Distance> {
        self.iter()
            .map(|((source, target), distance)| ((source.clone(), target.clone()), distance))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::DistanceMatrix;
    use crate::{
        error::GraphError,
        graphs::{graph_factory::GraphFactory, labeled_graph::LabeledGraph},
        search::cancellation::CancellationFlag,
        utility::get_progressbar,
    };

    fn path_graph() -> LabeledGraph<&'static str> {
        let mut graph =
            GraphFactory::from_edges(&[("c", "b", 2.0), ("b", "a", 1.0)], false).unwrap();
        graph.add_vertex("d");
        graph
    }

    #[test]
    fn matrix_is_sorted_and_directed() {
        let matrix = DistanceMatrix::new(&path_graph()).unwrap();

        assert_eq!(matrix.vertices(), &["a", "b", "c", "d"]);
        assert_eq!(matrix.distance(&"c", &"a").unwrap(), 3.0);
        assert!(matrix.distance(&"a", &"c").unwrap().is_infinite());
        assert_eq!(matrix.row(&"b").unwrap()[0], 1.0);
        for vertex in ["a", "b", "c", "d"] {
            assert_eq!(matrix.distance(&vertex, &vertex).unwrap(), 0.0);
        }
        assert_eq!(matrix.iter().count(), 16);
        assert_eq!(matrix.to_map()[&("c", "b")], 2.0);
    }

    #[test]
    fn progress_variant_matches() {
        let graph = path_graph();
        let bar = get_progressbar("distance matrix", 4);
        bar.set_draw_target(indicatif::ProgressDrawTarget::hidden());

        assert_eq!(
            DistanceMatrix::with_progress(&graph, bar).unwrap(),
            DistanceMatrix::new(&graph).unwrap()
        );
    }

    #[test]
    fn unknown_vertex_and_cancellation() {
        let matrix = DistanceMatrix::new(&path_graph()).unwrap();
        assert!(matches!(
            matrix.distance(&"a", &"q"),
            Err(GraphError::UnknownVertex(_))
        ));

        let flag = CancellationFlag::new();
        flag.cancel();
        assert!(matches!(
            DistanceMatrix::cancellable(&path_graph(), &flag),
            Err(GraphError::Cancelled)
        ));
    }

    #[test]
    fn serializes_unreachable_as_null() {
        let matrix = DistanceMatrix::new(&path_graph()).unwrap();
        let json = serde_json::to_value(&matrix).unwrap();

        assert_eq!(json["distances"][0][2], serde_json::Value::Null);
        assert_eq!(json["distances"][2][0], serde_json::json!(3.0));
    }
}
