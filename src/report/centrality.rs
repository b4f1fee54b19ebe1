//! Vertex importance measures over the weighted graph.

use itertools::Itertools;
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use super::distance_matrix::DistanceMatrix;
use crate::{
    error::GraphError,
    graphs::{labeled_graph::LabeledGraph, Distance, Graph, VertexId, VertexLabel},
    search::collections::vertex_distance_queue::{
        DijkstraQueueElement, VertexDistanceQueue, VertexDistanceQueueBinaryHeap,
    },
};

/// Per vertex centralities, each list sorted by decreasing value and then by
/// vertex.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Centrality<V> {
    /// Out degree divided by `n - 1`.
    pub degree: Vec<(V, f64)>,
    /// `(r - 1) / (n - 1) * (r - 1) / total` where `r` counts the vertices
    /// reached from the vertex and `total` is the sum of their distances.
    pub closeness: Vec<(V, f64)>,
    /// Share of shortest paths between other ordered pairs passing through
    /// the vertex, divided by `(n - 1)(n - 2)`.
    pub betweenness: Vec<(V, f64)>,
    /// Mean local clustering coefficient, edges taken as undirected.
    pub average_clustering: f64,
}

impl<V: VertexLabel> Centrality<V> {
    pub fn new(graph: &LabeledGraph<V>) -> Result<Self, GraphError> {
        let matrix = DistanceMatrix::new(graph)?;
        Self::with_matrix(graph, &matrix)
    }

    pub fn with_matrix(
        graph: &LabeledGraph<V>,
        matrix: &DistanceMatrix<V>,
    ) -> Result<Self, GraphError> {
        let n = graph.number_of_vertices() as f64;

        let degree = (0..graph.number_of_vertices())
            .map(|vertex| {
                let degree = graph.out_edges(vertex).len() as f64;
                let centrality = if n > 1.0 { degree / (n - 1.0) } else { 0.0 };
                (graph.label(vertex).clone(), centrality)
            })
            .collect_vec();

        let closeness = matrix
            .vertices()
            .iter()
            .map(|vertex| {
                let row = matrix.row(vertex)?;
                let (reached, total) = row
                    .iter()
                    .filter(|distance| distance.is_finite())
                    .fold((0.0, 0.0), |(reached, total), distance| {
                        (reached + 1.0, total + distance)
                    });
                let others = reached - 1.0;
                let centrality = if total > 0.0 && n > 1.0 {
                    others / (n - 1.0) * others / total
                } else {
                    0.0
                };
                Ok((vertex.clone(), centrality))
            })
            .collect::<Result<Vec<_>, GraphError>>()?;

        let scale = if n > 2.0 {
            1.0 / ((n - 1.0) * (n - 2.0))
        } else {
            0.0
        };
        let betweenness = betweenness_sums(graph)?
            .into_iter()
            .enumerate()
            .map(|(vertex, sum)| (graph.label(vertex as VertexId).clone(), sum * scale))
            .collect_vec();

        let average_clustering = if graph.number_of_vertices() == 0 {
            0.0
        } else {
            (0..graph.number_of_vertices())
                .map(|vertex| local_clustering(graph, vertex))
                .sum::<f64>()
                / n
        };

        info!(vertices = graph.number_of_vertices(), "computed centralities");

        Ok(Centrality {
            degree: sorted_by_value(degree),
            closeness: sorted_by_value(closeness),
            betweenness: sorted_by_value(betweenness),
            average_clustering,
        })
    }
}

fn sorted_by_value<V: Ord>(values: Vec<(V, f64)>) -> Vec<(V, f64)> {
    values
        .into_iter()
        .sorted_by(|(a_vertex, a), (b_vertex, b)| {
            b.total_cmp(a).then_with(|| a_vertex.cmp(b_vertex))
        })
        .collect()
}

// Undirected neighbourhood without the vertex itself.
fn neighborhood(graph: &dyn Graph, vertex: VertexId) -> Vec<VertexId> {
    (0..graph.number_of_vertices())
        .filter(|&other| {
            other != vertex
                && (graph.get_weight(vertex, other).is_some()
                    || graph.get_weight(other, vertex).is_some())
        })
        .collect()
}

fn local_clustering(graph: &dyn Graph, vertex: VertexId) -> f64 {
    let neighbors = neighborhood(graph, vertex);
    if neighbors.len() < 2 {
        return 0.0;
    }

    let links = neighbors
        .iter()
        .tuple_combinations()
        .filter(|&(&a, &b)| {
            graph.get_weight(a, b).is_some() || graph.get_weight(b, a).is_some()
        })
        .count();
    let pairs = neighbors.len() * (neighbors.len() - 1) / 2;
    links as f64 / pairs as f64
}

/// Search buffers of one single-source run counting shortest paths.
struct PathCounting {
    distances: Vec<Distance>,
    path_counts: Vec<f64>,
    predecessors: Vec<Vec<VertexId>>,
    settled_order: Vec<VertexId>,
    dependencies: Vec<f64>,
    queue: VertexDistanceQueueBinaryHeap,
}

impl PathCounting {
    fn new(graph: &dyn Graph) -> Self {
        let n = graph.number_of_vertices() as usize;
        PathCounting {
            distances: vec![Distance::INFINITY; n],
            path_counts: vec![0.0; n],
            predecessors: vec![Vec::new(); n],
            settled_order: Vec::with_capacity(n),
            dependencies: vec![0.0; n],
            queue: VertexDistanceQueueBinaryHeap::new(),
        }
    }

    fn clear(&mut self) {
        self.distances.fill(Distance::INFINITY);
        self.path_counts.fill(0.0);
        self.predecessors.iter_mut().for_each(Vec::clear);
        self.settled_order.clear();
        self.dependencies.fill(0.0);
        self.queue.clear();
    }

    // Dijkstra that keeps every predecessor on a shortest path, followed by
    // the dependency accumulation in reverse settle order.
    fn accumulate(
        &mut self,
        graph: &dyn Graph,
        source: VertexId,
        sums: &mut [f64],
    ) -> Result<(), GraphError> {
        self.distances[source as usize] = 0.0;
        self.path_counts[source as usize] = 1.0;
        self.queue.insert(source, 0.0);

        while let Some(DijkstraQueueElement {
            distance: distance_tail,
            vertex: tail,
        }) = self.queue.pop()
        {
            if distance_tail > self.distances[tail as usize] {
                continue;
            }
            self.settled_order.push(tail);

            for edge in graph.out_edges(tail) {
                let head = edge.head();
                if head == tail {
                    continue;
                }
                let alternative_distance_head = distance_tail + edge.weight();
                if !alternative_distance_head.is_finite() {
                    return Err(GraphError::DistanceOverflow { tail, head });
                }

                if alternative_distance_head < self.distances[head as usize] {
                    self.distances[head as usize] = alternative_distance_head;
                    self.path_counts[head as usize] = self.path_counts[tail as usize];
                    self.predecessors[head as usize].clear();
                    self.predecessors[head as usize].push(tail);
                    self.queue.insert(head, alternative_distance_head);
                } else if alternative_distance_head == self.distances[head as usize]
                    && head != source
                {
                    self.path_counts[head as usize] += self.path_counts[tail as usize];
                    self.predecessors[head as usize].push(tail);
                }
            }
        }

        while let Some(vertex) = self.settled_order.pop() {
            for &predecessor in self.predecessors[vertex as usize].iter() {
                self.dependencies[predecessor as usize] += self.path_counts[predecessor as usize]
                    / self.path_counts[vertex as usize]
                    * (1.0 + self.dependencies[vertex as usize]);
            }
            if vertex != source {
                sums[vertex as usize] += self.dependencies[vertex as usize];
            }
        }

        Ok(())
    }
}

// Unnormalized betweenness over ordered source/target pairs, one source per
// rayon task.
fn betweenness_sums(graph: &dyn Graph) -> Result<Vec<f64>, GraphError> {
    let n = graph.number_of_vertices() as usize;

    (0..graph.number_of_vertices())
        .into_par_iter()
        .map_init(
            || PathCounting::new(graph),
            |counting, source| {
                counting.clear();
                let mut sums = vec![0.0; n];
                counting.accumulate(graph, source, &mut sums)?;
                Ok(sums)
            },
        )
        .try_reduce(
            || vec![0.0; n],
            |mut a, b| {
                a.iter_mut().zip(b).for_each(|(a, b)| *a += b);
                Ok(a)
            },
        )
}
