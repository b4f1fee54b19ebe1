use std::{fmt::Debug, hash::Hash};

use edge::WeightedEdge;

pub mod edge;
pub mod graph_factory;
pub mod graph_functions;
pub mod labeled_graph;

pub type VertexId = u32;
pub type Weight = f64;
pub type Distance = f64;

/// Anything usable as a caller-facing vertex identifier.
///
/// Equality, hashing and ordering are value based. Ordering is used for
/// deterministic reporting and for the neighbour order of BFS and DFS.
pub trait VertexLabel: Clone + Eq + Hash + Ord + Debug + Send + Sync {}

impl<T> VertexLabel for T where T: Clone + Eq + Hash + Ord + Debug + Send + Sync {}

pub trait Graph: Send + Sync {
    fn number_of_vertices(&self) -> u32;

    fn number_of_edges(&self) -> u32 {
        (0..self.number_of_vertices())
            .map(|vertex| self.out_edges(vertex).len() as u32)
            .sum::<u32>()
    }

    fn out_edges(
        &self,
        tail: VertexId,
    ) -> Box<dyn ExactSizeIterator<Item = WeightedEdge> + Send + '_>;

    /// Smallest weight of all edges from `tail` to `head`.
    fn get_weight(&self, tail: VertexId, head: VertexId) -> Option<Weight> {
        if tail >= self.number_of_vertices() {
            return None;
        }

        self.out_edges(tail)
            .filter(|edge| edge.head() == head)
            .map(|edge| edge.weight())
            .min_by(|a, b| a.total_cmp(b))
    }
}
