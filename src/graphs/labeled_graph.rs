use std::collections::BTreeMap;

use ahash::{HashMap, HashMapExt};
use itertools::Itertools;
use tracing::debug;

use super::{
    edge::{TaillessEdge, WeightedEdge},
    Graph, VertexId, VertexLabel, Weight,
};
use crate::error::GraphError;

/// Free-form tags attached to a vertex, e.g. a metro line or a district.
/// Never consulted by any search.
pub type VertexAttributes = BTreeMap<String, String>;

/// Adjacency-list graph addressed by caller supplied vertex labels.
///
/// Labels are interned into dense `VertexId`s in order of first appearance,
/// which is what the searches work on. Every referenced vertex owns an
/// adjacency list, possibly empty.
#[derive(Clone, Debug)]
pub struct LabeledGraph<V> {
    labels: Vec<V>,
    ids: HashMap<V, VertexId>,
    out_edges: Vec<Vec<TaillessEdge>>,
    attributes: Vec<VertexAttributes>,
}

impl<V: VertexLabel> Default for LabeledGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VertexLabel> Graph for LabeledGraph<V> {
    fn number_of_vertices(&self) -> u32 {
        self.labels.len() as u32
    }

    fn number_of_edges(&self) -> u32 {
        self.out_edges.iter().map(Vec::len).sum::<usize>() as u32
    }

    fn out_edges(
        &self,
        tail: VertexId,
    ) -> Box<dyn ExactSizeIterator<Item = WeightedEdge> + Send + '_> {
        // Re-attaches the owning tail to each stored edge.
        struct EdgeIterator<'a> {
            edge_iter: std::slice::Iter<'a, TaillessEdge>,
            tail: VertexId,
        }

        impl<'a> Iterator for EdgeIterator<'a> {
            type Item = WeightedEdge;

            fn next(&mut self) -> Option<Self::Item> {
                self.edge_iter
                    .next()
                    .map(|tailless_edge| tailless_edge.set_tail(self.tail))
            }
        }

        impl<'a> ExactSizeIterator for EdgeIterator<'a> {
            fn len(&self) -> usize {
                self.edge_iter.len()
            }
        }

        let edge_iter = self
            .out_edges
            .get(tail as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter();

        Box::new(EdgeIterator { edge_iter, tail })
    }
}

impl<V: VertexLabel> LabeledGraph<V> {
    pub fn new() -> Self {
        LabeledGraph {
            labels: Vec::new(),
            ids: HashMap::new(),
            out_edges: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Returns the id of `vertex`, creating an isolated vertex if it is new.
    pub fn add_vertex(&mut self, vertex: V) -> VertexId {
        if let Some(&id) = self.ids.get(&vertex) {
            return id;
        }

        let id = self.labels.len() as VertexId;
        self.ids.insert(vertex.clone(), id);
        self.labels.push(vertex);
        self.out_edges.push(Vec::new());
        self.attributes.push(VertexAttributes::new());
        id
    }

    /// Inserts the edge `tail -> head`, and `head -> tail` if `undirected`.
    ///
    /// Both endpoints are created if absent. Negative and non-finite weights
    /// are rejected and leave the graph untouched.
    pub fn add_edge(
        &mut self,
        tail: V,
        head: V,
        weight: Weight,
        undirected: bool,
    ) -> Result<(), GraphError> {
        if !weight.is_finite() {
            return Err(GraphError::NonFiniteWeight {
                tail: format!("{:?}", tail),
                head: format!("{:?}", head),
                weight,
            });
        }
        if weight < 0.0 {
            return Err(GraphError::NegativeWeight {
                tail: format!("{:?}", tail),
                head: format!("{:?}", head),
                weight,
            });
        }

        let edge = WeightedEdge::new(self.add_vertex(tail), self.add_vertex(head), weight);
        self.out_edges[edge.tail() as usize].push(edge.tailless());
        if undirected {
            let reversed = edge.reversed();
            self.out_edges[reversed.tail() as usize].push(reversed.tailless());
        }

        Ok(())
    }

    pub fn contains(&self, vertex: &V) -> bool {
        self.ids.contains_key(vertex)
    }

    pub fn vertex_id(&self, vertex: &V) -> Result<VertexId, GraphError> {
        self.ids
            .get(vertex)
            .copied()
            .ok_or_else(|| GraphError::UnknownVertex(format!("{:?}", vertex)))
    }

    /// Label of an interned id, `None` if `id` was not handed out by this graph.
    pub fn vertex_label(&self, id: VertexId) -> Option<&V> {
        self.labels.get(id as usize)
    }

    // Ids passed here come from this graph's own adjacency lists.
    pub(crate) fn label(&self, id: VertexId) -> &V {
        &self.labels[id as usize]
    }

    /// All known vertices in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.labels.iter().sorted()
    }

    /// Vertex ids ordered by their labels.
    pub fn sorted_vertex_ids(&self) -> Vec<VertexId> {
        (0..self.number_of_vertices())
            .sorted_by(|&a, &b| self.label(a).cmp(self.label(b)))
            .collect()
    }

    /// Outgoing edges of `vertex` in insertion order.
    pub fn neighbors(&self, vertex: &V) -> Result<Vec<(&V, Weight)>, GraphError> {
        let id = self.vertex_id(vertex)?;
        Ok(self.out_edges[id as usize]
            .iter()
            .map(|edge| (self.label(edge.head()), edge.weight()))
            .collect())
    }

    /// Distinct heads of the out edges of `vertex`, in ascending label order.
    pub fn sorted_neighbor_ids(&self, vertex: VertexId) -> Vec<VertexId> {
        self.out_edges(vertex)
            .map(|edge| edge.head())
            .unique()
            .sorted_by(|&a, &b| self.label(a).cmp(self.label(b)))
            .collect()
    }

    pub fn edge_weight(&self, tail: &V, head: &V) -> Result<Option<Weight>, GraphError> {
        let tail = self.vertex_id(tail)?;
        let head = self.vertex_id(head)?;
        Ok(self.get_weight(tail, head))
    }

    pub fn degree(&self, vertex: &V) -> Result<usize, GraphError> {
        let id = self.vertex_id(vertex)?;
        Ok(self.out_edges[id as usize].len())
    }

    pub fn set_attribute(
        &mut self,
        vertex: &V,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), GraphError> {
        let id = self.vertex_id(vertex)?;
        self.attributes[id as usize].insert(key.into(), value.into());
        Ok(())
    }

    pub fn attributes(&self, vertex: &V) -> Result<&VertexAttributes, GraphError> {
        let id = self.vertex_id(vertex)?;
        Ok(&self.attributes[id as usize])
    }

    pub(crate) fn log_summary(&self) {
        debug!(
            vertices = self.number_of_vertices(),
            edges = self.number_of_edges(),
            "graph constructed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::LabeledGraph;
    use crate::{
        error::GraphError,
        graphs::{graph_functions::is_bidirectional, Graph},
    };

    #[test]
    fn undirected_edge_is_stored_both_ways() {
        let mut graph = LabeledGraph::new();
        graph.add_edge("a", "b", 4.0, true).unwrap();

        assert_eq!(graph.edge_weight(&"a", &"b").unwrap(), Some(4.0));
        assert_eq!(graph.edge_weight(&"b", &"a").unwrap(), Some(4.0));
        assert!(is_bidirectional(&graph));
    }

    #[test]
    fn directed_edge_creates_empty_head_entry() {
        let mut graph = LabeledGraph::new();
        graph.add_edge("a", "b", 1.5, false).unwrap();

        assert_eq!(graph.number_of_vertices(), 2);
        assert_eq!(graph.number_of_edges(), 1);
        assert!(graph.neighbors(&"b").unwrap().is_empty());
        assert_eq!(graph.edge_weight(&"b", &"a").unwrap(), None);
        assert!(!is_bidirectional(&graph));
    }

    #[test]
    fn rejects_negative_and_non_finite_weights() {
        let mut graph = LabeledGraph::new();

        assert!(matches!(
            graph.add_edge("a", "b", -1.0, true),
            Err(GraphError::NegativeWeight { .. })
        ));
        assert!(matches!(
            graph.add_edge("a", "b", f64::NAN, true),
            Err(GraphError::NonFiniteWeight { .. })
        ));
        assert!(matches!(
            graph.add_edge("a", "b", f64::INFINITY, true),
            Err(GraphError::NonFiniteWeight { .. })
        ));
        assert_eq!(graph.number_of_vertices(), 0);
    }

    #[test]
    fn neighbors_keep_insertion_order() {
        let mut graph = LabeledGraph::new();
        graph.add_edge("a", "c", 2.0, true).unwrap();
        graph.add_edge("a", "b", 1.0, true).unwrap();
        graph.add_edge("a", "c", 5.0, true).unwrap();

        assert_eq!(
            graph.neighbors(&"a").unwrap(),
            vec![(&"c", 2.0), (&"b", 1.0), (&"c", 5.0)]
        );
        assert_eq!(graph.edge_weight(&"a", &"c").unwrap(), Some(2.0));
        assert_eq!(graph.degree(&"a").unwrap(), 3);

        let a = graph.vertex_id(&"a").unwrap();
        let sorted: Vec<_> = graph
            .sorted_neighbor_ids(a)
            .into_iter()
            .map(|id| *graph.label(id))
            .collect();
        assert_eq!(sorted, vec!["b", "c"]);
    }

    #[test]
    fn unknown_vertex_is_reported() {
        let mut graph = LabeledGraph::new();
        graph.add_edge(1, 2, 1.0, true).unwrap();

        assert!(matches!(
            graph.neighbors(&3),
            Err(GraphError::UnknownVertex(_))
        ));
        assert!(matches!(
            graph.set_attribute(&3, "line", "M1"),
            Err(GraphError::UnknownVertex(_))
        ));
    }

    #[test]
    fn foreign_id_has_no_label() {
        let mut graph = LabeledGraph::new();
        graph.add_edge("a", "b", 1.0, false).unwrap();

        assert_eq!(graph.vertex_label(0), Some(&"a"));
        assert_eq!(graph.vertex_label(1), Some(&"b"));
        assert_eq!(graph.vertex_label(2), None);
        assert_eq!(graph.vertex_label(u32::MAX), None);
    }

    #[test]
    fn vertices_are_sorted_and_attributes_kept() {
        let mut graph = LabeledGraph::new();
        graph.add_edge("z", "m", 1.0, true).unwrap();
        graph.add_vertex("a");
        graph.set_attribute(&"m", "line", "M2").unwrap();

        assert_eq!(graph.vertices().copied().collect::<Vec<_>>(), vec!["a", "m", "z"]);
        assert_eq!(
            graph.attributes(&"m").unwrap().get("line").map(String::as_str),
            Some("M2")
        );
        assert!(graph.attributes(&"a").unwrap().is_empty());
        assert_eq!(graph.add_vertex("z"), 0);
    }
}
