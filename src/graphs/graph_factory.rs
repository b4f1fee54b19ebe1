use std::{fs::File, io::BufReader, path::Path};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{
    labeled_graph::{LabeledGraph, VertexAttributes},
    VertexLabel, Weight,
};
use crate::error::GraphError;

fn default_undirected() -> bool {
    true
}

/// Serialized form of a graph as read by the binaries.
///
/// ```json
/// {
///   "undirected": true,
///   "vertices": [{ "name": "A", "attributes": { "line": "M1" } }],
///   "edges": [{ "tail": "A", "head": "B", "weight": 10 }]
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphDescription {
    #[serde(default = "default_undirected")]
    pub undirected: bool,
    #[serde(default)]
    pub vertices: Vec<VertexDescription>,
    pub edges: Vec<EdgeDescription>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VertexDescription {
    pub name: String,
    #[serde(default)]
    pub attributes: VertexAttributes,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EdgeDescription {
    pub tail: String,
    pub head: String,
    pub weight: Weight,
}

#[derive(Clone)]
pub struct GraphFactory {}

impl GraphFactory {
    pub fn from_json_file(path: &Path) -> Result<LabeledGraph<String>, GraphError> {
        let reader = BufReader::new(File::open(path)?);
        let description: GraphDescription = serde_json::from_reader(reader)?;
        info!(path = %path.display(), "read graph description");
        Self::from_description(&description)
    }

    pub fn from_description(
        description: &GraphDescription,
    ) -> Result<LabeledGraph<String>, GraphError> {
        let mut graph = LabeledGraph::new();

        for vertex in description.vertices.iter() {
            graph.add_vertex(vertex.name.clone());
            for (key, value) in vertex.attributes.iter() {
                graph.set_attribute(&vertex.name, key.as_str(), value.as_str())?;
            }
        }

        for edge in description.edges.iter() {
            graph.add_edge(
                edge.tail.clone(),
                edge.head.clone(),
                edge.weight,
                description.undirected,
            )?;
        }

        graph.log_summary();
        Ok(graph)
    }

    pub fn from_edges<V: VertexLabel>(
        edges: &[(V, V, Weight)],
        undirected: bool,
    ) -> Result<LabeledGraph<V>, GraphError> {
        let mut graph = LabeledGraph::new();
        for (tail, head, weight) in edges.iter() {
            graph.add_edge(tail.clone(), head.clone(), *weight, undirected)?;
        }

        graph.log_summary();
        Ok(graph)
    }

    /// Random graph over the vertices `0..number_of_vertices` with integral
    /// weights in `1..=max_weight`. Self loops are never generated.
    pub fn random<R: Rng>(
        rng: &mut R,
        number_of_vertices: u32,
        number_of_edges: u32,
        max_weight: u32,
        undirected: bool,
    ) -> Result<LabeledGraph<u32>, GraphError> {
        let mut graph = LabeledGraph::new();
        (0..number_of_vertices).for_each(|vertex| {
            graph.add_vertex(vertex);
        });

        if number_of_vertices > 1 {
            for _ in 0..number_of_edges {
                // guarantee that tail != head
                let tail = rng.gen_range(0..number_of_vertices);
                let mut head = rng.gen_range(0..number_of_vertices - 1);
                if head >= tail {
                    head += 1;
                }
                let weight = rng.gen_range(1..=max_weight.max(1)) as Weight;
                graph.add_edge(tail, head, weight, undirected)?;
            }
        }

        graph.log_summary();
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::{GraphDescription, GraphFactory};
    use crate::{
        error::GraphError,
        graphs::{graph_functions::is_bidirectional, Graph},
    };

    #[test]
    fn description_builds_graph_with_attributes() {
        let description: GraphDescription = serde_json::from_str(
            r#"{
                "vertices": [
                    { "name": "A", "attributes": { "line": "M1" } },
                    { "name": "Z" }
                ],
                "edges": [
                    { "tail": "A", "head": "B", "weight": 2 },
                    { "tail": "B", "head": "C", "weight": 3.5 }
                ]
            }"#,
        )
        .unwrap();

        let graph = GraphFactory::from_description(&description).unwrap();
        assert_eq!(graph.number_of_vertices(), 4);
        assert!(is_bidirectional(&graph));
        assert_eq!(
            graph.edge_weight(&"C".to_string(), &"B".to_string()).unwrap(),
            Some(3.5)
        );
        assert_eq!(
            graph
                .attributes(&"A".to_string())
                .unwrap()
                .get("line")
                .map(String::as_str),
            Some("M1")
        );
        assert!(graph.neighbors(&"Z".to_string()).unwrap().is_empty());
    }

    #[test]
    fn description_with_negative_weight_is_rejected() {
        let description: GraphDescription = serde_json::from_str(
            r#"{ "undirected": false, "edges": [{ "tail": "A", "head": "B", "weight": -2 }] }"#,
        )
        .unwrap();

        assert!(matches!(
            GraphFactory::from_description(&description),
            Err(GraphError::NegativeWeight { .. })
        ));
    }

    #[test]
    fn random_graph_has_requested_size() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = GraphFactory::random(&mut rng, 20, 50, 9, true).unwrap();

        assert_eq!(graph.number_of_vertices(), 20);
        assert_eq!(graph.number_of_edges(), 100);
        assert!(is_bidirectional(&graph));
    }
}
