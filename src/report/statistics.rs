use itertools::Itertools;
use serde::Serialize;

use super::distance_matrix::DistanceMatrix;
use crate::{
    error::GraphError,
    graphs::{
        graph_functions::{degree_vec, hop_distances},
        labeled_graph::LabeledGraph,
        Distance, Graph, VertexLabel,
    },
};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Route<V> {
    pub source: V,
    pub target: V,
    pub distance: Distance,
}

/// Summary of all finite distances between distinct vertices.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PathStatistics<V> {
    pub longest: Route<V>,
    pub shortest: Route<V>,
    pub mean: Distance,
    pub median: Distance,
    pub standard_deviation: Distance,
    /// Mean distance from each vertex to the vertices it reaches, most
    /// accessible first. Vertices reaching nothing are left out.
    pub accessibility: Vec<(V, Distance)>,
}

impl<V: VertexLabel> PathStatistics<V> {
    /// `None` if no vertex reaches another one.
    pub fn new(matrix: &DistanceMatrix<V>) -> Option<Self> {
        let routes = matrix
            .iter()
            .filter(|((source, target), distance)| source != target && distance.is_finite())
            .collect_vec();

        // Strict comparisons keep the first extreme in row order.
        let mut longest = *routes.first()?;
        let mut shortest = longest;
        for &route in routes.iter() {
            if route.1 > longest.1 {
                longest = route;
            }
            if route.1 < shortest.1 {
                shortest = route;
            }
        }

        let distances = routes
            .iter()
            .map(|(_, distance)| *distance)
            .sorted_by(|a, b| a.total_cmp(b))
            .collect_vec();
        let mean = distances.iter().sum::<Distance>() / distances.len() as Distance;
        let median = if distances.len() % 2 == 1 {
            distances[distances.len() / 2]
        } else {
            (distances[distances.len() / 2 - 1] + distances[distances.len() / 2]) / 2.0
        };
        let variance = distances
            .iter()
            .map(|distance| (distance - mean).powi(2))
            .sum::<Distance>()
            / distances.len() as Distance;

        let accessibility = routes
            .iter()
            .into_group_map_by(|((source, _), _)| *source)
            .into_iter()
            .map(|(source, routes)| {
                let total = routes.iter().map(|(_, distance)| distance).sum::<Distance>();
                (source.clone(), total / routes.len() as Distance)
            })
            .sorted_by(|(a_vertex, a), (b_vertex, b)| {
                a.total_cmp(b).then_with(|| a_vertex.cmp(b_vertex))
            })
            .collect();

        let to_route = |((source, target), distance): ((&V, &V), Distance)| Route {
            source: source.clone(),
            target: target.clone(),
            distance,
        };

        Some(PathStatistics {
            longest: to_route(longest),
            shortest: to_route(shortest),
            mean,
            median,
            standard_deviation: variance.sqrt(),
            accessibility,
        })
    }
}

/// Structural figures of a graph.
///
/// `diameter` and `radius` are taken over the weighted shortest distances,
/// `hop_diameter` and `hop_radius` over the number of edges of hop-minimal
/// paths.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphSummary<V> {
    pub number_of_vertices: u32,
    /// Stored directed edges; an undirected edge counts twice.
    pub number_of_edges: u32,
    /// Out degree per vertex, highest first.
    pub degrees: Vec<(V, u32)>,
    pub average_degree: f64,
    pub density: f64,
    /// Largest eccentricity over the weighted distances, `None` unless every
    /// vertex reaches every other one.
    pub diameter: Option<Distance>,
    pub radius: Option<Distance>,
    pub hop_diameter: Option<u32>,
    pub hop_radius: Option<u32>,
}

impl<V: VertexLabel> GraphSummary<V> {
    pub fn new(graph: &LabeledGraph<V>) -> Result<Self, GraphError> {
        let matrix = DistanceMatrix::new(graph)?;
        Ok(Self::with_matrix(graph, &matrix))
    }

    pub fn with_matrix(graph: &LabeledGraph<V>, matrix: &DistanceMatrix<V>) -> Self {
        let number_of_vertices = graph.number_of_vertices();
        let number_of_edges = graph.number_of_edges();

        let degrees = degree_vec(graph)
            .into_iter()
            .enumerate()
            .map(|(vertex, degree)| (graph.label(vertex as u32).clone(), degree))
            .sorted_by(|(a_vertex, a), (b_vertex, b)| {
                b.cmp(a).then_with(|| a_vertex.cmp(b_vertex))
            })
            .collect();

        let average_degree = if number_of_vertices == 0 {
            0.0
        } else {
            number_of_edges as f64 / number_of_vertices as f64
        };
        let density = if number_of_vertices < 2 {
            0.0
        } else {
            let n = number_of_vertices as f64;
            number_of_edges as f64 / (n * (n - 1.0))
        };

        let eccentricities = matrix
            .vertices()
            .iter()
            .filter_map(|vertex| matrix.row(vertex).ok())
            .map(|row| row.iter().copied().fold(0.0, Distance::max))
            .collect_vec();
        let connected = !eccentricities.is_empty()
            && eccentricities
                .iter()
                .all(|eccentricity| eccentricity.is_finite());
        let (diameter, radius) = if connected {
            (
                eccentricities.iter().copied().reduce(Distance::max),
                eccentricities.iter().copied().reduce(Distance::min),
            )
        } else {
            (None, None)
        };

        let hop_eccentricities = (0..number_of_vertices)
            .map(|vertex| {
                hop_distances(graph, vertex)
                    .into_iter()
                    .try_fold(0, |eccentricity, hops| Some(eccentricity.max(hops?)))
            })
            .collect::<Option<Vec<u32>>>();
        let (hop_diameter, hop_radius) = match hop_eccentricities {
            Some(eccentricities) => (
                eccentricities.iter().copied().max(),
                eccentricities.iter().copied().min(),
            ),
            None => (None, None),
        };

        GraphSummary {
            number_of_vertices,
            number_of_edges,
            degrees,
            average_degree,
            density,
            diameter,
            radius,
            hop_diameter,
            hop_radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GraphSummary, PathStatistics};
    use crate::{graphs::graph_factory::GraphFactory, report::distance_matrix::DistanceMatrix};

    #[test]
    fn statistics_of_a_path_graph() {
        // a -1- b -2- c
        let graph =
            GraphFactory::from_edges(&[("a", "b", 1.0), ("b", "c", 2.0)], true).unwrap();
        let matrix = DistanceMatrix::new(&graph).unwrap();
        let statistics = PathStatistics::new(&matrix).unwrap();

        assert_eq!(statistics.longest.source, "a");
        assert_eq!(statistics.longest.target, "c");
        assert_eq!(statistics.longest.distance, 3.0);
        assert_eq!(statistics.shortest.source, "a");
        assert_eq!(statistics.shortest.target, "b");
        // distances: 1, 3, 1, 2, 3, 2
        assert_eq!(statistics.mean, 2.0);
        assert_eq!(statistics.median, 2.0);
        assert!((statistics.standard_deviation - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(
            statistics.accessibility,
            vec![("b", 1.5), ("a", 2.0), ("c", 2.5)]
        );
    }

    #[test]
    fn statistics_need_a_reachable_pair() {
        let mut graph = GraphFactory::from_edges::<&str>(&[], true).unwrap();
        graph.add_vertex("a");
        graph.add_vertex("b");

        assert_eq!(PathStatistics::new(&DistanceMatrix::new(&graph).unwrap()), None);
    }

    #[test]
    fn summary_of_a_triangle_with_tail() {
        let graph = GraphFactory::from_edges(
            &[("a", "b", 1.0), ("b", "c", 1.0), ("c", "a", 1.0), ("c", "d", 4.0)],
            true,
        )
        .unwrap();
        let summary = GraphSummary::new(&graph).unwrap();

        assert_eq!(summary.number_of_vertices, 4);
        assert_eq!(summary.number_of_edges, 8);
        assert_eq!(summary.degrees[0], ("c", 3));
        assert_eq!(summary.degrees[3], ("d", 1));
        assert_eq!(summary.average_degree, 2.0);
        assert!((summary.density - 8.0 / 12.0).abs() < 1e-12);
        assert_eq!(summary.diameter, Some(5.0));
        assert_eq!(summary.radius, Some(4.0));
        assert_eq!(summary.hop_diameter, Some(2));
        assert_eq!(summary.hop_radius, Some(1));
    }

    #[test]
    fn disconnected_graph_has_no_diameter() {
        let mut graph = GraphFactory::from_edges(&[("a", "b", 1.0)], true).unwrap();
        graph.add_vertex("z");

        let summary = GraphSummary::new(&graph).unwrap();
        assert_eq!(summary.diameter, None);
        assert_eq!(summary.radius, None);
        assert_eq!(summary.hop_diameter, None);
        assert_eq!(summary.hop_radius, None);
    }
}
