use serde::Serialize;

use crate::{
    error::GraphError,
    graphs::{labeled_graph::LabeledGraph, Distance, VertexLabel},
    search::{
        dijkstra::shortest_path,
        path::path_weight,
        traversal::{breadth_first_search, depth_first_search},
    },
};

/// Weighted versus hop-minimal route between the same two vertices.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchComparison<V> {
    pub source: V,
    pub target: V,
    pub dijkstra_path: Option<Vec<V>>,
    pub dijkstra_cost: Distance,
    pub dijkstra_hops: Option<usize>,
    pub bfs_path: Option<Vec<V>>,
    pub bfs_cost: Distance,
    pub bfs_hops: Option<usize>,
    /// Extra weight of the BFS route over the Dijkstra route, zero when the
    /// target is unreachable.
    pub weight_saved: Distance,
}

/// Runs Dijkstra and BFS for the same pair. The BFS cost is the sum of the
/// edge weights along its path, which is never below the Dijkstra cost.
pub fn compare_searches<V: VertexLabel>(
    graph: &LabeledGraph<V>,
    source: &V,
    target: &V,
) -> Result<SearchComparison<V>, GraphError> {
    let dijkstra = shortest_path(graph, source, target)?;
    let bfs = breadth_first_search(graph, source, target)?;

    let dijkstra_cost = dijkstra
        .as_ref()
        .map(|path| path.distance)
        .unwrap_or(Distance::INFINITY);
    let bfs_cost = match bfs.path.as_ref() {
        Some(path) => path_weight(graph, path)?.unwrap_or(Distance::INFINITY),
        None => Distance::INFINITY,
    };
    let weight_saved = if dijkstra_cost.is_finite() && bfs_cost.is_finite() {
        bfs_cost - dijkstra_cost
    } else {
        0.0
    };

    Ok(SearchComparison {
        source: source.clone(),
        target: target.clone(),
        dijkstra_hops: dijkstra.as_ref().map(|path| path.hops()),
        dijkstra_path: dijkstra.map(|path| path.vertices),
        dijkstra_cost,
        bfs_hops: bfs.hops(),
        bfs_path: bfs.path,
        bfs_cost,
        weight_saved,
    })
}

/// Depth-first versus breadth-first search between the same two vertices.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TraversalComparison<V> {
    pub start: V,
    pub goal: V,
    pub dfs_path: Option<Vec<V>>,
    pub bfs_path: Option<Vec<V>>,
    /// Hops of the found path, 0 without a path.
    pub dfs_length: usize,
    pub bfs_length: usize,
    pub dfs_visited: usize,
    pub bfs_visited: usize,
}

pub fn compare_traversals<V: VertexLabel>(
    graph: &LabeledGraph<V>,
    start: &V,
    goal: &V,
) -> Result<TraversalComparison<V>, GraphError> {
    let dfs = depth_first_search(graph, start, goal)?;
    let bfs = breadth_first_search(graph, start, goal)?;

    Ok(TraversalComparison {
        start: start.clone(),
        goal: goal.clone(),
        dfs_length: dfs.hops().unwrap_or(0),
        bfs_length: bfs.hops().unwrap_or(0),
        dfs_visited: dfs.visit_order.len(),
        bfs_visited: bfs.visit_order.len(),
        dfs_path: dfs.path,
        bfs_path: bfs.path,
    })
}

/// Tally of several DFS versus BFS comparisons. Pairs without a path on
/// either side are not counted as shorter for anyone.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TraversalSummary {
    pub comparisons: usize,
    pub bfs_shorter: usize,
    pub dfs_shorter: usize,
    pub equal_length: usize,
    pub average_dfs_visited: f64,
    pub average_bfs_visited: f64,
}

pub fn summarize_traversals<V>(comparisons: &[TraversalComparison<V>]) -> TraversalSummary {
    let found = |comparison: &&TraversalComparison<V>| {
        comparison.dfs_path.is_some() && comparison.bfs_path.is_some()
    };
    let average = |visited: usize| {
        if comparisons.is_empty() {
            0.0
        } else {
            visited as f64 / comparisons.len() as f64
        }
    };

    TraversalSummary {
        comparisons: comparisons.len(),
        bfs_shorter: comparisons
            .iter()
            .filter(found)
            .filter(|comparison| comparison.bfs_length < comparison.dfs_length)
            .count(),
        dfs_shorter: comparisons
            .iter()
            .filter(found)
            .filter(|comparison| comparison.dfs_length < comparison.bfs_length)
            .count(),
        equal_length: comparisons
            .iter()
            .filter(found)
            .filter(|comparison| comparison.dfs_length == comparison.bfs_length)
            .count(),
        average_dfs_visited: average(comparisons.iter().map(|c| c.dfs_visited).sum()),
        average_bfs_visited: average(comparisons.iter().map(|c| c.bfs_visited).sum()),
    }
}

#[cfg(test)]
mod tests {
    use super::{compare_searches, compare_traversals, summarize_traversals};
    use crate::{error::GraphError, graphs::graph_factory::GraphFactory};

    #[test]
    fn fewer_hops_can_cost_more() {
        // direct edge a-c is expensive, the detour over b is cheap.
        let graph = GraphFactory::from_edges(
            &[("a", "c", 10.0), ("a", "b", 2.0), ("b", "c", 3.0)],
            true,
        )
        .unwrap();

        let comparison = compare_searches(&graph, &"a", &"c").unwrap();
        assert_eq!(comparison.dijkstra_path, Some(vec!["a", "b", "c"]));
        assert_eq!(comparison.dijkstra_cost, 5.0);
        assert_eq!(comparison.dijkstra_hops, Some(2));
        assert_eq!(comparison.bfs_path, Some(vec!["a", "c"]));
        assert_eq!(comparison.bfs_cost, 10.0);
        assert_eq!(comparison.bfs_hops, Some(1));
        assert_eq!(comparison.weight_saved, 5.0);
    }

    #[test]
    fn unreachable_target() {
        let mut graph = GraphFactory::from_edges(&[("a", "b", 1.0)], true).unwrap();
        graph.add_vertex("z");

        let comparison = compare_searches(&graph, &"a", &"z").unwrap();
        assert_eq!(comparison.dijkstra_path, None);
        assert_eq!(comparison.bfs_path, None);
        assert!(comparison.dijkstra_cost.is_infinite());
        assert!(comparison.bfs_cost.is_infinite());
        assert_eq!(comparison.weight_saved, 0.0);

        let traversals = compare_traversals(&graph, &"a", &"z").unwrap();
        assert_eq!(traversals.dfs_length, 0);
        assert_eq!(traversals.bfs_length, 0);
        assert_eq!(traversals.dfs_visited, 2);
        assert_eq!(traversals.bfs_visited, 2);
    }

    #[test]
    fn overflowing_weights_fail_instead_of_hiding_the_path() {
        let graph =
            GraphFactory::from_edges(&[("a", "b", 1e308), ("b", "c", 1e308)], false).unwrap();

        assert!(matches!(
            compare_searches(&graph, &"a", &"c"),
            Err(GraphError::DistanceOverflow { .. })
        ));
    }

    #[test]
    fn summary_counts_shorter_paths() {
        // dfs from a walks a-b-c-d, bfs takes the direct edge a-d
        let graph = GraphFactory::from_edges(
            &[("a", "b", 1.0), ("b", "c", 1.0), ("c", "d", 1.0), ("a", "d", 1.0)],
            true,
        )
        .unwrap();
        let comparisons = vec![
            compare_traversals(&graph, &"a", &"d").unwrap(),
            compare_traversals(&graph, &"a", &"b").unwrap(),
        ];

        let summary = summarize_traversals(&comparisons);
        assert_eq!(summary.comparisons, 2);
        assert_eq!(summary.bfs_shorter, 1);
        assert_eq!(summary.dfs_shorter, 0);
        assert_eq!(summary.equal_length, 1);
        // dfs visits a,b,c,d then a,b; bfs visits a,b,d then a,b
        assert_eq!(summary.average_dfs_visited, 3.0);
        assert_eq!(summary.average_bfs_visited, 2.5);

        assert_eq!(summarize_traversals::<&str>(&[]).average_bfs_visited, 0.0);
    }
}
