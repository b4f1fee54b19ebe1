//! Hop-count searches between two vertices. Edge weights are ignored and
//! neighbours are expanded in ascending label order.

use std::collections::VecDeque;

use serde::Serialize;
use tracing::{debug, warn};

use super::{
    cancellation::CancellationFlag,
    collections::vertex_expanded_data::{VertexExpandedData, VertexExpandedDataVec},
};
use crate::{
    error::GraphError,
    graphs::{labeled_graph::LabeledGraph, VertexId, VertexLabel},
};

/// Outcome of a traversal: the found path, if any, and every vertex taken
/// off the frontier in the order it was taken.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TraversalResult<V> {
    pub path: Option<Vec<V>>,
    pub visit_order: Vec<V>,
}

impl<V> TraversalResult<V> {
    /// Number of edges of the found path.
    pub fn hops(&self) -> Option<usize> {
        self.path
            .as_ref()
            .map(|path| path.len().saturating_sub(1))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraversalStrategy {
    BreadthFirst,
    DepthFirst,
}

pub fn breadth_first_search<V: VertexLabel>(
    graph: &LabeledGraph<V>,
    start: &V,
    goal: &V,
) -> Result<TraversalResult<V>, GraphError> {
    find_path(
        graph,
        start,
        goal,
        TraversalStrategy::BreadthFirst,
        &CancellationFlag::new(),
    )
}

pub fn depth_first_search<V: VertexLabel>(
    graph: &LabeledGraph<V>,
    start: &V,
    goal: &V,
) -> Result<TraversalResult<V>, GraphError> {
    find_path(
        graph,
        start,
        goal,
        TraversalStrategy::DepthFirst,
        &CancellationFlag::new(),
    )
}

/// Searches a path from `start` to `goal` with the given strategy.
///
/// An unreachable goal yields `path: None`; unknown endpoints are an error.
pub fn find_path<V: VertexLabel>(
    graph: &LabeledGraph<V>,
    start: &V,
    goal: &V,
    strategy: TraversalStrategy,
    cancellation: &CancellationFlag,
) -> Result<TraversalResult<V>, GraphError> {
    let start = graph.vertex_id(start)?;
    let goal = graph.vertex_id(goal)?;

    let (path, visit_order) = match strategy {
        TraversalStrategy::BreadthFirst => bfs(graph, start, goal, cancellation)?,
        TraversalStrategy::DepthFirst => dfs(graph, start, goal, cancellation)?,
    };

    debug!(
        ?strategy,
        visited = visit_order.len(),
        found = path.is_some(),
        "traversal finished"
    );

    let to_labels = |vertices: Vec<VertexId>| -> Vec<V> {
        vertices
            .into_iter()
            .map(|vertex| graph.label(vertex).clone())
            .collect()
    };

    Ok(TraversalResult {
        path: path.map(to_labels),
        visit_order: to_labels(visit_order),
    })
}

type SearchOutcome = (Option<Vec<VertexId>>, Vec<VertexId>);

fn check_cancelled(cancellation: &CancellationFlag, visited: usize) -> Result<(), GraphError> {
    if cancellation.is_cancelled() {
        warn!(visited, "traversal cancelled");
        return Err(GraphError::Cancelled);
    }
    Ok(())
}

// Vertices are marked when enqueued, so the first path reaching a vertex has
// the fewest hops.
fn bfs<V: VertexLabel>(
    graph: &LabeledGraph<V>,
    start: VertexId,
    goal: VertexId,
    cancellation: &CancellationFlag,
) -> Result<SearchOutcome, GraphError> {
    let mut expanded = VertexExpandedDataVec::new(graph);
    let mut queue = VecDeque::from([vec![start]]);
    let mut visit_order = Vec::new();
    expanded.expand(start);

    while let Some(path) = queue.pop_front() {
        check_cancelled(cancellation, visit_order.len())?;

        let Some(&vertex) = path.last() else {
            continue;
        };
        visit_order.push(vertex);

        if vertex == goal {
            return Ok((Some(path), visit_order));
        }

        for neighbor in graph.sorted_neighbor_ids(vertex) {
            if !expanded.expand(neighbor) {
                let mut new_path = path.clone();
                new_path.push(neighbor);
                queue.push_back(new_path);
            }
        }
    }

    Ok((None, visit_order))
}

// Vertices are marked when popped. Neighbours are pushed in descending order
// so that the smallest one is popped first.
fn dfs<V: VertexLabel>(
    graph: &LabeledGraph<V>,
    start: VertexId,
    goal: VertexId,
    cancellation: &CancellationFlag,
) -> Result<SearchOutcome, GraphError> {
    let mut expanded = VertexExpandedDataVec::new(graph);
    let mut stack = vec![vec![start]];
    let mut visit_order = Vec::new();

    while let Some(path) = stack.pop() {
        check_cancelled(cancellation, visit_order.len())?;

        let Some(&vertex) = path.last() else {
            continue;
        };
        if expanded.expand(vertex) {
            continue;
        }
        visit_order.push(vertex);

        if vertex == goal {
            return Ok((Some(path), visit_order));
        }

        for neighbor in graph.sorted_neighbor_ids(vertex).into_iter().rev() {
            if !expanded.is_expanded(neighbor) {
                let mut new_path = path.clone();
                new_path.push(neighbor);
                stack.push(new_path);
            }
        }
    }

    Ok((None, visit_order))
}
