use crate::graphs::{Graph, VertexId};

/// Visited flags of a traversal.
pub trait VertexExpandedData {
    /// Marks `vertex` as expanded and returns whether it already was.
    fn expand(&mut self, vertex: VertexId) -> bool;

    fn is_expanded(&self, vertex: VertexId) -> bool;
}

pub struct VertexExpandedDataVec {
    expanded: Vec<bool>,
}

impl VertexExpandedDataVec {
    pub fn new(graph: &dyn Graph) -> Self {
        VertexExpandedDataVec {
            expanded: vec![false; graph.number_of_vertices() as usize],
        }
    }
}

impl VertexExpandedData for VertexExpandedDataVec {
    fn expand(&mut self, vertex: VertexId) -> bool {
        let is_expanded = self.expanded[vertex as usize];
        self.expanded[vertex as usize] = true;
        is_expanded
    }

    fn is_expanded(&self, vertex: VertexId) -> bool {
        self.expanded[vertex as usize]
    }
}
