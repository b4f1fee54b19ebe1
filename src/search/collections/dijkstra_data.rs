use crate::{
    graphs::{Distance, Graph, VertexId},
    search::path::Path,
};

/// Tentative distances and predecessors of a single-source search.
pub trait DijkstraData {
    /// Resets every vertex to unreached.
    fn clear(&mut self);

    /// `None` for the source and for unreached vertices.
    fn get_predecessor(&self, vertex: VertexId) -> Option<VertexId>;

    fn set_predecessor(&mut self, vertex: VertexId, predecessor: VertexId);

    /// Infinite if `vertex` was not reached.
    fn get_distance(&self, vertex: VertexId) -> Distance;

    fn set_distance(&mut self, vertex: VertexId, distance: Distance);

    /// Follows the predecessors back from `target`. `None` if `target` was
    /// not reached.
    fn get_path(&self, target: VertexId) -> Option<Path<VertexId>> {
        let distance = self.get_distance(target);
        if distance.is_infinite() {
            return None;
        }

        let mut vertices = vec![target];

        let mut predecessor = target;
        while let Some(new_predecessor) = self.get_predecessor(predecessor) {
            predecessor = new_predecessor;
            vertices.push(predecessor);
        }

        vertices.reverse();

        Some(Path { vertices, distance })
    }
}

/// Predecessors and distances of one search, indexed by vertex id.
#[derive(Clone, Debug)]
pub struct DijkstraDataVec {
    pub predecessors: Vec<VertexId>,
    pub distances: Vec<Distance>,
}

impl DijkstraDataVec {
    pub fn new(graph: &dyn Graph) -> Self {
        DijkstraDataVec {
            predecessors: vec![VertexId::MAX; graph.number_of_vertices() as usize],
            distances: vec![Distance::INFINITY; graph.number_of_vertices() as usize],
        }
    }
}

impl DijkstraData for DijkstraDataVec {
    fn clear(&mut self) {
        self.predecessors.fill(VertexId::MAX);
        self.distances.fill(Distance::INFINITY);
    }

    fn get_predecessor(&self, vertex: VertexId) -> Option<VertexId> {
        let predecessor = self.predecessors[vertex as usize];

        if predecessor == VertexId::MAX {
            return None;
        }

        Some(predecessor)
    }

    fn set_predecessor(&mut self, vertex: VertexId, predecessor: VertexId) {
        self.predecessors[vertex as usize] = predecessor;
    }

    fn get_distance(&self, vertex: VertexId) -> Distance {
        self.distances[vertex as usize]
    }

    fn set_distance(&mut self, vertex: VertexId, distance: Distance) {
        self.distances[vertex as usize] = distance
    }
}
