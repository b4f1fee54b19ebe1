use serde::Serialize;

use super::{VertexId, Weight};

/// Directed edge between two interned vertices.
#[derive(Clone, Copy, PartialEq, Serialize, Debug)]
pub struct WeightedEdge {
    tail: VertexId,
    head: VertexId,
    weight: Weight,
}

impl WeightedEdge {
    pub fn new(tail: VertexId, head: VertexId, weight: Weight) -> WeightedEdge {
        WeightedEdge { tail, head, weight }
    }

    pub fn tail(&self) -> VertexId {
        self.tail
    }

    pub fn head(&self) -> VertexId {
        self.head
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn reversed(&self) -> WeightedEdge {
        WeightedEdge {
            head: self.tail,
            tail: self.head,
            weight: self.weight,
        }
    }

    pub fn tailless(&self) -> TaillessEdge {
        TaillessEdge {
            head: self.head,
            weight: self.weight,
        }
    }
}

/// Edge as stored in an adjacency list, the tail being the list owner.
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct TaillessEdge {
    head: VertexId,
    weight: Weight,
}

impl TaillessEdge {
    pub fn head(&self) -> VertexId {
        self.head
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn set_tail(&self, tail: VertexId) -> WeightedEdge {
        WeightedEdge::new(tail, self.head, self.weight)
    }
}
