use std::{cmp::Ordering, collections::BinaryHeap};

use crate::graphs::{Distance, VertexId};

#[derive(Copy, Clone, Debug)]
pub struct DijkstraQueueElement {
    pub distance: Distance,
    pub vertex: VertexId,
}

impl DijkstraQueueElement {
    pub fn new(distance: Distance, vertex: VertexId) -> DijkstraQueueElement {
        DijkstraQueueElement { distance, vertex }
    }
}

// The priority queue depends on `Ord`.
// Explicitly implement the trait so the queue becomes a min-heap
// instead of a max-heap.
impl Ord for DijkstraQueueElement {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip both comparisons: the smallest distance pops first and on a
        // tie the smaller vertex id does.
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for DijkstraQueueElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for DijkstraQueueElement {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DijkstraQueueElement {}

/// A trait for a priority queue that manages vertices and their distances.
///
/// A vertex may be inserted several times with different distances. Nothing
/// is removed on a re-insert; consumers skip the stale entries when they pop
/// them.
pub trait VertexDistanceQueue {
    /// Clears all stored data, preparing for a new search.
    fn clear(&mut self);

    /// Inserts a vertex with its associated distance into the priority queue.
    fn insert(&mut self, vertex: VertexId, distance: Distance);

    /// Removes and returns the entry with the smallest distance or none if
    /// the queue is empty.
    fn pop(&mut self) -> Option<DijkstraQueueElement>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A priority queue implementation using a Binary Heap.
#[derive(Clone, Default)]
pub struct VertexDistanceQueueBinaryHeap {
    heap: BinaryHeap<DijkstraQueueElement>,
}

impl VertexDistanceQueueBinaryHeap {
    pub fn new() -> Self {
        VertexDistanceQueueBinaryHeap {
            heap: BinaryHeap::new(),
        }
    }
}

impl VertexDistanceQueue for VertexDistanceQueueBinaryHeap {
    fn clear(&mut self) {
        self.heap.clear();
    }

    fn insert(&mut self, vertex: VertexId, distance: Distance) {
        self.heap.push(DijkstraQueueElement::new(distance, vertex));
    }

    fn pop(&mut self) -> Option<DijkstraQueueElement> {
        self.heap.pop()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{VertexDistanceQueue, VertexDistanceQueueBinaryHeap};

    fn drain(queue: &mut VertexDistanceQueueBinaryHeap) -> Vec<(f64, u32)> {
        std::iter::from_fn(|| queue.pop())
            .map(|element| (element.distance, element.vertex))
            .collect()
    }

    #[test]
    fn pops_smallest_distance_first() {
        let mut queue = VertexDistanceQueueBinaryHeap::new();
        queue.insert(3, 7.5);
        queue.insert(1, 0.5);
        queue.insert(2, 3.0);

        assert_eq!(drain(&mut queue), vec![(0.5, 1), (3.0, 2), (7.5, 3)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn ties_pop_smaller_vertex_first() {
        let mut queue = VertexDistanceQueueBinaryHeap::new();
        queue.insert(9, 1.0);
        queue.insert(4, 1.0);
        queue.insert(6, 1.0);

        assert_eq!(drain(&mut queue), vec![(1.0, 4), (1.0, 6), (1.0, 9)]);
    }

    #[test]
    fn keeps_duplicate_entries_of_a_vertex() {
        let mut queue = VertexDistanceQueueBinaryHeap::new();
        queue.insert(5, 10.0);
        queue.insert(5, 4.0);
        assert_eq!(queue.len(), 2);

        assert_eq!(drain(&mut queue), vec![(4.0, 5), (10.0, 5)]);

        queue.insert(1, 1.0);
        queue.clear();
        assert!(queue.pop().is_none());
    }
}
