pub mod cancellation;
pub mod collections;
pub mod dijkstra;
pub mod path;
pub mod traversal;
