pub mod centrality;
pub mod comparison;
pub mod distance_matrix;
pub mod statistics;
