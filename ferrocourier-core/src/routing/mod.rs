//! Route search over the delivery network

pub mod alternatives;
pub mod cost_matrix;
pub mod dijkstra;

pub use alternatives::{DEFAULT_MAX_DEPTH, DEFAULT_PATH_LIMIT, Path, alternative_paths};
pub use cost_matrix::build_cost_matrix;
pub use dijkstra::{ShortestPath, shortest_path};
