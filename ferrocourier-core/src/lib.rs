//! Delivery routing over small street networks.
//!
//! Shortest paths between restaurants and delivery points are turned into a
//! cost matrix, which an entropy regularized optimal transport solver
//! (Sinkhorn) converts into a soft restaurant to user plan. A greedy
//! extractor then picks the most probable user for every restaurant.

pub mod error;
pub mod loading;
pub mod model;
pub mod pipeline;
pub mod prelude;
pub mod routing;
pub mod transport;

pub use error::{Axis, Error};
pub use loading::{NetworkConfig, build_graph, load_network};
pub use model::{CostMatrix, DeliveryGraph, Edge, Matrix, Node, NodeCategory, NodeKind};
pub use pipeline::{DeliveryPlan, PipelineConfig, plan_deliveries};
pub use routing::{Path, ShortestPath, alternative_paths, build_cost_matrix, shortest_path};
pub use transport::{
    Assignment, AssignmentEntry, SinkhornConfig, TransportPlan, extract_assignment,
    solve_transport,
};

/// Stable node identifier, unique within a network
pub type NodeId = u32;
/// Planar distance in network units
pub type Distance = f64;
