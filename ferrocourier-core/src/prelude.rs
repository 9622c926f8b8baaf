// Re-export key components
pub use crate::loading::{NetworkConfig, build_graph, load_network};
pub use crate::model::{CostMatrix, DeliveryGraph, Edge, Matrix, Node, NodeCategory, NodeKind};
pub use crate::pipeline::{DeliveryPlan, PipelineConfig, plan_deliveries};
pub use crate::routing::{
    DEFAULT_MAX_DEPTH, DEFAULT_PATH_LIMIT, Path, ShortestPath, alternative_paths,
    build_cost_matrix, shortest_path,
};
pub use crate::transport::{
    Assignment, AssignmentEntry, SinkhornConfig, TransportPlan, extract_assignment,
    solve_transport,
};

pub use crate::Error;

// Core types for the delivery network
pub use crate::Distance;
pub use crate::NodeId;
