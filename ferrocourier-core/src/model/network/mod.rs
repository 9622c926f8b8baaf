//! Street network with restaurants and delivery points

pub mod components;
pub mod graph;

pub use components::{Edge, Node, NodeCategory, NodeKind};
pub use graph::DeliveryGraph;
