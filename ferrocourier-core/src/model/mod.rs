//! Data model for delivery routing
//!
//! Contains the delivery network and the dense matrices produced on top of it.

pub mod matrix;
pub mod network;

pub use matrix::{CostMatrix, Matrix};
pub use network::{DeliveryGraph, Edge, Node, NodeCategory, NodeKind};
