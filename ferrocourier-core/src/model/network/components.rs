//! Delivery network components - nodes, their categories and edges

use geo::Point;
use serde::Deserialize;

use crate::NodeId;

/// Category tag of a node, without metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    Street,
    User,
    Restaurant,
    #[serde(alias = "black")]
    Blocked,
}

/// Node category together with category specific metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Plain street intersection
    Street,
    /// Delivery point
    User { label: String },
    /// Pickup point
    Restaurant { name: String, emoji: Option<String> },
    /// Impassable node, routes never enter or leave it
    Blocked,
}

impl NodeKind {
    pub fn category(&self) -> NodeCategory {
        match self {
            NodeKind::Street => NodeCategory::Street,
            NodeKind::User { .. } => NodeCategory::User,
            NodeKind::Restaurant { .. } => NodeCategory::Restaurant,
            NodeKind::Blocked => NodeCategory::Blocked,
        }
    }

    pub fn is_passable(&self) -> bool {
        !matches!(self, NodeKind::Blocked)
    }
}

/// Delivery network node
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// Planar position, arbitrary units
    pub geometry: Point<f64>,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(id: NodeId, x: f64, y: f64, kind: NodeKind) -> Self {
        Self {
            id,
            geometry: Point::new(x, y),
            kind,
        }
    }

    pub fn street(id: NodeId, x: f64, y: f64) -> Self {
        Self::new(id, x, y, NodeKind::Street)
    }

    pub fn user(id: NodeId, x: f64, y: f64, label: impl Into<String>) -> Self {
        Self::new(
            id,
            x,
            y,
            NodeKind::User {
                label: label.into(),
            },
        )
    }

    pub fn restaurant(id: NodeId, x: f64, y: f64, name: impl Into<String>) -> Self {
        Self::new(
            id,
            x,
            y,
            NodeKind::Restaurant {
                name: name.into(),
                emoji: None,
            },
        )
    }

    pub fn blocked(id: NodeId, x: f64, y: f64) -> Self {
        Self::new(id, x, y, NodeKind::Blocked)
    }

    pub fn category(&self) -> NodeCategory {
        self.kind.category()
    }

    /// User label or restaurant name, `#id` for other nodes
    pub fn display_name(&self) -> String {
        match &self.kind {
            NodeKind::User { label } => label.clone(),
            NodeKind::Restaurant { name, .. } => name.clone(),
            NodeKind::Street | NodeKind::Blocked => format!("#{}", self.id),
        }
    }
}

/// Undirected street segment between two nodes.
/// Its weight is derived from the endpoint positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }
}

impl From<(NodeId, NodeId)> for Edge {
    fn from((source, target): (NodeId, NodeId)) -> Self {
        Self { source, target }
    }
}
