use std::collections::BTreeSet;

use geo::{Distance, Euclidean};
use hashbrown::HashMap;
use log::warn;
use petgraph::graph::{NodeIndex, UnGraph};

use super::components::{Edge, Node, NodeCategory};
use crate::{Error, NodeId};

/// Read-only delivery network.
///
/// Nodes keep their insertion order, which is the order restaurants and
/// users are listed in. Adjacency is precomputed by the underlying
/// petgraph graph, so neighbor lookups never rescan the edge list.
#[derive(Debug, Clone)]
pub struct DeliveryGraph {
    pub(crate) graph: UnGraph<Node, ()>,
    index: HashMap<NodeId, NodeIndex>,
}

impl DeliveryGraph {
    /// Build the network from its nodes and undirected edges
    ///
    /// # Errors
    ///
    /// `DuplicateNode` if two nodes share an id, `NodeNotFound` if an edge
    /// references an id missing from `nodes`, `InvalidData` if a node
    /// position is not finite
    pub fn new(nodes: Vec<Node>, edges: &[Edge]) -> Result<Self, Error> {
        let mut graph = UnGraph::with_capacity(nodes.len(), edges.len());
        let mut index = HashMap::with_capacity(nodes.len());

        for node in nodes {
            let id = node.id;
            if !node.geometry.x().is_finite() || !node.geometry.y().is_finite() {
                return Err(Error::InvalidData(format!(
                    "node {id} has a non-finite position"
                )));
            }
            if index.contains_key(&id) {
                return Err(Error::DuplicateNode(id));
            }
            index.insert(id, graph.add_node(node));
        }

        for edge in edges {
            let source = *index
                .get(&edge.source)
                .ok_or(Error::NodeNotFound(edge.source))?;
            let target = *index
                .get(&edge.target)
                .ok_or(Error::NodeNotFound(edge.target))?;

            if source == target {
                warn!("Ignoring self-loop edge on node {}", edge.source);
                continue;
            }
            if graph.find_edge(source, target).is_some() {
                warn!(
                    "Ignoring duplicate edge {} - {}",
                    edge.source, edge.target
                );
                continue;
            }
            graph.add_edge(source, target, ());
        }

        Ok(Self { graph, index })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, Error> {
        self.index_of(id).map(|idx| &self.graph[idx])
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// Ids of nodes of the given category, in insertion order
    pub fn ids_by_category(&self, category: NodeCategory) -> Vec<NodeId> {
        self.nodes()
            .filter(|node| node.category() == category)
            .map(|node| node.id)
            .collect()
    }

    pub fn restaurants(&self) -> Vec<NodeId> {
        self.ids_by_category(NodeCategory::Restaurant)
    }

    pub fn users(&self) -> Vec<NodeId> {
        self.ids_by_category(NodeCategory::User)
    }

    /// Every node joined to `id` by an edge, blocked nodes included
    pub fn neighbors(&self, id: NodeId) -> Result<BTreeSet<NodeId>, Error> {
        let idx = self.index_of(id)?;
        Ok(self
            .graph
            .neighbors(idx)
            .map(|next| self.graph[next].id)
            .collect())
    }

    /// Euclidean distance between the positions of two nodes.
    /// Defined for any pair, adjacent or not.
    pub fn weight(&self, a: NodeId, b: NodeId) -> Result<f64, Error> {
        let a = self.index_of(a)?;
        let b = self.index_of(b)?;
        Ok(self.edge_length(a, b))
    }

    pub(crate) fn index_of(&self, id: NodeId) -> Result<NodeIndex, Error> {
        self.index.get(&id).copied().ok_or(Error::NodeNotFound(id))
    }

    pub(crate) fn node_at(&self, idx: NodeIndex) -> &Node {
        &self.graph[idx]
    }

    pub(crate) fn is_passable(&self, idx: NodeIndex) -> bool {
        self.graph[idx].kind.is_passable()
    }

    /// Neighbors a route may step onto
    pub(crate) fn passable_neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> {
        self.graph
            .neighbors(idx)
            .filter(|&next| self.is_passable(next))
    }

    pub(crate) fn edge_length(&self, a: NodeIndex, b: NodeIndex) -> f64 {
        Euclidean.distance(self.graph[a].geometry, self.graph[b].geometry)
    }
}
