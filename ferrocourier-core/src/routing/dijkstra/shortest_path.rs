use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use log::{debug, trace};
use petgraph::graph::NodeIndex;

use super::state::State;
use crate::{DeliveryGraph, Distance, Error, NodeId};

/// Result of a single source to target query.
///
/// An unreachable target is reported with an infinite `distance`; `path`
/// is then the broken predecessor chain ending at the target and does not
/// connect it to the source. Check [`ShortestPath::is_reachable`] before
/// trusting the path.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    pub path: Vec<NodeId>,
    pub distance: Distance,
}

impl ShortestPath {
    pub fn is_reachable(&self) -> bool {
        self.distance.is_finite()
    }
}

/// Dijkstra's algorithm between two nodes of the delivery network.
///
/// Blocked nodes are never entered, so a route to or from one is
/// unreachable unless `source == target`.
///
/// # Errors
///
/// `NodeNotFound` if either id is not part of the network
pub fn shortest_path(
    graph: &DeliveryGraph,
    source: NodeId,
    target: NodeId,
) -> Result<ShortestPath, Error> {
    let start = graph.index_of(source)?;
    let goal = graph.index_of(target)?;

    if start == goal {
        return Ok(ShortestPath {
            path: vec![source],
            distance: 0.0,
        });
    }

    let node_count = graph.node_count();
    let mut distances = vec![f64::INFINITY; node_count];
    let mut predecessors: Vec<Option<NodeIndex>> = vec![None; node_count];
    let mut visited = FixedBitSet::with_capacity(node_count);
    let mut heap = BinaryHeap::new();

    if graph.is_passable(start) {
        distances[start.index()] = 0.0;
        heap.push(State {
            cost: 0.0,
            id: source,
            node: start,
        });
    }

    while let Some(State { cost, id, node }) = heap.pop() {
        // Skip if we've found a better path or already settled the node
        if visited.contains(node.index()) || cost > distances[node.index()] {
            continue;
        }
        if node == goal {
            break;
        }
        visited.insert(node.index());
        trace!("Settled node {id} at {cost}");

        for next in graph.passable_neighbors(node) {
            if visited.contains(next.index()) {
                continue;
            }
            let next_cost = cost + graph.edge_length(node, next);
            if next_cost < distances[next.index()] {
                distances[next.index()] = next_cost;
                predecessors[next.index()] = Some(node);
                heap.push(State {
                    cost: next_cost,
                    id: graph.node_at(next).id,
                    node: next,
                });
            }
        }
    }

    // Follow predecessors backward from target to start
    let mut path = vec![target];
    let mut current = goal;
    while let Some(prev) = predecessors[current.index()] {
        path.push(graph.node_at(prev).id);
        current = prev;
    }
    path.reverse();

    let distance = distances[goal.index()];
    if distance.is_infinite() {
        debug!("Node {target} is unreachable from node {source}");
    }

    Ok(ShortestPath { path, distance })
}
