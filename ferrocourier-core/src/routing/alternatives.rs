//! Enumeration of alternative simple routes between two nodes,
//! used to show a customer the ways a courier could take.

use fixedbitset::FixedBitSet;
use itertools::Itertools;
use log::debug;
use petgraph::graph::NodeIndex;

use crate::{DeliveryGraph, Distance, Error, NodeId};

/// Number of routes returned by default
pub const DEFAULT_PATH_LIMIT: usize = 5;
/// Longest partial route, in nodes, explored before giving up on it
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// Simple route with its geometric length
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub nodes: Vec<NodeId>,
    pub length: Distance,
}

/// Depth-first search for cycle-free routes from `source` to `target`.
///
/// Routes longer than `max_depth` nodes are abandoned. The result is sorted
/// by node count, then by length, then by node sequence, and truncated to
/// `limit` routes.
///
/// # Errors
///
/// `NodeNotFound` if either id is not part of the network
pub fn alternative_paths(
    graph: &DeliveryGraph,
    source: NodeId,
    target: NodeId,
    limit: usize,
    max_depth: usize,
) -> Result<Vec<Path>, Error> {
    let start = graph.index_of(source)?;
    let goal = graph.index_of(target)?;

    if start == goal {
        return Ok(vec![Path {
            nodes: vec![source],
            length: 0.0,
        }]);
    }
    if !graph.is_passable(start) || !graph.is_passable(goal) || max_depth == 0 {
        return Ok(Vec::new());
    }

    let mut search = Search {
        graph,
        goal,
        max_depth,
        stack: Vec::with_capacity(max_depth),
        on_stack: FixedBitSet::with_capacity(graph.node_count()),
        found: Vec::new(),
    };
    search.walk(start);
    debug!(
        "Found {} simple routes from {source} to {target}",
        search.found.len()
    );

    let paths = search
        .found
        .into_iter()
        .map(|route| Path {
            length: route_length(graph, &route),
            nodes: route.iter().map(|&idx| graph.node_at(idx).id).collect(),
        })
        .sorted_by(|a, b| {
            a.nodes
                .len()
                .cmp(&b.nodes.len())
                .then_with(|| a.length.total_cmp(&b.length))
                .then_with(|| a.nodes.cmp(&b.nodes))
        })
        .take(limit)
        .collect();

    Ok(paths)
}

struct Search<'a> {
    graph: &'a DeliveryGraph,
    goal: NodeIndex,
    max_depth: usize,
    stack: Vec<NodeIndex>,
    on_stack: FixedBitSet,
    found: Vec<Vec<NodeIndex>>,
}

impl Search<'_> {
    fn walk(&mut self, node: NodeIndex) {
        self.stack.push(node);
        self.on_stack.insert(node.index());

        if node == self.goal {
            self.found.push(self.stack.clone());
        } else if self.stack.len() < self.max_depth {
            let graph = self.graph;
            for next in graph.passable_neighbors(node) {
                if !self.on_stack.contains(next.index()) {
                    self.walk(next);
                }
            }
        }

        self.on_stack.set(node.index(), false);
        self.stack.pop();
    }
}

fn route_length(graph: &DeliveryGraph, route: &[NodeIndex]) -> Distance {
    route
        .iter()
        .tuple_windows()
        .map(|(&a, &b)| graph.edge_length(a, b))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Edge, Node, shortest_path};

    // 0 - 1 - 3
    //  \  |  /
    //     2
    fn diamond() -> DeliveryGraph {
        let nodes = vec![
            Node::street(0, 0.0, 0.0),
            Node::street(1, 1.0, 0.0),
            Node::street(2, 1.0, -1.0),
            Node::street(3, 2.0, 0.0),
        ];
        let edges = [(0, 1), (1, 3), (0, 2), (2, 3), (1, 2)].map(Edge::from);
        DeliveryGraph::new(nodes, &edges).unwrap()
    }

    #[test]
    fn lists_every_simple_route_shortest_first() {
        let graph = diamond();
        let paths = alternative_paths(&graph, 0, 3, 10, DEFAULT_MAX_DEPTH).unwrap();
        let sequences: Vec<Vec<NodeId>> = paths.iter().map(|p| p.nodes.clone()).collect();
        assert_eq!(sequences.len(), 4);
        assert_eq!(sequences[0], vec![0, 1, 3]);
        assert_eq!(sequences[1], vec![0, 2, 3]);
        assert!(sequences.contains(&vec![0, 1, 2, 3]));
        assert!(sequences.contains(&vec![0, 2, 1, 3]));
        assert!((paths[0].length - 2.0).abs() < 1e-12);
        assert!((paths[1].length - 2.0 * 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn first_route_matches_shortest_path_here() {
        let graph = diamond();
        let paths = alternative_paths(&graph, 0, 3, DEFAULT_PATH_LIMIT, DEFAULT_MAX_DEPTH).unwrap();
        let best = shortest_path(&graph, 0, 3).unwrap();
        assert_eq!(paths[0].nodes, best.path);
    }

    #[test]
    fn limit_and_depth_are_respected() {
        let graph = diamond();
        assert_eq!(alternative_paths(&graph, 0, 3, 2, 10).unwrap().len(), 2);
        let short_only = alternative_paths(&graph, 0, 3, 10, 3).unwrap();
        assert_eq!(short_only.len(), 2);
        assert!(short_only.iter().all(|p| p.nodes.len() <= 3));
    }

    #[test]
    fn same_node_and_blocked_endpoints() {
        let nodes = vec![
            Node::street(0, 0.0, 0.0),
            Node::blocked(1, 1.0, 0.0),
            Node::street(2, 2.0, 0.0),
        ];
        let edges = [(0, 1), (1, 2)].map(Edge::from);
        let graph = DeliveryGraph::new(nodes, &edges).unwrap();

        let trivial = alternative_paths(&graph, 0, 0, 5, 20).unwrap();
        assert_eq!(trivial.len(), 1);
        assert_eq!(trivial[0].nodes, vec![0]);

        assert!(alternative_paths(&graph, 0, 2, 5, 20).unwrap().is_empty());
        assert!(alternative_paths(&graph, 0, 1, 5, 20).unwrap().is_empty());
        assert!(matches!(
            alternative_paths(&graph, 0, 9, 5, 20),
            Err(Error::NodeNotFound(9))
        ));
    }
}
