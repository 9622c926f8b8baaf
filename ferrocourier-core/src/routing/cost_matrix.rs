use log::{debug, warn};

use super::dijkstra::shortest_path;
use crate::{CostMatrix, DeliveryGraph, Error, NodeId};

/// Shortest path distance from every restaurant to every user.
///
/// Row `i` follows `restaurants[i]` and column `j` follows `users[j]`.
/// Unreachable pairs are kept as `f64::INFINITY`.
///
/// # Errors
///
/// `NodeNotFound` if any id is not part of the network
pub fn build_cost_matrix(
    graph: &DeliveryGraph,
    restaurants: &[NodeId],
    users: &[NodeId],
) -> Result<CostMatrix, Error> {
    // Fail before routing anything if an id is unknown
    for &id in restaurants.iter().chain(users) {
        graph.index_of(id)?;
    }

    let mut data = Vec::with_capacity(restaurants.len() * users.len());
    for &restaurant in restaurants {
        for &user in users {
            let route = shortest_path(graph, restaurant, user)?;
            if !route.is_reachable() {
                warn!("User {user} is unreachable from restaurant {restaurant}");
            }
            data.push(route.distance);
        }
    }

    debug!(
        "Built {}x{} cost matrix",
        restaurants.len(),
        users.len()
    );
    CostMatrix::new(restaurants.len(), users.len(), data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Edge, Node};

    fn graph() -> DeliveryGraph {
        let nodes = vec![
            Node::restaurant(10, 0.0, 0.0, "Pizza"),
            Node::street(1, 1.0, 0.0),
            Node::user(20, 2.0, 0.0, "Home"),
            Node::user(21, 1.0, 1.0, "Work"),
            Node::restaurant(11, 3.0, 0.0, "Salad"),
            Node::user(22, 9.0, 9.0, "Island"),
        ];
        let edges = [(10, 1), (1, 20), (1, 21), (20, 11)].map(Edge::from);
        DeliveryGraph::new(nodes, &edges).unwrap()
    }

    #[test]
    fn rows_follow_restaurants_and_columns_follow_users() {
        let graph = graph();
        let cost = build_cost_matrix(&graph, &[10, 11], &[20, 21, 22]).unwrap();
        assert_eq!(cost.shape(), (2, 3));
        assert!((cost.get(0, 0).unwrap() - 2.0).abs() < 1e-12);
        assert!((cost.get(0, 1).unwrap() - 2.0).abs() < 1e-12);
        assert!((cost.get(1, 0).unwrap() - 1.0).abs() < 1e-12);
        assert!((cost.get(1, 1).unwrap() - 3.0).abs() < 1e-12);
        assert_eq!(cost.get(0, 2), Some(f64::INFINITY));
        assert!(cost.has_unreachable());

        let swapped = build_cost_matrix(&graph, &[11, 10], &[20, 21, 22]).unwrap();
        assert_eq!(swapped.row(0), cost.row(1));
    }

    #[test]
    fn repeated_builds_are_identical() {
        let graph = graph();
        let first = build_cost_matrix(&graph, &[10, 11], &[20, 21]).unwrap();
        let second = build_cost_matrix(&graph, &[10, 11], &[20, 21]).unwrap();
        let bits = |m: &CostMatrix| m.as_slice().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&first), bits(&second));
    }

    #[test]
    fn unknown_ids_fail_eagerly() {
        let graph = graph();
        assert!(matches!(
            build_cost_matrix(&graph, &[10], &[20, 77]),
            Err(Error::NodeNotFound(77))
        ));
    }
}
