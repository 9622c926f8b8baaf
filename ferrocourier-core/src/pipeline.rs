//! End-to-end delivery planning: network -> cost matrix -> transport plan
//! -> assignment.

use log::{info, warn};
use serde::Deserialize;

use crate::model::matrix::validate_penalty;
use crate::{
    Assignment, CostMatrix, DeliveryGraph, Error, NodeId, SinkhornConfig, TransportPlan,
    build_cost_matrix, extract_assignment, solve_transport,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub sinkhorn: SinkhornConfig,
    /// Finite cost substituted for unreachable pairs before solving.
    /// Without it, an unreachable pair makes the solver reject the matrix.
    pub unreachable_penalty: Option<f64>,
}

impl PipelineConfig {
    /// # Errors
    ///
    /// `InvalidTransportInput` for bad solver parameters or a negative or
    /// non-finite penalty
    pub fn validate(&self) -> Result<(), Error> {
        self.sinkhorn.validate()?;
        if let Some(penalty) = self.unreachable_penalty {
            validate_penalty(penalty)?;
        }
        Ok(())
    }
}

/// Everything computed for one planning run
#[derive(Debug, Clone)]
pub struct DeliveryPlan {
    pub restaurants: Vec<NodeId>,
    pub users: Vec<NodeId>,
    /// Raw shortest path distances, unreachable pairs kept infinite
    pub cost_matrix: CostMatrix,
    pub transport_plan: TransportPlan,
    pub assignment: Assignment,
}

/// Plans deliveries between all restaurants and all users of the network,
/// both listed in network order, with uniform marginals.
///
/// # Errors
///
/// - `InvalidTransportInput` if the network has no restaurant or no user, or
///   if an unreachable pair remains without a configured penalty, or if the
///   configuration is invalid
/// - `NumericalDegeneracy` if the solver cannot scale the kernel
pub fn plan_deliveries(
    graph: &DeliveryGraph,
    config: &PipelineConfig,
) -> Result<DeliveryPlan, Error> {
    config.validate()?;

    let restaurants = graph.restaurants();
    let users = graph.users();
    if restaurants.is_empty() || users.is_empty() {
        return Err(Error::InvalidTransportInput(format!(
            "need at least one restaurant and one user, found {} and {}",
            restaurants.len(),
            users.len()
        )));
    }

    info!(
        "Planning deliveries for {} restaurants and {} users",
        restaurants.len(),
        users.len()
    );
    let cost_matrix = build_cost_matrix(graph, &restaurants, &users)?;

    let transport_plan = match config.unreachable_penalty {
        Some(penalty) if cost_matrix.has_unreachable() => {
            warn!("Unreachable pairs are priced at {penalty}");
            let penalised = cost_matrix.with_unreachable_penalty(penalty)?;
            solve_transport(&penalised, None, None, &config.sinkhorn)?
        }
        _ => solve_transport(&cost_matrix, None, None, &config.sinkhorn)?,
    };

    let assignment = extract_assignment(&transport_plan, &restaurants, &users, &cost_matrix)?;
    let collisions = assignment.collisions();
    if !collisions.is_empty() {
        info!("Users {collisions:?} were picked by more than one restaurant");
    }

    Ok(DeliveryPlan {
        restaurants,
        users,
        cost_matrix,
        transport_plan,
        assignment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Edge, Node};

    #[test]
    fn empty_sides_are_rejected() {
        let nodes = vec![Node::street(0, 0.0, 0.0), Node::user(1, 1.0, 0.0, "u")];
        let graph = DeliveryGraph::new(nodes, &[Edge::new(0, 1)]).unwrap();
        assert!(matches!(
            plan_deliveries(&graph, &PipelineConfig::default()),
            Err(Error::InvalidTransportInput(_))
        ));
    }

    #[test]
    fn bad_penalty_is_rejected_on_connected_networks() {
        let nodes = vec![
            Node::restaurant(0, 0.0, 0.0, "Pizza"),
            Node::user(1, 1.0, 0.0, "Home"),
        ];
        let graph = DeliveryGraph::new(nodes, &[Edge::new(0, 1)]).unwrap();

        for penalty in [-5.0, f64::NAN, f64::INFINITY] {
            let config = PipelineConfig {
                unreachable_penalty: Some(penalty),
                ..PipelineConfig::default()
            };
            assert!(matches!(
                plan_deliveries(&graph, &config),
                Err(Error::InvalidTransportInput(_))
            ));
        }
    }

    #[test]
    fn unreachable_pairs_need_a_penalty() {
        // Two separate islands, each with one restaurant and one user
        let nodes = vec![
            Node::restaurant(0, 0.0, 0.0, "west"),
            Node::user(1, 0.5, 0.0, "west home"),
            Node::restaurant(2, 10.0, 0.0, "east"),
            Node::user(3, 10.5, 0.0, "east home"),
        ];
        let edges = [(0, 1), (2, 3)].map(Edge::from);
        let graph = DeliveryGraph::new(nodes, &edges).unwrap();

        assert!(matches!(
            plan_deliveries(&graph, &PipelineConfig::default()),
            Err(Error::InvalidTransportInput(_))
        ));

        let config = PipelineConfig {
            unreachable_penalty: Some(2.0),
            ..PipelineConfig::default()
        };
        let plan = plan_deliveries(&graph, &config).unwrap();
        assert_eq!(plan.cost_matrix.get(0, 1), Some(f64::INFINITY));
        let pairs: Vec<_> = plan.assignment.iter().map(|e| (e.restaurant, e.user)).collect();
        assert_eq!(pairs, vec![(0, 1), (2, 3)]);
        assert!(plan.assignment.iter().all(|e| (e.distance - 0.5).abs() < 1e-12));
    }
}
