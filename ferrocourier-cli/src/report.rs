//! Plain text and JSON rendering of planning and routing results.

use std::fmt::Write;

use ferrocourier_core::prelude::*;
use itertools::Itertools;
use serde::Serialize;

/// Formats a distance with three decimals, `unreachable` when infinite
pub fn format_distance(distance: Distance) -> String {
    if distance.is_finite() {
        format!("{distance:.3}")
    } else {
        "unreachable".to_string()
    }
}

fn label(graph: &DeliveryGraph, id: NodeId) -> String {
    let Ok(node) = graph.node(id) else {
        return format!("#{id}");
    };
    match &node.kind {
        NodeKind::Restaurant {
            name,
            emoji: Some(emoji),
        } => format!("{emoji} {name}"),
        _ => node.display_name(),
    }
}

/// Restaurant by user distance table followed by the assignment
pub fn render_plan(graph: &DeliveryGraph, plan: &DeliveryPlan) -> String {
    let mut out = String::new();

    let header = plan.users.iter().map(|&u| label(graph, u)).join("\t");
    let _ = writeln!(out, "Distances\t{header}");
    for (&restaurant, row) in plan.restaurants.iter().zip(plan.cost_matrix.iter_rows()) {
        let cells = row.iter().map(|&d| format_distance(d)).join("\t");
        let _ = writeln!(out, "{}\t{cells}", label(graph, restaurant));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Assignment");
    for entry in &plan.assignment {
        let _ = writeln!(
            out,
            "{} -> {} ({}, p={:.4})",
            label(graph, entry.restaurant),
            label(graph, entry.user),
            format_distance(entry.distance),
            entry.probability
        );
    }

    let collisions = plan.assignment.collisions();
    if !collisions.is_empty() {
        let users = collisions.iter().map(|&u| label(graph, u)).join(", ");
        let _ = writeln!(out, "Shared users: {users}");
    }
    out
}

#[derive(Serialize)]
struct PlanReport<'a> {
    restaurants: &'a [NodeId],
    users: &'a [NodeId],
    /// `null` marks unreachable pairs
    cost_matrix: Vec<Vec<Option<f64>>>,
    transport_plan: Vec<Vec<f64>>,
    iterations: usize,
    converged: bool,
    assignment: &'a Assignment,
}

/// JSON document with the matrices and the assignment
pub fn plan_json(plan: &DeliveryPlan) -> serde_json::Result<String> {
    let cost_matrix = plan
        .cost_matrix
        .iter_rows()
        .map(|row| row.iter().map(|&d| d.is_finite().then_some(d)).collect())
        .collect();
    let report = PlanReport {
        restaurants: &plan.restaurants,
        users: &plan.users,
        cost_matrix,
        transport_plan: plan.transport_plan.to_rows(),
        iterations: plan.transport_plan.iterations(),
        converged: plan.transport_plan.converged(),
        assignment: &plan.assignment,
    };
    serde_json::to_string_pretty(&report)
}

/// Shortest route and, optionally, the alternatives found by the search
pub fn render_route(graph: &DeliveryGraph, route: &ShortestPath, alternatives: &[Path]) -> String {
    let mut out = String::new();
    let hops = |nodes: &[NodeId]| nodes.iter().map(|&id| label(graph, id)).join(" -> ");

    if route.is_reachable() {
        let _ = writeln!(
            out,
            "Shortest: {} ({})",
            hops(&route.path),
            format_distance(route.distance)
        );
    } else {
        let _ = writeln!(out, "Shortest: unreachable");
    }

    for (rank, path) in alternatives.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {} ({})",
            rank + 1,
            hops(&path.nodes),
            format_distance(path.length)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_city() -> DeliveryGraph {
        let nodes = vec![
            Node::new(
                0,
                0.0,
                0.0,
                NodeKind::Restaurant {
                    name: "Pizza".into(),
                    emoji: Some("🍕".into()),
                },
            ),
            Node::street(1, 1.0, 0.0),
            Node::user(2, 2.0, 0.0, "Home"),
            Node::user(3, 9.0, 9.0, "Island"),
        ];
        build_graph(nodes, &[Edge::new(0, 1), Edge::new(1, 2)]).unwrap()
    }

    #[test]
    fn distances_use_three_decimals() {
        assert_eq!(format_distance(0.63592), "0.636");
        assert_eq!(format_distance(f64::INFINITY), "unreachable");
    }

    #[test]
    fn plan_table_marks_unreachable_pairs() {
        let graph = small_city();
        let config = PipelineConfig {
            unreachable_penalty: Some(10.0),
            ..PipelineConfig::default()
        };
        let plan = plan_deliveries(&graph, &config).unwrap();
        let text = render_plan(&graph, &plan);

        assert!(text.starts_with("Distances\tHome\tIsland\n"));
        assert!(text.contains("🍕 Pizza\t2.000\tunreachable\n"));
        assert!(text.contains("Assignment\n🍕 Pizza -> "));
    }

    #[test]
    fn json_report_nulls_unreachable_costs() {
        let graph = small_city();
        let config = PipelineConfig {
            unreachable_penalty: Some(10.0),
            ..PipelineConfig::default()
        };
        let plan = plan_deliveries(&graph, &config).unwrap();
        let value: serde_json::Value = serde_json::from_str(&plan_json(&plan).unwrap()).unwrap();

        assert_eq!(value["cost_matrix"][0][1], serde_json::Value::Null);
        assert_eq!(value["assignment"][0]["restaurant"], 0);
        assert_eq!(value["iterations"], 200);
    }

    #[test]
    fn route_lists_hops() {
        let graph = small_city();
        let route = shortest_path(&graph, 0, 2).unwrap();
        let text = render_route(&graph, &route, &[]);
        assert_eq!(text, "Shortest: 🍕 Pizza -> #1 -> Home (2.000)\n");

        let stranded = shortest_path(&graph, 0, 3).unwrap();
        assert_eq!(render_route(&graph, &stranded, &[]), "Shortest: unreachable\n");
    }
}
