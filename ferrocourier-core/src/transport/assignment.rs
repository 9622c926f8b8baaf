use itertools::Itertools;
use serde::Serialize;

use super::sinkhorn::TransportPlan;
use crate::{CostMatrix, Distance, Error, NodeId};

/// Restaurant paired with its most probable user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentEntry {
    pub restaurant: NodeId,
    pub user: NodeId,
    pub distance: Distance,
    /// Transport plan mass of the chosen pair
    pub probability: f64,
}

/// One entry per restaurant, in restaurant order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Assignment {
    pub entries: Vec<AssignmentEntry>,
}

impl Assignment {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssignmentEntry> {
        self.entries.iter()
    }

    /// Users picked by more than one restaurant.
    /// The greedy extraction does not prevent this.
    pub fn collisions(&self) -> Vec<NodeId> {
        self.entries.iter().map(|e| e.user).duplicates().collect()
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = &'a AssignmentEntry;
    type IntoIter = std::slice::Iter<'a, AssignmentEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Greedy per-row arg-max of the transport plan.
///
/// Every restaurant gets the user with the highest plan mass in its row,
/// the lowest column winning ties. Rows are decided independently, so two
/// restaurants may end up with the same user.
///
/// # Errors
///
/// - `ShapeMismatch` if the id lists or the cost matrix disagree with the
///   plan's shape
/// - `InvalidTransportInput` if there are restaurants but no users to pick
pub fn extract_assignment(
    plan: &TransportPlan,
    restaurants: &[NodeId],
    users: &[NodeId],
    cost: &CostMatrix,
) -> Result<Assignment, Error> {
    let shape = (restaurants.len(), users.len());
    if plan.shape() != shape || cost.shape() != shape {
        return Err(Error::ShapeMismatch(format!(
            "{} restaurants x {} users, plan is {:?}, cost matrix is {:?}",
            shape.0,
            shape.1,
            plan.shape(),
            cost.shape()
        )));
    }

    if users.is_empty() && !restaurants.is_empty() {
        return Err(Error::InvalidTransportInput(format!(
            "{} restaurants but no users to assign them to",
            restaurants.len()
        )));
    }

    let entries = restaurants
        .iter()
        .zip(plan.iter_rows())
        .enumerate()
        .map(|(i, (&restaurant, row))| {
            let (j, probability) = arg_max(row);
            AssignmentEntry {
                restaurant,
                user: users[j],
                distance: cost.row(i)[j],
                probability,
            }
        })
        .collect();

    Ok(Assignment { entries })
}

/// First index of the largest value. `row` must not be empty.
fn arg_max(row: &[f64]) -> (usize, f64) {
    let mut best = (0, row[0]);
    for (j, &value) in row.iter().enumerate().skip(1) {
        if value > best.1 {
            best = (j, value);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Matrix, SinkhornConfig, solve_transport};

    #[test]
    fn diagonal_pairing_wins() {
        let cost = CostMatrix::from_rows(vec![vec![1.0, 3.0], vec![3.0, 1.0]]).unwrap();
        let plan = solve_transport(&cost, None, None, &SinkhornConfig::default()).unwrap();
        let assignment = extract_assignment(&plan, &[0, 1], &[0, 1], &cost).unwrap();

        let pairs: Vec<_> = assignment.iter().map(|e| (e.restaurant, e.user)).collect();
        assert_eq!(pairs, vec![(0, 0), (1, 1)]);
        assert!(assignment.iter().all(|e| e.distance == 1.0));
        assert!(assignment.collisions().is_empty());
    }

    #[test]
    fn ties_pick_lowest_column() {
        assert_eq!(arg_max(&[0.2, 0.4, 0.4, 0.1]), (1, 0.4));
        assert_eq!(arg_max(&[0.3, 0.3]), (0, 0.3));
        assert_eq!(arg_max(&[0.7]), (0, 0.7));
    }

    #[test]
    fn collisions_are_kept() {
        // User 8 only absorbs a tenth of the mass, so both rows favour user 7
        let cost = CostMatrix::from_rows(vec![vec![0.1, 0.9], vec![0.2, 0.95]]).unwrap();
        let users_marginal = [0.9, 0.1];
        let plan = solve_transport(
            &cost,
            None,
            Some(&users_marginal[..]),
            &SinkhornConfig::default(),
        )
        .unwrap();
        let assignment = extract_assignment(&plan, &[3, 4], &[7, 8], &cost).unwrap();
        assert_eq!(assignment.len(), 2);
        assert_eq!(assignment.collisions(), vec![7]);
    }

    #[test]
    fn restaurants_without_users_are_rejected() {
        let empty = Matrix::new(2, 0, Vec::new()).unwrap();
        let plan = TransportPlan::from_matrix(empty.clone());
        let cost = CostMatrix::from(empty);
        assert!(matches!(
            extract_assignment(&plan, &[1, 2], &[], &cost),
            Err(Error::InvalidTransportInput(_))
        ));
    }

    #[test]
    fn shape_disagreement_is_rejected() {
        let cost = CostMatrix::from_rows(vec![vec![1.0, 2.0]]).unwrap();
        let plan = solve_transport(&cost, None, None, &SinkhornConfig::default()).unwrap();
        assert!(matches!(
            extract_assignment(&plan, &[1, 2], &[3, 4], &cost),
            Err(Error::ShapeMismatch(_))
        ));
    }
}
