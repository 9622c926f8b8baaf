use std::cmp::Ordering;

use petgraph::graph::NodeIndex;

use crate::NodeId;

/// Frontier entry, ordered so that `BinaryHeap` pops the cheapest node
/// first and the lowest node id among equal costs
#[derive(Copy, Clone, PartialEq)]
pub(super) struct State {
    pub(super) cost: f64,
    pub(super) id: NodeId,
    pub(super) node: NodeIndex,
}

impl Eq for State {}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap)
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BinaryHeap;

    use super::*;

    #[test]
    fn heap_pops_cheapest_then_lowest_id() {
        let mut heap = BinaryHeap::new();
        for (cost, id) in [(2.0, 1), (1.0, 9), (1.0, 3), (0.5, 7)] {
            heap.push(State {
                cost,
                id,
                node: NodeIndex::new(id as usize),
            });
        }
        let order: Vec<NodeId> = std::iter::from_fn(|| heap.pop().map(|s| s.id)).collect();
        assert_eq!(order, vec![7, 3, 9, 1]);
    }
}
