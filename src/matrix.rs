use ferrocourier_core::prelude::*;
use pyo3::prelude::*;
use pyo3_stub_gen::derive::gen_stub_pyfunction;

use crate::error::to_py_err;
use crate::model::PyDeliveryGraph;

/// Shortest path distances from every restaurant to every user
///
/// Rows follow ``restaurants`` and columns follow ``users``. Both default to
/// all restaurants and all users of the network. Unreachable pairs are
/// ``inf``.
#[gen_stub_pyfunction]
#[pyfunction]
#[pyo3(signature = (graph, restaurants=None, users=None))]
pub fn cost_matrix(
    py: Python<'_>,
    graph: &PyDeliveryGraph,
    restaurants: Option<Vec<NodeId>>,
    users: Option<Vec<NodeId>>,
) -> PyResult<Vec<Vec<f64>>> {
    let restaurants = restaurants.unwrap_or_else(|| graph.graph.restaurants());
    let users = users.unwrap_or_else(|| graph.graph.users());

    let matrix = py
        .detach(|| build_cost_matrix(&graph.graph, &restaurants, &users))
        .map_err(to_py_err)?;
    Ok(matrix.to_rows())
}
