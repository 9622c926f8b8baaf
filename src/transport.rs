use ferrocourier_core::prelude::*;
use pyo3::prelude::*;
use pyo3_stub_gen::derive::{gen_stub_pyclass, gen_stub_pyfunction, gen_stub_pymethods};

use crate::error::to_py_err;
use crate::model::PyDeliveryGraph;

/// `(restaurant, user, distance, probability)` rows handed back to Python
pub type AssignmentRow = (NodeId, NodeId, f64, f64);

fn assignment_rows(assignment: &Assignment) -> Vec<AssignmentRow> {
    assignment
        .iter()
        .map(|e| (e.restaurant, e.user, e.distance, e.probability))
        .collect()
}

/// DeliveryPlan
///
/// Everything computed by `plan_deliveries`: the distance matrix, the
/// Sinkhorn transport plan and the greedy restaurant to user assignment.
#[gen_stub_pyclass]
#[pyclass(name = "DeliveryPlan")]
pub struct PyDeliveryPlan {
    inner: DeliveryPlan,
}

#[gen_stub_pymethods]
#[pymethods]
impl PyDeliveryPlan {
    #[getter]
    fn restaurants(&self) -> Vec<NodeId> {
        self.inner.restaurants.clone()
    }

    #[getter]
    fn users(&self) -> Vec<NodeId> {
        self.inner.users.clone()
    }

    #[getter]
    fn cost_matrix(&self) -> Vec<Vec<f64>> {
        self.inner.cost_matrix.to_rows()
    }

    #[getter]
    fn transport_plan(&self) -> Vec<Vec<f64>> {
        self.inner.transport_plan.to_rows()
    }

    #[getter]
    fn iterations(&self) -> usize {
        self.inner.transport_plan.iterations()
    }

    #[getter]
    fn assignment(&self) -> Vec<AssignmentRow> {
        assignment_rows(&self.inner.assignment)
    }

    /// Users picked by more than one restaurant
    fn collisions(&self) -> Vec<NodeId> {
        self.inner.assignment.collisions()
    }

    fn __repr__(&self) -> String {
        format!(
            "DeliveryPlan with {} restaurants, {} users after {} iterations",
            self.inner.restaurants.len(),
            self.inner.users.len(),
            self.inner.transport_plan.iterations()
        )
    }
}

/// Entropy regularized optimal transport plan (Sinkhorn)
///
/// Parameters
/// ----------
/// cost_matrix : list[list[float]]
///     Finite, non-negative costs, restaurants by users
/// a : list[float], optional
///     Restaurant marginal, uniform if omitted
/// b : list[float], optional
///     User marginal, uniform if omitted
/// epsilon : float, default=0.1
///     Regularization strength
/// max_iter : int, default=200
///     Number of scaling rounds
/// tolerance : float, optional
///     Stop early once the row sums are this close to ``a``
///
/// Returns
/// -------
/// list[list[float]]
///     Plan whose row sums approximate ``a`` and column sums approximate ``b``
///
/// Raises
/// ------
/// ValueError
///     On invalid costs, marginals or parameters
/// RuntimeError
///     If the kernel underflows, usually because epsilon is too small
#[gen_stub_pyfunction]
#[pyfunction]
#[pyo3(signature = (cost_matrix, a=None, b=None, epsilon=0.1, max_iter=200, tolerance=None))]
pub fn solve_transport(
    py: Python<'_>,
    cost_matrix: Vec<Vec<f64>>,
    a: Option<Vec<f64>>,
    b: Option<Vec<f64>>,
    epsilon: f64,
    max_iter: usize,
    tolerance: Option<f64>,
) -> PyResult<Vec<Vec<f64>>> {
    let cost = CostMatrix::from_rows(cost_matrix).map_err(to_py_err)?;
    let mut config = SinkhornConfig::new()
        .with_epsilon(epsilon)
        .with_max_iterations(max_iter);
    if let Some(tolerance) = tolerance {
        config = config.with_tolerance(tolerance);
    }

    let plan = py
        .detach(|| {
            ferrocourier_core::solve_transport(&cost, a.as_deref(), b.as_deref(), &config)
        })
        .map_err(to_py_err)?;
    Ok(plan.to_rows())
}

/// Greedy assignment: every restaurant gets the user with the largest plan
/// mass in its row, the lowest column winning ties
///
/// Returns
/// -------
/// list[tuple[int, int, float, float]]
///     ``(restaurant, user, distance, probability)`` in restaurant order
#[gen_stub_pyfunction]
#[pyfunction]
pub fn extract_assignment(
    transport_plan: Vec<Vec<f64>>,
    restaurants: Vec<NodeId>,
    users: Vec<NodeId>,
    cost_matrix: Vec<Vec<f64>>,
) -> PyResult<Vec<AssignmentRow>> {
    let plan = Matrix::from_rows(transport_plan)
        .map(TransportPlan::from_matrix)
        .map_err(to_py_err)?;
    let cost = CostMatrix::from_rows(cost_matrix).map_err(to_py_err)?;

    let assignment = ferrocourier_core::extract_assignment(&plan, &restaurants, &users, &cost)
        .map_err(to_py_err)?;
    Ok(assignment_rows(&assignment))
}

/// Full delivery planning over a network
///
/// Builds the restaurant to user distance matrix, solves the transport
/// problem with uniform marginals and extracts the greedy assignment.
///
/// Parameters
/// ----------
/// unreachable_penalty : float, optional
///     Cost used for restaurant and user pairs with no connecting route.
///     Without it such pairs make planning fail.
#[gen_stub_pyfunction]
#[pyfunction]
#[pyo3(signature = (graph, epsilon=0.1, max_iter=200, tolerance=None, unreachable_penalty=None))]
pub fn plan_deliveries(
    py: Python<'_>,
    graph: &PyDeliveryGraph,
    epsilon: f64,
    max_iter: usize,
    tolerance: Option<f64>,
    unreachable_penalty: Option<f64>,
) -> PyResult<PyDeliveryPlan> {
    let mut sinkhorn = SinkhornConfig::new()
        .with_epsilon(epsilon)
        .with_max_iterations(max_iter);
    if let Some(tolerance) = tolerance {
        sinkhorn = sinkhorn.with_tolerance(tolerance);
    }
    let config = PipelineConfig {
        sinkhorn,
        unreachable_penalty,
    };

    let inner = py
        .detach(|| ferrocourier_core::plan_deliveries(&graph.graph, &config))
        .map_err(to_py_err)?;
    Ok(PyDeliveryPlan { inner })
}
