use ferrocourier_core::prelude::*;
use pyo3::prelude::*;
use pyo3_stub_gen::derive::{gen_stub_pyclass, gen_stub_pyfunction, gen_stub_pymethods};

use crate::error::to_py_err;
use crate::model::PyDeliveryGraph;

/// Result of a single shortest path query
#[gen_stub_pyclass]
#[pyclass(name = "ShortestPath")]
#[derive(Clone)]
pub struct PyShortestPath {
    pub inner: ShortestPath,
}

#[gen_stub_pymethods]
#[pymethods]
impl PyShortestPath {
    /// Node ids from source to target.
    /// For an unreachable target this is the partial route that was found.
    #[getter]
    fn path(&self) -> Vec<NodeId> {
        self.inner.path.clone()
    }

    /// Route length, `inf` if the target is unreachable
    #[getter]
    fn distance(&self) -> f64 {
        self.inner.distance
    }

    fn is_reachable(&self) -> bool {
        self.inner.is_reachable()
    }

    fn __repr__(&self) -> String {
        format!(
            "ShortestPath(path={:?}, distance={})",
            self.inner.path, self.inner.distance
        )
    }
}

/// Simple route returned by `alternative_paths`
#[gen_stub_pyclass]
#[pyclass(name = "Path")]
#[derive(Clone)]
pub struct PyPath {
    pub inner: Path,
}

#[gen_stub_pymethods]
#[pymethods]
impl PyPath {
    #[getter]
    fn nodes(&self) -> Vec<NodeId> {
        self.inner.nodes.clone()
    }

    #[getter]
    fn length(&self) -> f64 {
        self.inner.length
    }

    fn __len__(&self) -> usize {
        self.inner.nodes.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Path(nodes={:?}, length={})",
            self.inner.nodes, self.inner.length
        )
    }
}

/// Shortest route between two nodes
///
/// Blocked nodes are never entered. Equal length routes are resolved
/// towards lower node ids.
///
/// Raises
/// ------
/// ValueError
///     If either node is not part of the network
#[gen_stub_pyfunction]
#[pyfunction]
pub fn shortest_path(
    graph: &PyDeliveryGraph,
    source: NodeId,
    target: NodeId,
) -> PyResult<PyShortestPath> {
    let inner = ferrocourier_core::shortest_path(&graph.graph, source, target).map_err(to_py_err)?;
    Ok(PyShortestPath { inner })
}

/// Cycle-free routes between two nodes, fewest hops first
///
/// Parameters
/// ----------
/// limit : int, default=5
///     Maximum number of routes returned
/// max_depth : int, default=20
///     Routes with more nodes than this are not explored
#[gen_stub_pyfunction]
#[pyfunction]
#[pyo3(signature = (graph, source, target, limit=DEFAULT_PATH_LIMIT, max_depth=DEFAULT_MAX_DEPTH))]
pub fn alternative_paths(
    py: Python<'_>,
    graph: &PyDeliveryGraph,
    source: NodeId,
    target: NodeId,
    limit: usize,
    max_depth: usize,
) -> PyResult<Vec<PyPath>> {
    let paths = py
        .detach(|| {
            ferrocourier_core::alternative_paths(&graph.graph, source, target, limit, max_depth)
        })
        .map_err(to_py_err)?;
    Ok(paths.into_iter().map(|inner| PyPath { inner }).collect())
}
