use pyo3::prelude::*;
use pyo3_stub_gen::define_stub_info_gatherer;

use matrix::cost_matrix;
use model::{PyDeliveryGraph, py_create_delivery_graph, py_load_delivery_graph};
use routing::{PyPath, PyShortestPath, alternative_paths, shortest_path};
use transport::{PyDeliveryPlan, extract_assignment, plan_deliveries, solve_transport};

mod error;
pub mod matrix;
pub mod model;
pub mod routing;
pub mod transport;

/// A Python module implemented in Rust.
#[pymodule]
fn ferrocourier(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();

    m.add_class::<PyDeliveryGraph>()?;
    m.add_function(wrap_pyfunction!(py_create_delivery_graph, m)?)?;
    m.add_function(wrap_pyfunction!(py_load_delivery_graph, m)?)?;

    m.add_class::<PyShortestPath>()?;
    m.add_class::<PyPath>()?;
    m.add_function(wrap_pyfunction!(shortest_path, m)?)?;
    m.add_function(wrap_pyfunction!(alternative_paths, m)?)?;

    m.add_function(wrap_pyfunction!(cost_matrix, m)?)?;

    m.add_class::<PyDeliveryPlan>()?;
    m.add_function(wrap_pyfunction!(solve_transport, m)?)?;
    m.add_function(wrap_pyfunction!(extract_assignment, m)?)?;
    m.add_function(wrap_pyfunction!(plan_deliveries, m)?)?;
    Ok(())
}

define_stub_info_gatherer!(stub_info);
