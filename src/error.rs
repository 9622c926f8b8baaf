use ferrocourier_core::Error;
use pyo3::PyErr;
use pyo3::exceptions::{PyOSError, PyRuntimeError, PyValueError};

/// Numerical failures become `RuntimeError`, file problems `OSError`,
/// everything else is a bad argument
pub(crate) fn to_py_err(error: Error) -> PyErr {
    match error {
        Error::NumericalDegeneracy { .. } => PyErr::new::<PyRuntimeError, _>(error.to_string()),
        Error::IoError(_) => PyErr::new::<PyOSError, _>(error.to_string()),
        _ => PyErr::new::<PyValueError, _>(error.to_string()),
    }
}
