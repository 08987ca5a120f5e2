//! Error handling and exception mapping for Python bindings.

use pyo3::PyErr;
use pyo3::exceptions::PyRuntimeError;

pyo3::create_exception!(
    _ketpy,
    EngineError,
    PyRuntimeError,
    "Raised when the Ket engine library cannot be located or loaded."
);

/// Convert an engine error to a Python exception.
pub fn engine_to_py_err(e: ket_engine::EngineError) -> PyErr {
    EngineError::new_err(e.to_string())
}
