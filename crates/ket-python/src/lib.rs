//! Python bindings for the Ket engine lifecycle.
//!
//! This crate builds the `ket._ketpy` extension module. Creating a `Session`
//! initializes the native Ket runtime; closing or collecting it finalizes the
//! runtime.
//!
//! # Example
//!
//! ```python
//! import sys
//! from ket._ketpy import Session
//!
//! with Session(sys.argv) as session:
//!     ...  # run quantum code
//! # ket_init_free() has run here
//! ```

mod error;
mod session;
mod tracing_config;

use pyo3::prelude::*;

/// Ket engine lifecycle binding.
///
/// This module provides:
/// - Session: scoped initialization of the Ket runtime
/// - active_sessions: number of sessions currently open
/// - EngineError: raised when the runtime library cannot be loaded
#[pymodule]
fn _ketpy(m: &Bound<'_, PyModule>) -> PyResult<()> {
    tracing_config::init_tracing();

    m.add_class::<session::PySession>()?;
    m.add_function(wrap_pyfunction!(session::active_sessions, m)?)?;
    m.add("EngineError", m.py().get_type::<error::EngineError>())?;

    Ok(())
}
