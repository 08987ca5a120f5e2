//! Python wrapper around [`ket_engine::EngineSession`].

use std::path::PathBuf;

use ket_engine::{EngineConfig, EngineSession};
use pyo3::prelude::*;

use crate::error::engine_to_py_err;

/// An initialization of the Ket engine.
///
/// Constructing a Session calls the engine initializer with ``argv``;
/// closing it (explicitly, by leaving a ``with`` block, or when the object is
/// garbage collected) calls the finalizer exactly once.
///
/// Args:
///     argv: Startup arguments, conventionally beginning with the program name.
///     library: Path of the engine shared library. Defaults to
///         ``LIBKET_PATH`` or the platform name for ``ket``.
///
/// Example:
///     >>> with Session(["ket", "--seed", "42"]) as session:
///     ...     assert session.is_active
#[pyclass(name = "Session", module = "ket._ketpy")]
pub struct PySession {
    inner: Option<EngineSession>,
    library: String,
}

#[pymethods]
impl PySession {
    #[new]
    #[pyo3(signature = (argv, library=None))]
    fn new(py: Python<'_>, argv: Vec<String>, library: Option<PathBuf>) -> PyResult<Self> {
        let config = session_config(library, |key| std::env::var(key).ok());
        let engine = ket_engine::load_shared(&config).map_err(engine_to_py_err)?;
        let library = engine.library_path().to_string();

        let session = py.detach(move || EngineSession::open(engine, argv));

        Ok(Self {
            inner: Some(session),
            library,
        })
    }

    /// Finalize the engine. Further calls do nothing.
    fn close(&mut self, py: Python<'_>) {
        if let Some(session) = self.inner.take() {
            py.detach(move || session.close());
        }
    }

    /// Whether the engine is still initialized by this session.
    #[getter]
    fn is_active(&self) -> bool {
        self.inner.as_ref().is_some_and(EngineSession::is_active)
    }

    /// Path of the engine library this session initialized.
    #[getter]
    fn library(&self) -> &str {
        &self.library
    }

    fn __enter__(slf: PyRef<'_, Self>) -> PyRef<'_, Self> {
        slf
    }

    #[pyo3(signature = (_exc_type=None, _exc_value=None, _traceback=None))]
    fn __exit__(
        &mut self,
        py: Python<'_>,
        _exc_type: Option<Bound<'_, PyAny>>,
        _exc_value: Option<Bound<'_, PyAny>>,
        _traceback: Option<Bound<'_, PyAny>>,
    ) -> bool {
        self.close(py);
        false
    }

    fn __repr__(&self) -> String {
        let active = if self.is_active() { "True" } else { "False" };
        format!("Session(library='{}', active={active})", self.library)
    }
}

/// Engine configuration for a new session: `lookup` supplies environment
/// overrides, and an explicit `library` beats all of them.
fn session_config<F>(library: Option<PathBuf>, lookup: F) -> EngineConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = EngineConfig::default().with_overrides(lookup);
    if let Some(path) = library {
        config.library = path;
    }
    config
}

/// Number of sessions currently holding an engine initialization.
#[pyfunction]
pub fn active_sessions() -> usize {
    ket_engine::active_sessions()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(key: &str) -> Option<String> {
        match key {
            "LIBKET_PATH" => Some("/env/libket.so".to_string()),
            "KET_INIT_SYMBOL" => Some("ket_begin".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_explicit_library_beats_env() {
        let config = session_config(Some(PathBuf::from("/explicit/libket.so")), env);
        assert_eq!(config.library, PathBuf::from("/explicit/libket.so"));
        // Symbol overrides still come from the environment.
        assert_eq!(config.symbols.init, "ket_begin");
        assert_eq!(config.symbols.finalize, "ket_init_free");
    }

    #[test]
    fn test_env_library_used_without_explicit() {
        let config = session_config(None, env);
        assert_eq!(config.library, PathBuf::from("/env/libket.so"));
    }

    #[test]
    fn test_defaults_without_env() {
        let config = session_config(None, |_| None);
        assert_eq!(config, EngineConfig::default());
    }
}
