// SPDX-License-Identifier: Apache-2.0
//! The engine collaborator and its shared-library implementation.
//!
//! [`Engine`] is the seam between a session and whatever provides the two
//! lifecycle entry points. [`EngineLibrary`] is the production implementation:
//! it `dlopen`s the Ket runtime and resolves the initializer and finalizer
//! symbols by name.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

use libloading::{Library, Symbol};

use crate::args::ArgVector;
use crate::config::{EngineConfig, EngineSymbols};
use crate::error::{EngineError, Result};
use crate::ffi;

/// Something that can be initialized with an argument vector and finalized.
///
/// The engine's state is process-global; implementations do not track
/// pairing themselves. [`EngineSession`](crate::EngineSession) guarantees
/// each `initialize` is matched by exactly one `finalize`.
pub trait Engine: Send + Sync + fmt::Debug {
    /// Short name used in log messages.
    fn name(&self) -> &str;

    /// Call the initializer with `args`. The buffer is only valid for the
    /// duration of the call.
    fn initialize(&self, args: &mut ArgVector);

    /// Call the finalizer.
    fn finalize(&self);
}

// ---------------------------------------------------------------------------
// Shared library engine
// ---------------------------------------------------------------------------

/// A loaded engine library with both entry points resolved.
///
/// The library handle is kept alive for the lifetime of this struct so the
/// loaded `.so` is not unloaded while we still hold function pointers into it.
/// Loading does not call either entry point.
pub struct EngineLibrary {
    /// Prevent the shared library from being unloaded.
    _library: Library,

    /// Path the library was loaded from (for diagnostics).
    library_path: String,

    symbols: EngineSymbols,

    fn_init: ffi::FnEngineInit,
    fn_finalize: ffi::FnEngineFinalize,
}

impl EngineLibrary {
    /// Load the engine shared library and resolve both entry points.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::LoadFailed`] if `dlopen` fails, or
    /// [`EngineError::SymbolNotFound`] if either symbol cannot be resolved.
    pub fn load(path: &Path, symbols: &EngineSymbols) -> Result<Self> {
        let path_str = path.display().to_string();

        // SAFETY: we are loading an external shared library. The caller is
        // responsible for ensuring the library is trustworthy.
        let library = unsafe { Library::new(path) }.map_err(|e| EngineError::LoadFailed {
            path: path_str.clone(),
            cause: e.to_string(),
        })?;

        let fn_init = resolve::<ffi::FnEngineInit>(&library, &symbols.init)?;
        let fn_finalize = resolve::<ffi::FnEngineFinalize>(&library, &symbols.finalize)?;

        tracing::info!(
            "loaded Ket engine library '{path_str}' (init '{}', finalize '{}')",
            symbols.init,
            symbols.finalize
        );

        Ok(Self {
            _library: library,
            library_path: path_str,
            symbols: symbols.clone(),
            fn_init,
            fn_finalize,
        })
    }

    /// Load the library described by `config`.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Self::load(&config.library, &config.symbols)
    }

    /// Filesystem path the library was loaded from.
    pub fn library_path(&self) -> &str {
        &self.library_path
    }

    /// The resolved entry-point names.
    pub fn symbols(&self) -> &EngineSymbols {
        &self.symbols
    }
}

impl Engine for EngineLibrary {
    fn name(&self) -> &str {
        &self.library_path
    }

    fn initialize(&self, args: &mut ArgVector) {
        // SAFETY: `fn_init` was resolved with the `FnEngineInit` signature and
        // the library is still loaded. `args` keeps `argc + 1` pointer slots
        // and every non-null slot alive for the duration of the call.
        unsafe { (self.fn_init)(args.argc(), args.as_mut_ptr()) }
    }

    fn finalize(&self) {
        // SAFETY: `fn_finalize` was resolved with the `FnEngineFinalize`
        // signature and the library is still loaded.
        unsafe { (self.fn_finalize)() }
    }
}

#[allow(clippy::missing_fields_in_debug)]
impl fmt::Debug for EngineLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineLibrary")
            .field("library_path", &self.library_path)
            .field("symbols", &self.symbols)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Process-wide library cache
// ---------------------------------------------------------------------------

static SHARED_LIBRARIES: LazyLock<Mutex<HashMap<EngineConfig, Arc<EngineLibrary>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Load the library described by `config`, reusing an earlier load of the
/// same configuration.
///
/// Libraries loaded this way stay loaded for the rest of the process:
/// unloading the engine between sessions would discard its global state.
pub fn load_shared(config: &EngineConfig) -> Result<Arc<EngineLibrary>> {
    let mut cache = SHARED_LIBRARIES
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    if let Some(library) = cache.get(config) {
        return Ok(Arc::clone(library));
    }

    let library = Arc::new(EngineLibrary::from_config(config)?);
    cache.insert(config.clone(), Arc::clone(&library));
    Ok(library)
}

// ---------------------------------------------------------------------------
// Symbol resolution
// ---------------------------------------------------------------------------

/// Resolve a required symbol. Returns an error if the symbol is missing.
fn resolve<T: Copy>(library: &Library, name: &str) -> Result<T> {
    tracing::trace!("resolving engine symbol '{name}'");

    // SAFETY: The caller guarantees the type `T` matches the actual function
    // signature exported by the library. This is the core FFI contract.
    unsafe {
        let sym: Symbol<T> =
            library
                .get(name.as_bytes())
                .map_err(|e| EngineError::SymbolNotFound {
                    symbol: name.to_string(),
                    cause: e.to_string(),
                })?;
        Ok(*sym)
    }
}
