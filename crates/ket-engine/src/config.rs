// SPDX-License-Identifier: Apache-2.0
//! Engine library configuration.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (`LIBKET_PATH` and the `KET_` prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values
//!
//! ```yaml
//! library: /opt/ket/lib/libket.so
//! symbols:
//!   init: ket_init_new
//!   finalize: ket_init_free
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::ffi;

/// Environment variable overriding [`EngineConfig::library`].
pub const ENV_LIBRARY_PATH: &str = "LIBKET_PATH";
/// Alias for [`ENV_LIBRARY_PATH`]; `LIBKET_PATH` wins when both are set.
pub const ENV_LIBRARY_PATH_ALIAS: &str = "KET_LIBRARY_PATH";
/// Environment variable overriding [`EngineSymbols::init`].
pub const ENV_INIT_SYMBOL: &str = "KET_INIT_SYMBOL";
/// Environment variable overriding [`EngineSymbols::finalize`].
pub const ENV_FINALIZE_SYMBOL: &str = "KET_FINALIZE_SYMBOL";

/// Where the engine lives and what its entry points are called.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Path (or bare file name, resolved by the dynamic loader) of the engine
    /// shared library.
    #[serde(default = "default_library")]
    pub library: PathBuf,

    /// Names of the lifecycle entry points.
    #[serde(default)]
    pub symbols: EngineSymbols,
}

/// Names of the initializer and finalizer symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngineSymbols {
    #[serde(default = "default_init_symbol")]
    pub init: String,

    #[serde(default = "default_finalize_symbol")]
    pub finalize: String,
}

// Default value functions
fn default_library() -> PathBuf {
    PathBuf::from(libloading::library_filename("ket"))
}

fn default_init_symbol() -> String {
    ffi::DEFAULT_INIT_SYMBOL.to_string()
}

fn default_finalize_symbol() -> String {
    ffi::DEFAULT_FINALIZE_SYMBOL.to_string()
}

impl Default for EngineSymbols {
    fn default() -> Self {
        Self {
            init: default_init_symbol(),
            finalize: default_finalize_symbol(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            library: default_library(),
            symbols: EngineSymbols::default(),
        }
    }
}

impl EngineConfig {
    /// Configuration for a library at `path` with the default symbol names.
    pub fn with_library(path: impl Into<PathBuf>) -> Self {
        Self {
            library: path.into(),
            symbols: EngineSymbols::default(),
        }
    }

    /// Load configuration from a YAML file. Environment overrides are not
    /// applied; chain [`EngineConfig::with_env_overrides`] for that.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;

        let config: EngineConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| EngineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Overlay `LIBKET_PATH` and the `KET_*` environment variables onto this
    /// configuration.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values produced by `lookup` (keyed by environment variable
    /// name). Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(path) = get(ENV_LIBRARY_PATH).or_else(|| get(ENV_LIBRARY_PATH_ALIAS)) {
            self.library = PathBuf::from(path);
        }
        if let Some(name) = get(ENV_INIT_SYMBOL) {
            self.symbols.init = name;
        }
        if let Some(name) = get(ENV_FINALIZE_SYMBOL) {
            self.symbols.finalize = name;
        }

        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.library.as_os_str().is_empty() {
            return Err(EngineError::Config("library path must not be empty".into()));
        }

        for (role, name) in [
            ("init", &self.symbols.init),
            ("finalize", &self.symbols.finalize),
        ] {
            if name.is_empty() {
                return Err(EngineError::Config(format!(
                    "{role} symbol name must not be empty"
                )));
            }
            if name.contains('\0') {
                return Err(EngineError::Config(format!(
                    "{role} symbol name contains a NUL byte"
                )));
            }
        }

        Ok(())
    }
}
