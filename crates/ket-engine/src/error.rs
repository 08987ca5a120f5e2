// SPDX-License-Identifier: Apache-2.0
//! Error types for loading and configuring the Ket engine.
//!
//! Opening and closing a session never fails in this layer; these errors are
//! only produced before a session exists.

/// Errors arising while locating or loading the engine library.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to load engine library at '{path}': {cause}")]
    LoadFailed { path: String, cause: String },

    #[error("symbol '{symbol}' not found in engine library: {cause}")]
    SymbolNotFound { symbol: String, cause: String },

    #[error("invalid engine configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
