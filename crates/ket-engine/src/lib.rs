// SPDX-License-Identifier: Apache-2.0
//! # ket-engine
//!
//! Scoped lifecycle management for the Ket quantum runtime library.
//!
//! The runtime is an opaque shared library with two lifecycle entry points:
//! an initializer taking a C-style `argc`/`argv` pair and a finalizer taking
//! nothing. This crate loads that library, marshals host strings into the
//! argument vector, and ties the initializer/finalizer pair to the lifetime
//! of an [`EngineSession`].
//!
//! ## Architecture
//!
//! ```text
//!                  ┌──────────────────┐
//!                  │  Host (Rust/Py)  │
//!                  └────────┬─────────┘
//!                           │ Vec<String>
//!                  ┌────────┴─────────┐
//!                  │   ket-engine     │
//!                  │                  │
//!                  │  EngineConfig    │ ← defaults / YAML / KET_* env
//!                  │  EngineLibrary   │ ← dlopen + dlsym of two entry points
//!                  │  ArgVector       │ ← owned argc/argv buffer
//!                  │  EngineSession   │ ← RAII init/finalize pairing
//!                  └────────┬─────────┘
//!                           │ C ABI (extern "C")
//!               ┌───────────┴───────────┐
//!               │  libket.so            │
//!               │  ket_init_new(argc,   │
//!               │               argv)   │
//!               │  ket_init_free()      │
//!               └───────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ket_engine::{EngineConfig, EngineLibrary, EngineSession};
//!
//! let engine = EngineLibrary::from_config(&EngineConfig::from_env())
//!     .expect("failed to load engine");
//!
//! // ket_init_new(2, ["myprog", "--flag"])
//! let session = EngineSession::open(Arc::new(engine), ["myprog", "--flag"]);
//!
//! // ... use the engine ...
//!
//! // ket_init_free(); also runs automatically if `session` is dropped
//! session.close();
//! ```

pub mod args;
pub mod config;
pub mod engine;
pub mod error;
pub mod ffi;
pub mod session;

// Re-export the most commonly used types at crate root.
pub use args::ArgVector;
pub use config::{EngineConfig, EngineSymbols};
pub use engine::{Engine, EngineLibrary, load_shared};
pub use error::{EngineError, Result};
pub use session::{EngineSession, SessionState, active_sessions, with_session};
