// SPDX-License-Identifier: Apache-2.0
//! Raw FFI definitions for the Ket runtime lifecycle entry points.
//!
//! The engine is consumed as a shared library whose two lifecycle functions
//! are resolved at runtime, not linked statically:
//!
//! ```text
//! void ket_init_new(int argc, char *argv[]);
//! void ket_init_free(void);
//! ```
//!
//! Both return `void`. Whatever the engine does to signal its own failure
//! (abort, stderr) is its contract; nothing is returned to inspect.

use std::os::raw::{c_char, c_int};

/// Default name of the initializer symbol.
pub const DEFAULT_INIT_SYMBOL: &str = "ket_init_new";

/// Default name of the finalizer symbol.
pub const DEFAULT_FINALIZE_SYMBOL: &str = "ket_init_free";

/// `void ket_init_new(int argc, char *argv[])`
///
/// `argv` is mutable on the C side (engines that run `getopt` may permute it).
pub type FnEngineInit = unsafe extern "C" fn(argc: c_int, argv: *mut *mut c_char);

/// `void ket_init_free(void)`
pub type FnEngineFinalize = unsafe extern "C" fn();
