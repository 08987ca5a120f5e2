//! Log subscriber for the extension module.
//!
//! The filter is read from `KET_LOG`, then `RUST_LOG`, defaulting to `warn`.
//! If the embedding process already installed a global subscriber it is left
//! in place.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `ket_engine=debug`).
pub const ENV_LOG: &str = "KET_LOG";

pub fn init_tracing() {
    let filter = std::env::var(ENV_LOG)
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();

    if installed.is_err() {
        tracing::debug!("global tracing subscriber already set; keeping it");
    }
}
