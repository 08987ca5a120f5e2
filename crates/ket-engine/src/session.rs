// SPDX-License-Identifier: Apache-2.0
//! Engine session lifecycle.
//!
//! A session brackets exactly one initializer call and one finalizer call.
//! Sessions are created via [`EngineSession::open`] and finalized either
//! explicitly with [`EngineSession::close`] or automatically when dropped,
//! including during unwinding.
//!
//! The engine itself is process-global. Nothing here serializes sessions: two
//! overlapping sessions reach the engine as two initializer calls, and the
//! engine decides what that means. Overlap is logged.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::args::ArgVector;
use crate::engine::Engine;

/// Sessions between their initializer and finalizer calls, process-wide.
static ACTIVE_SESSIONS: AtomicUsize = AtomicUsize::new(0);

/// Number of sessions currently holding an engine initialization.
pub fn active_sessions() -> usize {
    ACTIVE_SESSIONS.load(Ordering::SeqCst)
}

/// Lifecycle state of a session.
///
/// The uninitialized state is never observable: it only exists inside
/// [`EngineSession::open`] before the initializer returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Finalized,
}

/// An active initialization of the engine.
pub struct EngineSession {
    engine: Arc<dyn Engine>,
    state: SessionState,
}

impl EngineSession {
    /// Marshal `args` into a C argument vector and initialize the engine.
    ///
    /// The first argument is conventionally the program name. The argument
    /// buffer is released as soon as the initializer returns.
    ///
    /// # Panics
    ///
    /// Panics if the number of arguments does not fit in a C `int`.
    pub fn open<I, S>(engine: Arc<dyn Engine>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut argv = ArgVector::new(args);

        let outstanding = active_sessions();
        if outstanding > 0 {
            tracing::warn!(
                "initializing engine '{}' while {outstanding} session(s) are still active",
                engine.name()
            );
        }

        tracing::debug!(
            "initializing engine '{}' with argc {}: {argv:?}",
            engine.name(),
            argv.argc()
        );
        engine.initialize(&mut argv);
        drop(argv);

        ACTIVE_SESSIONS.fetch_add(1, Ordering::SeqCst);
        tracing::debug!("opened session on engine '{}'", engine.name());

        Self {
            engine,
            state: SessionState::Active,
        }
    }

    /// Finalize the engine now.
    pub fn close(mut self) {
        self.finalize();
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// The engine this session initialized.
    pub fn engine(&self) -> &Arc<dyn Engine> {
        &self.engine
    }

    fn finalize(&mut self) {
        if self.state != SessionState::Active {
            return;
        }
        // Mark first so a panicking finalizer is not retried from `Drop`.
        self.state = SessionState::Finalized;
        ACTIVE_SESSIONS.fetch_sub(1, Ordering::SeqCst);

        self.engine.finalize();
        tracing::debug!("closed session on engine '{}'", self.engine.name());
    }
}

impl Drop for EngineSession {
    fn drop(&mut self) {
        self.finalize();
    }
}

impl std::fmt::Debug for EngineSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineSession")
            .field("engine", &self.engine.name())
            .field("state", &self.state)
            .finish()
    }
}

/// Run `f` inside a session, finalizing on every exit path.
///
/// The finalizer runs after `f` returns, and also when `f` panics.
pub fn with_session<I, S, F, R>(engine: Arc<dyn Engine>, args: I, f: F) -> R
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
    F: FnOnce(&EngineSession) -> R,
{
    let session = EngineSession::open(engine, args);
    let result = f(&session);
    session.close();
    result
}
