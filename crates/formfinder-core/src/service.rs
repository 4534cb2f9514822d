//! Readiness gate around the loaded context

use crate::engine::FormFinder;
use crate::error::{FormFinderError, Result};
use std::sync::{Arc, RwLock};

enum State {
    Starting,
    Ready(Arc<FormFinder>),
}

/// Shared handle request handlers hold while the corpus loads.
///
/// Requests arriving before `set_ready` get `NotReady`. The state moves to
/// ready exactly once and never back.
pub struct Service {
    state: RwLock<State>,
}

impl Service {
    pub fn starting() -> Self {
        Self {
            state: RwLock::new(State::Starting),
        }
    }

    pub fn ready(finder: FormFinder) -> Self {
        Self {
            state: RwLock::new(State::Ready(Arc::new(finder))),
        }
    }

    pub fn set_ready(&self, finder: FormFinder) {
        let mut state = match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if matches!(*state, State::Ready(_)) {
            tracing::warn!("Ignoring second corpus load");
            return;
        }
        *state = State::Ready(Arc::new(finder));
    }

    pub fn is_ready(&self) -> bool {
        self.engine().is_ok()
    }

    /// The loaded context, or `NotReady` while startup is in progress.
    pub fn engine(&self) -> Result<Arc<FormFinder>> {
        let state = match self.state.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match &*state {
            State::Ready(finder) => Ok(Arc::clone(finder)),
            State::Starting => Err(FormFinderError::NotReady),
        }
    }
}
