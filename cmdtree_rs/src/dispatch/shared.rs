//! Reload support: publish a rebuilt dispatcher with one reference swap.

use std::sync::{Arc, PoisonError, RwLock};

use super::Dispatcher;

/// Thread-safe handle to the current dispatcher.
///
/// Callers take a snapshot with [`load`](Self::load) and dispatch against it
/// without holding any lock; [`replace`](Self::replace) publishes a new tree.
/// In-flight dispatches keep using the snapshot they started with.
#[derive(Debug)]
pub struct SharedDispatcher {
    current: RwLock<Arc<Dispatcher>>,
}

impl SharedDispatcher {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            current: RwLock::new(Arc::new(dispatcher)),
        }
    }

    pub fn load(&self) -> Arc<Dispatcher> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Swap in `dispatcher`, returning the previous one.
    pub fn replace(&self, dispatcher: Dispatcher) -> Arc<Dispatcher> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(dispatcher))
    }
}

impl From<Dispatcher> for SharedDispatcher {
    fn from(dispatcher: Dispatcher) -> Self {
        Self::new(dispatcher)
    }
}
