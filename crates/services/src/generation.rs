use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter that lets a view drop responses to loads it has
/// since superseded or abandoned.
///
/// Each load takes a `LoadTicket` before issuing its requests and checks it
/// before publishing the result.
#[derive(Debug, Clone, Default)]
pub struct LoadGeneration {
    current: Arc<AtomicU64>,
}

/// Proof of which load generation a response belongs to.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl LoadGeneration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load, superseding every earlier ticket.
    #[must_use]
    pub fn begin(&self) -> LoadTicket {
        let generation = self.current.fetch_add(1, Ordering::AcqRel) + 1;
        LoadTicket {
            generation,
            current: Arc::clone(&self.current),
        }
    }

    /// Supersede outstanding tickets without starting a load (view torn down).
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::AcqRel);
    }
}

impl LoadTicket {
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::Acquire) == self.generation
    }

    /// `Some(value)` if no newer load started since this ticket was taken.
    pub fn accept<T>(&self, value: T) -> Option<T> {
        if self.is_current() {
            Some(value)
        } else {
            tracing::debug!(generation = self.generation, "discarding stale load");
            None
        }
    }
}
