//! Per-process guard against concurrent generations of the same form.

use std::collections::HashSet;
use std::sync::Mutex;

use formbridge_core::types::FormId;

/// Set of form ids with a generation in flight.
///
/// The lock is held only for set membership changes, never across an await.
#[derive(Debug, Default)]
pub struct GenerationLocks {
    in_flight: Mutex<HashSet<FormId>>,
}

impl GenerationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `form_id`. Returns `None` if another generation already holds it.
    ///
    /// The claim is released when the returned guard is dropped.
    pub fn try_acquire(&self, form_id: FormId) -> Option<GenerationGuard<'_>> {
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !in_flight.insert(form_id) {
            return None;
        }
        Some(GenerationGuard {
            locks: self,
            form_id,
        })
    }

    /// Number of generations currently in flight.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

/// Releases its form id on drop.
#[derive(Debug)]
pub struct GenerationGuard<'a> {
    locks: &'a GenerationLocks,
    form_id: FormId,
}

impl Drop for GenerationGuard<'_> {
    fn drop(&mut self) {
        self.locks
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&self.form_id);
    }
}
