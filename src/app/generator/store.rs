//! Hand-off of the live scale table from the control thread to the audio
//! thread.
//!
//! The control thread owns key selection and builds a new [`ScaleTable`]
//! whenever it changes. The audio thread must never wait for it, so it only
//! ever makes a single attempt at reading the table per note; if the control
//! thread happens to be mid-swap, the read fails and the caller falls back to
//! the last note it generated.

use super::*;
use std::sync::atomic::{AtomicU8, Ordering};

/// The value of the active-key word when snapping is disabled.
const NO_KEY: u8 = u8::MAX;

#[derive(Debug)]
pub struct ScaleTableStore {
    table: SpinLock<Box<ScaleTable>>,
    active_key: AtomicU8,
}

impl ScaleTableStore {
    /// Creates a store holding the identity table, with snapping disabled.
    pub fn new() -> Self {
        Self {
            table: SpinLock::new(Box::new(ScaleTable::identity())),
            active_key: AtomicU8::new(NO_KEY),
        }
    }

    /// Makes `table` the live table and enables snapping to its key.
    ///
    /// Only to be called from the control thread: this may spin while a
    /// reader holds the lock, which is at most a single table copy.
    pub fn publish(&self, table: ScaleTable) {
        // allocate before taking the lock so the critical section is only
        // the pointer swap
        let incoming = Box::new(table);

        let previous = {
            let mut live = self.table.lock();
            std::mem::replace(&mut *live, incoming)
        };

        // the old table is freed here, outside of the lock
        drop(previous);

        self.active_key.store(table.root().value(), Ordering::Release);
    }

    /// Disables snapping. The live table is left in place.
    pub fn disable(&self) {
        self.active_key.store(NO_KEY, Ordering::Release);
    }

    /// Makes a single, non-blocking attempt at reading the live table.
    /// Returns `None` if the control thread is currently publishing.
    #[inline]
    pub fn try_read(&self) -> Option<ScaleTable> {
        self.table.try_lock().map(|live| **live)
    }

    /// The root of the active key, or `None` if snapping is disabled.
    #[inline]
    pub fn active_key(&self) -> Option<PitchClass> {
        match self.active_key.load(Ordering::Acquire) {
            NO_KEY => None,
            root => Some(PitchClass::wrapping(i32::from(root))),
        }
    }

    /// Holds the table lock, as a publish in progress would.
    #[cfg(test)]
    pub(crate) fn hold_lock(&self) -> SpinLockGuard<'_, Box<ScaleTable>> {
        self.table.lock()
    }
}

impl Default for ScaleTableStore {
    fn default() -> Self {
        Self::new()
    }
}
