//! Debug-only reentrancy guard for the table's public entry points.
//!
//! Probing runs caller code through `K: AsRef<[u8]>`, and a pathological
//! impl could call back into the same table while a chain is half-linked.
//! In debug builds the guard panics on such nested entry; in release
//! builds it compiles away entirely.

#[cfg(debug_assertions)]
use core::cell::Cell;
use core::marker::PhantomData;
#[cfg(debug_assertions)]
use std::rc::Rc;

#[derive(Debug, Default)]
pub(crate) struct ReentryCheck {
    #[cfg(debug_assertions)]
    busy: Rc<Cell<bool>>,
    // The table is single-threaded by contract; stay !Send + !Sync.
    _nosend: PhantomData<*mut ()>,
}

impl ReentryCheck {
    pub(crate) fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            busy: Rc::new(Cell::new(false)),
            _nosend: PhantomData,
        }
    }

    /// Mark the table busy for the duration of the returned guard.
    /// Panics in debug builds if it is already busy.
    #[inline]
    pub(crate) fn enter(&self) -> BusyGuard {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.busy.replace(true),
                "reentrant call into ChainTable while it is mid-operation"
            );
            BusyGuard {
                busy: Rc::clone(&self.busy),
            }
        }

        #[cfg(not(debug_assertions))]
        {
            BusyGuard { _z: PhantomData }
        }
    }
}

pub(crate) struct BusyGuard {
    #[cfg(debug_assertions)]
    busy: Rc<Cell<bool>>,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<*mut ()>,
}

#[cfg(debug_assertions)]
impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_entries_are_fine() {
        let c = ReentryCheck::new();
        drop(c.enter());
        drop(c.enter());
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "reentrant call")]
    fn nested_entry_panics_in_debug() {
        let c = ReentryCheck::new();
        let _outer = c.enter();
        let _inner = c.enter();
    }
}
