//! Bounded control registration list
//!
//! Entities register (predicate, mask, callback) entries; the driver walks
//! the list once per tick after the pad update and fires every entry whose
//! predicate currently holds, in registration order.

use std::cell::RefCell;
use std::rc::Rc;

use crate::pad::{Pad, PadPredicate};

/// Hard cap on registered controls. Registrations beyond this are dropped.
pub const MAX_CONTROLS: usize = 12;

struct ControlEntry {
    predicate: PadPredicate,
    mask: u8,
    callback: Box<dyn FnMut()>,
}

/// Fixed-capacity list of per-tick control bindings.
///
/// Capacity exhaustion is a best-effort drop, not an error: the excess
/// registration is discarded with a warning and the caller continues.
#[derive(Default)]
pub struct ControlList {
    entries: Vec<ControlEntry>,
}

impl ControlList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for a predicate over a button mask.
    pub fn add_control(&mut self, predicate: PadPredicate, mask: u8, callback: impl FnMut() + 'static) {
        if self.entries.len() >= MAX_CONTROLS {
            log::warn!("control list full ({MAX_CONTROLS} entries), dropping registration");
            return;
        }
        self.entries.push(ControlEntry {
            predicate,
            mask,
            callback: Box::new(callback),
        });
    }

    /// Drop every registered control.
    pub fn clear_controls(&mut self) {
        self.entries.clear();
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fire every entry whose predicate holds against `pad`.
    ///
    /// Entries fire in registration order; a single tick may fire several.
    /// Delayed-repeating predicates evaluate with an every-tick period here.
    pub fn run_controls(&mut self, pad: &Pad) {
        for entry in &mut self.entries {
            if pad.check(entry.predicate, entry.mask, 1) {
                (entry.callback)();
            }
        }
    }
}

/// Capability to register default control bindings.
///
/// Implementors are shared single-threaded between the control list and the
/// driver, so the hook takes the `Rc<RefCell<_>>` the callbacks will clone.
pub trait Controllable {
    fn take_control(this: &Rc<RefCell<Self>>, controls: &mut ControlList)
    where
        Self: Sized;
}
