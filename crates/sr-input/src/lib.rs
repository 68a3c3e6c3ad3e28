//! sr-input: Per-tick input edge detection and control dispatch
//!
//! The [`Pad`] turns a raw per-tick button bitmask into edge, hold, and
//! repeat predicates computed against one consistent previous-tick snapshot.
//! The [`ControlList`] is a bounded registration list of (predicate, mask,
//! callback) entries the driver walks once per tick.

mod controls;
mod pad;

pub use controls::*;
pub use pad::*;
