//! sr-core: Shared types, traits, and utilities for SpinRig
//!
//! This crate provides the foundational types used across all SpinRig crates:
//! the workspace error type, the cyclic state machine, and the capability
//! traits the tick loop is built on.

mod error;
mod render;
mod state;
mod traits;

pub use error::*;
pub use render::*;
pub use state::*;
pub use traits::*;

/// Fixed-point scale: 1000 scaled units = one full symbol pitch.
pub const SCALE_FACTOR: i32 = 1000;
