//! sr-reel: Reel spin-control engine
//!
//! A [`Reel`] is a finite-state machine over a fixed-point position
//! simulation: start-up acceleration, constant-speed spin, deceleration with
//! symbol snapping, and post-stop nudge adjustment. Reels are driven once
//! per tick by the host loop and draw themselves against a
//! [`sr_core::SymbolRenderer`].

mod bank;
mod config;
mod reel;
mod sprite;
mod strip;

pub use bank::*;
pub use config::*;
pub use reel::*;
pub use sprite::*;
pub use strip::*;
