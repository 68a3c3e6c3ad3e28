//! Capability traits
//!
//! Game entities pick up capabilities by implementing independent traits
//! rather than inheriting from a base hierarchy. Control registration lives
//! in `sr-input` (`Controllable`) because it needs the control list type.

use crate::render::SymbolRenderer;

/// Advanced once per tick by the driving loop.
pub trait Updateable {
    fn update(&mut self);
}

/// Drawn once per frame against a host-supplied render target.
pub trait Renderable {
    fn render(&self, target: &mut dyn SymbolRenderer);
}
