//! Render target abstraction
//!
//! The spin engine never draws pixels itself; it computes coordinates and
//! issues one draw call per visible slot against a [`SymbolRenderer`]
//! supplied by the host. Draws are issued in slot order and later draws
//! paint over earlier ones (no z-buffer).

use serde::{Deserialize, Serialize};

/// Opaque handle to a symbol image owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle(pub u32);

/// Draw color mode for monochrome targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorMode {
    #[default]
    White,
    Black,
    Invert,
}

/// A target the engine can draw symbol images onto.
pub trait SymbolRenderer {
    /// Draw one image at `(x, y)` with the given pixel extent.
    fn draw(&mut self, x: i32, y: i32, image: ImageHandle, width: i32, height: i32, color: ColorMode);
}

/// One recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub x: i32,
    pub y: i32,
    pub image: ImageHandle,
    pub width: i32,
    pub height: i32,
    pub color: ColorMode,
}

/// Recording fake for tests: captures every draw call in issue order.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl SymbolRenderer for RecordingRenderer {
    fn draw(&mut self, x: i32, y: i32, image: ImageHandle, width: i32, height: i32, color: ColorMode) {
        self.calls.push(DrawCall {
            x,
            y,
            image,
            width,
            height,
            color,
        });
    }
}
