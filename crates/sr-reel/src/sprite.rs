//! Symbol sprite
//!
//! One sprite per strip position, cycling through its frames at the
//! configured rate while animating. The default art set is single-frame,
//! which makes the animation machinery a pass-through; the reel positions
//! and renders sprites but never starts their animations itself.

use sr_core::{ColorMode, ImageHandle, SymbolRenderer, Updateable};

/// Frame-cycling sprite for one symbol.
#[derive(Debug, Clone)]
pub struct SymbolSprite {
    frames: Vec<ImageHandle>,
    size: i32,
    frame_rate: u32,

    current_frame: usize,
    frame_counter: u32,
    animating: bool,
}

impl SymbolSprite {
    /// Single-frame sprite.
    pub fn new(image: ImageHandle, size: i32, frame_rate: u32) -> Self {
        Self::with_frames(vec![image], size, frame_rate)
    }

    /// Multi-frame sprite cycling every `frame_rate` ticks.
    pub fn with_frames(frames: Vec<ImageHandle>, size: i32, frame_rate: u32) -> Self {
        debug_assert!(!frames.is_empty());
        Self {
            frames,
            size,
            frame_rate: frame_rate.max(1),
            current_frame: 0,
            frame_counter: 0,
            animating: false,
        }
    }

    pub fn start_animation(&mut self) {
        self.animating = true;
        self.current_frame = 0;
        self.frame_counter = 0;
    }

    pub fn stop_animation(&mut self) {
        self.animating = false;
        self.current_frame = 0;
        self.frame_counter = 0;
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    /// Draw the current frame at `(x, y)` in white.
    pub fn render_at(&self, x: i32, y: i32, target: &mut dyn SymbolRenderer) {
        target.draw(
            x,
            y,
            self.frames[self.current_frame],
            self.size,
            self.size,
            ColorMode::White,
        );
    }
}

impl Updateable for SymbolSprite {
    fn update(&mut self) {
        if !self.animating {
            return;
        }
        self.frame_counter += 1;
        if self.frame_counter >= self.frame_rate {
            self.frame_counter = 0;
            self.current_frame = (self.current_frame + 1) % self.frames.len();
        }
    }
}
