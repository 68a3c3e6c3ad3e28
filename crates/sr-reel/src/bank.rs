//! Multi-reel bank
//!
//! The owning composition for a row of reels sharing one render target.
//! Reels are handed out as `Rc<RefCell<_>>` so control-list callbacks and
//! the bank can share them within the single-threaded tick loop.

use std::cell::RefCell;
use std::rc::Rc;

use sr_core::{Renderable, SymbolRenderer, Updateable};

use crate::reel::Reel;

/// An ordered row of reels, placed left to right.
#[derive(Default)]
pub struct ReelBank {
    reels: Vec<Rc<RefCell<Reel>>>,
    origin_x: i32,
    origin_y: i32,
    /// Horizontal gap between reel windows, in pixels.
    gap: i32,
}

impl ReelBank {
    pub fn new(origin_x: i32, origin_y: i32, gap: i32) -> Self {
        Self {
            reels: Vec::new(),
            origin_x,
            origin_y,
            gap,
        }
    }

    /// Append a reel and place it one pitch (plus gap) right of the last.
    pub fn add_reel(&mut self, reel: Rc<RefCell<Reel>>, symbol_size: i32) {
        let x = self.origin_x + self.reels.len() as i32 * (symbol_size + self.gap);
        reel.borrow_mut().set_position(x, self.origin_y);
        self.reels.push(reel);
    }

    pub fn len(&self) -> usize {
        self.reels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reels.is_empty()
    }

    pub fn reel(&self, index: usize) -> Option<&Rc<RefCell<Reel>>> {
        self.reels.get(index)
    }

    /// Tick every reel, in order. Reels share no mutable state and update
    /// deterministically within the tick.
    pub fn update_all(&mut self) {
        for reel in &self.reels {
            reel.borrow_mut().update();
        }
    }

    /// Render every reel against the shared target, left to right.
    pub fn render_all(&self, target: &mut dyn SymbolRenderer) {
        for reel in &self.reels {
            reel.borrow().render(target);
        }
    }

    /// Any reel still in motion?
    pub fn any_spinning(&self) -> bool {
        self.reels.iter().any(|r| r.borrow().is_spinning())
    }

    /// Visible symbol IDs, column-major: one `Vec` per reel, top to bottom.
    pub fn visible_grid(&self, visible_symbols: usize) -> Vec<Vec<i32>> {
        self.reels
            .iter()
            .map(|reel| {
                let reel = reel.borrow();
                (0..visible_symbols).map(|i| reel.visible_symbol_id(i)).collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReelConfig;
    use crate::strip::{SymbolSet, SymbolStrip};
    use sr_core::{ImageHandle, RecordingRenderer};

    fn bank_of(count: usize) -> ReelBank {
        let set = SymbolSet::new((0..5u32).map(ImageHandle).collect());
        let config = ReelConfig::default();
        let mut bank = ReelBank::new(10, 20, 2);
        for _ in 0..count {
            let strip = SymbolStrip::new(vec![0, 1, 2, 3, 4]);
            let reel = Reel::new(&set, strip, &config).unwrap();
            bank.add_reel(Rc::new(RefCell::new(reel)), config.symbol_size);
        }
        bank
    }

    #[test]
    fn test_reels_placed_by_pitch_spacing() {
        let bank = bank_of(3);
        let mut target = RecordingRenderer::new();
        bank.render_all(&mut target);

        // 3 stopped reels, 3 slots each, x advances by size + gap
        assert_eq!(target.calls.len(), 9);
        assert_eq!(target.calls[0].x, 10);
        assert_eq!(target.calls[3].x, 28);
        assert_eq!(target.calls[6].x, 46);
    }

    #[test]
    fn test_update_all_drives_every_reel() {
        let mut bank = bank_of(2);
        bank.reel(0).unwrap().borrow_mut().play_button();
        bank.reel(1).unwrap().borrow_mut().play_button();

        for _ in 0..10 {
            bank.update_all();
        }
        assert!(bank.any_spinning());
        assert_eq!(
            bank.reel(0).unwrap().borrow().current_position(),
            bank.reel(1).unwrap().borrow().current_position()
        );
    }

    #[test]
    fn test_visible_grid_is_column_major() {
        let bank = bank_of(2);
        let grid = bank.visible_grid(3);
        assert_eq!(grid, vec![vec![0, 1, 2], vec![0, 1, 2]]);
    }
}
