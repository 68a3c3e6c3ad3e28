//! ASCII render target
//!
//! Maps draw calls onto a character grid: one column per reel, one row per
//! slot. Symbol images become letters (`A` + image index). Draws outside
//! the grid are clipped, which absorbs the partially visible slots a
//! spinning reel emits above and below the window.

use sr_core::{ColorMode, ImageHandle, SymbolRenderer};

/// Character-cell render target.
pub struct AsciiTarget {
    cols: usize,
    rows: usize,
    cell_px: i32,
    cells: Vec<char>,
}

impl AsciiTarget {
    /// Grid of `cols` × `rows` cells, each `cell_px` pixels square.
    pub fn new(cols: usize, rows: usize, cell_px: i32) -> Self {
        Self {
            cols,
            rows,
            cell_px: cell_px.max(1),
            cells: vec!['.'; cols * rows],
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill('.');
    }

    /// Render the grid as one string, rows top to bottom.
    pub fn frame(&self) -> String {
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for row in 0..self.rows {
            for col in 0..self.cols {
                out.push(self.cells[row * self.cols + col]);
            }
            out.push('\n');
        }
        out
    }

    fn glyph(image: ImageHandle) -> char {
        (b'A' + (image.0 % 26) as u8) as char
    }
}

impl SymbolRenderer for AsciiTarget {
    fn draw(&mut self, x: i32, y: i32, image: ImageHandle, _width: i32, _height: i32, _color: ColorMode) {
        let col = x.div_euclid(self.cell_px);
        let row = y.div_euclid(self.cell_px);
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return;
        }
        self.cells[row as usize * self.cols + col as usize] = Self::glyph(image);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draws_land_in_cells() {
        let mut target = AsciiTarget::new(2, 3, 16);
        target.draw(0, 0, ImageHandle(0), 16, 16, ColorMode::White);
        target.draw(16, 32, ImageHandle(2), 16, 16, ColorMode::White);
        assert_eq!(target.frame(), "A.\n..\n.C\n");
    }

    #[test]
    fn test_out_of_grid_draws_clipped() {
        let mut target = AsciiTarget::new(1, 1, 16);
        target.draw(0, -16, ImageHandle(0), 16, 16, ColorMode::White);
        target.draw(0, 16, ImageHandle(1), 16, 16, ColorMode::White);
        assert_eq!(target.frame(), ".\n");
    }

    #[test]
    fn test_later_draws_paint_over_earlier() {
        let mut target = AsciiTarget::new(1, 1, 16);
        target.draw(0, 0, ImageHandle(0), 16, 16, ColorMode::White);
        target.draw(0, 0, ImageHandle(1), 16, 16, ColorMode::White);
        assert_eq!(target.frame(), "B\n");
    }
}
