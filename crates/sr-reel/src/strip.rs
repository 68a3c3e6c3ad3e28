//! Symbol art set and strip layout

use serde::{Deserialize, Serialize};

use sr_core::ImageHandle;

/// Sentinel returned for out-of-range visible-slot queries.
pub const INVALID_SYMBOL: i32 = -1;

/// The art set: one image handle per symbol ID.
///
/// Symbol IDs index into this set; a strip references IDs, never images,
/// so several reels can share one set.
#[derive(Debug, Clone)]
pub struct SymbolSet {
    images: Vec<ImageHandle>,
}

impl SymbolSet {
    pub fn new(images: Vec<ImageHandle>) -> Self {
        Self { images }
    }

    /// Image for a symbol ID, if the ID is known.
    pub fn image(&self, symbol_id: i32) -> Option<ImageHandle> {
        usize::try_from(symbol_id)
            .ok()
            .and_then(|id| self.images.get(id).copied())
    }

    /// Number of distinct symbol IDs.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// The cyclic sequence of symbol IDs printed on one reel strip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolStrip {
    ids: Vec<i32>,
}

impl SymbolStrip {
    pub fn new(ids: Vec<i32>) -> Self {
        Self { ids }
    }

    /// Symbol ID at a strip position.
    pub fn id(&self, position: usize) -> i32 {
        self.ids[position]
    }

    /// Strip length N; positions are taken modulo this.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[i32] {
        &self.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_set_lookup() {
        let set = SymbolSet::new(vec![ImageHandle(10), ImageHandle(11)]);
        assert_eq!(set.image(0), Some(ImageHandle(10)));
        assert_eq!(set.image(1), Some(ImageHandle(11)));
        assert_eq!(set.image(2), None);
        assert_eq!(set.image(INVALID_SYMBOL), None);
    }

    #[test]
    fn test_strip_positions() {
        let strip = SymbolStrip::new(vec![0, 1, 2, 1, 0]);
        assert_eq!(strip.len(), 5);
        assert_eq!(strip.id(3), 1);
    }
}
