//! Sprite Compositor
//!
//! Per-frame operations over a registered placement's run of sprite
//! slots. A placement's slot range is fixed for the whole session; the
//! compositor only rewrites positions and palette indices, never
//! reallocates.

use crate::assets::SpriteInfo;
use crate::ppu::{Ppu, TILE_DIM};

impl Ppu {
    /// Move a composite sprite as a rigid unit: the slot for grid cell
    /// (r, c) lands at (x + c*8, y + r*8).
    pub fn reposition(&mut self, info: &SpriteInfo, x: u8, y: u8) {
        for row in 0..info.tile_rows {
            for col in 0..info.tile_cols {
                let slot = info.start_sprite_index as usize + row * info.tile_cols + col;
                self.sprites[slot].x = x.wrapping_add((col * TILE_DIM) as u8);
                self.sprites[slot].y = y.wrapping_add((row * TILE_DIM) as u8);
            }
        }
    }

    /// Hide or show a composite sprite. Hiding points every owned slot
    /// at palette 0, which stays all-clear, so the sprite keeps its
    /// slots but draws nothing; showing restores the asset's palette.
    pub fn set_hidden(&mut self, info: &SpriteInfo, hidden: bool) {
        let palette = if hidden { 0 } else { info.palette_index };
        for slot in 0..info.tile_count() {
            self.sprites[info.start_sprite_index as usize + slot].palette = palette;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{register_asset, Allocator, SpriteKind};
    use crate::common::Color;
    use crate::image::ImageData;

    fn registered_ppu() -> (Ppu, SpriteInfo) {
        let mut ppu = Ppu::new();
        let mut alloc = Allocator::new();
        let image = ImageData::from_raw(16, 16, vec![Color::new(1, 2, 3, 255); 256]);
        let palette = alloc.reserve_palette().unwrap();
        let info = register_asset(&mut ppu, &mut alloc, &image, SpriteKind::Shrimp, palette, 30, 40)
            .unwrap();
        (ppu, info)
    }

    #[test]
    fn test_reposition_preserves_cell_offsets() {
        let (mut ppu, info) = registered_ppu();
        ppu.reposition(&info, 100, 200);

        for row in 0..2 {
            for col in 0..2 {
                let slot = ppu.sprites[info.start_sprite_index as usize + row * 2 + col];
                assert_eq!(slot.x, 100 + (col as u8) * 8);
                assert_eq!(slot.y, 200 + (row as u8) * 8);
            }
        }
        // Tile and palette assignments are untouched
        assert_eq!(ppu.sprites[0].tile, 0);
        assert_eq!(ppu.sprites[3].tile, 3);
        assert_eq!(ppu.sprites[0].palette, info.palette_index);
    }

    #[test]
    fn test_hide_then_show_restores_palette() {
        let (mut ppu, info) = registered_ppu();
        let before: Vec<u8> = ppu.sprites[..4].iter().map(|s| s.palette).collect();

        ppu.set_hidden(&info, true);
        assert!(ppu.sprites[..4].iter().all(|s| s.palette == 0));

        ppu.set_hidden(&info, false);
        let after: Vec<u8> = ppu.sprites[..4].iter().map(|s| s.palette).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_operations_stay_within_owned_range() {
        let (mut ppu, info) = registered_ppu();
        let untouched = ppu.sprites[4];
        ppu.reposition(&info, 5, 5);
        ppu.set_hidden(&info, true);
        assert_eq!(ppu.sprites[4], untouched);
    }
}
