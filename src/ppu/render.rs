//! Frame rasterizer
//!
//! Composes the PPU's tables into the ARGB video buffer once per draw
//! step. The presentation frontend only reads the buffer between steps.

use super::{Ppu, SCREEN_HEIGHT, SCREEN_WIDTH, SPRITE_SLOT_COUNT, TILE_DIM};

impl Ppu {
    /// Rasterize one frame: clear to the background color, then draw
    /// every sprite slot. Slots are walked back-to-front so that lower
    /// slot indices end up on top, matching NES-style sprite priority.
    ///
    /// Tile pixel index 0 is transparent, as is any palette entry with
    /// zero alpha; such pixels leave the background visible. Sprite
    /// pixels falling outside the 256x240 screen are clipped.
    pub fn render(&mut self) {
        let background = self.background_color.to_argb();
        self.video_buffer.fill(background);

        for slot_index in (0..SPRITE_SLOT_COUNT).rev() {
            let slot = self.sprites[slot_index];
            let palette = self.palette_table[(slot.palette as usize) % self.palette_table.len()];
            let tile = self.tile_table[slot.tile as usize];

            for row in 0..TILE_DIM {
                for col in 0..TILE_DIM {
                    let index = tile.pixel_index(row, col);
                    if index == 0 {
                        continue;
                    }
                    let color = palette[index as usize];
                    if color.a == 0 {
                        continue;
                    }

                    let x = slot.x as usize + col;
                    let y = slot.y as usize + row;
                    if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
                        continue;
                    }

                    // Sprite y grows upward; the video buffer is top-down.
                    let buffer_row = SCREEN_HEIGHT - 1 - y;
                    self.video_buffer[buffer_row * SCREEN_WIDTH + x] = color.to_argb();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Color;

    const PINK: Color = Color::new(0xFF, 0x80, 0xC0, 0xFF);
    const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF, 0xFF);

    /// Index of screen pixel (x, y) in the top-down video buffer
    fn buffer_index(x: usize, y: usize) -> usize {
        (SCREEN_HEIGHT - 1 - y) * SCREEN_WIDTH + x
    }

    fn ppu_with_solid_tile(color: Color) -> Ppu {
        let mut ppu = Ppu::new();
        // Tile 1 is solid palette index 1; palette 1 slot 1 holds `color`
        ppu.tile_table[1].bit0 = [0xFF; 8];
        ppu.palette_table[1][1] = color;
        ppu
    }

    #[test]
    fn test_background_fill() {
        let mut ppu = Ppu::new();
        ppu.background_color = Color::new(0xAD, 0xD8, 0xE6, 0xFF);
        ppu.render();
        assert!(ppu.video_buffer.iter().all(|&p| p == 0xFFADD8E6));
    }

    #[test]
    fn test_sprite_draws_at_position() {
        let mut ppu = ppu_with_solid_tile(PINK);
        ppu.sprites[0] = crate::ppu::SpriteSlot { x: 10, y: 20, tile: 1, palette: 1 };
        ppu.render();

        assert_eq!(ppu.video_buffer[buffer_index(10, 20)], PINK.to_argb());
        assert_eq!(ppu.video_buffer[buffer_index(17, 27)], PINK.to_argb());
        // One pixel past the tile in each direction stays background
        assert_eq!(ppu.video_buffer[buffer_index(18, 20)], 0);
        assert_eq!(ppu.video_buffer[buffer_index(10, 28)], 0);
    }

    #[test]
    fn test_pixel_index_zero_is_transparent() {
        let mut ppu = Ppu::new();
        ppu.background_color = WHITE;
        // Palette 1 slot 0 is an opaque color, but index-0 pixels must
        // still fall through to the background.
        ppu.palette_table[1][0] = PINK;
        ppu.sprites[0] = crate::ppu::SpriteSlot { x: 0, y: 0, tile: 0, palette: 1 };
        ppu.render();
        assert_eq!(ppu.video_buffer[buffer_index(0, 0)], WHITE.to_argb());
    }

    #[test]
    fn test_lower_slot_index_draws_on_top() {
        let mut ppu = Ppu::new();
        ppu.tile_table[1].bit0 = [0xFF; 8];
        ppu.palette_table[1][1] = PINK;
        ppu.palette_table[2][1] = WHITE;
        // Both sprites cover (0, 0); slot 0 must win
        ppu.sprites[0] = crate::ppu::SpriteSlot { x: 0, y: 0, tile: 1, palette: 1 };
        ppu.sprites[1] = crate::ppu::SpriteSlot { x: 0, y: 0, tile: 1, palette: 2 };
        ppu.render();
        assert_eq!(ppu.video_buffer[buffer_index(0, 0)], PINK.to_argb());
    }

    #[test]
    fn test_sprite_clips_at_screen_edge() {
        let mut ppu = ppu_with_solid_tile(PINK);
        // x = 252 leaves only 4 columns on screen
        ppu.sprites[0] = crate::ppu::SpriteSlot { x: 252, y: 0, tile: 1, palette: 1 };
        ppu.render();
        assert_eq!(ppu.video_buffer[buffer_index(255, 0)], PINK.to_argb());
        // Nothing wrapped around to column 0
        assert_eq!(ppu.video_buffer[buffer_index(0, 0)], 0);
    }

    #[test]
    fn test_zero_alpha_palette_entry_is_transparent() {
        let mut ppu = Ppu::new();
        ppu.background_color = WHITE;
        ppu.tile_table[1].bit0 = [0xFF; 8];
        // Palette 0 stays all-clear: a hidden sprite leaves no pixels
        ppu.sprites[0] = crate::ppu::SpriteSlot { x: 0, y: 0, tile: 1, palette: 0 };
        ppu.render();
        assert_eq!(ppu.video_buffer[buffer_index(0, 0)], WHITE.to_argb());
    }
}
