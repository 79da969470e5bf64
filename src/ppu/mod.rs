//! PPU Module
//!
//! This module models a fixed-function picture processing unit in the
//! style of 8-bit console hardware: a 256-entry tile table of 2-bit-plane
//! tiles, an 8-entry palette table of 4 colors each, and 64 hardware
//! sprite slots. All tables are owned by the [`Ppu`] and written only
//! during asset registration and compositing.

pub mod render;

use crate::common::{bit, Color};

/// Screen dimensions
pub const SCREEN_WIDTH: usize = 256;
pub const SCREEN_HEIGHT: usize = 240;

/// Tile side length in pixels
pub const TILE_DIM: usize = 8;
/// Tile table capacity
pub const TILE_TABLE_SIZE: usize = 256;
/// Palette table capacity
pub const PALETTE_TABLE_SIZE: usize = 8;
/// Hardware sprite slot capacity
pub const SPRITE_SLOT_COUNT: usize = 64;

/// A 4-color palette. Slot 0 is conventionally transparent/background.
pub type Palette = [Color; 4];

/// One 8x8 tile of 2-bit palette indices, stored as two parallel bit
/// planes: one byte per row, bit `x` of a row byte addressing column `x`.
/// Rows run bottom-to-top, matching the bottom-left pixel buffer origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile {
    /// Low bit plane
    pub bit0: [u8; 8],
    /// High bit plane
    pub bit1: [u8; 8],
}

impl Tile {
    /// Palette index (0-3) of the pixel at (row, col) within the tile
    pub fn pixel_index(&self, row: usize, col: usize) -> u8 {
        let lo = bit(self.bit0[row], col as u8) as u8;
        let hi = bit(self.bit1[row], col as u8) as u8;
        (hi << 1) | lo
    }
}

/// One hardware-drawable sprite slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpriteSlot {
    /// X position in screen pixels
    pub x: u8,
    /// Y position in screen pixels (bottom-left origin)
    pub y: u8,
    /// Tile table index
    pub tile: u8,
    /// Palette table index
    pub palette: u8,
}

/// Picture Processing Unit
#[derive(Debug, Clone)]
pub struct Ppu {
    /// Tile table, appended to during asset registration
    pub tile_table: [Tile; TILE_TABLE_SIZE],
    /// Palette table; palette 0 stays all-clear so it can hide sprites
    pub palette_table: [Palette; PALETTE_TABLE_SIZE],
    /// Hardware sprite slots
    pub sprites: [SpriteSlot; SPRITE_SLOT_COUNT],
    /// Color the screen clears to each frame
    pub background_color: Color,
    /// Video buffer (256x240 pixels, ARGB format, top-left origin)
    pub video_buffer: Vec<u32>,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    /// Create a new PPU with all tables zeroed
    pub fn new() -> Self {
        Self {
            tile_table: [Tile::default(); TILE_TABLE_SIZE],
            palette_table: [[Color::CLEAR; 4]; PALETTE_TABLE_SIZE],
            sprites: [SpriteSlot::default(); SPRITE_SLOT_COUNT],
            background_color: Color::CLEAR,
            video_buffer: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }

    /// Reset all tables to their power-on state
    pub fn init(&mut self) {
        self.tile_table = [Tile::default(); TILE_TABLE_SIZE];
        self.palette_table = [[Color::CLEAR; 4]; PALETTE_TABLE_SIZE];
        self.sprites = [SpriteSlot::default(); SPRITE_SLOT_COUNT];
        self.background_color = Color::CLEAR;
        self.video_buffer.fill(0);
    }
}
