//! Asset Registrar
//!
//! Orchestrates turning a decoded image into PPU table entries: quantize
//! its palette, pack its tiles into the tile table, and point a
//! contiguous run of sprite slots at them. Table space is handed out by
//! an explicit [`Allocator`] so that every reservation either returns a
//! contiguous range or a capacity error, and a failed registration never
//! leaves partial table writes behind.
//!
//! Registration order fully determines the table layout: registering the
//! same assets in the same order reproduces the tables byte-for-byte.

use std::fmt;
use std::ops::Range;

use log::info;

use crate::image::ImageData;
use crate::pack::pack_tile;
use crate::ppu::{Ppu, SpriteSlot, PALETTE_TABLE_SIZE, SPRITE_SLOT_COUNT, TILE_DIM, TILE_TABLE_SIZE};
use crate::quantize::extract_palette;

/// The kinds of game object an asset can represent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Flamingo,
    Shrimp,
    Plant,
    Medicine,
}

/// Fatal precondition failures during asset registration. Capacity is
/// fixed at startup; none of these are recoverable at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// Asset needs more tile table entries than remain free
    TileTableFull { needed: usize, free: usize },
    /// No palette table slot left
    PaletteTableFull,
    /// Asset needs more sprite slots than remain free
    SpriteTableFull { needed: usize, free: usize },
    /// Image dimensions are not a positive multiple of the tile size
    BadDimensions { width: usize, height: usize },
    /// Palette slot index outside the table, or the reserved slot 0
    BadPaletteSlot { slot: usize },
    /// Tile sub-rectangle does not lie within the source image
    TileOutOfBounds { row: usize, col: usize, width: usize, height: usize },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::TileTableFull { needed, free } => {
                write!(f, "tile table full: asset needs {} tiles, {} free", needed, free)
            }
            AssetError::PaletteTableFull => {
                write!(f, "palette table full ({} slots)", PALETTE_TABLE_SIZE)
            }
            AssetError::SpriteTableFull { needed, free } => {
                write!(f, "sprite table full: asset needs {} slots, {} free", needed, free)
            }
            AssetError::BadDimensions { width, height } => {
                write!(f, "image is {}x{}, not a positive multiple of {}x{}", width, height, TILE_DIM, TILE_DIM)
            }
            AssetError::BadPaletteSlot { slot } => {
                write!(f, "palette slot {} is not an assignable slot (1-{})", slot, PALETTE_TABLE_SIZE - 1)
            }
            AssetError::TileOutOfBounds { row, col, width, height } => {
                write!(f, "tile block at ({}, {}) exceeds {}x{} image", row, col, width, height)
            }
        }
    }
}

impl std::error::Error for AssetError {}

/// Hands out contiguous ranges of the three fixed-capacity tables.
///
/// Palette slot 0 is never handed out: it stays all-clear so the
/// compositor can use it to hide sprites.
#[derive(Debug, Clone)]
pub struct Allocator {
    next_tile: usize,
    next_palette: usize,
    next_sprite: usize,
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new()
    }
}

impl Allocator {
    /// Create an allocator with all tables empty
    pub fn new() -> Self {
        Self { next_tile: 0, next_palette: 1, next_sprite: 0 }
    }

    /// Reserve `count` contiguous tile table entries. A failed
    /// reservation consumes nothing.
    pub fn reserve_tiles(&mut self, count: usize) -> Result<Range<usize>, AssetError> {
        let free = TILE_TABLE_SIZE - self.next_tile;
        if count > free {
            return Err(AssetError::TileTableFull { needed: count, free });
        }
        let start = self.next_tile;
        self.next_tile += count;
        Ok(start..self.next_tile)
    }

    /// Reserve `count` contiguous sprite slots
    pub fn reserve_sprites(&mut self, count: usize) -> Result<Range<usize>, AssetError> {
        let free = SPRITE_SLOT_COUNT - self.next_sprite;
        if count > free {
            return Err(AssetError::SpriteTableFull { needed: count, free });
        }
        let start = self.next_sprite;
        self.next_sprite += count;
        Ok(start..self.next_sprite)
    }

    /// Reserve the next free palette table slot
    pub fn reserve_palette(&mut self) -> Result<usize, AssetError> {
        if self.next_palette >= PALETTE_TABLE_SIZE {
            return Err(AssetError::PaletteTableFull);
        }
        let slot = self.next_palette;
        self.next_palette += 1;
        Ok(slot)
    }
}

/// Placement metadata binding one logical game object to its palette
/// slot and its contiguous runs of tile and sprite table entries.
/// Created once at registration; only `consumed` and the owned slots'
/// positions change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteInfo {
    pub kind: SpriteKind,
    /// Whether the object has been consumed (hidden) during gameplay
    pub consumed: bool,
    /// Palette table slot shared by every owned sprite slot
    pub palette_index: u8,
    /// First owned tile table entry
    pub start_tile_index: u8,
    /// First owned sprite slot
    pub start_sprite_index: u8,
    /// Tile grid width (image width / 8)
    pub tile_cols: usize,
    /// Tile grid height (image height / 8)
    pub tile_rows: usize,
}

impl SpriteInfo {
    /// Number of tiles (and sprite slots) this placement owns
    pub fn tile_count(&self) -> usize {
        self.tile_cols * self.tile_rows
    }
}

/// Register one image asset into the PPU tables.
///
/// Quantizes the image's palette into `palette_index` (a slot previously
/// reserved from the allocator; same-kind assets share one), packs each
/// 8x8 cell in row-major order into freshly reserved tile entries, and
/// points the same count of freshly reserved sprite slots at them with
/// per-cell offsets from (`x`, `y`).
///
/// All capacity checks happen before any table write, so a failing
/// registration leaves the PPU untouched.
pub fn register_asset(
    ppu: &mut Ppu,
    alloc: &mut Allocator,
    image: &ImageData,
    kind: SpriteKind,
    palette_index: usize,
    x: u8,
    y: u8,
) -> Result<SpriteInfo, AssetError> {
    if image.width == 0
        || image.height == 0
        || image.width % TILE_DIM != 0
        || image.height % TILE_DIM != 0
    {
        return Err(AssetError::BadDimensions { width: image.width, height: image.height });
    }
    // Slot 0 is the hide palette and must stay all-clear
    if palette_index == 0 || palette_index >= PALETTE_TABLE_SIZE {
        return Err(AssetError::BadPaletteSlot { slot: palette_index });
    }
    let tile_cols = image.width / TILE_DIM;
    let tile_rows = image.height / TILE_DIM;
    let tile_count = tile_cols * tile_rows;

    let tiles = alloc.reserve_tiles(tile_count)?;
    let sprites = alloc.reserve_sprites(tile_count)?;

    ppu.palette_table[palette_index] = extract_palette(image);

    for (cell, tile_index) in tiles.clone().enumerate() {
        let row = cell / tile_cols;
        let col = cell % tile_cols;
        let tile = pack_tile(image, row * TILE_DIM, col * TILE_DIM, &ppu.palette_table[palette_index])?;
        ppu.tile_table[tile_index] = tile;
    }

    for (cell, sprite_index) in sprites.clone().enumerate() {
        let row = cell / tile_cols;
        let col = cell % tile_cols;
        ppu.sprites[sprite_index] = SpriteSlot {
            x: x.wrapping_add((col * TILE_DIM) as u8),
            y: y.wrapping_add((row * TILE_DIM) as u8),
            tile: (tiles.start + cell) as u8,
            palette: palette_index as u8,
        };
    }

    info!(
        "registered {:?}: palette {}, tiles {}..{}, sprites {}..{}",
        kind, palette_index, tiles.start, tiles.end, sprites.start, sprites.end
    );

    Ok(SpriteInfo {
        kind,
        consumed: false,
        palette_index: palette_index as u8,
        start_tile_index: tiles.start as u8,
        start_sprite_index: sprites.start as u8,
        tile_cols,
        tile_rows,
    })
}
