//! Tile Packer
//!
//! Converts one 8x8 block of a pixel buffer into the two-bit-plane tile
//! format: for each pixel, the palette slot whose color matches exactly
//! contributes its low bit to plane 0 and its high bit to plane 1 at the
//! pixel's row/column. A pixel matching no slot contributes no bits and
//! decodes as palette index 0 (transparent) — a silent fallback shared
//! with the quantizer's >4-color degrade.

use crate::assets::AssetError;
use crate::common::bit_set;
use crate::image::ImageData;
use crate::ppu::{Palette, Tile, TILE_DIM};

/// Pack the 8x8 block whose lower-left pixel sits at
/// (`pixel_row`, `pixel_col`) in `image`.
///
/// The block must lie entirely within the image; an out-of-range offset
/// is a checked precondition reported as [`AssetError::TileOutOfBounds`].
pub fn pack_tile(
    image: &ImageData,
    pixel_row: usize,
    pixel_col: usize,
    palette: &Palette,
) -> Result<Tile, AssetError> {
    if pixel_row + TILE_DIM > image.height || pixel_col + TILE_DIM > image.width {
        return Err(AssetError::TileOutOfBounds {
            row: pixel_row,
            col: pixel_col,
            width: image.width,
            height: image.height,
        });
    }

    let mut tile = Tile::default();
    for y in 0..TILE_DIM {
        for x in 0..TILE_DIM {
            let pixel = image.pixel(pixel_row + y, pixel_col + x);
            if let Some(slot) = palette.iter().position(|&c| c == pixel) {
                bit_set(&mut tile.bit0[y], x as u8, slot & 0x1 != 0);
                bit_set(&mut tile.bit1[y], x as u8, slot & 0x2 != 0);
            }
            // Unmatched pixels leave both planes clear: index 0.
        }
    }
    Ok(tile)
}
