//! Color Quantizer
//!
//! Extracts a 4-color palette from a bitmap by scanning pixels in the
//! canonical order (left-to-right, bottom-to-top). Slot 0 keeps the
//! all-clear sentinel as the transparent/background entry; slots 1-3
//! take the first three additional distinct colors seen.
//!
//! Images are expected to be pre-quantized to at most 4 distinct colors
//! including one transparent. When they are not, pixels carrying a 5th
//! color are silently ignored: they end up unmatched in the packer and
//! render as the background. This degrade is deliberate and tested, not
//! an error.

use crate::common::Color;
use crate::image::ImageData;
use crate::ppu::Palette;

/// Extract up to 4 colors from `image` into a palette. Pure; scanning
/// stops early once every slot is assigned.
pub fn extract_palette(image: &ImageData) -> Palette {
    let mut palette: Palette = [Color::CLEAR; 4];

    // Slot 0 stays the transparent sentinel, so only 3 colors are read.
    let mut filled = 1;
    for &pixel in image.pixels.iter().take(image.width * image.height) {
        if filled >= palette.len() {
            break;
        }
        // A pixel matching any slot (including an unassigned sentinel
        // slot) claims no new entry.
        if palette.contains(&pixel) {
            continue;
        }
        palette[filled] = pixel;
        filled += 1;
    }

    palette
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PINK: Color = Color::new(0xFF, 0x80, 0xC0, 0xFF);
    const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF, 0xFF);
    const GREEN: Color = Color::new(0x00, 0xFF, 0x00, 0xFF);
    const BLUE: Color = Color::new(0x00, 0x00, 0xFF, 0xFF);

    fn image_of(width: usize, height: usize, colors: &[Color]) -> ImageData {
        ImageData::from_raw(width, height, colors.to_vec())
    }

    #[test]
    fn test_first_seen_order_fills_slots() {
        let image = image_of(2, 2, &[PINK, WHITE, GREEN, PINK]);
        let palette = extract_palette(&image);
        assert_eq!(palette, [Color::CLEAR, PINK, WHITE, GREEN]);
    }

    #[test]
    fn test_transparent_pixels_match_sentinel() {
        let image = image_of(2, 2, &[Color::CLEAR, PINK, Color::CLEAR, WHITE]);
        let palette = extract_palette(&image);
        assert_eq!(palette, [Color::CLEAR, PINK, WHITE, Color::CLEAR]);
    }

    #[test]
    fn test_fifth_color_silently_ignored() {
        let image = image_of(5, 1, &[PINK, WHITE, GREEN, BLUE, Color::new(9, 9, 9, 9)]);
        let palette = extract_palette(&image);
        // BLUE filled the last slot; the 5th color claims nothing
        assert_eq!(palette, [Color::CLEAR, PINK, WHITE, GREEN]);
    }

    #[test]
    fn test_three_color_image_leaves_slot_3_sentinel() {
        // The 16x16 scenario: transparent, pink, white
        let mut colors = vec![Color::CLEAR; 256];
        colors[3] = PINK;
        colors[100] = WHITE;
        colors[200] = PINK;
        let palette = extract_palette(&image_of(16, 16, &colors));
        assert_eq!(palette, [Color::CLEAR, PINK, WHITE, Color::CLEAR]);
    }

    fn arb_color() -> impl Strategy<Value = Color> {
        (any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>())
            .prop_map(|(r, g, b, a)| Color::new(r, g, b, a))
    }

    proptest! {
        #[test]
        fn quantization_is_idempotent(pixels in prop::collection::vec(arb_color(), 64)) {
            let image = ImageData::from_raw(8, 8, pixels);
            prop_assert_eq!(extract_palette(&image), extract_palette(&image));
        }

        #[test]
        fn filled_slots_appear_in_image(pixels in prop::collection::vec(arb_color(), 64)) {
            let image = ImageData::from_raw(8, 8, pixels);
            let palette = extract_palette(&image);
            for &entry in &palette[1..] {
                prop_assert!(entry == Color::CLEAR || image.pixels.contains(&entry));
            }
        }
    }
}
