//! Common types and utilities
//!
//! This module defines the RGBA color value type shared by the whole
//! pipeline and provides bit manipulation utilities for tile packing.

/// 8-bit-per-channel RGBA color. Equality is exact, channel for channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully transparent black. Palette slots start out as this sentinel,
    /// and it doubles as the "background/transparent" palette entry.
    pub const CLEAR: Color = Color::new(0, 0, 0, 0);

    /// Create a color from its four channels
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Pack into 0xAARRGGBB, the format of the video buffer
    pub const fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }
}

/// Check if a specific bit is set in a byte value
///
/// # Arguments
/// * `value` - The byte value to check
/// * `n` - The bit position (0-7)
///
/// # Returns
/// `true` if the bit at position `n` is set, `false` otherwise
#[inline]
pub fn bit(value: u8, n: u8) -> bool {
    (value & (1 << n)) != 0
}

/// Set or clear a specific bit in a byte value
///
/// # Arguments
/// * `value` - Mutable reference to the byte value
/// * `n` - The bit position (0-7)
/// * `on` - `true` to set the bit, `false` to clear it
#[inline]
pub fn bit_set(value: &mut u8, n: u8, on: bool) {
    if on {
        *value |= 1 << n;
    } else {
        *value &= !(1 << n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit() {
        assert!(bit(0b00000001, 0));
        assert!(!bit(0b00000001, 1));
        assert!(bit(0b10000000, 7));
        assert!(!bit(0b01111111, 7));
        assert!(bit(0b00010000, 4));
    }

    #[test]
    fn test_bit_set() {
        let mut value: u8 = 0;

        bit_set(&mut value, 0, true);
        assert_eq!(value, 0b00000001);

        bit_set(&mut value, 7, true);
        assert_eq!(value, 0b10000001);

        bit_set(&mut value, 0, false);
        assert_eq!(value, 0b10000000);

        bit_set(&mut value, 7, false);
        assert_eq!(value, 0);
    }

    #[test]
    fn test_color_equality() {
        let pink = Color::new(0xFF, 0x80, 0xC0, 0xFF);
        assert_eq!(pink, Color::new(0xFF, 0x80, 0xC0, 0xFF));
        assert_ne!(pink, Color::new(0xFF, 0x80, 0xC0, 0xFE));
        assert_eq!(Color::default(), Color::CLEAR);
    }

    #[test]
    fn test_color_to_argb() {
        assert_eq!(Color::new(0xAD, 0xD8, 0xE6, 0xFF).to_argb(), 0xFFADD8E6);
        assert_eq!(Color::CLEAR.to_argb(), 0);
    }
}
