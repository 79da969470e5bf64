//! Flamingo Library
//!
//! A 2D sprite game rendered through an emulated fixed-function picture
//! processing unit: 256 two-bit-plane tiles, 8 palettes of 4 colors,
//! 64 hardware sprite slots. The asset pipeline converts RGBA PNGs into
//! this format deterministically at startup (quantize -> pack ->
//! register), and the compositor drives the sprite slots each frame.

pub mod assets;
pub mod common;
pub mod compositor;
pub mod game;
pub mod image;
pub mod input;
pub mod pack;
pub mod ppu;
pub mod quantize;
pub mod ui;
