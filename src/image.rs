//! Image decoding collaborator
//!
//! Decodes PNG assets into the bottom-left-origin RGBA pixel buffers the
//! quantizer and tile packer address. Decode failures are fatal at
//! startup; asset files are read-only inputs.

use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::info;

use crate::common::Color;

/// A decoded bitmap: row-major pixels with a bottom-left origin, scanning
/// left-to-right then bottom-to-top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color>,
}

impl ImageData {
    /// Wrap an existing pixel buffer. The buffer length must be
    /// `width * height`.
    pub fn from_raw(width: usize, height: usize, pixels: Vec<Color>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self { width, height, pixels }
    }

    /// Pixel at (row, col), row 0 being the bottom of the image
    pub fn pixel(&self, row: usize, col: usize) -> Color {
        self.pixels[row * self.width + col]
    }

    /// Decode an 8-bit RGB or RGBA PNG file, flipping rows into the
    /// bottom-left origin convention.
    pub fn load_png<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading {}", path.display());

        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let decoder = png::Decoder::new(file);
        let mut reader = decoder
            .read_info()
            .with_context(|| format!("decoding {}", path.display()))?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let frame = reader
            .next_frame(&mut buf)
            .with_context(|| format!("decoding {}", path.display()))?;

        if frame.bit_depth != png::BitDepth::Eight {
            bail!("{}: unsupported bit depth {:?}", path.display(), frame.bit_depth);
        }
        let channels = match frame.color_type {
            png::ColorType::Rgba => 4,
            png::ColorType::Rgb => 3,
            other => bail!("{}: unsupported color type {:?}", path.display(), other),
        };

        let width = frame.width as usize;
        let height = frame.height as usize;
        let pixels = rows_bottom_up(width, height, channels, &buf);
        Ok(Self { width, height, pixels })
    }
}

/// Convert top-down interleaved channel data to a bottom-left-origin
/// color buffer. Three-channel input is treated as fully opaque.
fn rows_bottom_up(width: usize, height: usize, channels: usize, data: &[u8]) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(width * height);
    for row in (0..height).rev() {
        for col in 0..width {
            let i = (row * width + col) * channels;
            let a = if channels == 4 { data[i + 3] } else { 0xFF };
            pixels.push(Color::new(data[i], data[i + 1], data[i + 2], a));
        }
    }
    pixels
}
