// THEORY:
// The `PixelBuffer` is the engine's entire view of an image: an immutable,
// row-major grid of `Pixel`s with the origin at the top-left. Decoding a JPEG or
// PNG into bytes is an external collaborator's job (the `image` crate at the
// call site); this module only adapts an already-decoded buffer and enforces the
// structural invariants every later stage relies on:
//
// 1.  **Validated at the boundary**: width and height must be at least 1 and the
//     byte length must be exactly width * height * 4 (RGBA). Construction is the
//     single place this is checked — everything downstream indexes without
//     re-validating.
// 2.  **Immutable after construction**: a buffer is never mutated, so one buffer
//     can back any number of concurrent analysis runs.

use crate::core_modules::pixel::pixel::Pixel;
use crate::error::{AnalysisError, AnalysisResult};

const CHANNELS: usize = 4;

/// An immutable width x height grid of RGBA pixels, row-major, origin top-left.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    /// The width of the image in pixels.
    width: u32,
    /// The height of the image in pixels.
    height: u32,
    /// The flattened pixel grid, `width * height` entries in row-major order.
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// Builds a buffer from a raw RGBA byte slice, row-major, 4 bytes per pixel.
    pub fn from_raw(width: u32, height: u32, bytes: &[u8]) -> AnalysisResult<Self> {
        if width == 0 || height == 0 {
            return Err(AnalysisError::InvalidInput(format!(
                "image dimensions must be at least 1x1, got {width}x{height}"
            )));
        }
        let expected_len = width as usize * height as usize * CHANNELS;
        if bytes.len() != expected_len {
            return Err(AnalysisError::InvalidInput(format!(
                "buffer length {} does not match {width}x{height} RGBA ({expected_len} bytes)",
                bytes.len()
            )));
        }

        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for sample in bytes.chunks_exact(CHANNELS) {
            pixels.push(Pixel::new(sample[0], sample[1], sample[2], sample[3]));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Adapts a decoded `image` crate buffer. `DynamicImage::to_rgba8` covers
    /// RGB sources, so this is the one entry point for externally decoded files.
    pub fn from_image(image: &image::RgbaImage) -> AnalysisResult<Self> {
        Self::from_raw(image.width(), image.height(), image.as_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The pixel at (x, y). Callers stay inside the validated dimensions;
    /// the row-major index math mirrors the byte layout of the source buffer.
    pub fn pixel_at(&self, x: u32, y: u32) -> &Pixel {
        &self.pixels[(y * self.width + x) as usize]
    }

    /// Row-major iteration over all pixels, top-left to bottom-right.
    pub fn pixels(&self) -> impl Iterator<Item = &Pixel> {
        self.pixels.iter()
    }
}
