//! Builders for small synthetic RGBA images used across the integration tests.

use chroma_regions::core_modules::pixel_buffer::PixelBuffer;

pub const RED: [u8; 4] = [255, 0, 0, 255];
pub const BLUE: [u8; 4] = [0, 0, 255, 255];
pub const BLACK: [u8; 4] = [0, 0, 0, 255];

/// A width x height buffer filled with one color, row-major RGBA.
pub fn solid_rgba(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(width as usize * height as usize * 4);
    for _ in 0..(width * height) {
        bytes.extend_from_slice(&color);
    }
    bytes
}

/// Paints an axis-aligned rectangle into an existing RGBA buffer.
pub fn fill_rect(
    bytes: &mut [u8],
    image_width: u32,
    x0: u32,
    y0: u32,
    rect_width: u32,
    rect_height: u32,
    color: [u8; 4],
) {
    for y in y0..(y0 + rect_height) {
        for x in x0..(x0 + rect_width) {
            let byte_index = ((y * image_width + x) * 4) as usize;
            bytes[byte_index..byte_index + 4].copy_from_slice(&color);
        }
    }
}

/// A checkerboard of `color` over black: colored where (x + y) is even.
pub fn checkerboard_rgba(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let cell = if (x + y) % 2 == 0 { color } else { BLACK };
            bytes.extend_from_slice(&cell);
        }
    }
    bytes
}

/// Wraps raw bytes into a validated `PixelBuffer`.
pub fn pixel_buffer(width: u32, height: u32, bytes: &[u8]) -> PixelBuffer {
    PixelBuffer::from_raw(width, height, bytes).expect("synthetic buffer is valid")
}
